/// A cross-fade between two background layers.
///
/// `from`/`to` are background indexes. The incoming layer is drawn with opacity
/// `progress(now)` and the outgoing one with `1 - progress(now)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossfade {
    pub from: usize,
    pub to: usize,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Crossfade {
    pub fn new(from: usize, to: usize, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.easing.sample(t)
    }

    pub fn sample(&self, now_ms: u64) -> CrossfadeSample {
        let p = self.progress(now_ms);
        CrossfadeSample {
            outgoing: self.from,
            incoming: self.to,
            outgoing_opacity: 1.0 - p,
            incoming_opacity: p,
        }
    }

    /// Redirects a running fade to a new target.
    ///
    /// Whichever layer is currently more opaque becomes the outgoing layer, so a mid-fade
    /// retarget never snaps back to a background that was already mostly gone.
    ///
    /// Partial opacity is not carried over: the new fade starts with the outgoing layer fully
    /// opaque, and the less visible of the two old layers is dropped at once. When that leaves
    /// `from == to` there is nothing left to fade and callers should discard the fade.
    pub fn retarget(&mut self, now_ms: u64, new_to: usize, duration_ms: u64) {
        let from = if self.progress(now_ms) >= 0.5 {
            self.to
        } else {
            self.from
        };
        *self = Self::new(from, new_to, now_ms, duration_ms, self.easing);
    }
}

/// Opacities for the two layers at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossfadeSample {
    pub outgoing: usize,
    pub incoming: usize,
    pub outgoing_opacity: f32,
    pub incoming_opacity: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
