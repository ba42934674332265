/// A leading + trailing edge rate limiter driven by caller-supplied time.
///
/// At most one invocation runs per `wait_ms` window:
/// - The first call in an idle window runs immediately (leading edge).
/// - Later calls inside the window are coalesced into a single pending trailing call that
///   carries the latest arguments and fires at the window's end.
///
/// The throttle does not own a timer. Adapters call [`Throttle::poll`] from their tick and can use
/// [`Throttle::deadline`] to schedule a wake-up.
#[derive(Clone, Debug)]
pub struct Throttle<A> {
    wait_ms: u64,
    last_invoke_ms: Option<u64>,
    pending: Option<A>,
}

impl<A> Throttle<A> {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            last_invoke_ms: None,
            pending: None,
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    pub fn set_wait_ms(&mut self, wait_ms: u64) {
        self.wait_ms = wait_ms;
    }

    fn window_end(&self) -> Option<u64> {
        self.last_invoke_ms
            .map(|last| last.saturating_add(self.wait_ms))
    }

    /// Offers a call. Returns the args back when they should run now.
    pub fn call(&mut self, now_ms: u64, args: A) -> Option<A> {
        match self.window_end() {
            Some(end) if now_ms < end => {
                self.pending = Some(args);
                None
            }
            _ => {
                // An overdue trailing call is superseded by the newer args.
                self.pending = None;
                self.last_invoke_ms = Some(now_ms);
                Some(args)
            }
        }
    }

    /// When the pending trailing call is due, if there is one.
    pub fn deadline(&self) -> Option<u64> {
        if self.pending.is_some() {
            self.window_end()
        } else {
            None
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fires the trailing call if it is due.
    pub fn poll(&mut self, now_ms: u64) -> Option<A> {
        let due = self.deadline()?;
        if now_ms < due {
            return None;
        }
        self.last_invoke_ms = Some(due);
        self.pending.take()
    }

    /// Drops any pending call and forgets the current window.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_invoke_ms = None;
    }
}
