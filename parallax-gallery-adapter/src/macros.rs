#[cfg(feature = "tracing")]
macro_rules! atrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "parallax_gallery_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! atrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! adebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "parallax_gallery_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adebug {
    ($($tt:tt)*) => {};
}
