// Log events under the "sectionizer_adapter" target. Without the `tracing` feature every macro
// expands to nothing and its arguments are not evaluated, so use them as statements only.

#[cfg(feature = "tracing")]
macro_rules! log_at {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "sectionizer_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_at {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! vtrace {
    ($($tt:tt)*) => {
        log_at!(trace, $($tt)*)
    };
}

macro_rules! vdebug {
    ($($tt:tt)*) => {
        log_at!(debug, $($tt)*)
    };
}

macro_rules! vwarn {
    ($($tt:tt)*) => {
        log_at!(warn, $($tt)*)
    };
}
