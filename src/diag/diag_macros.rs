//! Leveled diagnostic macros over a [`DiagSink`](crate::diag::DiagSink).
//!
//! # Feature Flags
//! Specific levels are controlled by cargo features:
//! `log-trace`, `log-debug`, `log-info`, `log-warn`, `log-error`.
//!
//! If a feature is disabled, the corresponding macros expand to `()`, removing
//! all formatting and allocation overhead at compile time.

/// Generic worker macro; the level-specific macros below feed it.
#[macro_export]
macro_rules! diag_log {
    ($sink:expr, $lvl:expr, $($arg:tt)*) => {{
        let __msg = format!($($arg)*);
        $sink.log($lvl, &__msg, module_path!());
    }};
}

// ---------------------- TRACE ----------------------
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! diag_trace { ($sink:expr, $($arg:tt)*) => { $crate::diag_log!($sink, $crate::diag::DiagLevel::Trace, $($arg)*) } }

#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! diag_trace {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! diag_debug { ($sink:expr, $($arg:tt)*) => { $crate::diag_log!($sink, $crate::diag::DiagLevel::Debug, $($arg)*) } }

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! diag_debug {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! diag_info { ($sink:expr, $($arg:tt)*) => { $crate::diag_log!($sink, $crate::diag::DiagLevel::Info, $($arg)*) } }

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! diag_info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARN ----------------------
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! diag_warn { ($sink:expr, $($arg:tt)*) => { $crate::diag_log!($sink, $crate::diag::DiagLevel::Warn, $($arg)*) } }

#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! diag_warn {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- ERROR ----------------------
// Generally always enabled, but consistent structure allows disabling if really needed.
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! diag_error { ($sink:expr, $($arg:tt)*) => { $crate::diag_log!($sink, $crate::diag::DiagLevel::Error, $($arg)*) } }

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! diag_error {
    ($($arg:tt)*) => {
        ()
    };
}
