/// Log through any [`Logger`](crate::Logger) at the given level.
///
/// Arguments are borrowed, not stringified, so nothing is formatted when the
/// level is disabled. A trailing error goes after a `;`:
///
/// ```ignore
/// plog!(Level::Warn, logger, "retrying {} after {}", name, attempt; err);
/// ```
#[macro_export]
macro_rules! plog {
    ($level:expr, $logger:expr, $template:expr $(, $arg:expr)* ; $err:expr) => (
        $crate::Logger::log(
            &$logger,
            $level,
            $template,
            &[$($crate::Argument::Value(&$arg),)* $crate::Argument::Error(&$err)],
        )
    );

    ($level:expr, $logger:expr, $template:expr $(, $arg:expr)* $(,)?) => (
        $crate::Logger::log(
            &$logger,
            $level,
            $template,
            &[$($crate::Argument::Value(&$arg)),*],
        )
    );
}

/// Log with [`Level::Error`](crate::Level::Error)
#[macro_export]
macro_rules! plog_error {
    ($logger:expr, $($t:tt)*) => (
        $crate::plog!($crate::Level::Error, $logger, $($t)*)
    )
}

/// Log with [`Level::Warn`](crate::Level::Warn)
#[macro_export]
macro_rules! plog_warn {
    ($logger:expr, $($t:tt)*) => (
        $crate::plog!($crate::Level::Warn, $logger, $($t)*)
    )
}

/// Log with [`Level::Info`](crate::Level::Info)
#[macro_export]
macro_rules! plog_info {
    ($logger:expr, $($t:tt)*) => (
        $crate::plog!($crate::Level::Info, $logger, $($t)*)
    )
}

/// Log with [`Level::Debug`](crate::Level::Debug)
#[macro_export]
macro_rules! plog_debug {
    ($logger:expr, $($t:tt)*) => (
        $crate::plog!($crate::Level::Debug, $logger, $($t)*)
    )
}

/// Log with [`Level::Trace`](crate::Level::Trace)
#[macro_export]
macro_rules! plog_trace {
    ($logger:expr, $($t:tt)*) => (
        $crate::plog!($crate::Level::Trace, $logger, $($t)*)
    )
}
