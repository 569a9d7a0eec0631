//! One macro per severity. Each argument is rendered with `Display` and the
//! results are concatenated with no separator. Without a `logger:` argument
//! the process-wide instance is used.
//!
//! `log_warning!` and `log_error!` also record the call site (file, line and
//! enclosing function).

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        name.trim_end_matches("::{{closure}}")
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($logger:expr, $severity:expr, $($arg:expr),*) => {{
        let fragments: ::std::vec::Vec<::std::string::String> =
            ::std::vec![$(::std::string::ToString::to_string(&$arg)),*];
        $logger.log($severity, fragments)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($logger:expr, $severity:expr, $($arg:expr),*) => {{
        let fragments: ::std::vec::Vec<::std::string::String> =
            ::std::vec![$(::std::string::ToString::to_string(&$arg)),*];
        let site = $crate::CallSite {
            file: ::std::file!(),
            line: ::std::line!(),
            function: $crate::__function_name!(),
        };
        $logger.log_at($severity, &site, fragments)
    }};
}

/// Raw line: no timestamp, no tag, no color.
#[macro_export]
macro_rules! log_simple {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log!($logger, $crate::Severity::Simple, $($arg),*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log!($crate::instance(), $crate::Severity::Simple, $($arg),*)
    };
}

#[macro_export]
macro_rules! log_input {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log!($logger, $crate::Severity::Input, $($arg),*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log!($crate::instance(), $crate::Severity::Input, $($arg),*)
    };
}

#[macro_export]
macro_rules! log_result {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log!($logger, $crate::Severity::Result, $($arg),*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log!($crate::instance(), $crate::Severity::Result, $($arg),*)
    };
}

#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log!($logger, $crate::Severity::Info, $($arg),*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log!($crate::instance(), $crate::Severity::Info, $($arg),*)
    };
}

/// Warning prefixed with the call site.
#[macro_export]
macro_rules! log_warning {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, $crate::Severity::Warning, $($arg),*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log_at!($crate::instance(), $crate::Severity::Warning, $($arg),*)
    };
}

/// Error prefixed with the call site.
#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_at!($logger, $crate::Severity::Error, $($arg),*)
    };
    ($($arg:expr),* $(,)?) => {
        $crate::__log_at!($crate::instance(), $crate::Severity::Error, $($arg),*)
    };
}
