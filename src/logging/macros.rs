//! Logging macros. Each accepts an optional trailing list of `key => value`
//! context pairs, where the values may be any `Display` type.

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($span), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        let context_refs: Vec<(&str, &str)> =
            context_strings.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $crate::logging::log_error_with_context($code, $message, None, context_refs)
    }};
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        let context_refs: Vec<(&str, &str)> =
            context_strings.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $crate::logging::log_success_with_context($code, $message, context_refs)
    }};
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {{
        let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        let context_refs: Vec<(&str, &str)> =
            context_strings.iter().map(|(k, v)| (*k, v.as_str())).collect();
        $crate::logging::log_info_with_context($message, context_refs)
    }};
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {{
        if let Some(logger) = $crate::logging::try_get_global_logger() {
            logger.log_event($crate::logging::LogEvent::warning($message));
        }
    }};

    ($message:expr, $($key:expr => $value:expr),+) => {{
        let mut event = $crate::logging::LogEvent::warning($message);
        $(event = event.with_context($key, &format!("{}", $value));)+
        if let Some(logger) = $crate::logging::try_get_global_logger() {
            logger.log_event(event);
        }
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {{
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event($crate::logging::LogEvent::debug($message));
            }
        }
    }};

    ($message:expr, $($key:expr => $value:expr),+) => {{
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            let mut event = $crate::logging::LogEvent::debug($message);
            $(event = event.with_context($key, &format!("{}", $value));)+
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event(event);
            }
        }
    }};
}

#[macro_export]
macro_rules! log_success_event {
    ($code:expr, $message:expr, span = $span:expr) => {{
        let event = $crate::logging::LogEvent::success($code, $message).with_span($span);
        if let Some(logger) = $crate::logging::try_get_global_logger() {
            logger.log_event(event);
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    #[allow(dead_code)]
    fn example_usage() {
        let line_count: usize = 42;
        let tokens: usize = 5;

        log_error!(codes::parse::UNBALANCED_PARENS, "unbalanced parens",
            "line" => line_count
        );

        log_success!(codes::Code::new("I000"), "parse succeeded",
            "tokens" => tokens
        );

        log_info!("parsing query", "line" => line_count);

        log_warning!("unknown field code", "code" => "MeSH2");
    }
}
