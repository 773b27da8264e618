use log::{debug, error, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger(level: log::LevelFilter) {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .filter_module("culturastock_lib", log::LevelFilter::Debug) // More verbose for our app
            .filter_module("tokio", log::LevelFilter::Warn) // Reduce tokio noise
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log document store operations
    pub fn store_operation(operation: &str, collection: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!(
                "Store: {} on {} completed in {}ms",
                operation, collection, duration
            ),
            None => debug!("Store: Starting {} on {}", operation, collection),
        }
    }

    /// Log search/filter operations
    pub fn search_operation(scope: &str, term: &str, results: Option<usize>) {
        match results {
            Some(r) => debug!("Search: '{}' in {} returned {} results", term, scope, r),
            None => debug!("Search: Starting '{}' in {}", term, scope),
        }
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, None);
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}
