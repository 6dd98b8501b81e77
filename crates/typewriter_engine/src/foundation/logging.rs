//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`; later calls are no-ops
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize logging with a default level that `RUST_LOG` can still override
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init();
        init_with_level(log::LevelFilter::Debug);
        init_with_level(log::LevelFilter::Info);
        info!("logging initialized twice");
    }
}
