use tracing_subscriber::EnvFilter;

use crate::error::{AuditError, Result};

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr fmt subscriber.
///
/// The filter comes from `filter`, else `RUST_LOG`, else `warn`. Only one
/// subscriber can be installed per process; later calls fail.
pub fn init(filter: Option<&str>) -> Result<()> {
    let filter = match filter {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|e| AuditError::Logging(e.to_string()))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AuditError::Logging(e.to_string()))
}
