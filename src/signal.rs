//! Operator interrupt handling.

use tracing::warn;

/// Resolves when the operator presses Ctrl+C.
///
/// If the handler cannot be installed the future never resolves, so the
/// tool keeps running instead of stopping at once.
pub async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
