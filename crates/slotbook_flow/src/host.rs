use slotbook_common::{HostBridge, HostError, HostMessage};
use tracing::info;

/// Host bridge for headless runs: every request is logged and accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHost;

impl HostBridge for LogHost {
    fn post_message(&self, message: &HostMessage, target_origin: &str) -> Result<(), HostError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| HostError::Refused(e.to_string()))?;
        info!("postMessage {} to origin {}", payload, target_origin);
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<(), HostError> {
        info!("Navigating to {}", url);
        Ok(())
    }

    fn open_external(&self, url: &str) -> Result<(), HostError> {
        info!("Opening {} in a new tab", url);
        Ok(())
    }
}
