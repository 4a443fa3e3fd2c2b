pub mod google;
pub mod traits;
pub mod util;
pub(crate) mod sse;

// Re-exports for convenience.
pub use google::GoogleProvider;
pub use traits::{ChatRequest, ChatResponse, LlmProvider};

use sg_domain::config::{LlmConfig, ProviderKind};
use sg_domain::error::Result;
use std::sync::Arc;

/// Build the configured provider.
///
/// Fails when the credential cannot be resolved, which is what makes the
/// application refuse to start a survey session without one.
pub fn from_config(cfg: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    match cfg.provider.kind {
        ProviderKind::Google => Ok(Arc::new(GoogleProvider::from_config(
            &cfg.provider,
            std::time::Duration::from_secs(cfg.timeout_secs),
        )?)),
    }
}
