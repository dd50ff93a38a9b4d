//! agent-install-operator library crate
//!
//! Cluster installation validation for agent-based OpenShift installs:
//! feature support matrices, hardware requirement checks, finalizing stage
//! timeouts, and the AgentClusterInstall admission webhooks.

pub mod crd;
pub mod error;
pub mod featuresupport;
pub mod finalizing;
pub mod hardware;
pub mod models;
pub mod versions;
pub mod webhooks;

pub use error::{Error, Result};
pub use webhooks::{
    WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, run_webhook_server,
};
