//! Webhook module for admission requests.
//!
//! This module provides the AgentClusterInstall admission webhooks:
//! - Mutating: defaults spec.networking.userManagedNetworking
//! - Validating, with tiered policies:
//!   - Tier 1 (Critical): Always enforced (networking topology rules)
//!   - Tier 2 (Update): Only on UPDATE operations (immutability)

pub mod policies;
mod server;

pub use policies::{ValidationContext, ValidationResult};
pub use server::{
    WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, WebhookState,
    create_webhook_router, default_networking_patch, run_webhook_server,
};

// Re-export kube-rs admission types for contract testing
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
