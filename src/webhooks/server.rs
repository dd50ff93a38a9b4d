//! Admission webhook server.
//!
//! Provides HTTP endpoints for Kubernetes admission webhooks.
//!
//! To enable webhooks:
//! 1. Deploy cert-manager for TLS certificates
//! 2. Create the MutatingWebhookConfiguration and ValidatingWebhookConfiguration
//! 3. Mount the TLS certificate secret to the operator pod at /etc/webhook/certs/
//!
//! The webhook server starts automatically when certificates are present.
//! Denying unreachable-webhook requests is the API server's job via
//! failurePolicy in the webhook configuration.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use json_patch::{AddOperation, PatchOperation};
use jsonptr::PointerBuf;
use kube::Client;
use kube::Resource;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::crd::AgentClusterInstall;
use crate::webhooks::policies::{ValidationContext, defaulting, validate_all};

/// Default path to webhook TLS certificate
pub const WEBHOOK_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";
/// Default path to webhook TLS private key
pub const WEBHOOK_KEY_PATH: &str = "/etc/webhook/certs/tls.key";
/// Default webhook server port
pub const WEBHOOK_PORT: u16 = 9443;

/// Shared state for webhook handlers
pub struct WebhookState {
    #[allow(dead_code)]
    pub client: Client,
}

impl WebhookState {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Create a denial response with reason embedded in message.
/// kube-rs deny() only sets status.message, so we format as "[reason] message"
fn deny_with_reason<T: Resource<DynamicType = ()>>(
    request: &AdmissionRequest<T>,
    message: &str,
    reason: &str,
) -> AdmissionReview<kube::core::DynamicObject> {
    let full_message = format!("[{}] {}", reason, message);
    AdmissionResponse::from(request)
        .deny(full_message)
        .into_review()
}

/// Build the mutating patch that writes `value` into
/// `spec.networking.userManagedNetworking`. The whole networking block is
/// replaced so the patch also works when the stored object omits it.
pub fn default_networking_patch(
    resource: &AgentClusterInstall,
    value: bool,
) -> Result<json_patch::Patch, serde_json::Error> {
    let mut networking = resource.spec.networking.clone();
    networking.user_managed_networking = Some(value);
    let networking_value = serde_json::to_value(&networking)?;
    Ok(json_patch::Patch(vec![PatchOperation::Add(AddOperation {
        path: PointerBuf::from_tokens(["spec", "networking"]),
        value: networking_value,
    })]))
}

/// Create the webhook router
pub fn create_webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route(
            "/mutate-extensions-hive-openshift-io-v1beta1-agentclusterinstall",
            post(mutate_agentclusterinstall),
        )
        .route(
            "/validate-extensions-hive-openshift-io-v1beta1-agentclusterinstall",
            post(validate_agentclusterinstall),
        )
        .with_state(state)
}

/// Mutating admission handler: defaults
/// spec.networking.userManagedNetworking for topologies that require it.
async fn mutate_agentclusterinstall(
    State(_state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<AgentClusterInstall>>,
) -> impl IntoResponse {
    let request: AdmissionRequest<AgentClusterInstall> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to extract admission request");
            return (
                StatusCode::BAD_REQUEST,
                Json(
                    AdmissionResponse::invalid(format!("Invalid AdmissionReview: {}", e))
                        .into_review(),
                ),
            );
        }
    };

    let uid = &request.uid;
    if request.operation == Operation::Delete {
        return (
            StatusCode::OK,
            Json(AdmissionResponse::from(&request).into_review()),
        );
    }

    let Some(resource) = &request.object else {
        error!(uid = %uid, "Missing object in request");
        return (
            StatusCode::OK,
            Json(deny_with_reason(
                &request,
                "Missing object in request",
                "InvalidRequest",
            )),
        );
    };

    let Some(value) = defaulting::default_user_managed_networking(resource) else {
        debug!(uid = %uid, "No defaulting applies");
        return (
            StatusCode::OK,
            Json(AdmissionResponse::from(&request).into_review()),
        );
    };

    let patch = match default_networking_patch(resource, value) {
        Ok(patch) => patch,
        Err(e) => {
            error!(uid = %uid, error = %e, "Failed to serialize networking patch");
            return (
                StatusCode::OK,
                Json(
                    AdmissionResponse::invalid(format!("Failed to build patch: {}", e))
                        .into_review(),
                ),
            );
        }
    };

    match AdmissionResponse::from(&request).with_patch(patch) {
        Ok(response) => {
            info!(uid = %uid, value, "Defaulted userManagedNetworking");
            (StatusCode::OK, Json(response.into_review()))
        }
        Err(e) => {
            error!(uid = %uid, error = %e, "Failed to attach admission patch");
            (
                StatusCode::OK,
                Json(
                    AdmissionResponse::invalid(format!("Failed to build patch: {}", e))
                        .into_review(),
                ),
            )
        }
    }
}

/// Validating admission handler for AgentClusterInstall.
async fn validate_agentclusterinstall(
    State(_state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<AgentClusterInstall>>,
) -> impl IntoResponse {
    let request: AdmissionRequest<AgentClusterInstall> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to extract admission request");
            return (
                StatusCode::BAD_REQUEST,
                Json(
                    AdmissionResponse::invalid(format!("Invalid AdmissionReview: {}", e))
                        .into_review(),
                ),
            );
        }
    };

    let uid = &request.uid;
    debug!(
        uid = %uid,
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = ?request.name,
        "Processing admission request"
    );

    // DELETE operations are always allowed
    if request.operation == Operation::Delete {
        info!(uid = %uid, "Admission request allowed (DELETE)");
        return (
            StatusCode::OK,
            Json(AdmissionResponse::from(&request).into_review()),
        );
    }

    let resource: AgentClusterInstall = match &request.object {
        Some(obj) => obj.clone(),
        None => {
            error!(uid = %uid, "Missing object in request");
            return (
                StatusCode::OK,
                Json(deny_with_reason(
                    &request,
                    "Missing object in request",
                    "InvalidRequest",
                )),
            );
        }
    };

    let old_resource: Option<AgentClusterInstall> = request.old_object.clone();

    let ctx = ValidationContext {
        resource: &resource,
        old_resource: old_resource.as_ref(),
        dry_run: request.dry_run,
        namespace: request.namespace.as_deref(),
    };

    let result = validate_all(&ctx);

    if !result.allowed {
        let reason = result
            .reason
            .unwrap_or_else(|| "ValidationFailed".to_string());
        let message = result
            .message
            .unwrap_or_else(|| "Validation failed".to_string());
        warn!(uid = %uid, reason = %reason, message = %message, "Admission request denied");
        return (
            StatusCode::OK,
            Json(deny_with_reason(&request, &message, &reason)),
        );
    }

    info!(uid = %uid, "Admission request allowed");
    (
        StatusCode::OK,
        Json(AdmissionResponse::from(&request).into_review()),
    )
}

/// Errors that can occur when running the webhook server
#[derive(Debug)]
pub enum WebhookError {
    /// TLS configuration error
    TlsConfig(String),
    /// Server error
    Server(String),
}

impl std::fmt::Display for WebhookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookError::TlsConfig(msg) => write!(f, "TLS configuration error: {}", msg),
            WebhookError::Server(msg) => write!(f, "Webhook server error: {}", msg),
        }
    }
}

impl std::error::Error for WebhookError {}

/// Run the webhook server with TLS
///
/// Binds to 0.0.0.0:9443 and serves the mutating and validating
/// AgentClusterInstall endpoints. TLS certificates are loaded from the
/// paths specified.
pub async fn run_webhook_server(
    client: Client,
    cert_path: &str,
    key_path: &str,
) -> Result<(), WebhookError> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let state = Arc::new(WebhookState::new(client));
    let app = create_webhook_router(state);

    let config = RustlsConfig::from_pem_file(PathBuf::from(cert_path), PathBuf::from(key_path))
        .await
        .map_err(|e| WebhookError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], WEBHOOK_PORT));
    info!(port = WEBHOOK_PORT, "Webhook server listening with TLS");

    axum_server::bind_rustls(addr, config)
        .serve(app.into_make_service())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()))?;

    Ok(())
}
