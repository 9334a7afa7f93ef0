//! HTTP handlers for registration endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::application::handlers::registration::{
    CreateOrderCommand, CreateOrderHandler, GetPaymentStatusHandler, GetPaymentStatusQuery,
    OrderPolicy, VerifyPaymentCommand, VerifyPaymentHandler,
};
use crate::domain::foundation::{ErrorCode, RegistrationId, Timestamp};
use crate::domain::registration::{FarmerDetails, PaymentSignatureVerifier, RegistrationError};
use crate::ports::{PaymentGateway, RegistrationRepository};

use super::dto::{CreateOrderResponse, ErrorResponse, OkResponse, VerifyPaymentRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct RegistrationAppState {
    pub registration_repository: Arc<dyn RegistrationRepository>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub signature_verifier: PaymentSignatureVerifier,
    pub order_policy: OrderPolicy,
    pub service_info: ServiceInfo,
}

/// Non-secret facts reported by the informational endpoints.
#[derive(Debug, Clone, Default)]
pub struct ServiceInfo {
    pub environment: String,
    pub gateway_key_configured: bool,
}

impl RegistrationAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.registration_repository.clone(),
            self.payment_gateway.clone(),
            self.order_policy.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.registration_repository.clone(),
            self.signature_verifier.clone(),
        )
    }

    pub fn payment_status_handler(&self) -> GetPaymentStatusHandler {
        GetPaymentStatusHandler::new(self.registration_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/create-order - Store the form and open a Razorpay order
pub async fn create_order(
    State(state): State<RegistrationAppState>,
    payload: Result<Json<FarmerDetails>, JsonRejection>,
) -> Result<impl IntoResponse, RegistrationApiError> {
    let Json(details) = payload?;
    let handler = state.create_order_handler();
    let result = handler
        .handle(CreateOrderCommand { details })
        .await
        .map_err(RegistrationApiError::create_order)?;

    Ok(Json(CreateOrderResponse {
        order: result.order,
        registration_id: result.registration_id,
    }))
}

/// POST /api/verify-payment - Verify a Razorpay payment report
pub async fn verify_payment(
    State(state): State<RegistrationAppState>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RegistrationApiError> {
    let Json(request) = payload?;
    let registration_id = parse_registration_id(&request.registration_id)
        .map_err(RegistrationApiError::verify_payment)?;

    let handler = state.verify_payment_handler();
    handler
        .handle(VerifyPaymentCommand {
            registration_id,
            order_id: request.razorpay_order_id,
            payment_id: request.razorpay_payment_id,
            signature: request.razorpay_signature,
        })
        .await
        .map_err(RegistrationApiError::verify_payment)?;

    Ok(Json(OkResponse::ok()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/registrations/:id/payment - Payment state of a registration
pub async fn get_payment_status(
    State(state): State<RegistrationAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, RegistrationApiError> {
    let registration_id = parse_registration_id(&id)?;

    let handler = state.payment_status_handler();
    let view = handler
        .handle(GetPaymentStatusQuery { registration_id })
        .await?;

    Ok(Json(view))
}

/// GET / - Service information
pub async fn service_info() -> impl IntoResponse {
    Json(json!({
        "message": "Farm registration payment service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "GET /health",
            "test": "GET /api/test",
            "createOrder": "POST /api/create-order",
            "verifyPayment": "POST /api/verify-payment",
            "paymentStatus": "GET /api/registrations/:id/payment"
        },
        "timestamp": Timestamp::now().to_rfc3339(),
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(OkResponse::ok())
}

/// GET /api/test - Connectivity probe; never reports secrets
pub async fn api_test(State(state): State<RegistrationAppState>) -> impl IntoResponse {
    Json(json!({
        "message": "API is working",
        "razorpayConfigured": state.service_info.gateway_key_configured,
        "environment": state.service_info.environment,
        "timestamp": Timestamp::now().to_rfc3339(),
    }))
}

/// Malformed ids cannot name a stored registration.
fn parse_registration_id(raw: &str) -> Result<RegistrationId, RegistrationError> {
    raw.trim()
        .parse()
        .map_err(|_| RegistrationError::not_found(raw))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts registration errors to HTTP responses.
///
/// Workflow errors carry the client-facing message used when the failure is
/// unexpected, which differs per endpoint.
#[derive(Debug)]
pub enum RegistrationApiError {
    Registration {
        error: RegistrationError,
        failure_message: &'static str,
    },
    /// The request body was not JSON of the expected shape.
    InvalidBody(JsonRejection),
}

impl RegistrationApiError {
    pub fn create_order(error: RegistrationError) -> Self {
        Self::Registration {
            error,
            failure_message: "Failed to create order",
        }
    }

    pub fn verify_payment(error: RegistrationError) -> Self {
        Self::Registration {
            error,
            failure_message: "Verification failed",
        }
    }

    pub fn error(&self) -> Option<&RegistrationError> {
        match self {
            Self::Registration { error, .. } => Some(error),
            Self::InvalidBody(_) => None,
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        let (error, failure_message) = match self {
            Self::Registration {
                error,
                failure_message,
            } => (error, *failure_message),
            Self::InvalidBody(rejection) => {
                let status = rejection.status();
                let message = match status {
                    StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => "Expected a JSON request body",
                    _ => "Invalid request body",
                };
                return (status, message.to_string());
            }
        };

        match error {
            RegistrationError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "Registration not found".to_string())
            }
            RegistrationError::OrderMismatch { .. } => {
                (StatusCode::BAD_REQUEST, "Order mismatch".to_string())
            }
            RegistrationError::InvalidSignature { .. } => {
                (StatusCode::BAD_REQUEST, "Signature invalid".to_string())
            }
            RegistrationError::ValidationFailed { field, .. } => (
                StatusCode::BAD_REQUEST,
                format!("Missing or invalid field: {}", field),
            ),
            RegistrationError::AlreadyPaid { .. } => {
                (StatusCode::CONFLICT, "Registration already paid".to_string())
            }
            RegistrationError::InvalidState { .. } => (
                StatusCode::CONFLICT,
                "Registration is not awaiting payment".to_string(),
            ),
            RegistrationError::ConcurrentModification(_) => (
                StatusCode::CONFLICT,
                "Registration was modified concurrently, retry".to_string(),
            ),
            RegistrationError::OrderCreationFailed(_) | RegistrationError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                failure_message.to_string(),
            ),
        }
    }

    fn code(&self) -> String {
        match self {
            Self::InvalidBody(_) => ErrorCode::InvalidRequestBody.to_string(),
            Self::Registration {
                error: RegistrationError::Infrastructure(_),
                ..
            } => ErrorCode::InternalError.to_string(),
            Self::Registration { error, .. } => error.code().to_string(),
        }
    }
}

impl From<RegistrationError> for RegistrationApiError {
    fn from(error: RegistrationError) -> Self {
        Self::Registration {
            error,
            failure_message: "Internal server error",
        }
    }
}

impl From<JsonRejection> for RegistrationApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl IntoResponse for RegistrationApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            Self::Registration { error, .. } if !error.is_expected() => {
                tracing::error!(error = %error, "Registration request failed");
            }
            Self::InvalidBody(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    reason = %rejection.body_text(),
                    "Rejected request body"
                );
            }
            Self::Registration { .. } => {}
        }

        let (status, message) = self.status_and_message();
        let body = ErrorResponse::new(message, self.code());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRegistrationRepository;
    use crate::adapters::razorpay::MockPaymentGateway;
    use crate::domain::registration::details::complete_details;
    use crate::domain::registration::PaymentStatus;
    use crate::ports::PaymentGatewayError;
    use secrecy::SecretString;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    struct Fixture {
        state: RegistrationAppState,
        repository: Arc<InMemoryRegistrationRepository>,
        gateway: Arc<MockPaymentGateway>,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryRegistrationRepository::new());
        let gateway = Arc::new(MockPaymentGateway::new());
        let state = RegistrationAppState {
            registration_repository: repository.clone(),
            payment_gateway: gateway.clone(),
            signature_verifier: PaymentSignatureVerifier::new(SecretString::new(
                "s3cr3t".to_string(),
            )),
            order_policy: OrderPolicy::default(),
            service_info: ServiceInfo {
                environment: "development".to_string(),
                gateway_key_configured: true,
            },
        };
        Fixture {
            state,
            repository,
            gateway,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let id = RegistrationId::new();
        let response = RegistrationApiError::verify_payment(RegistrationError::not_found(id))
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Registration not found");
        assert_eq!(body["code"], "REGISTRATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn order_mismatch_and_bad_signature_map_to_400() {
        let id = RegistrationId::new();

        let response = RegistrationApiError::verify_payment(RegistrationError::order_mismatch(id))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Order mismatch");

        let response =
            RegistrationApiError::verify_payment(RegistrationError::invalid_signature(id))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Signature invalid");
        assert_eq!(body["code"], "INVALID_SIGNATURE");
    }

    #[tokio::test]
    async fn unexpected_failures_use_endpoint_message() {
        let response = RegistrationApiError::create_order(
            RegistrationError::order_creation_failed("Gateway rejected credentials"),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to create order");
        assert_eq!(body["code"], "PAYMENT_GATEWAY_ERROR");

        let response =
            RegistrationApiError::verify_payment(RegistrationError::infrastructure("pool timed out"))
                .into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "Verification failed");
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn conflicts_map_to_409() {
        let id = RegistrationId::new();
        for error in [
            RegistrationError::already_paid(id),
            RegistrationError::concurrent_modification(id),
            RegistrationError::invalid_state("paid", "mark failed"),
        ] {
            let response = RegistrationApiError::verify_payment(error).into_response();
            assert_eq!(response.status(), StatusCode::CONFLICT);
        }
    }

    #[tokio::test]
    async fn validation_failure_names_field() {
        let response = RegistrationApiError::create_order(RegistrationError::validation(
            "email",
            "Field cannot be empty",
        ))
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing or invalid field: email");
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(
            parse_registration_id("not-a-uuid"),
            Err(RegistrationError::NotFound(raw)) if raw == "not-a-uuid"
        ));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_order_returns_order_and_registration_id() {
        let fixture = fixture();
        fixture.gateway.set_next_order_id("order_abc");

        let response = create_order(State(fixture.state.clone()), Ok(Json(complete_details())))
            .await
            .map(IntoResponse::into_response)
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["order"]["id"], "order_abc");
        assert_eq!(body["order"]["amount"], 30000);
        assert!(body["registrationId"].is_string());
        assert_eq!(fixture.repository.count().await, 1);
    }

    #[tokio::test]
    async fn create_order_gateway_failure_is_500() {
        let fixture = fixture();
        fixture
            .gateway
            .set_error(PaymentGatewayError::network("connection reset"));

        let error = create_order(State(fixture.state.clone()), Ok(Json(complete_details())))
            .await
            .err()
            .unwrap();

        assert!(matches!(
            error.error(),
            Some(RegistrationError::OrderCreationFailed(_))
        ));
        let stored = fixture.repository.all().await;
        assert_eq!(stored[0].payment_status, PaymentStatus::OrderFailed);
    }

    #[tokio::test]
    async fn verify_payment_accepts_valid_signature() {
        let fixture = fixture();
        fixture.gateway.set_next_order_id("order_abc");
        let created = fixture
            .state
            .create_order_handler()
            .handle(CreateOrderCommand {
                details: complete_details(),
            })
            .await
            .unwrap();

        let request = VerifyPaymentRequest {
            registration_id: created.registration_id.to_string(),
            razorpay_order_id: "order_abc".to_string(),
            razorpay_payment_id: "pay_123".to_string(),
            razorpay_signature: fixture.state.signature_verifier.sign("order_abc", "pay_123"),
        };

        let response = verify_payment(State(fixture.state.clone()), Ok(Json(request)))
            .await
            .map(IntoResponse::into_response)
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn verify_payment_with_malformed_id_is_not_found() {
        let fixture = fixture();
        let request = VerifyPaymentRequest {
            registration_id: "bogus".to_string(),
            ..Default::default()
        };

        let response = verify_payment(State(fixture.state), Ok(Json(request)))
            .await
            .map(IntoResponse::into_response)
            .unwrap_or_else(IntoResponse::into_response);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_test_reports_configuration_without_secret() {
        let fixture = fixture();

        let response = api_test(State(fixture.state)).await.into_response();
        let body = body_json(response).await;

        assert_eq!(body["razorpayConfigured"], true);
        assert_eq!(body["environment"], "development");
        assert!(!body.to_string().contains("s3cr3t"));
    }
}
