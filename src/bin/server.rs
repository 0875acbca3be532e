//! REST API server for the payment form engine.
//!
//! The server is stateless: the client sends the current form values and
//! error state with each request and gets the updated state back, the same
//! way a UI hands its state to the engine on every event.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! cardform-server
//!
//! # With custom address
//! cardform-server --host 127.0.0.1 --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::Query,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use card_form::mask::{mask_value, CardPreview};
use card_form::validate::{message_for, validate_field};
use card_form::{
    classify, format, validate_form, CardForm, Field, FieldError, FieldState, FormErrors,
};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Parser)]
#[command(name = "cardform-server")]
#[command(author, version, about = "REST API for payment form validation")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Form API",
        version = "0.1.0",
        description = "Payment form validation REST API. Network detection, display masking and dirty-tracked field validation. Work in progress - no auth or rate limiting.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Detection", description = "Card network detection"),
        (name = "Display", description = "Formatting and masking for display"),
        (name = "Validation", description = "Field and form validation"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        classify_handler,
        format_card,
        mask_handler,
        preview_handler,
        validate_field_handler,
        validate_form_handler,
        health,
    ),
    components(schemas(
        ClassifyQuery,
        ClassifyResponse,
        FormatRequest,
        FormatResponse,
        MaskRequest,
        MaskResponse,
        FormValues,
        PreviewResponse,
        FieldRequest,
        FieldResponse,
        FieldRecordBody,
        FormRequest,
        FormResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema, IntoParams)]
struct ClassifyQuery {
    /// Card number, digits only
    card: String,
}

#[derive(Serialize, ToSchema)]
struct ClassifyResponse {
    /// Detected network: visa, mastercard, amex, maestro, or empty when unknown
    network: String,
    /// Display name of the network
    name: String,
    /// Length of the security code for this network
    cvv_length: usize,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "1234123412341234"}))]
struct FormatRequest {
    /// Card number to format
    card_number: String,
}

#[derive(Serialize, ToSchema)]
struct FormatResponse {
    /// Card number in blocks of four
    formatted: String,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"value": "1", "length": 2, "placeholder": "MM"}))]
struct MaskRequest {
    /// Value typed so far
    value: String,
    /// Target length in characters
    length: usize,
    /// Placeholder to fill the remainder with (default: "*")
    #[serde(default = "default_placeholder")]
    placeholder: String,
}

fn default_placeholder() -> String {
    "*".to_string()
}

#[derive(Serialize, ToSchema)]
struct MaskResponse {
    /// Masked value
    masked: String,
}

/// The five form values. Missing fields are empty.
#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase", default)]
struct FormValues {
    card_number: String,
    card_holder: String,
    expiry_month: String,
    expiry_year: String,
    cvv: String,
}

impl FormValues {
    fn to_form(&self) -> CardForm {
        CardForm::new()
            .with(Field::CardNumber, self.card_number.as_str())
            .with(Field::CardHolder, self.card_holder.as_str())
            .with(Field::ExpiryMonth, self.expiry_month.as_str())
            .with(Field::ExpiryYear, self.expiry_year.as_str())
            .with(Field::Cvv, self.cvv.as_str())
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct PreviewResponse {
    /// Detected network id, empty when unknown
    network: String,
    /// Card number as shown in the input
    number_input: String,
    /// Masked card number
    number: String,
    /// Card holder name
    holder: String,
    /// Masked expiry (MM/YY)
    expiry: String,
    /// Masked security code
    cvv: String,
    /// Maximum security code length
    cvv_max_length: usize,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"field": "expiryMonth", "value": "13"}))]
struct FieldRequest {
    /// Field name: cardNumber, cardHolder, expiryMonth, expiryYear, cvv
    field: String,
    /// Field value
    value: String,
}

#[derive(Serialize, ToSchema)]
struct FieldResponse {
    /// Whether the value is valid
    valid: bool,
    /// User-facing message, empty when valid
    message: String,
}

/// Error state of one field, as sent and returned by the form endpoint.
#[derive(Serialize, Deserialize, ToSchema, Default, Clone)]
struct FieldRecordBody {
    /// Error message, empty when valid
    #[serde(default)]
    message: String,
    /// Whether the field has an error
    #[serde(default)]
    error: bool,
    /// Whether the field has been validated
    #[serde(default)]
    dirty: bool,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct FormRequest {
    /// Current form values
    #[serde(default)]
    form_state: FormValues,
    /// Current error state keyed by field name; missing fields are clean
    #[serde(default)]
    form_errors: std::collections::BTreeMap<String, FieldRecordBody>,
    /// Restrict re-validation to this dirty field
    #[serde(default)]
    field_name: Option<String>,
    /// Mark every field dirty and validate all (submit)
    #[serde(default)]
    force_validate: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct FormResponse {
    /// Updated error state keyed by field name
    errors: std::collections::BTreeMap<String, FieldRecordBody>,
    /// Whether no field holds an error
    is_valid: bool,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Detect the network of a card number
#[utoipa::path(
    get,
    path = "/classify",
    params(ClassifyQuery),
    responses(
        (status = 200, description = "Detected network", body = ClassifyResponse)
    ),
    tag = "Detection"
)]
async fn classify_handler(Query(query): Query<ClassifyQuery>) -> Json<ClassifyResponse> {
    let network = classify(&query.card);
    Json(ClassifyResponse {
        network: network.id().to_string(),
        name: network.name().to_string(),
        cvv_length: network.cvv_length(),
    })
}

/// Format a card number
#[utoipa::path(
    post,
    path = "/format",
    request_body = FormatRequest,
    responses(
        (status = 200, description = "Formatted card number", body = FormatResponse)
    ),
    tag = "Display"
)]
async fn format_card(Json(req): Json<FormatRequest>) -> Json<FormatResponse> {
    Json(FormatResponse {
        formatted: format::format_card_number(&req.card_number),
    })
}

/// Mask a value with a placeholder
#[utoipa::path(
    post,
    path = "/mask",
    request_body = MaskRequest,
    responses(
        (status = 200, description = "Masked value", body = MaskResponse),
        (status = 400, description = "Target length too large")
    ),
    tag = "Display"
)]
async fn mask_handler(
    Json(req): Json<MaskRequest>,
) -> Result<Json<MaskResponse>, (StatusCode, String)> {
    if req.length > 64 {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("length {} exceeds maximum of 64", req.length),
        ));
    }
    Ok(Json(MaskResponse {
        masked: mask_value(&req.value, req.length, &req.placeholder),
    }))
}

/// Card preview for the given form values
#[utoipa::path(
    post,
    path = "/preview",
    request_body = FormValues,
    responses(
        (status = 200, description = "Display strings", body = PreviewResponse)
    ),
    tag = "Display"
)]
async fn preview_handler(Json(values): Json<FormValues>) -> Json<PreviewResponse> {
    let preview = CardPreview::of(&values.to_form());
    Json(PreviewResponse {
        network: preview.network.id().to_string(),
        number_input: preview.number_input,
        number: preview.number,
        holder: preview.holder,
        expiry: preview.expiry,
        cvv: preview.cvv,
        cvv_max_length: preview.cvv_max_length,
    })
}

/// Validate a single field value
#[utoipa::path(
    post,
    path = "/validate/field",
    request_body = FieldRequest,
    responses(
        (status = 200, description = "Field validation result", body = FieldResponse),
        (status = 400, description = "Unknown field")
    ),
    tag = "Validation"
)]
async fn validate_field_handler(
    Json(req): Json<FieldRequest>,
) -> Result<Json<FieldResponse>, (StatusCode, String)> {
    let field: Field = req
        .field
        .parse()
        .map_err(|e: card_form::ParseFieldError| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let form = CardForm::new().with(field, req.value);
    let result = validate_field(field, &form);

    Ok(Json(FieldResponse {
        valid: result.is_ok(),
        message: message_for(result).to_string(),
    }))
}

/// Run one validation pass over the form
#[utoipa::path(
    post,
    path = "/validate/form",
    request_body = FormRequest,
    responses(
        (status = 200, description = "Updated error state", body = FormResponse),
        (status = 400, description = "Unknown field name or error message")
    ),
    tag = "Validation"
)]
async fn validate_form_handler(
    Json(req): Json<FormRequest>,
) -> Result<Json<FormResponse>, (StatusCode, String)> {
    let bad_request = |e: card_form::ParseFieldError| (StatusCode::BAD_REQUEST, e.to_string());

    let field = req
        .field_name
        .as_deref()
        .map(str::parse::<Field>)
        .transpose()
        .map_err(bad_request)?;

    let form = req.form_state.to_form();
    let mut errors = FormErrors::new();
    for (name, record) in &req.form_errors {
        let field: Field = name.parse().map_err(bad_request)?;
        let state =
            state_from_record(field, record).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
        errors.set(field, state);
    }

    let outcome = validate_form(&form, &errors, field, req.force_validate);
    tracing::info!(
        field = ?field,
        force = req.force_validate,
        is_valid = outcome.is_valid,
        "form validated"
    );

    let errors = outcome
        .errors
        .iter()
        .map(|(field, state)| {
            let record = state.record();
            (
                field.name().to_string(),
                FieldRecordBody {
                    message: record.message.to_string(),
                    error: record.error,
                    dirty: record.dirty,
                },
            )
        })
        .collect();

    Ok(Json(FormResponse {
        errors,
        is_valid: outcome.is_valid,
    }))
}

/// Rebuilds a field state from the record a client sent back.
///
/// A dirty record keeps its error as sent. The message must be one of the
/// messages this field can produce.
fn state_from_record(field: Field, record: &FieldRecordBody) -> Result<FieldState, String> {
    if !record.dirty {
        return Ok(FieldState::Clean);
    }
    if !record.error {
        return Ok(FieldState::Checked(None));
    }
    match FieldError::from_message(&record.message) {
        Some(error) if error.field() == field => Ok(FieldState::Checked(Some(error))),
        _ => Err(format!(
            "unknown error message for {}: '{}'",
            field,
            record.message.escape_default()
        )),
    }
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    // Build router with Swagger UI
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/classify", get(classify_handler))
        .route("/format", post(format_card))
        .route("/mask", post(mask_handler))
        .route("/preview", post(preview_handler))
        .route("/validate/field", post(validate_field_handler))
        .route("/validate/form", post(validate_form_handler))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", args.port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
