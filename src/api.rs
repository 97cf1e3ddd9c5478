//! HTTP API for the Purchase Engine.
//!
//! This module exposes the validators and business helpers as a small
//! JSON API using the [`axum`](https://crates.io/crates/axum) framework,
//! so the dashboard's submit handlers can call them before posting to
//! the backend.  Validation outcomes are always answered with `200` and
//! a [`ValidationResult`] body; a form with errors is not an HTTP
//! failure.

use crate::business::{
    calculate_return_total, generate_return_reference, get_recommended_refund_amount,
    should_autofill_refund,
};
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::engine::{check_purchases, PurchaseBatchInput, PurchaseBatchResult};
use crate::error::EngineError;
use crate::models::{
    Purchase, PurchaseFormData, PurchaseReturnFormData, ReturnItemInput, Sku, SupplierResponse,
    ValidationResult,
};
use crate::validation::{validate_purchase_form, validate_purchase_return_form};
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Application state shared across requests.
pub struct AppState {
    pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseValidationRequest {
    pub form: PurchaseFormData,
    #[serde(default)]
    pub skus: Vec<Sku>,
    #[serde(default)]
    pub supplier: Option<SupplierResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ReturnValidationRequest {
    pub form: PurchaseReturnFormData,
    #[serde(default)]
    pub original_purchase: Option<Purchase>,
    #[serde(default)]
    pub skus: Vec<Sku>,
}

#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub items: Vec<ReturnItemInput>,
    #[serde(default)]
    pub original_purchase: Option<Purchase>,
    /// The refund currently entered on the form, if any.
    #[serde(default)]
    pub current_refund: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RefundResponse {
    pub recommended_refund: f64,
    pub return_total: f64,
    /// Whether the form should replace its refund field with the
    /// recommendation.
    pub autofill: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReturnReferenceRequest {
    #[serde(default)]
    pub original_purchase: Option<Purchase>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceResponse {
    pub reference_number: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Build the API router around the given clock.
pub fn build_router(clock: Arc<dyn Clock>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState { clock });
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/purchases/validate", post(validate_purchase_handler))
        .route("/api/purchases/check", post(check_purchases_handler))
        .route("/api/returns/validate", post(validate_return_handler))
        .route("/api/returns/recommended-refund", post(recommended_refund_handler))
        .route("/api/returns/reference", post(return_reference_handler))
        .with_state(state.clone());
    (router, state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Handler for POST /api/purchases/validate
pub async fn validate_purchase_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<PurchaseValidationRequest>,
) -> Json<ValidationResult> {
    Json(validate_purchase_form(
        &request.form,
        &request.skus,
        request.supplier.as_ref(),
        app_state.clock.as_ref(),
    ))
}

/// Handler for POST /api/purchases/check
///
/// Batch checks are CPU-bound, so they run on the blocking pool.
pub async fn check_purchases_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<PurchaseBatchInput>,
) -> Result<Json<PurchaseBatchResult>, ApiError> {
    let clock = app_state.clock.clone();
    tokio::task::spawn_blocking(move || check_purchases(&input, clock.as_ref()))
        .await
        .map(Json)
        .map_err(|err| {
            error!(error = %err, "purchase batch check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
        })
}

/// Handler for POST /api/returns/validate
pub async fn validate_return_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ReturnValidationRequest>,
) -> Json<ValidationResult> {
    Json(validate_purchase_return_form(
        &request.form,
        request.original_purchase.as_ref(),
        &request.skus,
        app_state.clock.as_ref(),
    ))
}

/// Handler for POST /api/returns/recommended-refund
pub async fn recommended_refund_handler(Json(request): Json<RefundRequest>) -> Json<RefundResponse> {
    let recommended_refund =
        get_recommended_refund_amount(&request.items, request.original_purchase.as_ref());
    let autofill = request.original_purchase.is_some()
        && should_autofill_refund(request.current_refund.unwrap_or(0.0), &request.items);
    Json(RefundResponse {
        recommended_refund,
        return_total: calculate_return_total(&request.items),
        autofill,
    })
}

/// Handler for POST /api/returns/reference
pub async fn return_reference_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ReturnReferenceRequest>,
) -> Json<ReferenceResponse> {
    Json(ReferenceResponse {
        reference_number: generate_return_reference(
            request.original_purchase.as_ref(),
            app_state.clock.as_ref(),
        ),
    })
}

/// Launch the API server on the configured address.  Blocks until the
/// server terminates.
pub async fn serve(config: &EngineConfig, clock: Arc<dyn Clock>) -> Result<()> {
    let (router, _state) = build_router(clock);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(EngineError::from)?;
    info!(addr = %config.bind_addr, "purchase engine listening");
    axum::serve(listener, router).await?;
    Ok(())
}
