//! Batch purchase checking.
//!
//! The `engine` module turns a [`PurchaseBatchInput`] (several purchase
//! submissions sharing one SKU catalogue) into a
//! [`PurchaseBatchResult`].  Submissions are independent, so each is
//! validated and priced in parallel with [`rayon`]; results keep the
//! input order.

use crate::business::{
    calculate_purchase_total, generate_purchase_reference, should_warn_about_supplier,
};
use crate::clock::Clock;
use crate::models::{PurchaseFormData, Sku, SupplierResponse, SupplierWarning, ValidationResult};
use crate::validation::validate_purchase_form;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One purchase form together with the supplier selected on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseSubmission {
    pub form: PurchaseFormData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<SupplierResponse>,
}

/// Input to a batch check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseBatchInput {
    pub submissions: Vec<PurchaseSubmission>,
    /// SKU catalogue shared by every submission.
    #[serde(default)]
    pub skus: Vec<Sku>,
}

/// The outcome for a single submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseCheck {
    pub validation: ValidationResult,
    /// Unrounded sum of the submission's lines.
    pub total_amount: f64,
    /// Reference code to send with the purchase; only issued when the
    /// submission is valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_warning: Option<SupplierWarning>,
}

/// The aggregate result of a batch check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseBatchResult {
    pub checks: Vec<PurchaseCheck>,
    pub valid_count: usize,
    /// Sum of `total_amount` over the valid submissions.
    pub valid_total_amount: f64,
}

/// Validates and prices one submission.
pub fn check_purchase(
    submission: &PurchaseSubmission,
    skus: &[Sku],
    clock: &dyn Clock,
) -> PurchaseCheck {
    let supplier = submission.supplier.as_ref();
    let validation = validate_purchase_form(&submission.form, skus, supplier, clock);
    let reference_number = validation
        .is_valid
        .then(|| generate_purchase_reference(supplier, clock));
    PurchaseCheck {
        total_amount: calculate_purchase_total(&submission.form.items),
        reference_number,
        supplier_warning: supplier.map(should_warn_about_supplier),
        validation,
    }
}

/// Checks every submission of a batch in parallel.
pub fn check_purchases(input: &PurchaseBatchInput, clock: &dyn Clock) -> PurchaseBatchResult {
    let checks: Vec<PurchaseCheck> = input
        .submissions
        .par_iter()
        .map(|submission| check_purchase(submission, &input.skus, clock))
        .collect();

    let (valid_count, valid_total_amount) = checks
        .iter()
        .filter(|check| check.validation.is_valid)
        .fold((0, 0.0), |(count, total), check| {
            (count + 1, total + check.total_amount)
        });

    info!(
        submissions = checks.len(),
        valid = valid_count,
        "checked purchase batch"
    );
    PurchaseBatchResult {
        checks,
        valid_count,
        valid_total_amount,
    }
}
