//! Business computations performed once a form has been validated.
//!
//! Totals, human-readable reference codes, supplier risk flags and the
//! recommended refund for a return.  Nothing here fails: missing
//! optional reference data produces a safe default instead.

use crate::clock::Clock;
use crate::models::{
    Purchase, PurchaseItemInput, ReturnItemInput, ReturnableItem, SupplierResponse, SupplierTier,
    SupplierWarning,
};
use crate::refund::{RefundPolicy, StandardRefundPolicy};
use crate::rules::PurchaseValidationRules as Rules;

/// Sum of `quantity * unit_cost` over the purchase lines, unrounded.
pub fn calculate_purchase_total(items: &[PurchaseItemInput]) -> f64 {
    items
        .iter()
        .map(|item| item.quantity as f64 * item.unit_cost)
        .sum()
}

/// Sum of `quantity * unit_cost` over the return lines, unrounded.
pub fn calculate_return_total(items: &[ReturnItemInput]) -> f64 {
    items
        .iter()
        .map(|item| item.quantity as f64 * item.unit_cost)
        .sum()
}

/// Builds `PO-{SUP}-{YYYYMMDD}-{HHMM}` from the supplier code and the
/// clock's local time.  `SUP` stands in when the supplier or its code
/// is missing.
pub fn generate_purchase_reference(
    supplier: Option<&SupplierResponse>,
    clock: &dyn Clock,
) -> String {
    let now = clock.now();
    let code = supplier
        .map(|s| s.supplier_code.chars().take(3).collect::<String>().to_uppercase())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| "SUP".to_string());
    format!("PO-{}-{}", code, now.format("%Y%m%d-%H%M"))
}

/// Builds `RET-{REF}-{YYYYMMDD}` where `REF` is the last six characters
/// of the original purchase's reference number, else the first six of
/// its id, else `UNKNOWN`.
pub fn generate_return_reference(original_purchase: Option<&Purchase>, clock: &dyn Clock) -> String {
    let reference = original_purchase
        .and_then(|purchase| {
            purchase
                .reference_number
                .as_deref()
                .filter(|r| !r.is_empty())
                .map(last_chars::<6>)
                .or_else(|| {
                    Some(purchase.id.chars().take(6).collect::<String>())
                        .filter(|id| !id.is_empty())
                })
        })
        .unwrap_or_else(|| "UNKNOWN".to_string());
    format!("RET-{}-{}", reference, clock.today().format("%Y%m%d"))
}

fn last_chars<const N: usize>(value: &str) -> String {
    let start = value
        .char_indices()
        .rev()
        .nth(N - 1)
        .map_or(0, |(index, _)| index);
    value[start..].to_string()
}

/// Reports the first reason, if any, a supplier warrants caution:
/// inactive, then restricted, then a quality rating below 3.
pub fn should_warn_about_supplier(supplier: &SupplierResponse) -> SupplierWarning {
    if !supplier.is_active {
        return SupplierWarning::because("Supplier is inactive");
    }
    if supplier.supplier_tier == SupplierTier::Restricted {
        return SupplierWarning::because("Supplier has restricted status");
    }
    if supplier.quality_rating < Rules::MIN_QUALITY_RATING {
        return SupplierWarning::because("Supplier has low quality rating");
    }
    SupplierWarning::none()
}

/// Recommended refund for a return under the [`StandardRefundPolicy`].
///
/// Returns `0` without an original purchase.  Lines whose SKU is not on
/// the original purchase contribute nothing.
pub fn get_recommended_refund_amount(
    return_items: &[ReturnItemInput],
    original_purchase: Option<&Purchase>,
) -> f64 {
    recommended_refund_with(&StandardRefundPolicy, return_items, original_purchase)
}

/// Recommended refund under an arbitrary policy, priced at the
/// original unit cost and rounded to cents.
pub fn recommended_refund_with(
    policy: &dyn RefundPolicy,
    return_items: &[ReturnItemInput],
    original_purchase: Option<&Purchase>,
) -> f64 {
    let Some(purchase) = original_purchase else {
        return 0.0;
    };
    let amount: f64 = return_items
        .iter()
        .filter_map(|item| {
            let original = purchase.item_for_sku(&item.sku_id)?;
            let rate = policy.rate_for(item.return_reason(), Some(original.condition), item.condition());
            Some(item.quantity as f64 * original.unit_cost * rate)
        })
        .sum();
    round_to_cents(amount)
}

/// Rounds half away from zero to two decimal places.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Whether the return form should overwrite its refund field with the
/// recommendation: only while the field is still zero or still equals
/// the plain return total, i.e. the user has not typed their own value.
pub fn should_autofill_refund(current_refund: f64, return_items: &[ReturnItemInput]) -> bool {
    current_refund == 0.0 || (current_refund - calculate_return_total(return_items)).abs() < 0.01
}

/// Quantities still returnable per line of `original_purchase`, given
/// the return lines already recorded against it.
pub fn returnable_items(
    original_purchase: &Purchase,
    already_returned: &[ReturnItemInput],
) -> Vec<ReturnableItem> {
    original_purchase
        .items
        .iter()
        .map(|line| {
            let returned: i64 = already_returned
                .iter()
                .filter(|r| r.sku_id == line.sku_id)
                .map(|r| r.quantity.max(0))
                .sum();
            ReturnableItem {
                sku_id: line.sku_id.clone(),
                original_quantity: line.quantity,
                already_returned: returned,
                max_returnable_quantity: (line.quantity - returned).max(0),
            }
        })
        .collect()
}
