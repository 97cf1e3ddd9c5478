//! Purchase and return form validation.
//!
//! Both validators run every check and accumulate human-readable
//! messages rather than stopping at the first problem, so the form can
//! show the user everything that needs fixing at once.  Errors block
//! submission; warnings are advisory and never affect
//! [`ValidationResult::is_valid`].
//!
//! Messages are accumulated in a fixed order: form-level fields, then
//! each item in form order, then cross-item checks, then supplier
//! checks.

use crate::clock::{days_between, end_of_day, one_year_before, parse_form_date, Clock};
use crate::form_utils::format_number;
use crate::models::{
    is_condition_downgrade, Purchase, PurchaseFormData, PurchaseReturnFormData, Sku,
    SupplierResponse, SupplierTier, ValidationResult,
};
use crate::rules::{PurchaseValidationRules as Rules, PREPAID_TERMS};
use std::collections::HashSet;
use tracing::debug;

/// Validates a purchase recording form against static limits, the SKU
/// catalogue and, when known, the selected supplier.
pub fn validate_purchase_form(
    data: &PurchaseFormData,
    skus: &[Sku],
    supplier: Option<&SupplierResponse>,
    clock: &dyn Clock,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if data.supplier_id.is_empty() {
        errors.push("Supplier is required".to_string());
    }

    if data.purchase_date.trim().is_empty() {
        errors.push("Purchase date is required".to_string());
    } else if let Some(purchase_date) = parse_form_date(&data.purchase_date) {
        let now = clock.now();
        if purchase_date > end_of_day(now.date()) {
            errors.push("Purchase date cannot be in the future".to_string());
        }
        if one_year_before(now).is_some_and(|cutoff| purchase_date < cutoff) {
            warnings.push("Purchase date is more than one year ago".to_string());
        }
    } else {
        errors.push("Purchase date is invalid".to_string());
    }

    if data.items.is_empty() {
        errors.push("At least one item is required".to_string());
    } else {
        if data.items.len() > Rules::MAX_PURCHASE_ITEMS {
            errors.push(format!(
                "Maximum {} items allowed per purchase",
                Rules::MAX_PURCHASE_ITEMS
            ));
        }

        for (index, item) in data.items.iter().enumerate() {
            let prefix = format!("Item {}:", index + 1);
            let sku = skus.iter().find(|s| s.id == item.sku_id);

            if item.sku_id.is_empty() {
                errors.push(format!("{prefix} SKU is required"));
            } else if let Some(sku) = sku.filter(|s| !s.is_saleable) {
                warnings.push(format!(
                    "{prefix} SKU \"{}\" is not marked as saleable",
                    sku.sku_name
                ));
            }

            if item.quantity < Rules::MIN_QUANTITY {
                errors.push(format!(
                    "{prefix} Quantity must be at least {}",
                    Rules::MIN_QUANTITY
                ));
            }
            if item.quantity > Rules::MAX_QUANTITY {
                errors.push(format!(
                    "{prefix} Quantity cannot exceed {}",
                    Rules::MAX_QUANTITY
                ));
            }

            if item.unit_cost < Rules::MIN_UNIT_COST {
                errors.push(format!(
                    "{prefix} Unit cost must be at least ${}",
                    Rules::MIN_UNIT_COST
                ));
            }
            if item.unit_cost > Rules::MAX_UNIT_COST {
                errors.push(format!(
                    "{prefix} Unit cost cannot exceed ${}",
                    format_number(Rules::MAX_UNIT_COST, 0)
                ));
            }

            if let Some(base_price) = sku.and_then(|s| s.sale_base_price).filter(|p| *p != 0.0) {
                let deviation = (item.unit_cost - base_price).abs() / base_price;
                if deviation > Rules::PRICE_DEVIATION_WARNING {
                    warnings.push(format!(
                        "{prefix} Unit cost varies significantly from base price (${base_price})"
                    ));
                }
            }

            if item.condition().is_none() {
                errors.push(format!("{prefix} Invalid condition specified"));
            }
        }

        let mut seen = HashSet::new();
        if !data.items.iter().all(|item| seen.insert(item.sku_id.as_str())) {
            warnings.push(
                "Some SKUs appear multiple times. Consider combining quantities.".to_string(),
            );
        }
    }

    if let Some(supplier) = supplier {
        if !supplier.is_active {
            errors.push("Cannot create purchases with inactive suppliers".to_string());
        }
        if supplier.supplier_tier == SupplierTier::Restricted {
            warnings.push(
                "This supplier has restricted status. Review purchase carefully.".to_string(),
            );
        }
        if supplier.payment_terms == PREPAID_TERMS && Rules::PREPAID_TERMS_REQUIRE_IMMEDIATE_PAYMENT
        {
            warnings.push(
                "Supplier requires prepaid terms - ensure payment is processed immediately"
                    .to_string(),
            );
        }
    }

    let result = ValidationResult::new(errors, warnings);
    debug!(
        supplier_id = %data.supplier_id,
        items = data.items.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated purchase form"
    );
    result
}

/// Validates a purchase return form.
///
/// With `original_purchase` absent the cross-checks against the
/// original lines and dates are skipped and only the fields on the
/// return form itself are checked; callers must supply the purchase
/// before final submission.  `_skus` is accepted so both validators
/// share a calling convention but is not consulted.
pub fn validate_purchase_return_form(
    data: &PurchaseReturnFormData,
    original_purchase: Option<&Purchase>,
    _skus: &[Sku],
    clock: &dyn Clock,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if data.supplier_id.is_empty() {
        errors.push("Supplier is required".to_string());
    }
    if data.original_purchase_id.is_empty() {
        errors.push("Original purchase is required".to_string());
    }

    if data.return_date.trim().is_empty() {
        errors.push("Return date is required".to_string());
    } else if let Some(return_date) = parse_form_date(&data.return_date) {
        if return_date > end_of_day(clock.today()) {
            errors.push("Return date cannot be in the future".to_string());
        }
        if let Some(purchase_date) =
            original_purchase.and_then(|p| parse_form_date(&p.purchase_date))
        {
            if return_date < purchase_date {
                errors.push("Return date cannot be before the original purchase date".to_string());
            }
            if days_between(purchase_date, return_date) > Rules::LATE_RETURN_DAYS {
                warnings.push(
                    "Return is being processed more than one year after original purchase"
                        .to_string(),
                );
            }
        }
    } else {
        errors.push("Return date is invalid".to_string());
    }

    if data.refund_amount < Rules::MIN_REFUND_AMOUNT {
        errors.push("Refund amount cannot be negative".to_string());
    }
    if original_purchase.is_some_and(|p| data.refund_amount > p.total_amount) {
        errors.push("Refund amount cannot exceed original purchase amount".to_string());
    }

    if data.items.is_empty() {
        errors.push("At least one item is required for return".to_string());
    } else {
        if data.items.len() > Rules::MAX_RETURN_ITEMS {
            errors.push(format!(
                "Maximum {} items allowed per return",
                Rules::MAX_RETURN_ITEMS
            ));
        }

        for (index, item) in data.items.iter().enumerate() {
            let prefix = format!("Return Item {}:", index + 1);

            if item.quantity < 1 {
                errors.push(format!("{prefix} Quantity must be at least 1"));
            }
            if item.unit_cost < 0.0 {
                errors.push(format!("{prefix} Unit cost cannot be negative"));
            }

            let reason = item.return_reason();
            if item.return_reason_code.is_empty() {
                errors.push(format!("{prefix} Return reason is required"));
            } else if reason.is_none() {
                errors.push(format!("{prefix} Invalid return reason specified"));
            }

            let Some(purchase) = original_purchase else {
                continue;
            };
            let Some(original_item) = purchase.item_for_sku(&item.sku_id) else {
                errors.push(format!("{prefix} SKU was not in the original purchase"));
                continue;
            };

            if item.quantity > original_item.quantity {
                errors.push(format!(
                    "{prefix} Cannot return more than originally purchased ({})",
                    original_item.quantity
                ));
            }
            if item.unit_cost > original_item.unit_cost {
                warnings.push(format!(
                    "{prefix} Return unit cost is higher than original purchase cost"
                ));
            }

            let degraded = item
                .condition()
                .is_some_and(|current| is_condition_downgrade(original_item.condition, current));
            if degraded && !reason.is_some_and(|r| r.explains_condition_loss()) {
                warnings.push(format!("{prefix} Item condition has degraded since purchase"));
            }
        }
    }

    let result = ValidationResult::new(errors, warnings);
    debug!(
        original_purchase_id = %data.original_purchase_id,
        cross_checked = original_purchase.is_some(),
        items = data.items.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated purchase return form"
    );
    result
}
