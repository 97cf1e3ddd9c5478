//! Data models for the Purchase Engine.
//!
//! The `models` module defines the serialisable form submissions the
//! dashboard sends for validation, the read-only reference data
//! (purchases, SKUs, suppliers) fetched from the backend API, and the
//! result types the engine hands back.  Form fields hold what the user
//! typed, so enumerated fields such as an item's condition arrive as
//! strings and are parsed on demand; reference data is strongly typed.

use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical condition grade of an item, best to worst: A, B, C, D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCondition {
    #[serde(rename = "A")]
    Excellent,
    #[serde(rename = "B")]
    Good,
    #[serde(rename = "C")]
    Fair,
    #[serde(rename = "D")]
    Poor,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 4] = [
        ItemCondition::Excellent,
        ItemCondition::Good,
        ItemCondition::Fair,
        ItemCondition::Poor,
    ];

    /// Numeric rank used for comparisons; higher is better.
    pub fn rank(self) -> u8 {
        match self {
            ItemCondition::Excellent => 4,
            ItemCondition::Good => 3,
            ItemCondition::Fair => 2,
            ItemCondition::Poor => 1,
        }
    }

    /// Single-letter grade as it appears on the wire.
    pub fn code(self) -> &'static str {
        match self {
            ItemCondition::Excellent => "A",
            ItemCondition::Good => "B",
            ItemCondition::Fair => "C",
            ItemCondition::Poor => "D",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemCondition::Excellent => "Excellent (A)",
            ItemCondition::Good => "Good (B)",
            ItemCondition::Fair => "Fair (C)",
            ItemCondition::Poor => "Poor (D)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ItemCondition::Excellent => "Like new condition, no visible wear",
            ItemCondition::Good => "Minor wear, fully functional",
            ItemCondition::Fair => "Moderate wear, may need minor repair",
            ItemCondition::Poor => "Heavy wear, needs significant repair",
        }
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ItemCondition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ItemCondition::Excellent),
            "B" => Ok(ItemCondition::Good),
            "C" => Ok(ItemCondition::Fair),
            "D" => Ok(ItemCondition::Poor),
            other => Err(ParseEnumError::new("condition", other)),
        }
    }
}

/// Returns true when `current` is a worse grade than `original`.
pub fn is_condition_downgrade(original: ItemCondition, current: ItemCondition) -> bool {
    current.rank() < original.rank()
}

/// Why an item is being sent back to its supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnReason {
    Defective,
    WrongItem,
    QualityIssue,
    Overstocked,
    Other,
}

impl ReturnReason {
    pub const ALL: [ReturnReason; 5] = [
        ReturnReason::Defective,
        ReturnReason::WrongItem,
        ReturnReason::Overstocked,
        ReturnReason::QualityIssue,
        ReturnReason::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ReturnReason::Defective => "DEFECTIVE",
            ReturnReason::WrongItem => "WRONG_ITEM",
            ReturnReason::QualityIssue => "QUALITY_ISSUE",
            ReturnReason::Overstocked => "OVERSTOCKED",
            ReturnReason::Other => "OTHER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReturnReason::Defective => "Defective",
            ReturnReason::WrongItem => "Wrong Item",
            ReturnReason::QualityIssue => "Quality Issue",
            ReturnReason::Overstocked => "Overstocked",
            ReturnReason::Other => "Other",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReturnReason::Defective => "Item is defective or not working properly",
            ReturnReason::WrongItem => "Received incorrect item from supplier",
            ReturnReason::QualityIssue => "Item quality does not meet standards",
            ReturnReason::Overstocked => "Returning excess inventory",
            ReturnReason::Other => "Other reason (specify in notes)",
        }
    }

    /// Reasons under which a worse condition on return is expected.
    pub fn explains_condition_loss(self) -> bool {
        matches!(self, ReturnReason::Defective | ReturnReason::QualityIssue)
    }
}

impl fmt::Display for ReturnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReturnReason {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReturnReason::ALL
            .into_iter()
            .find(|reason| reason.code() == s)
            .ok_or_else(|| ParseEnumError::new("return reason", s))
    }
}

/// Standing of a supplier with the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplierTier {
    Standard,
    Preferred,
    Restricted,
}

/// A single line on the purchase recording form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseItemInput {
    pub sku_id: String,
    pub quantity: i64,
    pub unit_cost: f64,
    /// Condition grade as typed; see [`PurchaseItemInput::condition`].
    #[serde(rename = "condition")]
    pub condition_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

impl PurchaseItemInput {
    /// Parsed condition grade, `None` if the typed value is not A-D.
    pub fn condition(&self) -> Option<ItemCondition> {
        self.condition_code.parse().ok()
    }
}

/// The purchase recording form as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseFormData {
    pub supplier_id: String,
    /// ISO date (`YYYY-MM-DD`) or date-time string.
    pub purchase_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    pub items: Vec<PurchaseItemInput>,
}

/// A single line on the purchase return form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnItemInput {
    pub sku_id: String,
    pub quantity: i64,
    pub unit_cost: f64,
    #[serde(rename = "return_reason")]
    pub return_reason_code: String,
    #[serde(rename = "condition", skip_serializing_if = "Option::is_none")]
    pub condition_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReturnItemInput {
    pub fn return_reason(&self) -> Option<ReturnReason> {
        self.return_reason_code.parse().ok()
    }

    pub fn condition(&self) -> Option<ItemCondition> {
        self.condition_code.as_deref().and_then(|c| c.parse().ok())
    }
}

/// The purchase return form as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseReturnFormData {
    pub supplier_id: String,
    pub original_purchase_id: String,
    pub return_date: String,
    pub refund_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_authorization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<ReturnItemInput>,
}

/// A line of a recorded purchase, as returned by the backend API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(default)]
    pub id: String,
    pub sku_id: String,
    pub quantity: i64,
    pub unit_cost: f64,
    pub condition: ItemCondition,
}

/// A recorded purchase.  Only read, never modified, by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    #[serde(default)]
    pub supplier_id: String,
    pub purchase_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    pub total_amount: f64,
    #[serde(default)]
    pub items: Vec<PurchaseItem>,
}

impl Purchase {
    /// First line of this purchase carrying `sku_id`.
    pub fn item_for_sku(&self, sku_id: &str) -> Option<&PurchaseItem> {
        self.items.iter().find(|item| item.sku_id == sku_id)
    }
}

/// SKU reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sku {
    pub id: String,
    pub sku_name: String,
    #[serde(default = "default_true")]
    pub is_saleable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_base_price: Option<f64>,
}

fn default_true() -> bool {
    true
}

/// Supplier reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub supplier_code: String,
    pub is_active: bool,
    pub supplier_tier: SupplierTier,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub quality_rating: f64,
}

/// Outcome of validating a form.  Only `errors` block submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Whether a supplier deserves a caution banner, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierWarning {
    pub warn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SupplierWarning {
    pub fn none() -> Self {
        Self {
            warn: false,
            reason: None,
        }
    }

    pub fn because(reason: impl Into<String>) -> Self {
        Self {
            warn: true,
            reason: Some(reason.into()),
        }
    }
}

/// How much of one original purchase line can still be returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnableItem {
    pub sku_id: String,
    pub original_quantity: i64,
    pub already_returned: i64,
    pub max_returnable_quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downgrade_is_irreflexive() {
        for condition in ItemCondition::ALL {
            assert!(!is_condition_downgrade(condition, condition));
        }
    }

    #[test]
    fn downgrade_follows_rank() {
        assert!(is_condition_downgrade(ItemCondition::Excellent, ItemCondition::Poor));
        assert!(!is_condition_downgrade(ItemCondition::Poor, ItemCondition::Excellent));
        assert!(is_condition_downgrade(ItemCondition::Good, ItemCondition::Fair));
    }

    #[test]
    fn condition_parses_only_canonical_codes() {
        assert_eq!("C".parse::<ItemCondition>().unwrap(), ItemCondition::Fair);
        assert!("c".parse::<ItemCondition>().is_err());
        assert!("E".parse::<ItemCondition>().is_err());
    }

    #[test]
    fn return_reason_round_trips_through_code() {
        for reason in ReturnReason::ALL {
            assert_eq!(reason.code().parse::<ReturnReason>().unwrap(), reason);
        }
        assert!("".parse::<ReturnReason>().is_err());
    }

    #[test]
    fn form_fields_default_when_missing() {
        let form: PurchaseFormData = serde_json::from_str(r#"{"items":[{"sku_id":"s1"}]}"#).unwrap();
        assert_eq!(form.supplier_id, "");
        assert_eq!(form.items[0].quantity, 0);
        assert_eq!(form.items[0].condition(), None);
    }

    #[test]
    fn validation_result_serialises_snake_case() {
        let result = ValidationResult::new(vec![], vec!["careful".into()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_valid"], true);
        assert_eq!(json["warnings"][0], "careful");
    }
}
