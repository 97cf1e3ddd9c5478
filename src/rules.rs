//! Static limits and business-rule switches applied by the validators.

pub struct PurchaseValidationRules;

impl PurchaseValidationRules {
    pub const MIN_QUANTITY: i64 = 1;
    pub const MAX_QUANTITY: i64 = 10_000;
    pub const MIN_UNIT_COST: f64 = 0.01;
    pub const MAX_UNIT_COST: f64 = 1_000_000.0;
    pub const MIN_REFUND_AMOUNT: f64 = 0.0;
    pub const MAX_PURCHASE_ITEMS: usize = 50;
    pub const MAX_RETURN_ITEMS: usize = 50;

    /// Relative deviation from a SKU's base price that triggers a warning.
    pub const PRICE_DEVIATION_WARNING: f64 = 0.5;
    /// Returns processed later than this many days after purchase are flagged.
    pub const LATE_RETURN_DAYS: i64 = 365;
    /// Suppliers rated below this are flagged as low quality.
    pub const MIN_QUALITY_RATING: f64 = 3.0;

    pub const PREPAID_TERMS_REQUIRE_IMMEDIATE_PAYMENT: bool = true;
}

/// Payment terms value that marks a prepaid supplier.
pub const PREPAID_TERMS: &str = "PREPAID";
