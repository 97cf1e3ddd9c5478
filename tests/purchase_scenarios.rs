use chrono::NaiveDate;
use purchase_engine::business::{
    calculate_purchase_total, generate_purchase_reference, get_recommended_refund_amount,
    should_warn_about_supplier,
};
use purchase_engine::models::{
    is_condition_downgrade, ItemCondition, Purchase, PurchaseFormData, PurchaseItem,
    PurchaseItemInput, PurchaseReturnFormData, ReturnItemInput, SupplierResponse, SupplierTier,
    SupplierWarning,
};
use purchase_engine::validation::{validate_purchase_form, validate_purchase_return_form};
use purchase_engine::{FixedClock, SystemClock};
use regex::Regex;

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2025, 3, 20)
            .unwrap()
            .and_hms_opt(16, 45, 0)
            .unwrap(),
    )
}

fn line(sku_id: &str, quantity: i64, unit_cost: f64, condition: &str) -> PurchaseItemInput {
    PurchaseItemInput {
        sku_id: sku_id.into(),
        quantity,
        unit_cost,
        condition_code: condition.into(),
        ..Default::default()
    }
}

fn original_purchase() -> Purchase {
    Purchase {
        id: "c0ffee00".into(),
        supplier_id: "sup-1".into(),
        purchase_date: "2025-03-01".into(),
        reference_number: None,
        total_amount: 150.0,
        items: vec![PurchaseItem {
            id: "line-1".into(),
            sku_id: "tent".into(),
            quantity: 3,
            unit_cost: 50.0,
            condition: ItemCondition::Excellent,
        }],
    }
}

fn return_line(quantity: i64, reason: &str, condition: Option<&str>) -> ReturnItemInput {
    ReturnItemInput {
        sku_id: "tent".into(),
        quantity,
        unit_cost: 50.0,
        return_reason_code: reason.into(),
        condition_code: condition.map(Into::into),
        notes: None,
    }
}

#[test]
fn well_formed_purchases_have_no_errors() {
    let quantities = [1, 7, 250, 10_000];
    let costs = [0.01, 3.5, 999.99, 1_000_000.0];
    for (i, quantity) in quantities.iter().enumerate() {
        for (j, cost) in costs.iter().enumerate() {
            let condition = ["A", "B", "C", "D"][(i + j) % 4];
            let form = PurchaseFormData {
                supplier_id: "sup-1".into(),
                purchase_date: "2025-03-20".into(),
                items: vec![line("tent", *quantity, *cost, condition)],
                ..Default::default()
            };
            let result = validate_purchase_form(&form, &[], None, &clock());
            assert!(result.errors.is_empty(), "{quantity} x {cost}: {:?}", result.errors);
            assert!(result.is_valid);
        }
    }
}

#[test]
fn scenario_empty_purchase_form() {
    let form = PurchaseFormData {
        supplier_id: String::new(),
        purchase_date: "2025-03-01".into(),
        items: vec![],
        ..Default::default()
    };
    let result = validate_purchase_form(&form, &[], None, &clock());
    assert!(result.errors.contains(&"Supplier is required".to_string()));
    assert!(result.errors.contains(&"At least one item is required".to_string()));
}

#[test]
fn refund_above_purchase_total_is_always_an_error() {
    for refund in [150.01, 151.0, 10_000.0] {
        let form = PurchaseReturnFormData {
            supplier_id: "sup-1".into(),
            original_purchase_id: "c0ffee00".into(),
            return_date: "2025-03-10".into(),
            refund_amount: refund,
            items: vec![return_line(1, "DEFECTIVE", None)],
            ..Default::default()
        };
        let result = validate_purchase_return_form(&form, Some(&original_purchase()), &[], &clock());
        assert!(!result.is_valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("Refund amount cannot exceed original purchase amount")));
    }
}

#[test]
fn scenario_return_quantity_exceeds_original() {
    let form = PurchaseReturnFormData {
        supplier_id: "sup-1".into(),
        original_purchase_id: "c0ffee00".into(),
        return_date: "2025-03-10".into(),
        refund_amount: 0.0,
        items: vec![return_line(5, "WRONG_ITEM", None)],
        ..Default::default()
    };
    let result = validate_purchase_return_form(&form, Some(&original_purchase()), &[], &clock());
    assert!(result
        .errors
        .iter()
        .any(|e| e.ends_with("Cannot return more than originally purchased (3)")));
}

#[test]
fn purchase_total_example() {
    let items = vec![line("a", 2, 10.0, "A"), line("b", 3, 5.0, "B")];
    assert_eq!(calculate_purchase_total(&items), 35.0);
}

#[test]
fn condition_downgrade_properties() {
    for grade in ItemCondition::ALL {
        assert!(!is_condition_downgrade(grade, grade));
    }
    assert!(is_condition_downgrade(ItemCondition::Excellent, ItemCondition::Poor));
    assert!(!is_condition_downgrade(ItemCondition::Poor, ItemCondition::Excellent));
}

#[test]
fn refund_without_original_is_zero_for_any_items() {
    let batches = vec![
        vec![],
        vec![return_line(3, "DEFECTIVE", Some("A"))],
        vec![return_line(100, "OTHER", Some("D")), return_line(1, "", None)],
    ];
    for items in batches {
        assert_eq!(get_recommended_refund_amount(&items, None), 0.0);
    }
}

#[test]
fn scenario_purchase_reference_from_system_clock() {
    let pattern = Regex::new(r"^PO-SUP-\d{8}-\d{4}$").unwrap();
    let reference = generate_purchase_reference(None, &SystemClock);
    assert!(pattern.is_match(&reference), "{reference}");
}

#[test]
fn scenario_inactive_supplier_wins() {
    let supplier = SupplierResponse {
        id: "sup-9".into(),
        supplier_code: "OLD".into(),
        is_active: false,
        supplier_tier: SupplierTier::Standard,
        payment_terms: "NET30".into(),
        quality_rating: 5.0,
    };
    assert_eq!(
        should_warn_about_supplier(&supplier),
        SupplierWarning::because("Supplier is inactive")
    );
}

#[test]
fn scenario_other_reason_with_downgrade() {
    // 2 * 50 * (0.8 * 0.8)
    let items = vec![return_line(2, "OTHER", Some("D"))];
    assert_eq!(get_recommended_refund_amount(&items, Some(&original_purchase())), 64.0);
}

#[test]
fn validators_are_deterministic() {
    let form = PurchaseFormData {
        supplier_id: "sup-1".into(),
        purchase_date: "2025-03-02".into(),
        items: vec![line("tent", 0, 2.0, "X"), line("tent", 2, 2.0, "A")],
        ..Default::default()
    };
    let first = validate_purchase_form(&form, &[], None, &clock());
    let second = validate_purchase_form(&form, &[], None, &clock());
    assert_eq!(first, second);
}
