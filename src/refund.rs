//! Refund rate policies.
//!
//! A [`RefundPolicy`] decides what fraction of an item's original unit
//! cost is refunded for a given return reason, and how much a worse
//! condition on return reduces that fraction.  The engine ships the
//! [`StandardRefundPolicy`]; callers with negotiated supplier terms can
//! provide their own.
//!
//! Policies must be thread-safe (`Send + Sync`) because batch checks
//! and the HTTP handlers may consult them concurrently.

use crate::models::{is_condition_downgrade, ItemCondition, ReturnReason};

pub trait RefundPolicy: Send + Sync {
    /// Fraction of the original unit cost refunded for `reason`.
    fn reason_rate(&self, reason: ReturnReason) -> f64;

    /// Multiplier applied when the item came back in a worse condition.
    fn downgrade_factor(&self) -> f64;

    /// Effective rate for one returned line.
    ///
    /// An unrecognised reason keeps the full rate.  The downgrade
    /// factor applies only when both grades are known.
    fn rate_for(
        &self,
        reason: Option<ReturnReason>,
        original: Option<ItemCondition>,
        returned: Option<ItemCondition>,
    ) -> f64 {
        let mut rate = reason.map_or(1.0, |r| self.reason_rate(r));
        if let (Some(original), Some(returned)) = (original, returned) {
            if is_condition_downgrade(original, returned) {
                rate *= self.downgrade_factor();
            }
        }
        rate
    }
}

/// Default refund schedule: full refunds for supplier faults, a
/// restocking deduction for everything else, and 20% off for
/// condition loss.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRefundPolicy;

impl RefundPolicy for StandardRefundPolicy {
    fn reason_rate(&self, reason: ReturnReason) -> f64 {
        match reason {
            ReturnReason::Defective | ReturnReason::WrongItem => 1.0,
            ReturnReason::QualityIssue => 0.9,
            ReturnReason::Overstocked => 0.85,
            ReturnReason::Other => 0.8,
        }
    }

    fn downgrade_factor(&self) -> f64 {
        0.8
    }
}
