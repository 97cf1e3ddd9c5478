//! Purchase Engine library crate.
//!
//! This crate exposes the purchase and return validation engine used
//! by the rental dashboard's purchase forms.  Callers validate a form
//! submission with [`validation::validate_purchase_form`] or
//! [`validation::validate_purchase_return_form`], then derive totals,
//! reference codes and refund recommendations from [`business`].  The
//! same functions are reachable over HTTP via [`api::build_router`].

pub mod api;
pub mod business;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod form_utils;
pub mod models;
pub mod refund;
pub mod rules;
pub mod telemetry;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{ItemCondition, ReturnReason, SupplierTier, ValidationResult};
