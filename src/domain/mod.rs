//! Core domain types and logic.

pub mod config_validation;
pub mod decimal;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod observation;
pub mod regression;
pub mod seasonality;
pub mod smoothing;
