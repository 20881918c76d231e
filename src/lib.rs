//! pricecast: short-horizon price forecasting for daily commodity series.
//!
//! Hexagonal architecture: the pure forecasting engine in [`domain`], port
//! traits in [`ports`], concrete data sources and report writers in
//! [`adapters`], and the command line in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
