//! KDS decision-support scoring core.
//!
//! The scorers (`entrepreneur`, `sustainability`, `recycling`, `kpi`) are
//! pure functions over already-fetched record collections. `store` and
//! `dashboard` are the data-access and boundary collaborators around them.

pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod demo;
pub mod entrepreneur;
pub mod error;
pub mod forecast;
pub mod kpi;
pub mod money;
pub mod name_generator;
pub mod normalize;
pub mod ranking;
pub mod recycling;
pub mod rng;
pub mod store;
pub mod sustainability;
pub mod types;
