//! Core business logic

pub mod advice;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod financials;
pub mod log;

// Re-export main types for cleaner imports
pub use advice::{AdviceDesk, AdviceOutcome, AdviceProvider};
pub use catalog::{Catalog, Platform, Product, Selection};
pub use dashboard::DashboardView;
pub use error::Error;
