pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod profile;

pub use crate::core::{
    Algorithm, AlgorithmComparison, Asset, CalculationResult, Debt, FinancialState,
    compare_algorithms, compute, safety_factor,
};
pub use error::SaspError;
pub use profile::Profile;
