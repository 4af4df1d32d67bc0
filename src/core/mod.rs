pub mod analytics;
pub mod catalog;
mod engine;
mod types;

pub use engine::{compare_algorithms, compute, safety_factor};
pub use types::{Algorithm, AlgorithmComparison, Asset, CalculationResult, Debt, FinancialState};
