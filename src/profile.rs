//! A saved set of calculator inputs.
//!
//! A profile bundles everything [`compute`] needs into one JSON document. Writes are
//! plain overwrites; nothing here guarantees durability.
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::catalog::DEFAULT_SAFETY_LINE;
use crate::core::{
    Algorithm, AlgorithmComparison, Asset, CalculationResult, Debt, FinancialState,
    compare_algorithms, compute,
};
use crate::error::{Result, SaspError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub financials: FinancialState,
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default = "default_safety_line")]
    pub safety_line: f64,
}

fn default_safety_line() -> f64 {
    DEFAULT_SAFETY_LINE
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            assets: vec![
                Asset::new("1", "Cash", 10_000.0, 0.0),
                Asset::new("2", "Money market fund", 30_000.0, 2.0),
                Asset::new("3", "Index fund plan", 50_000.0, 6.0),
                Asset::new("4", "Brokerage account", 30_000.0, 10.0),
            ],
            debts: vec![Debt::new("1", "Credit line", 2_000.0, 15.0)],
            financials: FinancialState {
                income: 12_000.0,
                expense: 6_000.0,
                target_saving: Some(1_000.0),
            },
            algorithm: Algorithm::Sigmoid,
            safety_line: DEFAULT_SAFETY_LINE,
        }
    }
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| SaspError::io(path, e))?;
        let profile: Profile = serde_json::from_str(&raw)?;
        let profile = profile.sanitized();
        profile.validate()?;
        Ok(profile)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SaspError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, format!("{json}\n")).map_err(|e| SaspError::io(path, e))
    }

    /// Coerces non-finite numbers to zero. A present target stays present.
    pub fn sanitized(mut self) -> Self {
        for asset in &mut self.assets {
            asset.amount = finite_or_zero(asset.amount);
            asset.rate = finite_or_zero(asset.rate);
        }
        for debt in &mut self.debts {
            debt.amount = finite_or_zero(debt.amount);
            debt.rate = finite_or_zero(debt.rate);
        }
        self.financials.income = finite_or_zero(self.financials.income);
        self.financials.expense = finite_or_zero(self.financials.expense);
        self.financials.target_saving = self.financials.target_saving.map(finite_or_zero);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.safety_line.is_finite() || self.safety_line <= 0.0 {
            return Err(SaspError::invalid("safetyLine must be a positive number of months"));
        }
        ensure_unique_ids("asset", self.assets.iter().map(|a| a.id.as_str()))?;
        ensure_unique_ids("debt", self.debts.iter().map(|d| d.id.as_str()))?;
        Ok(())
    }

    pub fn compute(&self) -> CalculationResult {
        self.compute_with(self.algorithm)
    }

    pub fn compute_with(&self, algorithm: Algorithm) -> CalculationResult {
        compute(
            &self.assets,
            &self.debts,
            &self.financials,
            algorithm,
            self.safety_line,
        )
    }

    pub fn compare(&self) -> Vec<AlgorithmComparison> {
        compare_algorithms(&self.assets, &self.debts, &self.financials, self.safety_line)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn ensure_unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SaspError::invalid(format!("duplicate {kind} id \"{id}\"")));
        }
    }
    Ok(())
}
