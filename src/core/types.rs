use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Annual yield in percent, `6.0` means 6%/yr.
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Annual interest in percent.
    pub rate: f64,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: f64, rate: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            rate,
        }
    }
}

impl Debt {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: f64, rate: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            rate,
        }
    }
}

/// Monthly cash flow. `target_saving` is `None` when the user set no goal,
/// which is not the same as a goal of zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialState {
    pub income: f64,
    pub expense: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_saving: Option<f64>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Linear,
    Smooth,
    Step,
    #[default]
    Sigmoid,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Linear,
        Algorithm::Smooth,
        Algorithm::Step,
        Algorithm::Sigmoid,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Linear => "linear",
            Algorithm::Smooth => "smooth",
            Algorithm::Step => "step",
            Algorithm::Sigmoid => "sigmoid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_assets: f64,
    pub total_debts: f64,
    pub net_worth: f64,
    pub passive_income: f64,
    pub monthly_interest: f64,
    pub net_passive_income: f64,
    /// Disposable income before the savings target, floored at zero.
    pub nominal_disposable: f64,
    pub runway_months: f64,
    pub safety_factor: f64,
    pub sasp: f64,
    pub locked_savings: f64,
    pub target_savings: f64,
    pub total_savings: f64,
    pub is_insolvency: bool,
    pub is_cash_flow_crisis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmComparison {
    pub algorithm: Algorithm,
    pub sasp: f64,
    pub locked_savings: f64,
    pub total_savings: f64,
    pub safety_factor: f64,
}
