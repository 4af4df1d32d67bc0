use super::types::{
    Algorithm, AlgorithmComparison, Asset, CalculationResult, Debt, FinancialState,
};

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy)]
struct Aggregates {
    total_assets: f64,
    total_debts: f64,
    passive_income: f64,
    monthly_interest: f64,
}

impl Aggregates {
    fn from_holdings(assets: &[Asset], debts: &[Debt]) -> Self {
        Self {
            total_assets: assets.iter().map(|a| a.amount).sum(),
            total_debts: debts.iter().map(|d| d.amount).sum(),
            passive_income: monthly_accrual(assets.iter().map(|a| (a.amount, a.rate))),
            monthly_interest: monthly_interest(debts),
        }
    }

    fn net_worth(self) -> f64 {
        self.total_assets - self.total_debts
    }

    fn net_passive_income(self) -> f64 {
        self.passive_income - self.monthly_interest
    }
}

#[derive(Debug, Clone, Copy)]
struct Disposable {
    before_target: f64,
    available: f64,
    target: f64,
}

#[derive(Debug, Clone, Copy)]
struct SavingsSplit {
    sasp: f64,
    locked_savings: f64,
    total_savings: f64,
}

/// Derives the full metric set for one snapshot of inputs.
///
/// Total over its numeric domain: zero expense, negative net worth and empty
/// holdings all resolve to defined numbers.
pub fn compute(
    assets: &[Asset],
    debts: &[Debt],
    financials: &FinancialState,
    algorithm: Algorithm,
    safety_line: f64,
) -> CalculationResult {
    let totals = Aggregates::from_holdings(assets, debts);
    let net_worth = totals.net_worth();
    let net_passive_income = totals.net_passive_income();

    let disposable = disposable_income(financials, net_passive_income);
    let runway = runway_months(net_worth, financials.expense);
    let k = safety_factor(algorithm, runway, safety_line);
    let split = split_savings(net_worth, disposable, k);

    CalculationResult {
        total_assets: totals.total_assets,
        total_debts: totals.total_debts,
        net_worth,
        passive_income: totals.passive_income,
        monthly_interest: totals.monthly_interest,
        net_passive_income,
        nominal_disposable: disposable.before_target,
        runway_months: runway,
        safety_factor: k,
        sasp: split.sasp,
        locked_savings: split.locked_savings,
        target_savings: disposable.target,
        total_savings: split.total_savings,
        is_insolvency: net_worth < 0.0,
        is_cash_flow_crisis: financials.income < financials.expense + totals.monthly_interest,
    }
}

/// Runs [`compute`] once per algorithm, in [`Algorithm::ALL`] order.
pub fn compare_algorithms(
    assets: &[Asset],
    debts: &[Debt],
    financials: &FinancialState,
    safety_line: f64,
) -> Vec<AlgorithmComparison> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let result = compute(assets, debts, financials, algorithm, safety_line);
            AlgorithmComparison {
                algorithm,
                sasp: result.sasp,
                locked_savings: result.locked_savings,
                total_savings: result.total_savings,
                safety_factor: result.safety_factor,
            }
        })
        .collect()
}

/// Maps runway (months) to a factor in `[0, 1]` relative to the safety line.
/// A non-positive runway always yields zero.
pub fn safety_factor(algorithm: Algorithm, runway: f64, safety_line: f64) -> f64 {
    if runway <= 0.0 {
        return 0.0;
    }

    let k = match algorithm {
        Algorithm::Linear => linear_factor(runway, safety_line),
        Algorithm::Smooth => smooth_factor(runway, safety_line),
        Algorithm::Step => step_factor(runway, safety_line),
        Algorithm::Sigmoid => sigmoid_factor(runway, safety_line),
    };
    // clamp passes NaN through, e.g. from a NaN safety line.
    if k.is_nan() { 0.0 } else { k.clamp(0.0, 1.0) }
}

fn linear_factor(runway: f64, safety_line: f64) -> f64 {
    (runway / safety_line).min(1.0)
}

fn smooth_factor(runway: f64, safety_line: f64) -> f64 {
    1.0 - (-runway / safety_line).exp()
}

// Tiers are left-closed: a runway sitting exactly on a threshold takes the higher tier.
fn step_factor(runway: f64, safety_line: f64) -> f64 {
    if runway < safety_line * 0.5 {
        0.3
    } else if runway < safety_line {
        0.6
    } else if runway < safety_line * 1.5 {
        0.85
    } else {
        1.0
    }
}

fn sigmoid_factor(runway: f64, safety_line: f64) -> f64 {
    1.0 / (1.0 + (-2.0 * (runway - safety_line) / safety_line).exp())
}

pub(crate) fn monthly_interest(debts: &[Debt]) -> f64 {
    monthly_accrual(debts.iter().map(|d| (d.amount, d.rate)))
}

fn monthly_accrual(holdings: impl Iterator<Item = (f64, f64)>) -> f64 {
    holdings
        .map(|(amount, rate)| amount * (rate / 100.0))
        .sum::<f64>()
        / MONTHS_PER_YEAR
}

fn disposable_income(financials: &FinancialState, net_passive_income: f64) -> Disposable {
    let base = financials.income - financials.expense + net_passive_income;
    let target = financials.target_saving.unwrap_or(0.0);
    let before_target = base.max(0.0);
    Disposable {
        before_target,
        available: (before_target - target).max(0.0),
        target,
    }
}

fn runway_months(net_worth: f64, expense: f64) -> f64 {
    if expense > 0.0 { net_worth / expense } else { 0.0 }
}

fn split_savings(net_worth: f64, disposable: Disposable, k: f64) -> SavingsSplit {
    if net_worth < 0.0 {
        // Insolvent: everything goes to equity repair. The target is added on top
        // of all disposable money here, unlike the unmet-target branch below.
        let locked_savings = disposable.before_target;
        SavingsSplit {
            sasp: 0.0,
            locked_savings,
            total_savings: locked_savings + disposable.target,
        }
    } else if disposable.before_target > disposable.target {
        let sasp = disposable.available * k;
        let locked_savings = disposable.available - sasp;
        SavingsSplit {
            sasp,
            locked_savings,
            total_savings: locked_savings + disposable.target,
        }
    } else {
        SavingsSplit {
            sasp: 0.0,
            locked_savings: disposable.before_target,
            total_savings: disposable.before_target,
        }
    }
}
