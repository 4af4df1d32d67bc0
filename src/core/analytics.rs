//! Derived indicators shown next to the main result: debt ratios, target-saving
//! advice and coarse health labels. None of these feed back into [`compute`].
//!
//! [`compute`]: super::compute
use serde::Serialize;

use super::engine::monthly_interest;
use super::types::{CalculationResult, Debt, FinancialState};

const SUGGESTED_TARGET_SHARE: f64 = 0.3;
const HIGH_INTEREST_RATE: f64 = 10.0;
const DANGER_RUNWAY_MONTHS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSavingAdvice {
    pub suggested_max: f64,
    /// `None` when no target is set, so no warning should be shown at all.
    pub too_high: Option<bool>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebtToIncomeLevel {
    Safe,
    Manageable,
    Dangerous,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentPressureLevel {
    Easy,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAnalysis {
    pub total_debts: f64,
    pub debt_to_income_ratio: f64,
    pub debt_to_income_level: DebtToIncomeLevel,
    pub payment_pressure: f64,
    pub payment_pressure_level: PaymentPressureLevel,
    pub high_interest_debts: Vec<Debt>,
    pub high_interest_amount: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunwayHealth {
    Danger,
    Warning,
    Healthy,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SavingsProgressLevel {
    Low,
    Partial,
    Near,
    Reached,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProgress {
    pub percent: f64,
    pub level: SavingsProgressLevel,
}

pub fn target_saving_advice(
    financials: &FinancialState,
    nominal_disposable: f64,
) -> TargetSavingAdvice {
    TargetSavingAdvice {
        suggested_max: (nominal_disposable * SUGGESTED_TARGET_SHARE).max(0.0),
        too_high: financials
            .target_saving
            .map(|target| target > nominal_disposable),
    }
}

/// Returns `None` when there is no outstanding debt.
pub fn debt_analysis(debts: &[Debt], monthly_income: f64) -> Option<DebtAnalysis> {
    let total_debts: f64 = debts.iter().map(|d| d.amount).sum();
    if total_debts == 0.0 {
        return None;
    }

    let monthly_interest = monthly_interest(debts);
    let debt_to_income_ratio = ratio_percent(total_debts, monthly_income * 12.0);
    let payment_pressure = ratio_percent(monthly_interest, monthly_income);

    let high_interest_debts: Vec<Debt> = debts
        .iter()
        .filter(|d| d.rate > HIGH_INTEREST_RATE)
        .cloned()
        .collect();
    let high_interest_amount = high_interest_debts.iter().map(|d| d.amount).sum();

    Some(DebtAnalysis {
        total_debts,
        debt_to_income_ratio,
        debt_to_income_level: debt_to_income_level(debt_to_income_ratio),
        payment_pressure,
        payment_pressure_level: payment_pressure_level(payment_pressure),
        high_interest_debts,
        high_interest_amount,
    })
}

pub fn runway_health(runway_months: f64, safety_line: f64) -> RunwayHealth {
    if runway_months < DANGER_RUNWAY_MONTHS {
        RunwayHealth::Danger
    } else if runway_months < safety_line {
        RunwayHealth::Warning
    } else {
        RunwayHealth::Healthy
    }
}

/// Progress of actual savings towards the stated target, `None` without a
/// positive target.
pub fn savings_progress(result: &CalculationResult) -> Option<SavingsProgress> {
    if result.target_savings <= 0.0 {
        return None;
    }
    let percent = result.total_savings / result.target_savings * 100.0;
    let level = if percent < 50.0 {
        SavingsProgressLevel::Low
    } else if percent < 80.0 {
        SavingsProgressLevel::Partial
    } else if percent < 100.0 {
        SavingsProgressLevel::Near
    } else {
        SavingsProgressLevel::Reached
    };
    Some(SavingsProgress { percent, level })
}

fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

fn debt_to_income_level(ratio: f64) -> DebtToIncomeLevel {
    if ratio >= 300.0 {
        DebtToIncomeLevel::Dangerous
    } else if ratio >= 100.0 {
        DebtToIncomeLevel::Manageable
    } else {
        DebtToIncomeLevel::Safe
    }
}

fn payment_pressure_level(pressure: f64) -> PaymentPressureLevel {
    if pressure >= 30.0 {
        PaymentPressureLevel::High
    } else if pressure >= 20.0 {
        PaymentPressureLevel::Moderate
    } else {
        PaymentPressureLevel::Easy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Algorithm, compute};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn advice_is_silent_without_target() {
        let financials = FinancialState {
            income: 10_000.0,
            expense: 6_000.0,
            target_saving: None,
        };
        let advice = target_saving_advice(&financials, 4_000.0);
        assert_eq!(advice.too_high, None);
        assert_approx(advice.suggested_max, 1_200.0);
    }

    #[test]
    fn advice_flags_target_above_nominal_disposable() {
        let mut financials = FinancialState {
            income: 5_000.0,
            expense: 4_000.0,
            target_saving: Some(2_000.0),
        };
        assert_eq!(target_saving_advice(&financials, 1_000.0).too_high, Some(true));

        financials.target_saving = Some(1_000.0);
        assert_eq!(target_saving_advice(&financials, 1_000.0).too_high, Some(false));

        financials.target_saving = Some(0.0);
        assert_eq!(target_saving_advice(&financials, 0.0).too_high, Some(false));
    }

    #[test]
    fn suggested_max_never_negative() {
        let advice = target_saving_advice(&FinancialState::default(), -500.0);
        assert_approx(advice.suggested_max, 0.0);
    }

    #[test]
    fn debt_analysis_absent_without_debt() {
        assert!(debt_analysis(&[], 5_000.0).is_none());
        let zeroed = vec![Debt::new("1", "paid off", 0.0, 20.0)];
        assert!(debt_analysis(&zeroed, 5_000.0).is_none());
    }

    #[test]
    fn debt_analysis_ratios_and_levels() {
        let debts = vec![
            Debt::new("1", "credit card", 2_000.0, 15.0),
            Debt::new("2", "mortgage", 178_000.0, 4.0),
        ];
        let analysis = debt_analysis(&debts, 5_000.0).expect("has debts");

        assert_approx(analysis.total_debts, 180_000.0);
        assert_approx(analysis.debt_to_income_ratio, 300.0);
        assert_eq!(analysis.debt_to_income_level, DebtToIncomeLevel::Dangerous);
        // (300 + 7120) / 12 / 5000
        assert_approx(analysis.payment_pressure, 7_420.0 / 12.0 / 5_000.0 * 100.0);
        assert_eq!(analysis.payment_pressure_level, PaymentPressureLevel::Easy);
        assert_eq!(analysis.high_interest_debts.len(), 1);
        assert_eq!(analysis.high_interest_debts[0].name, "credit card");
        assert_approx(analysis.high_interest_amount, 2_000.0);
    }

    #[test]
    fn debt_analysis_zero_income_yields_zero_ratios() {
        let debts = vec![Debt::new("1", "loan", 10_000.0, 8.0)];
        let analysis = debt_analysis(&debts, 0.0).expect("has debts");
        assert_approx(analysis.debt_to_income_ratio, 0.0);
        assert_approx(analysis.payment_pressure, 0.0);
        assert_eq!(analysis.debt_to_income_level, DebtToIncomeLevel::Safe);
        assert_eq!(analysis.payment_pressure_level, PaymentPressureLevel::Easy);
    }

    #[test]
    fn rate_of_exactly_ten_is_not_high_interest() {
        let debts = vec![Debt::new("1", "loan", 10_000.0, 10.0)];
        let analysis = debt_analysis(&debts, 1_000.0).expect("has debts");
        assert!(analysis.high_interest_debts.is_empty());
        assert_eq!(analysis.debt_to_income_level, DebtToIncomeLevel::Safe);
    }

    #[test]
    fn level_thresholds_are_left_closed() {
        assert_eq!(debt_to_income_level(99.9), DebtToIncomeLevel::Safe);
        assert_eq!(debt_to_income_level(100.0), DebtToIncomeLevel::Manageable);
        assert_eq!(debt_to_income_level(299.9), DebtToIncomeLevel::Manageable);
        assert_eq!(payment_pressure_level(19.9), PaymentPressureLevel::Easy);
        assert_eq!(payment_pressure_level(20.0), PaymentPressureLevel::Moderate);
        assert_eq!(payment_pressure_level(30.0), PaymentPressureLevel::High);
    }

    #[test]
    fn runway_health_bands() {
        assert_eq!(runway_health(-2.0, 6.0), RunwayHealth::Danger);
        assert_eq!(runway_health(2.99, 6.0), RunwayHealth::Danger);
        assert_eq!(runway_health(3.0, 6.0), RunwayHealth::Warning);
        assert_eq!(runway_health(6.0, 6.0), RunwayHealth::Healthy);
        // Safety line below the danger floor never yields Warning.
        assert_eq!(runway_health(2.5, 2.0), RunwayHealth::Danger);
    }

    #[test]
    fn savings_progress_tracks_unmet_target() {
        let result = compute(
            &[],
            &[],
            &FinancialState {
                income: 5_000.0,
                expense: 4_000.0,
                target_saving: Some(2_000.0),
            },
            Algorithm::Linear,
            6.0,
        );
        let progress = savings_progress(&result).expect("target set");
        assert_approx(progress.percent, 50.0);
        assert_eq!(progress.level, SavingsProgressLevel::Partial);
    }

    #[test]
    fn savings_progress_absent_without_positive_target() {
        let result = compute(
            &[],
            &[],
            &FinancialState {
                income: 5_000.0,
                expense: 4_000.0,
                target_saving: Some(0.0),
            },
            Algorithm::Linear,
            6.0,
        );
        assert!(savings_progress(&result).is_none());
    }
}
