use std::ops::RangeInclusive;

use serde::Serialize;

use super::types::Algorithm;

/// Safety lines outside this range are accepted but fall outside the slider.
pub const SAFETY_LINE_RANGE: RangeInclusive<u32> = 3..=24;

pub const DEFAULT_SAFETY_LINE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyLinePreset {
    pub label: &'static str,
    pub months: u32,
}

pub const SAFETY_LINE_PRESETS: [SafetyLinePreset; 3] = [
    SafetyLinePreset {
        label: "aggressive",
        months: 3,
    },
    SafetyLinePreset {
        label: "standard",
        months: 6,
    },
    SafetyLinePreset {
        label: "conservative",
        months: 12,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmInfo {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub description: &'static str,
    pub formula: &'static str,
    pub features: [&'static str; 3],
    pub scenarios: &'static str,
}

pub fn describe(algorithm: Algorithm) -> AlgorithmInfo {
    match algorithm {
        Algorithm::Linear => AlgorithmInfo {
            algorithm,
            name: "Linear",
            description: "Simple and direct, releases spending in proportion to runway",
            formula: "K = min(1.0, M / L)",
            features: [
                "Easy to reason about",
                "Grows strictly linearly",
                "Caps at the safety line",
            ],
            scenarios: "Budgeting beginners or anyone who prefers a plain rule",
        },
        Algorithm::Smooth => AlgorithmInfo {
            algorithm,
            name: "Smooth curve",
            description: "Conservative growth that approaches but never reaches 100%",
            formula: "K = 1 - exp(-M / L)",
            features: [
                "Fast early growth",
                "Flattens out later",
                "Always keeps a buffer",
            ],
            scenarios: "Risk-averse users who want a permanent safety margin",
        },
        Algorithm::Step => AlgorithmInfo {
            algorithm,
            name: "Step tiers",
            description: "Tiered allowance unlocked by reaching runway milestones",
            formula: "K = 0.3 | 0.6 | 0.85 | 1.0",
            features: [
                "Clear milestones",
                "Jumps between tiers",
                "Rewards saving",
            ],
            scenarios: "Goal-driven users who like levelling up",
        },
        Algorithm::Sigmoid => AlgorithmInfo {
            algorithm,
            name: "S-curve",
            description: "Recommended, balances flexibility with safety",
            formula: "K = 1 / (1 + exp(-2*(M-L)/L))",
            features: [
                "Most elastic around the safety line",
                "Strict protection at low runway",
                "Releases quickly at high runway",
            ],
            scenarios: "Most users; follows diminishing marginal utility",
        },
    }
}

pub fn all() -> Vec<AlgorithmInfo> {
    Algorithm::ALL.into_iter().map(describe).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_covers_every_algorithm_once() {
        let infos = all();
        assert_eq!(infos.len(), Algorithm::ALL.len());
        for (info, algorithm) in infos.iter().zip(Algorithm::ALL) {
            assert_eq!(info.algorithm, algorithm);
            assert!(!info.formula.is_empty());
        }
    }

    #[test]
    fn presets_sit_inside_slider_range() {
        for preset in SAFETY_LINE_PRESETS {
            assert!(SAFETY_LINE_RANGE.contains(&preset.months));
        }
        assert!(
            SAFETY_LINE_PRESETS
                .iter()
                .any(|p| p.months as f64 == DEFAULT_SAFETY_LINE)
        );
    }
}
