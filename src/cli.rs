use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::analytics::{
    debt_analysis, runway_health, savings_progress, target_saving_advice,
};
use crate::core::catalog::describe;
use crate::core::{Algorithm, AlgorithmComparison, CalculationResult};
use crate::error::{Result, SaspError};
use crate::profile::Profile;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliAlgorithm {
    Linear,
    Smooth,
    Step,
    Sigmoid,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(value: CliAlgorithm) -> Self {
        match value {
            CliAlgorithm::Linear => Algorithm::Linear,
            CliAlgorithm::Smooth => Algorithm::Smooth,
            CliAlgorithm::Step => Algorithm::Step,
            CliAlgorithm::Sigmoid => Algorithm::Sigmoid,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sasp",
    about = "Safety-adjusted spending power: how much of this month's surplus is safe to spend"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "SASP_LOG",
        default_value = "info",
        help = "Log level for the sasp crate (error, warn, info, debug, trace)"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute SASP for one algorithm
    Compute(ComputeArgs),
    /// Compute SASP under every algorithm side by side
    Compare(CompareArgs),
    /// Write the default profile to disk
    Init(InitArgs),
    /// Serve the JSON API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long, help = "Profile JSON file; the built-in example is used when omitted")]
    pub profile: Option<PathBuf>,
    #[arg(long, help = "Safety line in months, overrides the profile")]
    pub safety_line: Option<f64>,
    #[arg(long, help = "Print JSON instead of a text report")]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
    #[arg(long, value_enum, help = "Algorithm, overrides the profile")]
    pub algorithm: Option<CliAlgorithm>,
}

#[derive(Args, Debug, Default)]
pub struct CompareArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[arg(long)]
    pub profile: PathBuf,
    #[arg(long, help = "Overwrite an existing file")]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "SASP_PORT", default_value_t = 8080)]
    pub port: u16,
}

/// Runs a non-serving command and returns what should be printed.
pub fn execute(command: &Command) -> Result<String> {
    match command {
        Command::Compute(args) => {
            let mut profile = load_profile(&args.profile)?;
            if let Some(algorithm) = args.algorithm {
                profile.algorithm = algorithm.into();
            }
            let result = profile.compute();
            if args.profile.json {
                Ok(serde_json::to_string_pretty(&result)?)
            } else {
                Ok(render_report(&profile, &result))
            }
        }
        Command::Compare(args) => {
            let profile = load_profile(&args.profile)?;
            let rows = profile.compare();
            if args.profile.json {
                Ok(serde_json::to_string_pretty(&rows)?)
            } else {
                Ok(render_comparison(&profile, &rows))
            }
        }
        Command::Init(args) => {
            if args.profile.exists() && !args.force {
                return Err(SaspError::ProfileExists(args.profile.clone()));
            }
            Profile::default().save(&args.profile)?;
            tracing::info!("wrote default profile to {}", args.profile.display());
            Ok(format!("Wrote default profile to {}", args.profile.display()))
        }
        Command::Serve(_) => Err(SaspError::invalid("serve is handled by the async runtime")),
    }
}

fn load_profile(args: &ProfileArgs) -> Result<Profile> {
    let mut profile = match &args.profile {
        Some(path) => {
            tracing::debug!("loading profile from {}", path.display());
            Profile::load(path)?
        }
        None => Profile::default(),
    };
    if let Some(line) = args.safety_line {
        profile.safety_line = line;
    }
    profile.validate()?;
    Ok(profile)
}

fn render_report(profile: &Profile, result: &CalculationResult) -> String {
    let info = describe(profile.algorithm);
    let mut out = String::new();

    let _ = writeln!(out, "Algorithm     {} ({})", info.name, info.formula);
    let _ = writeln!(out, "Safety line   {:.0} months", profile.safety_line);
    let _ = writeln!(out);
    let _ = writeln!(out, "Total assets  {:>12.2}", result.total_assets);
    let _ = writeln!(out, "Total debts   {:>12.2}", result.total_debts);
    let _ = writeln!(out, "Net worth     {:>12.2}", result.net_worth);
    let _ = writeln!(
        out,
        "Passive       {:>12.2}  (assets {:.2} - interest {:.2})",
        result.net_passive_income, result.passive_income, result.monthly_interest
    );
    let _ = writeln!(out, "Disposable    {:>12.2}", result.nominal_disposable);
    let _ = writeln!(
        out,
        "Runway        {:>12.2} months  [{:?}]",
        result.runway_months,
        runway_health(result.runway_months, profile.safety_line)
    );
    let _ = writeln!(out, "Safety factor {:>12.4}", result.safety_factor);
    let _ = writeln!(out);
    let _ = writeln!(out, "SASP          {:>12.2}", result.sasp);
    let _ = writeln!(out, "Locked        {:>12.2}", result.locked_savings);
    if result.target_savings > 0.0 {
        let _ = writeln!(out, "Target        {:>12.2}", result.target_savings);
    }
    let _ = writeln!(out, "Total saved   {:>12.2}", result.total_savings);
    if let Some(progress) = savings_progress(result) {
        let _ = writeln!(
            out,
            "Progress      {:>11.1}%  [{:?}]",
            progress.percent, progress.level
        );
    }

    let advice = target_saving_advice(&profile.financials, result.nominal_disposable);
    if advice.too_high == Some(true) {
        let _ = writeln!(
            out,
            "\nWarning: target saving exceeds disposable income; suggested max {:.2}",
            advice.suggested_max
        );
    }
    if result.is_insolvency {
        let _ = writeln!(out, "Warning: debts exceed assets, spending is frozen");
    }
    if result.is_cash_flow_crisis {
        let _ = writeln!(out, "Warning: income does not cover expenses plus interest");
    }
    if let Some(analysis) = debt_analysis(&profile.debts, profile.financials.income) {
        let _ = writeln!(
            out,
            "\nDebt/income   {:>11.0}%  [{:?}]",
            analysis.debt_to_income_ratio, analysis.debt_to_income_level
        );
        let _ = writeln!(
            out,
            "Interest load {:>11.1}%  [{:?}]",
            analysis.payment_pressure, analysis.payment_pressure_level
        );
        if !analysis.high_interest_debts.is_empty() {
            let names: Vec<&str> = analysis
                .high_interest_debts
                .iter()
                .map(|d| d.name.as_str())
                .collect();
            let _ = writeln!(
                out,
                "Pay down first: {} ({:.2} above 10%)",
                names.join(", "),
                analysis.high_interest_amount
            );
        }
    }
    out
}

fn render_comparison(profile: &Profile, rows: &[AlgorithmComparison]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Safety line {:.0} months", profile.safety_line);
    let _ = writeln!(
        out,
        "{:<14} {:>8} {:>12} {:>12} {:>12}",
        "algorithm", "K", "sasp", "locked", "saved"
    );
    for row in rows {
        let marker = if row.algorithm == profile.algorithm { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker}{:<13} {:>8.4} {:>12.2} {:>12.2} {:>12.2}",
            describe(row.algorithm).name,
            row.safety_factor,
            row.sasp,
            row.locked_savings,
            row.total_savings
        );
    }
    out
}
