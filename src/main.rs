//! Investment Projection CLI
//!
//! Command-line interface for SIP and lumpsum projections and goal seeking
//!
//! ```bash
//! projection sip --amount 5000 --years 10 --rate 12 --inflation 6
//! projection lumpsum --amount 100000 --years 5 --csv lumpsum.csv
//! projection goal-sip --target 1000000 --years 10 --rate 12
//! projection goal-duration --amount 5000 --target 1000000 --rate 12
//! projection goal-rate --amount 5000 --years 10 --target 1000000
//! projection sweep --from 6 --to 15 --step 1 --json
//! ```

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use investment_projection::{
    config::CalculatorConfig,
    export::{report_to_json, write_series_csv},
    projection::{InvestmentMode, ProjectionEngine, ProjectionSeries},
    scenario::{rate_range, ScenarioRunner},
};

#[derive(Parser)]
#[command(name = "projection")]
#[command(about = "SIP and lumpsum investment projections with inflation adjustment", long_about = None)]
#[command(version)]
struct Cli {
    /// Calculator config (JSON); built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a monthly SIP
    Sip {
        /// Monthly investment
        #[arg(short, long)]
        amount: Option<f64>,

        /// Investment period in years
        #[arg(short, long)]
        years: Option<u32>,

        /// Expected annual return (%)
        #[arg(short, long)]
        rate: Option<f64>,

        /// Expected annual inflation (%)
        #[arg(short, long)]
        inflation: Option<f64>,

        /// Write the yearly series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Project a one-time investment
    Lumpsum {
        /// One-time investment
        #[arg(short, long)]
        amount: Option<f64>,

        /// Investment period in years
        #[arg(short, long)]
        years: Option<u32>,

        /// Expected annual return (%)
        #[arg(short, long)]
        rate: Option<f64>,

        /// Expected annual inflation (%)
        #[arg(short, long)]
        inflation: Option<f64>,

        /// Write the yearly series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Monthly SIP needed to reach a target
    GoalSip {
        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        years: Option<u32>,

        #[arg(short, long)]
        rate: Option<f64>,
    },

    /// Years of monthly SIP needed to reach a target
    GoalDuration {
        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        target: f64,

        #[arg(short, long)]
        rate: Option<f64>,
    },

    /// Annual return needed for a monthly SIP to reach a target
    GoalRate {
        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        years: Option<u32>,

        #[arg(short, long)]
        target: f64,
    },

    /// Compare final values across a range of return rates
    Sweep {
        /// Sweep a lumpsum instead of a SIP
        #[arg(long)]
        lumpsum: bool,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        years: Option<u32>,

        #[arg(short, long)]
        inflation: Option<f64>,

        /// First return rate (%)
        #[arg(long, default_value = "6")]
        from: f64,

        /// Last return rate (%)
        #[arg(long, default_value = "15")]
        to: f64,

        /// Rate increment (%)
        #[arg(long, default_value = "1")]
        step: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CalculatorConfig::default(),
    }
    .apply_env_overrides();
    config.validate().context("checking calculator config")?;

    let engine = ProjectionEngine::new(config.projection_config());

    match cli.command {
        Commands::Sip { amount, years, rate, inflation, csv } => {
            let amount = amount.unwrap_or(config.sip.default_amount);
            let years = years.unwrap_or(config.sip.default_years);
            let rate = rate.unwrap_or(config.return_rate.default);
            let inflation = inflation.unwrap_or(config.inflation_rate.default);
            config.validate_sip(amount, years, rate, inflation)?;

            let params = engine.parameters(amount, years, rate, Some(inflation));
            let series = engine.project_recurring(&params)?;
            report_series(&series, cli.json, csv)?;
        }

        Commands::Lumpsum { amount, years, rate, inflation, csv } => {
            let amount = amount.unwrap_or(config.lumpsum.default_amount);
            let years = years.unwrap_or(config.lumpsum.default_years);
            let rate = rate.unwrap_or(config.return_rate.default);
            let inflation = inflation.unwrap_or(config.inflation_rate.default);
            config.validate_lumpsum(amount, years, rate, inflation)?;

            let params = engine.parameters(amount, years, rate, Some(inflation));
            let series = engine.project_lumpsum(&params)?;
            report_series(&series, cli.json, csv)?;
        }

        Commands::GoalSip { target, years, rate } => {
            let years = years.unwrap_or(config.sip.default_years);
            let rate = rate.unwrap_or(config.return_rate.default);
            config.validate_goal(target, rate)?;

            let monthly = engine.required_periodic_contribution(target, years, rate)?;
            if cli.json {
                println!("{}", serde_json::json!({ "target": target, "years": years, "return_rate": rate, "monthly_investment": monthly }));
            } else {
                println!("To reach {:.2} in {} years at {}%: invest {:.2} per month", target, years, rate, monthly);
            }
        }

        Commands::GoalDuration { amount, target, rate } => {
            let amount = amount.unwrap_or(config.sip.default_amount);
            let rate = rate.unwrap_or(config.return_rate.default);
            config.validate_goal(target, rate)?;

            let duration = engine.required_duration(amount, target, rate)?;
            if cli.json {
                println!("{}", serde_json::json!({ "target": target, "monthly_investment": amount, "return_rate": rate, "years": duration }));
            } else {
                println!("{:.2} per month at {}% reaches {:.2} in {:.2} years", amount, rate, target, duration);
            }
        }

        Commands::GoalRate { amount, years, target } => {
            let amount = amount.unwrap_or(config.sip.default_amount);
            let years = years.unwrap_or(config.sip.default_years);

            let rate = engine.required_return_rate(amount, years, target)?;
            if cli.json {
                println!("{}", serde_json::json!({ "target": target, "monthly_investment": amount, "years": years, "return_rate": rate }));
            } else {
                println!("{:.2} per month for {} years reaches {:.2} at {:.4}% annual return", amount, years, target, rate);
            }
        }

        Commands::Sweep { lumpsum, amount, years, inflation, from, to, step } => {
            let (mode, defaults) = if lumpsum {
                (InvestmentMode::Lumpsum, &config.lumpsum)
            } else {
                (InvestmentMode::Recurring, &config.sip)
            };
            let amount = amount.unwrap_or(defaults.default_amount);
            let years = years.unwrap_or(defaults.default_years);
            let rates = rate_range(from, to, step);
            anyhow::ensure!(!rates.is_empty(), "empty rate range {}..{} step {}", from, to, step);

            let base = engine.parameters(amount, years, from, inflation);
            let runner = ScenarioRunner::with_engine(engine.clone());
            let outcomes = runner.run_rate_sweep(mode, &base, &rates);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            } else {
                println!("{} {:.2} over {} years", mode, amount, years);
                println!("{:>8} {:>16} {:>16} {:>16}", "Rate%", "Invested", "Expected", "Real");
                println!("{}", "-".repeat(59));
                for outcome in &outcomes {
                    match &outcome.result {
                        Ok(series) => {
                            let s = series.summary();
                            println!(
                                "{:>8.2} {:>16.2} {:>16.2} {:>16.2}",
                                outcome.params.annual_return_rate_pct,
                                s.total_invested,
                                s.expected_value,
                                s.inflation_adjusted_value
                            );
                        }
                        Err(err) => {
                            println!("{:>8.2} {}", outcome.params.annual_return_rate_pct, err);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn report_series(series: &ProjectionSeries, json: bool, csv: Option<PathBuf>) -> Result<()> {
    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        write_series_csv(file, series)?;
        info!("Series written to {}", path.display());
    }

    if json {
        println!("{}", report_to_json(series)?);
        return Ok(());
    }

    let summary = series.summary();

    let invested_label = match series.mode {
        InvestmentMode::Recurring => "Invested",
        InvestmentMode::Lumpsum => "Initial",
    };
    println!("{:>5} {:>16} {:>16} {:>16}", "Year", invested_label, "Expected", "Inflation Adj");
    println!("{}", "-".repeat(56));
    for point in series {
        println!(
            "{:>5} {:>16.2} {:>16.2} {:>16.2}",
            point.year, point.invested_amount, point.expected_amount, point.inflation_adjusted_amount
        );
    }

    println!("\nSummary:");
    println!("  Total Investment: {:.2}", summary.total_invested);
    println!("  Expected Value:   {:.2}", summary.expected_value);
    println!("  Wealth Gained:    {:.2}", summary.wealth_gained);
    println!("  Real Value:       {:.2}", summary.inflation_adjusted_value);

    Ok(())
}
