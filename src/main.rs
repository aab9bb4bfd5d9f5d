//! Loan Decision Engine CLI
//!
//! Decides applicant batches from CSV or serves the HTTP API.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use loan_engine::api::{AppState, create_router};
use loan_engine::calculation::build_installment_plan;
use loan_engine::config::ConfigLoader;
use loan_engine::ingest::load_applications;
use loan_engine::pipeline::{LoanDecisionPipeline, RecordedStatusClassifier};
use loan_engine::report::{render_installment_plan, render_report};

#[derive(Parser, Debug)]
#[command(name = "loan-engine")]
#[command(about = "Compute loan terms for classified applicants")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide every applicant in a CSV file using its recorded approval status
    Batch {
        /// Applicant CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration directory
        #[arg(short, long, default_value = "config/default")]
        config: PathBuf,

        /// Print decision results as JSON instead of reports
        #[arg(long)]
        json: bool,

        /// Append the month-by-month repayment plan to approved reports
        #[arg(long)]
        schedule: bool,
    },
    /// Serve the decision API
    Serve {
        /// Configuration directory
        #[arg(short, long, default_value = "config/default")]
        config: PathBuf,

        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let outcome = match args.command {
        Command::Batch {
            input,
            config,
            json,
            schedule,
        } => run_batch(&input, &config, json, schedule),
        Command::Serve { config, addr } => run_serve(&config, &addr),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "loan-engine failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_batch(
    input: &Path,
    config: &Path,
    json: bool,
    schedule: bool,
) -> Result<(), Box<dyn Error>> {
    let policy = ConfigLoader::load(config)?.into_policy();
    let pipeline = LoanDecisionPipeline::new(policy);
    let applications = load_applications(input)?;

    let results = pipeline.evaluate_batch(&RecordedStatusClassifier, &applications);
    let currency = &pipeline.policy().settings().currency;

    let mut approved = 0usize;
    for (application, result) in applications.iter().zip(results) {
        let result = result?;
        if result.decision.is_approved() {
            approved += 1;
        }
        if json {
            println!("{}", serde_json::to_string(&result)?);
        } else {
            print!(
                "{}",
                render_report(application, &result.decision, currency, None)
            );
            if let (true, Some(loan)) = (schedule, result.decision.approved()) {
                let plan = build_installment_plan(
                    Decimal::from(loan.approved_amount),
                    loan.interest_rate,
                    loan.repayment_years,
                    loan.schedule.method,
                )?;
                print!("{}", render_installment_plan(&plan, currency));
            }
            println!();
        }
    }

    info!(
        total = applications.len(),
        approved,
        "Batch complete"
    );
    Ok(())
}

fn run_serve(config: &Path, addr: &str) -> Result<(), Box<dyn Error>> {
    let policy = ConfigLoader::load(config)?.into_policy();
    let router = create_router(AppState::new(policy));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr = %addr, "Serving loan decision API");
        axum::serve(listener, router).await?;
        Ok::<(), Box<dyn Error>>(())
    })
}
