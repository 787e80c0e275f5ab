use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use insure_quote::console::Console;
use insure_quote::engine::EngineError;
use insure_quote::invoice::{COMPANY_NAME, Invoice};
use insure_quote::policy::PolicyRecorder;
use insure_quote::progress::Indicator;
use insure_quote::rates::load_rates;
use insure_quote::{CustomerRecord, Engine, PolicyNumber, Quote};

/// Quote car insurance customers and record their policies.
#[derive(Debug, Parser)]
#[command(name = "insure-quote", version)]
struct Args {
    /// Rate configuration file of `name,value` rows
    #[arg(long, default_value = "Const.dat")]
    rates: PathBuf,

    /// Directory receiving the `Policy_<n>.txt` files
    #[arg(long, default_value = ".")]
    policy_dir: PathBuf,

    /// Skip the progress pauses between steps
    #[arg(long)]
    no_animation: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let rates = match load_rates(&args.rates) {
        Ok(rates) => rates,
        Err(e) => {
            error!(path = %args.rates.display(), "cannot load rates: {e}");
            return ExitCode::FAILURE;
        }
    };

    let recorder = PolicyRecorder::new(&args.policy_dir).with_rates_file(&args.rates);
    let mut engine = Engine::new(rates, recorder);
    let indicator = if args.no_animation {
        Indicator::disabled()
    } else {
        Indicator::default()
    };

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    match run(&mut engine, &mut console, indicator) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => ExitCode::SUCCESS,
        Err(e) => {
            error!("console failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Serve customers until the operator declines to continue
fn run<R: BufRead, W: Write>(
    engine: &mut Engine,
    console: &mut Console<R, W>,
    indicator: Indicator,
) -> io::Result<()> {
    console.say(&format!("\n\n{COMPANY_NAME:^70}"))?;
    console.say(&format!("{:^70}\n", format!("Welcome to {COMPANY_NAME}")))?;

    loop {
        let customer = console.collect_customer()?;
        indicator.run("Processing Invoice...", "Processing Invoice completed!");

        match process(engine, &customer) {
            Ok((quote, policy)) => {
                let invoice = Invoice {
                    customer: &customer,
                    quote: &quote,
                    rates: engine.rates(),
                    policy,
                    invoice_date: Local::now().date_naive(),
                };
                console.say(&invoice.to_string())?;
                indicator.run("Saving policy data...", "Policy data saved successfully!");
            }
            Err(e) => {
                warn!(customer = %customer.full_name(), "{e}");
                console.say(&format!("Policy could not be saved: {e}"))?;
            }
        }

        if !console.ask_another()? {
            return Ok(());
        }
    }
}

fn process(
    engine: &mut Engine,
    customer: &CustomerRecord,
) -> Result<(Quote, PolicyNumber), EngineError> {
    let quote = engine.quote(customer)?;
    let policy = engine.record(customer, &quote)?;
    Ok((quote, policy))
}
