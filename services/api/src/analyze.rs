use crate::infra::build_pipeline;
use clap::Args;
use ethos_deliver::config::AppConfig;
use ethos_deliver::error::AppError;
use ethos_deliver::telemetry;
use ethos_deliver::workflows::dispatch::{DeliveryDecision, TriagePipeline};
use std::io::{self, BufRead, Write};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Package description; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub(crate) description: Vec<String>,
    /// Pickup location (defaults to N/A)
    #[arg(long)]
    pub(crate) pickup: Option<String>,
    /// Dropoff location (defaults to N/A)
    #[arg(long)]
    pub(crate) dropoff: Option<String>,
    /// Print the decision as JSON instead of the operator report
    #[arg(long)]
    pub(crate) json: bool,
}

fn bootstrap() -> Result<TriagePipeline, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(build_pipeline(&config))
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        description,
        pickup,
        dropoff,
        json,
    } = args;

    let pipeline = bootstrap()?;
    let description = description.join(" ");

    let decision = pipeline.process(&description, pickup.as_deref(), dropoff.as_deref())?;
    if json {
        match serde_json::to_string_pretty(&decision.view()) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Decision payload unavailable: {err}"),
        }
    } else {
        print_banner();
        println!("\nProcessing: '{description}'...");
        render_decision(&decision);
    }

    Ok(())
}

pub(crate) fn run_interactive() -> Result<(), AppError> {
    let pipeline = bootstrap()?;
    print_banner();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nEnter Package Description (or 'q' to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let description = line.trim();
        if description.eq_ignore_ascii_case("q") {
            break;
        }

        println!("\nProcessing: '{description}'...");
        match pipeline.process(description, None, None) {
            Ok(decision) => render_decision(&decision),
            Err(err) => println!("Error: {err}"),
        }
    }

    Ok(())
}

fn print_banner() {
    println!("------------------------------------------------");
    println!("  ETHOS-DELIVER: Ethical Priority System (CLI)  ");
    println!("------------------------------------------------");
}

pub(crate) fn render_decision(decision: &DeliveryDecision) {
    println!("{}", decision_report(decision));
}

fn decision_report(decision: &DeliveryDecision) -> String {
    [
        "\n=== DECISION OUTPUT ===".to_string(),
        format!(
            "PRIORITY LEVEL: {} ({})",
            decision.priority_level,
            decision.priority_level.label()
        ),
        format!("APPROVAL REQ:   {}", decision.requires_approval),
        "-".repeat(30),
        decision.explanation.clone(),
        "=======================".to_string(),
    ]
    .join("\n")
}
