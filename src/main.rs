use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use plugin_modelgen::{
    CliArgs, GenerationReport, GeneratorConfig, LoggingConfig, ReportFormat, generate,
    init_logging,
};

fn main() -> ExitCode {
    let _guard = match init_logging(LoggingConfig::from_env()) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("failed to initialize logging: {error:#}");
            return ExitCode::FAILURE;
        }
    };

    let cli = CliArgs::parse();
    match run(cli) {
        Ok(report) if report.check_only && !report.is_up_to_date() => {
            tracing::warn!(
                stale = report.changed().count(),
                "generated files are out of date with the model"
            );
            ExitCode::FAILURE
        }
        Ok(_) => {
            tracing::info!("successfully generated the plugin model");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "failed to generate the plugin model");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CliArgs) -> anyhow::Result<GenerationReport> {
    let config = GeneratorConfig::from_args(cli)?;
    config.validate()?;

    let report = generate(&config).context("generation aborted")?;

    match config.report {
        Some(ReportFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(ReportFormat::Text) => print!("{report}"),
        None => {}
    }

    Ok(report)
}
