use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use neuroseg_rs::{model, volume, Config, DiagnosisReport, Result, VolumeProcessor};

fn main() {
    // stdout carries exactly one JSON line; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    match run(&config) {
        Ok(report) => println!("{}", report.to_json_line()),
        Err(err) => {
            println!("{}", serde_json::json!({ "error": err.to_string() }));
            process::exit(err.exit_code());
        }
    }
}

fn run(config: &Config) -> Result<DiagnosisReport> {
    model::probe_runtime()?;
    config.validate()?;

    let volume = volume::load_volume(&config.input)?;
    let processor = VolumeProcessor::with_onnx_model(config)?;
    processor.analyze(volume)
}
