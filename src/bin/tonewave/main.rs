//! tonewave - render note lists to a WAV file
//!
//! Run with: cargo run -- c4,e4,g4,c5 e3,_,g3,_
//! Listen with: aplay output.wav

mod cli;

use std::{fs::File, io};

use clap::Parser;
use color_eyre::eyre::{bail, Result as EyreResult, WrapErr};
use tonewave::{render, render_seekable, HeaderMode, RenderReport};

use cli::Args;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    // Logs go to stderr so `-o -` keeps stdout clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.render_config();
    tracing::debug!(?config, voices = args.voices.len(), "parsed arguments");

    let report = if args.to_stdout() {
        if config.header == HeaderMode::Patched {
            bail!("--patch-header needs a file output, not stdout");
        }
        render(&config, args.voices.as_slice(), io::stdout().lock())
            .wrap_err("render to stdout failed")?
    } else {
        let file = File::create(&args.output)
            .wrap_err_with(|| format!("cannot create {}", args.output.display()))?;
        render_seekable(&config, args.voices.as_slice(), file)
            .wrap_err_with(|| format!("render to {} failed", args.output.display()))?
    };

    summarize(&args, &report);
    Ok(())
}

fn summarize(args: &Args, report: &RenderReport) {
    let seconds = report.samples_written as f64 / f64::from(args.sample_rate);
    tracing::info!(
        output = %args.output.display(),
        samples = report.samples_written,
        bytes = report.data_len(),
        "wrote {seconds:.2}s of audio"
    );
    if let Some(header) = report.header {
        if u64::from(header.data_len) != report.data_len() as u64 {
            tracing::info!(
                declared_seconds = header.duration_seconds(),
                "header declares a placeholder length; use --patch-header for an exact one"
            );
        }
    }
}
