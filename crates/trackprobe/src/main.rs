//! Trackprobe CLI - print a track's BPM and key as one JSON line
//!
//! Usage: `trackprobe <audio-file>`. On success the only stdout output is
//! `{"bpm": <number>, "key": <string or null>}`; diagnostics go to stderr.

use std::path::Path;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, keeping stdout a single machine-readable JSON line.
    // Set RUST_LOG=debug for analyzer invocation details.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: trackprobe <audio-file>");
        std::process::exit(1);
    }

    let attrs = trackprobe::extract(Path::new(&args[1]))
        .with_context(|| format!("analysis failed for {}", args[1]))?;

    let json = serde_json::to_string(&attrs).context("failed to serialize result")?;
    println!("{}", json);

    Ok(())
}
