//! Batch processing command for multiple invoice files.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{error, warn};

use super::process::{load_config, process_file};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Issuing distributor (rge, cooperluz, certhil, cermissoes)
    #[arg(short, long)]
    distributor: String,

    /// Treat inputs as plain UTF-8 text dumps instead of PDFs
    #[arg(long)]
    text: bool,

    /// Output file for the JSON-lines records (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            if args.text {
                matches!(ext.to_lowercase().as_str(), "txt" | "text")
            } else {
                ext.eq_ignore_ascii_case("pdf")
            }
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let mut lines = Vec::with_capacity(files.len());
    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for path in &files {
        match process_file(path, &args.distributor, args.text, &config) {
            Ok(output) => {
                succeeded += 1;
                lines.push(serde_json::to_string(&output)?);
                println!("{} {}", style("✓").green(), path.display());
            }
            Err(e) => {
                failed += 1;
                error!("failed to process {}: {}", path.display(), e);
                println!("{} {}: {}", style("✗").red(), path.display(), e);
            }
        }
    }

    if let Some(output_path) = &args.output {
        let mut file = fs::File::create(output_path)?;
        for line in &lines {
            writeln!(file, "{}", line)?;
        }
        println!(
            "{} Records written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        for line in &lines {
            println!("{}", line);
        }
    }

    if failed > 0 {
        warn!("{} of {} files failed", failed, files.len());
    }
    println!(
        "{} Processed {} files ({} ok, {} failed) in {:.1}s",
        style("ℹ").blue(),
        files.len(),
        succeeded,
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
