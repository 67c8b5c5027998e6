//! Process command - extract data from a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use fatura_core::compose::{compose, decimal_to_dms, Axis, CompositeFields};
use fatura_core::models::config::FaturaConfig;
use fatura_core::pdf::{PdfExtractor, PdfTextSource};
use fatura_core::{calculate, extract_declared, EngineeringParams, InvoiceRecord, SystemInputs};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or plain text with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Issuing distributor (rge, cooperluz, certhil, cermissoes)
    #[arg(short, long)]
    distributor: String,

    /// Treat the input as a plain UTF-8 text dump instead of a PDF
    #[arg(long)]
    text: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Entrance category code for the sizing calculation (e.g. T3)
    #[arg(long)]
    category: Option<String>,

    /// Number of panels
    #[arg(long)]
    panels: Option<String>,

    /// Panel power in Wp
    #[arg(long)]
    panel_power: Option<String>,

    /// Number of inverters
    #[arg(long)]
    inverters: Option<String>,

    /// Inverter power in kW
    #[arg(long)]
    inverter_power: Option<String>,

    /// Installation latitude in decimal degrees
    #[arg(long)]
    latitude: Option<String>,

    /// Installation longitude in decimal degrees
    #[arg(long)]
    longitude: Option<String>,
}

/// The JSON document the command emits.
#[derive(Serialize)]
pub struct ProcessOutput {
    pub source: String,
    pub distributor: String,
    pub record: InvoiceRecord,
    pub composites: CompositeFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering: Option<EngineeringParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude_dms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude_dms: Option<String>,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let output = match process_file(&args.input, &args.distributor, args.text, &config) {
        Ok(mut out) => {
            attach_extras(&mut out, &args);
            out
        }
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), style(&e).red());
            return Err(e);
        }
    };

    let rendered = serde_json::to_string_pretty(&output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Extract one invoice file into the output document. Shared with `batch`.
pub fn process_file(
    input: &Path,
    distributor: &str,
    text_mode: bool,
    config: &FaturaConfig,
) -> anyhow::Result<ProcessOutput> {
    let source = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input")
        .to_string();

    let text = if text_mode {
        fs::read_to_string(input)?
    } else {
        let data = fs::read(input)?;
        let extractor = PdfExtractor::from_bytes(&data)?;
        if config.pdf.first_page_only {
            extractor.extract_first_page_text()?
        } else {
            extractor.extract_text()?
        }
    };

    info!("extracted {} chars of text from {}", text.len(), source);

    let record = extract_declared(&text, distributor, &source)?;
    let composites = compose(&record);

    Ok(ProcessOutput {
        source,
        distributor: distributor.to_string(),
        record,
        composites,
        engineering: None,
        latitude_dms: None,
        longitude_dms: None,
    })
}

/// Load the pipeline configuration, defaulted when no file is given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FaturaConfig> {
    Ok(match config_path {
        Some(path) => FaturaConfig::from_file(Path::new(path))?,
        None => FaturaConfig::default(),
    })
}

/// Attach the optional sizing calculation and DMS coordinates.
fn attach_extras(output: &mut ProcessOutput, args: &ProcessArgs) {
    let has_sizing = args.category.is_some()
        || args.panels.is_some()
        || args.panel_power.is_some()
        || args.inverters.is_some()
        || args.inverter_power.is_some();

    if has_sizing {
        let inputs = SystemInputs {
            category_code: args.category.clone().unwrap_or_default(),
            panel_count: args.panels.clone().unwrap_or_default(),
            panel_power_wp: args.panel_power.clone().unwrap_or_default(),
            inverter_count: args.inverters.clone().unwrap_or_default(),
            inverter_power_kw: args.inverter_power.clone().unwrap_or_default(),
        };
        output.engineering = Some(calculate(&inputs));
    }

    output.latitude_dms = args
        .latitude
        .as_deref()
        .map(|v| decimal_to_dms(v, Axis::Latitude));
    output.longitude_dms = args
        .longitude
        .as_deref()
        .map(|v| decimal_to_dms(v, Axis::Longitude));
}
