//! `assessjoin run` and `assessjoin validate`.

use std::path::{Path, PathBuf};

use assessjoin_linkage::config::{SourceConfig, DEFAULT_OUTPUT};
use assessjoin_linkage::engine::JoinInput;
use assessjoin_linkage::model::OUTPUT_HEADER;
use assessjoin_linkage::{JoinConfig, JoinResult, JoinedRow};
use clap::Args;
use serde::Serialize;

use crate::exit_codes::{EXIT_CONFIG, EXIT_OUTPUT, EXIT_USAGE};
use crate::source::{SourceClient, TextSource};
use crate::CliError;

#[derive(Args)]
pub struct RunArgs {
    /// TOML config file; flags below override its values
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Property-assessment roll as a local CSV file
    #[arg(long, value_name = "PATH", conflicts_with = "properties_url")]
    pub properties_csv: Option<PathBuf>,

    /// Property-assessment roll as a CSV download
    #[arg(long, value_name = "URL")]
    pub properties_url: Option<String>,

    /// Recorded-documents export as a local CSV file
    #[arg(long, value_name = "PATH", conflicts_with = "mortgages_url")]
    pub mortgages_csv: Option<PathBuf>,

    /// Recorded-documents export as a CSV download
    #[arg(long, value_name = "URL")]
    pub mortgages_url: Option<String>,

    /// Where to write the joined CSV [default: mortgage_assessed_join.csv]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Keep mortgages recorded within this many years (365-day years) [default: 2]
    #[arg(long, value_name = "N")]
    pub years: Option<u32>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

fn join_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

// ============================================================================
// Config loading + flag merging
// ============================================================================

/// Read and validate a config file. Returns it with the directory that
/// relative paths inside it resolve against.
fn load_config(path: &Path) -> Result<(JoinConfig, PathBuf), CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        join_err(EXIT_CONFIG, format!("cannot read config {}: {e}", path.display()))
    })?;
    let config = JoinConfig::from_toml(&text)
        .map_err(|e| join_err(EXIT_CONFIG, format!("{}: {e}", path.display())))?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((config, base_dir))
}

/// A flag pair replaces the config section wholesale; otherwise the config's
/// path (relative to `base_dir`) or URL is used.
fn resolve_source(
    name: &str,
    flag_path: Option<PathBuf>,
    flag_url: Option<String>,
    section: &SourceConfig,
    base_dir: &Path,
) -> Result<TextSource, CliError> {
    if let Some(source) = TextSource::from_parts(flag_path, flag_url) {
        return Ok(source);
    }
    let from_config = TextSource::from_parts(
        section.path.as_ref().map(|p| base_dir.join(p)),
        section.url.clone(),
    );
    from_config.ok_or_else(|| {
        join_err(EXIT_USAGE, format!("no {name} source given"))
            .with_hint(format!("pass --{name}-csv or --{name}-url, or set [{name}] in the config"))
    })
}

fn resolve_output(flag: Option<PathBuf>, config: &JoinConfig, base_dir: &Path) -> PathBuf {
    match (flag, &config.output.path) {
        (Some(path), _) => path,
        (None, Some(path)) => base_dir.join(path),
        (None, None) => PathBuf::from(DEFAULT_OUTPUT),
    }
}

// ============================================================================
// run
// ============================================================================

#[derive(Serialize)]
struct RunReport<'a> {
    properties_source: String,
    mortgages_source: String,
    output: String,
    #[serde(flatten)]
    result: &'a JoinResult,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let (mut config, base_dir) = match &args.config {
        Some(path) => load_config(path)?,
        None => (JoinConfig::default(), PathBuf::new()),
    };

    let properties = resolve_source(
        "properties",
        args.properties_csv,
        args.properties_url,
        &config.properties,
        &base_dir,
    )?;
    let mortgages = resolve_source(
        "mortgages",
        args.mortgages_csv,
        args.mortgages_url,
        &config.mortgages,
        &base_dir,
    )?;
    if let Some(years) = args.years {
        config.window.years = years;
    }
    let output = resolve_output(args.output, &config, &base_dir);

    // Both inputs are retrieved before any processing starts.
    let client = SourceClient::new(config.http.timeout_secs, &config.http.user_agent)?;
    let input = JoinInput {
        properties_csv: properties.fetch(&client)?,
        mortgages_csv: mortgages.fetch(&client)?,
    };
    tracing::info!(
        properties = %properties,
        mortgages = %mortgages,
        property_bytes = input.properties_csv.len(),
        mortgage_bytes = input.mortgages_csv.len(),
        "inputs loaded"
    );

    let today = chrono::Local::now().date_naive();
    let result = assessjoin_linkage::run(&config, &input, today);

    write_output(&result.rows, &output)?;

    if args.json {
        let report = RunReport {
            properties_source: properties.to_string(),
            mortgages_source: mortgages.to_string(),
            output: output.display().to_string(),
            result: &result,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| join_err(EXIT_OUTPUT, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!("wrote {} rows to {}", s.total_rows, output.display());
    eprintln!(
        "matched {} by parcel, {} by address, {} unmatched (mortgages since {})",
        s.matched_by_parcel, s.matched_by_address, s.unmatched, result.meta.cutoff,
    );

    Ok(())
}

/// Write the header and one line per row. The header is written even when
/// there are no rows. Missing parent directories are created.
fn write_output(rows: &[JoinedRow], path: &Path) -> Result<(), CliError> {
    let out_err = |e: &dyn std::fmt::Display| {
        join_err(EXIT_OUTPUT, format!("cannot write {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| out_err(&e))?;
    }

    let file = std::fs::File::create(path).map_err(|e| out_err(&e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(std::io::BufWriter::new(file));

    writer.write_record(OUTPUT_HEADER).map_err(|e| out_err(&e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| out_err(&e))?;
    }
    writer.flush().map_err(|e| out_err(&e))?;
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

fn describe_source(section: &SourceConfig, base_dir: &Path) -> String {
    match TextSource::from_parts(
        section.path.as_ref().map(|p| base_dir.join(p)),
        section.url.clone(),
    ) {
        Some(source) => source.to_string(),
        None => "(unset, needs a flag)".to_string(),
    }
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let (config, base_dir) = load_config(&config_path)?;
    eprintln!("valid: {}", config_path.display());
    eprintln!("  properties: {}", describe_source(&config.properties, &base_dir));
    eprintln!("  mortgages:  {}", describe_source(&config.mortgages, &base_dir));
    eprintln!("  output:     {}", resolve_output(None, &config, &base_dir).display());
    eprintln!("  window:     {} year(s)", config.window.years);
    Ok(())
}
