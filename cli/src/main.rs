use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use netplan_config_core::{ValidationError, config_schema};
use netplan_config_loader::{LoadError, ReferencedFile, load_config};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

mod logging;

/// Output format for validation reports.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Output format for normalized configurations.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ConfigFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "netplan-config")]
#[command(about = "Validate and normalize network planner configurations")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more configuration files and report every error.
    Validate(ValidateArgs),
    /// Validate a configuration file and print it with defaults applied.
    Normalize(NormalizeArgs),
    /// Print the configuration schema, or the constraints on one field.
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Configuration files (.json, .yaml or .yml).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Also fail when a referenced input file does not exist.
    #[arg(long)]
    check_files: bool,
    /// Directory the planner run starts in; relative input paths resolve
    /// against it (default: current directory).
    #[arg(long, requires = "check_files")]
    base_dir: Option<PathBuf>,
    /// Report format.
    #[arg(long, default_value = "text")]
    format: ReportFormat,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Configuration file (.json, .yaml or .yml).
    input: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: ConfigFormat,
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Dotted field path (e.g. network_parameters.minimum_node_count).
    #[arg(long)]
    field: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Normalize(args) => run_normalize(args),
        Command::Schema(args) => run_schema(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Validation outcome for one configuration file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing_files: Vec<ReferencedFile>,
}

impl FileReport {
    fn check(path: &Path, base_dir: Option<&Path>) -> Self {
        let mut report = Self {
            path: path.to_path_buf(),
            valid: false,
            errors: Vec::new(),
            load_error: None,
            missing_files: Vec::new(),
        };

        match load_config(path) {
            Ok(loaded) => {
                if let Some(base_dir) = base_dir {
                    report.missing_files = loaded.missing_files(base_dir);
                }
                report.valid = report.missing_files.is_empty();
            }
            Err(LoadError::Invalid(errors)) => report.errors = errors.into_vec(),
            Err(err) => report.load_error = Some(err.to_string()),
        }

        debug!(path = %path.display(), valid = report.valid, "checked configuration");
        report
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        if self.valid {
            out.push_str(&format!("ok: {}\n", self.path.display()));
            return out;
        }

        let problems = self.errors.len() + self.missing_files.len();
        match &self.load_error {
            Some(err) => out.push_str(&format!("failed: {}: {err}\n", self.path.display())),
            None => out.push_str(&format!(
                "invalid: {} ({problems} problem(s))\n",
                self.path.display()
            )),
        }
        for error in &self.errors {
            out.push_str(&format!("  - {error}\n"));
        }
        for file in &self.missing_files {
            out.push_str(&format!(
                "  - {}: {} file not found: {}\n",
                file.role.field_path(),
                file.role,
                file.path.display()
            ));
        }
        out
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let base_dir = args
        .check_files
        .then(|| args.base_dir.as_deref().unwrap_or(Path::new(".")));
    let reports: Vec<FileReport> = args
        .inputs
        .par_iter()
        .map(|path| FileReport::check(path, base_dir))
        .collect();

    match args.format {
        ReportFormat::Text => {
            for report in &reports {
                print!("{}", report.render_text());
            }
        }
        ReportFormat::Json => {
            let raw = serde_json::to_string_pretty(&reports)
                .map_err(|err| format!("Failed to serialize validation report: {err}"))?;
            println!("{raw}");
        }
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    if failed > 0 {
        return Err(format!(
            "{failed} of {} configuration file(s) failed validation",
            reports.len()
        ));
    }
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<(), String> {
    let loaded = load_config(&args.input).map_err(|err| match err {
        LoadError::Invalid(errors) => {
            format!(
                "{}: {errors}\n{}",
                args.input.display(),
                errors.report().trim_end()
            )
        }
        other => format!("{}: {other}", args.input.display()),
    })?;

    let raw = format_config(loaded.document(), args.format)?;

    match &args.output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|err| {
                        format!(
                            "Failed to create output directory '{}': {err}",
                            parent.display()
                        )
                    })?;
                }
            }
            fs::write(output, raw)
                .map_err(|err| format!("Failed to write '{}': {err}", output.display()))?;
            println!("Wrote normalized configuration to '{}'.", output.display());
        }
        None => print!("{raw}"),
    }

    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), String> {
    let schema = config_schema();
    let value = match args.field.as_deref() {
        None => schema.to_json_schema(),
        Some(path) => {
            let info = schema.lookup(path).ok_or_else(|| {
                format!(
                    "unknown field path '{path}'; known paths: {}",
                    schema.field_paths().join(", ")
                )
            })?;
            serde_json::to_value(info)
                .map_err(|err| format!("Failed to serialize field info: {err}"))?
        }
    };

    let raw = serde_json::to_string_pretty(&value)
        .map_err(|err| format!("Failed to serialize schema: {err}"))?;
    println!("{raw}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serializes a normalized document in the requested format,
/// newline-terminated.
fn format_config(document: &Value, format: ConfigFormat) -> Result<String, String> {
    match format {
        ConfigFormat::Json => serde_json::to_string_pretty(document)
            .map(|raw| raw + "\n")
            .map_err(|e| format!("JSON serialization failed: {e}")),
        ConfigFormat::Yaml => {
            serde_yaml::to_string(document).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}
