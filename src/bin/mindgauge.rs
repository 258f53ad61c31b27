//! Mindgauge CLI - Command-line interface for the diagnosis pipeline
//!
//! Commands:
//! - diagnose: Run questionnaire answers through the full pipeline (batch mode)
//! - validate: Validate answer records against the schema
//! - model-info: Print metadata about the loaded model artifact
//! - doctor: Diagnose engine health and artifact configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use mindgauge::pipeline::DiagnosisEngine;
use mindgauge::schema::RawAnswers;
use mindgauge::types::DiagnosisRecord;
use mindgauge::{DiagnosisError, LinearModel, ENGINE_VERSION, PRODUCER_NAME};

/// Mindgauge - depression-risk scoring for student questionnaire data
#[derive(Parser)]
#[command(name = "mindgauge")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score questionnaire answers for depression risk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run answers through the full diagnosis pipeline (batch mode)
    Diagnose {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Directory holding the model artifact
        #[arg(long, default_value = "models")]
        models_dir: PathBuf,
    },

    /// Validate answer records against the schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print metadata about the loaded model artifact
    ModelInfo {
        /// Directory holding the model artifact
        #[arg(long, default_value = "models")]
        models_dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose engine health and artifact configuration
    Doctor {
        /// Directory holding the model artifact
        #[arg(long, default_value = "models")]
        models_dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one answers record per line)
    Ndjson,
    /// JSON array of answers records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one diagnosis record per line)
    Ndjson,
    /// JSON array of diagnosis records
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), MindgaugeCliError> {
    match cli.command {
        Commands::Diagnose {
            input,
            output,
            input_format,
            output_format,
            models_dir,
        } => cmd_diagnose(&input, &output, input_format, output_format, &models_dir),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::ModelInfo { models_dir, json } => cmd_model_info(&models_dir, json),

        Commands::Doctor { models_dir, json } => cmd_doctor(&models_dir, json),
    }
}

fn cmd_diagnose(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
    models_dir: &std::path::Path,
) -> Result<(), MindgaugeCliError> {
    let input_data = read_input(input)?;
    let answers = parse_answers(&input_data, &input_format)?;

    if answers.is_empty() {
        return Err(MindgaugeCliError::NoAnswers);
    }

    let engine = DiagnosisEngine::from_models_dir(models_dir)?;

    let mut records: Vec<DiagnosisRecord> = Vec::with_capacity(answers.len());
    for raw in &answers {
        records.push(engine.diagnose(raw)?);
    }

    let output_data = format_output(&records, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), MindgaugeCliError> {
    let input_data = read_input(input)?;
    let answers = parse_answers(&input_data, &input_format)?;

    let errors: Vec<ValidationErrorDetail> = answers
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            raw.validate().err().map(|e| ValidationErrorDetail {
                index,
                error: e.to_string(),
            })
        })
        .collect();

    let report = ValidationReport {
        total_records: answers.len(),
        valid_records: answers.len() - errors.len(),
        invalid_records: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Record {}: {}", err.index, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(MindgaugeCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_model_info(models_dir: &std::path::Path, json: bool) -> Result<(), MindgaugeCliError> {
    let model = LinearModel::load(models_dir)?;
    let info = mindgauge::model::Classifier::info(&model);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Model Info");
        println!("==========");
        println!("Features: {}", info.num_features);
        println!("Columns:");
        for column in &info.feature_columns {
            println!("  - {}", column);
        }
        if let Some(metadata) = &info.metadata {
            if let Some(name) = &metadata.model_name {
                println!("Model name: {}", name);
            }
            if let Some(accuracy) = metadata.accuracy {
                println!("Accuracy:   {:.4}", accuracy);
            }
            if let Some(auc) = metadata.auc {
                println!("AUC:        {:.4}", auc);
            }
        }
    }

    Ok(())
}

fn cmd_doctor(models_dir: &std::path::Path, json: bool) -> Result<(), MindgaugeCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Mindgauge version {}", ENGINE_VERSION),
    });

    match LinearModel::load(models_dir) {
        Ok(model) => {
            let info = mindgauge::model::Classifier::info(&model);
            checks.push(DoctorCheck {
                name: "model_artifact".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "Model artifact loaded ({} features)",
                    info.num_features
                ),
            });
            if info.metadata.is_none() {
                checks.push(DoctorCheck {
                    name: "model_metadata".to_string(),
                    status: CheckStatus::Warning,
                    message: "Artifact carries no training metadata".to_string(),
                });
            }
        }
        Err(DiagnosisError::ModelUnavailable(msg)) => {
            checks.push(DoctorCheck {
                name: "model_artifact".to_string(),
                status: CheckStatus::Error,
                message: format!("No model artifact: {}", msg),
            });
        }
        Err(e) => {
            checks.push(DoctorCheck {
                name: "model_artifact".to_string(),
                status: CheckStatus::Error,
                message: format!("Model artifact unusable: {}", e),
            });
        }
    }

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Mindgauge Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(MindgaugeCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, MindgaugeCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_answers(
    input_data: &str,
    input_format: &InputFormat,
) -> Result<Vec<RawAnswers>, MindgaugeCliError> {
    match input_format {
        InputFormat::Ndjson => input_data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(MindgaugeCliError::Json))
            .collect(),
        InputFormat::Json => {
            serde_json::from_str::<Vec<RawAnswers>>(input_data).map_err(MindgaugeCliError::Json)
        }
    }
}

fn format_output(
    records: &[DiagnosisRecord],
    format: &OutputFormat,
) -> Result<String, MindgaugeCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for record in records {
                lines.push(serde_json::to_string(record)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(records)?),
    }
}

// Error types

#[derive(Debug)]
enum MindgaugeCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Engine(DiagnosisError),
    NoAnswers,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for MindgaugeCliError {
    fn from(e: io::Error) -> Self {
        MindgaugeCliError::Io(e)
    }
}

impl From<serde_json::Error> for MindgaugeCliError {
    fn from(e: serde_json::Error) -> Self {
        MindgaugeCliError::Json(e)
    }
}

impl From<DiagnosisError> for MindgaugeCliError {
    fn from(e: DiagnosisError) -> Self {
        MindgaugeCliError::Engine(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MindgaugeCliError> for CliError {
    fn from(e: MindgaugeCliError) -> Self {
        match e {
            MindgaugeCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MindgaugeCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax and field names".to_string()),
            },
            MindgaugeCliError::Engine(e) => CliError {
                code: match e {
                    DiagnosisError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
                    DiagnosisError::ContractMismatch(_) => "CONTRACT_MISMATCH",
                    DiagnosisError::Validation(_) => "VALIDATION_ERROR",
                    DiagnosisError::Prediction(_) => "PREDICTION_ERROR",
                    _ => "ENGINE_ERROR",
                }
                .to_string(),
                message: e.to_string(),
                hint: Some("Run 'mindgauge doctor' to check the configuration".to_string()),
            },
            MindgaugeCliError::NoAnswers => CliError {
                code: "NO_ANSWERS".to_string(),
                message: "No answer records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            MindgaugeCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            MindgaugeCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
