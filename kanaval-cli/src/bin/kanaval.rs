use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use kanaval_cli::init_tracing;
use kanaval_cli::report::{LineReport, Summary, check_lines, check_lines_with};
use kanaval_cli::settings::Settings;
use kanaval_engine::{
    ValidationOptions, half_to_full_katakana, hiragana_to_katakana, is_full_katakana,
    is_half_katakana, is_katakana, normalize_to_katakana, trim_value, validate_katakana,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// kanaval: check and normalize katakana (name kana) input.
#[derive(Parser, Debug)]
#[command(name = "kanaval")]
#[command(about = "kanaval: check and normalize katakana (name kana) input")]
struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print which katakana classes a text belongs to.
    Classify {
        text: String,
    },

    /// Convert texts towards full-width katakana.
    Normalize {
        #[arg(required = true)]
        texts: Vec<String>,

        /// Only convert hiragana to katakana
        #[arg(long, conflicts_with = "half_only")]
        hiragana_only: bool,

        /// Only convert half-width katakana to full-width
        #[arg(long)]
        half_only: bool,
    },

    /// Validate a single name kana. Exits with status 1 when invalid.
    Validate {
        text: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every line of a file ("-" for stdin). Exits with status 1
    /// when any line is invalid.
    Batch {
        input: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Write the default settings to the config file.
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Flags overriding the configured validation options.
#[derive(Args, Debug)]
struct PolicyArgs {
    /// Accept half-width katakana as-is
    #[arg(long)]
    allow_half_width: bool,

    /// Convert hiragana / half-width input instead of rejecting it
    #[arg(long)]
    auto_normalize: bool,
}

impl PolicyArgs {
    fn apply(&self, configured: ValidationOptions) -> ValidationOptions {
        configured
            .with_half_width(configured.allow_half_width || self.allow_half_width)
            .with_auto_normalize(configured.auto_normalize || self.auto_normalize)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Human-readable lines followed by a summary
    Text,
    /// One JSON object per line
    Json,
}

// --- classify / normalize ---

fn run_classify(text: &str) -> Result<bool> {
    let value = serde_json::json!({
        "isFullKatakana": is_full_katakana(text),
        "isHalfKatakana": is_half_katakana(text),
        "isKatakana": is_katakana(text),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(true)
}

fn run_normalize(texts: &[String], hiragana_only: bool, half_only: bool) -> Result<bool> {
    for text in texts {
        let output = if hiragana_only {
            hiragana_to_katakana(text)
        } else if half_only {
            half_to_full_katakana(text)
        } else {
            normalize_to_katakana(text)
        };
        println!("{output}");
    }
    Ok(true)
}

// --- validate ---

fn run_validate(text: &str, options: &ValidationOptions, json: bool) -> Result<bool> {
    let result = validate_katakana(Some(text), options);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(err) = &result.error_message {
        println!("NG: {err}");
    } else if let Some(normalized) = &result.normalized_text {
        println!("OK: {normalized}");
    } else {
        println!("OK: {}", trim_value(text));
    }

    Ok(result.is_valid)
}

// --- batch ---

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {:?}", input))
    }
}

fn run_batch(input: &Path, options: &ValidationOptions, format: Format) -> Result<bool> {
    let content = read_input(input)?;
    let lines: Vec<&str> = content.lines().collect();
    tracing::info!("Validating {} line(s) from {:?}", lines.len(), input);

    let reports: Vec<LineReport> = if input == Path::new("-") {
        check_lines(&lines, options)
    } else {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta})")
                .context("invalid progress template")?
                .progress_chars("=>-"),
        );
        let reports = check_lines_with(&lines, options, || pb.inc(1));
        pb.finish_and_clear();
        reports
    };

    let summary = Summary::from_reports(&reports);

    match format {
        Format::Text => {
            for report in &reports {
                println!("{report}");
            }
            println!("{summary}");
        }
        Format::Json => {
            for report in &reports {
                println!("{}", serde_json::to_string(report)?);
            }
            eprintln!("{}", serde_json::to_string(&summary)?);
        }
    }

    Ok(summary.all_valid())
}

// --- init-config ---

fn run_init_config(path: Option<&Path>, force: bool) -> Result<bool> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => Settings::config_file().context("could not determine config directory")?,
    };
    if target.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", target.display());
    }

    let settings = Settings::default();
    match path {
        Some(path) => settings.save_to(path)?,
        None => settings.save()?,
    }
    println!("Wrote {}", target.display());
    Ok(true)
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Classify { text } => run_classify(&text),
        Commands::Normalize {
            texts,
            hiragana_only,
            half_only,
        } => run_normalize(&texts, hiragana_only, half_only),
        Commands::Validate { text, policy, json } => {
            let settings = Settings::resolve(cli.config.as_deref())?;
            run_validate(&text, &policy.apply(settings.validation), json)
        }
        Commands::Batch {
            input,
            policy,
            format,
        } => {
            let settings = Settings::resolve(cli.config.as_deref())?;
            run_batch(&input, &policy.apply(settings.validation), format)
        }
        Commands::InitConfig { force } => run_init_config(cli.config.as_deref(), force),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    Ok(if run(cli)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
