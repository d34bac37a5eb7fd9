use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

use tearsheet::core::TearsheetConfig;
use tearsheet::parsing::{parse_file, split_records};
use tearsheet::query;
use tearsheet::report::{SectionKind, SubsectionId, TableShape};
use tearsheet::utils::{dirs, progress::BatchProgress};
use tearsheet::validate::{has_errors, validate_all, Severity, ValidationIssue};
use tearsheet::{export, render};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "tearsheet",
    about = "Parse, validate and export six-section company report documents"
)]
enum Opt {
    /// Split a multi-record file into one file per report instance
    Split {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Output directory for the record files
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
    /// Parse a file and print the records as JSON
    Parse {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Emit compact JSON instead of pretty-printed
        #[structopt(long)]
        compact: bool,
    },
    /// Validate records against the fixed report template
    Validate {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },
    /// Extract typed values from a statement table, or a narrative cell
    Extract {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Subsection id, e.g. S2.1 for the income statement
        #[structopt(long, default_value = "S2.1")]
        subsection: SubsectionId,
        /// Row label, e.g. "Revenue"; all rows when omitted
        #[structopt(long)]
        field: Option<String>,
        /// Year column, e.g. "2024" (statements) or "2024 Report"
        /// (narrative tables); all years when omitted
        #[structopt(long)]
        year: Option<String>,
        /// Record index within the file
        #[structopt(long, default_value = "0")]
        record: usize,
        /// Pull from all three statement subsections (S2.1, S2.2, S2.3)
        #[structopt(long)]
        all: bool,
    },
    /// Export parsed records as csv or json
    Export {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        #[structopt(long, default_value = "csv")]
        format: String,
        /// Output file; stdout when omitted
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
    /// Re-serialize parsed records back to Markdown
    Render {
        #[structopt(parse(from_os_str))]
        input: PathBuf,
    },
    /// Parse and validate every .md file in a directory
    Batch {
        #[structopt(parse(from_os_str))]
        dir: PathBuf,
        /// Output directory for per-file JSON
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
        /// Suppress the progress bar
        #[structopt(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = TearsheetConfig::from_env()?;
    let opt = Opt::from_args();

    match opt {
        Opt::Split { input, output } => cmd_split(&input, output, &config),
        Opt::Parse { input, compact } => cmd_parse(&input, compact),
        Opt::Validate { input } => cmd_validate(&input, &config),
        Opt::Extract {
            input,
            subsection,
            field,
            year,
            record,
            all,
        } => cmd_extract(&input, subsection, field, year, record, all),
        Opt::Export {
            input,
            format,
            output,
        } => cmd_export(&input, &format, output),
        Opt::Render { input } => cmd_render(&input),
        Opt::Batch { dir, output, quiet } => cmd_batch(&dir, output, quiet, &config),
    }
}

fn cmd_split(input: &Path, output: Option<PathBuf>, config: &TearsheetConfig) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let output = output.unwrap_or_else(|| config.data_dir.join("parsed"));
    dirs::ensure_dir(&output)?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("record");

    let segments = split_records(&text);
    for (i, segment) in segments.iter().enumerate() {
        let path = output.join(format!("{}_{:03}.md", stem, i + 1));
        fs::write(&path, format!("{}\n", segment.text))?;
        log::info!("wrote {}", path.display());
    }
    println!(
        "{} {} record(s) into {}",
        "Split".green().bold(),
        segments.len(),
        output.display()
    );
    Ok(())
}

fn cmd_parse(input: &Path, compact: bool) -> Result<()> {
    let outcome = parse_file(input)?;
    report_issues(&outcome.issues);
    println!("{}", export::to_json(&outcome.reports, !compact)?);
    Ok(())
}

fn cmd_validate(input: &Path, config: &TearsheetConfig) -> Result<()> {
    let outcome = parse_file(input)?;
    report_issues(&outcome.issues);

    let issues = validate_all(&outcome.reports);
    print_validation(&issues);

    let failed = has_errors(&issues) || (config.strict && !issues.is_empty());
    if failed {
        println!("{}", "Validation failed".red().bold());
        println!("Expected sections, in order: {}", SectionKind::list_titles());
        std::process::exit(1);
    }
    println!(
        "{} {} record(s), {} warning(s)",
        "Valid".green().bold(),
        outcome.reports.len(),
        issues.len()
    );
    Ok(())
}

fn cmd_extract(
    input: &Path,
    subsection: SubsectionId,
    field: Option<String>,
    year: Option<String>,
    record: usize,
    all: bool,
) -> Result<()> {
    let outcome = parse_file(input)?;
    let report = outcome
        .reports
        .get(record)
        .with_context(|| format!("file has no record {}", record))?;

    if !all && subsection.shape() != TableShape::Financial {
        let (field, year) = match (&field, &year) {
            (Some(f), Some(y)) => (f.as_str(), y.as_str()),
            _ => anyhow::bail!(
                "{} is a narrative subsection, pass --field and --year",
                subsection.code()
            ),
        };
        match query::narrative(report, subsection, field, year) {
            Some(text) => println!("{}", text),
            None => eprintln!("{}", "No matching values".yellow()),
        }
        return Ok(());
    }

    let facts = if all {
        query::all_statement_facts(report)?
    } else {
        query::statement_facts(report, subsection)?
    };
    let facts: Vec<_> = facts
        .into_iter()
        .filter(|f| field.as_deref().map(|x| f.field == x).unwrap_or(true))
        .filter(|f| year.as_deref().map(|x| f.period == x).unwrap_or(true))
        .collect();

    if facts.is_empty() {
        eprintln!("{}", "No matching values".yellow());
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&facts)?);
    Ok(())
}

fn cmd_export(input: &Path, format: &str, output: Option<PathBuf>) -> Result<()> {
    let outcome = parse_file(input)?;
    let body = match format {
        "csv" => export::to_csv(&outcome.reports)?,
        "json" => export::to_json(&outcome.reports, true)?,
        other => anyhow::bail!("unsupported export format: {} (use csv or json)", other),
    };
    match output {
        Some(path) => {
            fs::write(&path, body)?;
            println!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => print!("{}", body),
    }
    Ok(())
}

fn cmd_render(input: &Path) -> Result<()> {
    let outcome = parse_file(input)?;
    print!("{}", render::render_document(&outcome.reports));
    Ok(())
}

fn cmd_batch(
    dir: &Path,
    output: Option<PathBuf>,
    quiet: bool,
    config: &TearsheetConfig,
) -> Result<()> {
    let output = output.unwrap_or_else(|| config.data_dir.join("parsed"));
    dirs::ensure_dir(&output)?;

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|e| e == "md").unwrap_or(false))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("no .md files in {}", dir.display());
    }

    let progress = if quiet {
        BatchProgress::hidden()
    } else {
        BatchProgress::new(files.len() as u64)
    };
    let mut total_records = 0usize;
    let mut failed_files = 0usize;

    for path in &files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        progress.set_file(name);

        match parse_file(path) {
            Ok(outcome) => {
                total_records += outcome.reports.len();
                let issues = validate_all(&outcome.reports);
                if !issues.is_empty() {
                    log::warn!("{}: {} validation issue(s)", name, issues.len());
                }
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
                let out_path = output.join(format!("{}.json", stem));
                fs::write(&out_path, export::to_json(&outcome.reports, true)?)?;
            }
            Err(e) => {
                failed_files += 1;
                log::error!("{}: {:#}", name, e);
            }
        }
        progress.tick();
    }
    progress.finish();

    println!(
        "{} {} file(s), {} record(s), {} failure(s)",
        "Processed".green().bold(),
        files.len(),
        total_records,
        failed_files
    );
    if failed_files > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn report_issues(issues: &[tearsheet::ParseIssue]) {
    for issue in issues {
        eprintln!(
            "{} record {} [{}]: {}",
            "parse".yellow(),
            issue.record,
            issue.location,
            issue.message
        );
    }
}

fn print_validation(issues: &[ValidationIssue]) {
    for issue in issues {
        let tag = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow(),
        };
        eprintln!(
            "{} record {} [{}]: {}",
            tag, issue.record, issue.location, issue.message
        );
    }
}
