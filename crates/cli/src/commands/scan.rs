//! The scan command: run the detection engine over a file or directory,
//! enrich findings with guidelines, and render the report.
//!
//! Enrichment reuses one resolver (and therefore one knowledge-base cache)
//! across every file in a directory scan, and degrades to static guidelines
//! when no credential is configured or the service is unreachable.

use anyhow::{Context as AnyhowContext, Result};
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use soliscan_scanners::{DetectionEngine, GuidelineResolver, ScanReport};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use walkdir::WalkDir;

#[derive(Subcommand, Clone)]
pub enum ScanCommand {
    Run {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,

        /// Skip the knowledge-base lookup and use static guidelines.
        #[arg(long)]
        offline: bool,

        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl ScanCommand {
    pub fn execute(&self) -> Result<()> {
        match self {
            ScanCommand::Run {
                input,
                format,
                offline,
                verbose,
            } => {
                let engine = DetectionEngine::new();
                let resolver = if *offline {
                    GuidelineResolver::offline()
                } else {
                    GuidelineResolver::from_env()
                };
                let runtime = Runtime::new()?;

                if input.is_file() {
                    let report = scan_file(input, &engine, &resolver, &runtime, *verbose)?;
                    render(input, &report, *format)
                } else if input.is_dir() {
                    scan_directory(input, &engine, &resolver, &runtime, *format, *verbose)
                } else {
                    anyhow::bail!("Input path does not exist: {}", input.display())
                }
            }
        }
    }
}

fn scan_directory(
    root: &Path,
    engine: &DetectionEngine,
    resolver: &GuidelineResolver,
    runtime: &Runtime,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let mut scanned = 0usize;

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sol") {
            continue;
        }
        let report = scan_file(path, engine, resolver, runtime, verbose)?;
        render(path, &report, format)?;
        scanned += 1;
    }

    if scanned == 0 {
        println!("No .sol files found under {}", root.display());
    }

    Ok(())
}

fn scan_file(
    path: &Path,
    engine: &DetectionEngine,
    resolver: &GuidelineResolver,
    runtime: &Runtime,
    verbose: bool,
) -> Result<ScanReport> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if verbose {
        eprintln!("Scanning {}", path.display());
    }

    let findings = engine.analyze(&source);
    let enriched = runtime.block_on(resolver.enrich(findings));
    Ok(ScanReport::new(enriched))
}

fn render(path: &Path, report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Markdown => println!("{}", report.to_markdown()),
        OutputFormat::Console => print_console(path, report),
    }
    Ok(())
}

fn print_console(path: &Path, report: &ScanReport) {
    println!("\n{} {}", "Scanned".bold(), path.display());

    if report.is_safe() {
        println!("{}", "SAFE: no findings".green().bold());
        return;
    }

    println!(
        "{}",
        format!("UNSAFE: {} finding(s)", report.vulnerabilities.len())
            .red()
            .bold()
    );

    for enriched in &report.vulnerabilities {
        let finding = &enriched.finding;

        match finding.line {
            Some(line) => println!(
                "\n  {} (line {})",
                finding.kind.name().yellow().bold(),
                line
            ),
            None => println!("\n  {}", finding.kind.name().yellow().bold()),
        }
        println!("  {}", finding.why);

        if let Some(ref snippet) = finding.code_snippet {
            for line in snippet.lines() {
                println!("    | {line}");
            }
        }
        if let Some(ref guideline) = enriched.owasp_guideline {
            println!("  {} {}", "Guideline:".cyan(), guideline);
        }
    }
}
