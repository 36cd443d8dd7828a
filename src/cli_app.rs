//! Top-level CLI definition and dispatch.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::control;

use cloudsift::cache::SnapshotCache;
use cloudsift::core::config::Config;
use cloudsift::core::errors::{CsfError, Result};
use cloudsift::logger::jsonl::{EventType, JsonlLogger, LogEntry, LogLevel};
use cloudsift::providers::Provider;
use cloudsift::providers::fixture::{FixtureGraphSource, FixturePathSource};
use cloudsift::report::{ReportFormat, render, render_tree};
use cloudsift::rules::catalog::{BUILTIN_RULES, Severity};
use cloudsift::rules::classifier::RuleCatalog;
use cloudsift::scan::coordinator::run_scan;
use cloudsift::scan::enumerator::{FlatPathEnumerator, HierarchyModel, ParentGraphEnumerator};
use cloudsift::scan::progress::ProgressObserver;
use cloudsift::scan::result::ScanResult;

/// cloudsift — flags cloud-storage filenames that look like secret material.
#[derive(Debug, Parser)]
#[command(
    name = "csift",
    author,
    version,
    about = "Cloud storage filename auditor",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Scan a provider listing and report suspicious filenames.
    Scan(ScanArgs),
    /// Render a previously cached scan snapshot.
    Report(ReportArgs),
    /// Inspect or clear cached snapshots.
    Cache(CacheArgs),
    /// Print the risk rule catalog.
    Rules(RulesArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct ScanArgs {
    /// Provider to scan (drive or dropbox).
    #[arg(long, value_name = "PROVIDER")]
    provider: Provider,
    /// Listing fixture to scan (JSON export of the account listing).
    #[arg(long, value_name = "PATH")]
    fixture: PathBuf,
    /// Ignore any cached snapshot and scan fresh.
    #[arg(long)]
    refresh: bool,
    /// Do not persist the snapshot after scanning.
    #[arg(long)]
    no_cache: bool,
    /// Report format: table, json, csv, or markdown.
    #[arg(long, value_name = "FORMAT")]
    format: Option<ReportFormat>,
    /// Write the report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Also print the reconstructed folder tree.
    #[arg(long)]
    tree: bool,
}

#[derive(Debug, Clone, Args)]
struct ReportArgs {
    /// Provider whose snapshot to render.
    #[arg(long, value_name = "PROVIDER")]
    provider: Provider,
    /// Report format: table, json, csv, or markdown.
    #[arg(long, value_name = "FORMAT")]
    format: Option<ReportFormat>,
    /// Write the report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Also print the reconstructed folder tree.
    #[arg(long)]
    tree: bool,
}

#[derive(Debug, Clone, Args)]
struct CacheArgs {
    #[command(subcommand)]
    action: CacheAction,
}

#[derive(Debug, Clone, Subcommand)]
enum CacheAction {
    /// List cached snapshots.
    List,
    /// Remove cached snapshots (all, or one provider's).
    Clear {
        /// Only clear this provider's snapshot.
        #[arg(long, value_name = "PROVIDER")]
        provider: Option<Provider>,
    },
}

#[derive(Debug, Clone, Args)]
struct RulesArgs {
    /// Emit the catalog as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// Dispatch the parsed CLI.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        control::set_override(false);
    }
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Scan(args) => run_scan_command(cli, &config, args),
        Command::Report(args) => run_report_command(cli, &config, args),
        Command::Cache(args) => run_cache_command(&config, args),
        Command::Rules(args) => run_rules_command(args),
        Command::Completions(args) => {
            generate(
                args.shell,
                &mut Cli::command(),
                "csift",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

/// Progress ticker writing counter updates to stderr.
struct ConsoleObserver {
    quiet: bool,
    verbose: bool,
    wrote: bool,
}

impl ConsoleObserver {
    const fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            wrote: false,
        }
    }

    fn finish(&mut self) {
        if self.wrote {
            eprintln!();
        }
    }
}

impl ProgressObserver for ConsoleObserver {
    fn on_progress(&mut self, fetched: u64, scanned: u64, findings: u64) {
        if self.quiet {
            return;
        }
        eprint!("\rfetched {fetched} · scanned {scanned} · findings {findings}");
        self.wrote = true;
    }

    fn on_finding(&mut self, name: &str, max_severity: Severity) {
        if self.verbose {
            if self.wrote {
                eprintln!();
                self.wrote = false;
            }
            eprintln!("  [{}] {name}", max_severity.label());
        }
    }
}

fn run_scan_command(cli: &Cli, config: &Config, args: &ScanArgs) -> Result<()> {
    let provider = args.provider;
    let label = provider.label();
    let cache = SnapshotCache::new(&config.cache.dir);
    let logger = JsonlLogger::new(&config.paths.jsonl_log);
    let use_cache = config.cache.use_cache && !args.no_cache;

    if use_cache && !args.refresh {
        match cache.load(label) {
            Ok(result) => {
                logger.write_entry(
                    &LogEntry::new(EventType::SnapshotLoad, LogLevel::Info).provider(label),
                );
                if !cli.quiet {
                    eprintln!(
                        "csift: using cached snapshot from {} (pass --refresh to rescan)",
                        result.summary.scan_timestamp.to_rfc3339()
                    );
                }
                return emit_report(cli, config, args.format, args.output.as_deref(), args.tree, &result);
            }
            Err(error) if error.is_snapshot_miss() => {}
            Err(error) => return Err(error),
        }
    }

    let catalog = RuleCatalog::with_custom(&config.scan.custom_rules)?;
    logger.write_entry(&LogEntry::new(EventType::ScanStart, LogLevel::Info).provider(label));

    let mut observer = ConsoleObserver::new(cli.quiet, cli.verbose);
    let scan_outcome = match provider.hierarchy() {
        HierarchyModel::ParentGraph => {
            let source = FixtureGraphSource::from_path(&args.fixture)?;
            let mut enumerator = ParentGraphEnumerator::new(source, provider);
            run_scan(&mut enumerator, &catalog, &mut observer)
        }
        HierarchyModel::FlatPath => {
            let source = FixturePathSource::from_path(&args.fixture)?;
            let mut enumerator = FlatPathEnumerator::new(source, provider);
            run_scan(&mut enumerator, &catalog, &mut observer)
        }
    };
    observer.finish();

    let result = match scan_outcome {
        Ok(result) => result,
        Err(error) => {
            logger.write_entry(
                &LogEntry::new(EventType::Error, LogLevel::Critical)
                    .provider(label)
                    .error(error.code(), &error.to_string()),
            );
            return Err(error);
        }
    };

    logger.write_entry(
        &LogEntry::new(EventType::ScanComplete, LogLevel::Info)
            .provider(label)
            .counts(
                result.summary.total_records_scanned,
                result.summary.total_records_scanned,
                result.summary.finding_count,
            ),
    );

    if use_cache {
        // A failed snapshot write never invalidates a successful scan.
        if let Err(error) = cache.save(label, &result) {
            logger.write_entry(
                &LogEntry::new(EventType::CacheWriteFailure, LogLevel::Warning)
                    .provider(label)
                    .error(error.code(), &error.to_string()),
            );
            eprintln!("csift: warning: failed to persist snapshot: {error}");
        } else {
            logger.write_entry(
                &LogEntry::new(EventType::SnapshotSave, LogLevel::Info).provider(label),
            );
        }
    }

    emit_report(cli, config, args.format, args.output.as_deref(), args.tree, &result)
}

fn run_report_command(cli: &Cli, config: &Config, args: &ReportArgs) -> Result<()> {
    let cache = SnapshotCache::new(&config.cache.dir);
    let result = cache.load(args.provider.label())?;
    emit_report(cli, config, args.format, args.output.as_deref(), args.tree, &result)
}

fn emit_report(
    cli: &Cli,
    config: &Config,
    format: Option<ReportFormat>,
    output: Option<&std::path::Path>,
    tree: bool,
    result: &ScanResult,
) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => config
            .report
            .format
            .parse()
            .map_err(|details| CsfError::InvalidConfig { details })?,
    };
    let color = config.report.color && !cli.no_color && output.is_none();
    let mut rendered = render(result, format, color)?;
    if tree {
        rendered.push('\n');
        rendered.push_str(&render_tree(&result.tree));
    }

    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| CsfError::io(path, source))?;
            if !cli.quiet {
                eprintln!("csift: report written to {}", path.display());
            }
        }
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(rendered.as_bytes())
                .map_err(|source| CsfError::io("stdout", source))?;
        }
    }
    Ok(())
}

fn run_cache_command(config: &Config, args: &CacheArgs) -> Result<()> {
    let cache = SnapshotCache::new(&config.cache.dir);
    match &args.action {
        CacheAction::List => {
            let keys = cache.list()?;
            if keys.is_empty() {
                println!("no cached snapshots in {}", cache.dir().display());
                return Ok(());
            }
            for key in keys {
                match cache.load(&key) {
                    Ok(result) => println!(
                        "{key}: {} findings / {} records, scanned {}",
                        result.summary.finding_count,
                        result.summary.total_records_scanned,
                        result.summary.scan_timestamp.to_rfc3339()
                    ),
                    Err(_) => println!("{key}: unreadable snapshot"),
                }
            }
            Ok(())
        }
        CacheAction::Clear { provider } => {
            match provider {
                Some(provider) => cache.remove(provider.label())?,
                None => {
                    for key in cache.list()? {
                        cache.remove(&key)?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn run_rules_command(args: &RulesArgs) -> Result<()> {
    if args.json {
        let rows: Vec<serde_json::Value> = BUILTIN_RULES
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "category": rule.category,
                    "severity": rule.severity,
                    "description": rule.description,
                    "pattern_count": rule.patterns.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for rule in BUILTIN_RULES {
        println!(
            "{:<8} {:<34} {}",
            rule.severity.label(),
            rule.category,
            rule.description
        );
    }
    Ok(())
}
