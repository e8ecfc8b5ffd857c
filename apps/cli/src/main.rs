use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use telephone_migrate::{MigrateOptions, MigrationReport};

mod config;

use config::Settings;

/// Exit status when `--check` finds files that still need migrating.
const EXIT_NEEDS_MIGRATION: u8 = 1;
/// Exit status for configuration, I/O and traversal errors.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "telephone", version, about = "Tooling for telephone service objects")]
struct Cli {
    /// Configuration file (defaults to ./telephone.toml when present)
    #[arg(long, global = true, env = "TELEPHONE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `telephone_migrate=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_name = "FORMAT")]
    log_format: Option<telephone_log::Format>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add `validates: { presence: true }` to `required: true` argument declarations
    Migrate(MigrateArgs),
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Directory (or single file) to migrate
    #[arg(default_value = "app/services")]
    path: PathBuf,

    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,

    /// Exit with status 1 if any file would change; implies --dry-run
    #[arg(long)]
    check: bool,

    /// File extension to rewrite (repeatable, replaces the configured list)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Directory name to skip (repeatable, replaces the configured list)
    #[arg(long, value_name = "DIR")]
    exclude: Vec<String>,
}

impl MigrateArgs {
    /// Command-line flags win over configured values.
    fn apply(&self, mut options: MigrateOptions) -> MigrateOptions {
        if !self.extensions.is_empty() {
            options.extensions.clone_from(&self.extensions);
        }
        if !self.exclude.is_empty() {
            options.exclude.clone_from(&self.exclude);
        }
        options.dry_run |= self.dry_run || self.check;
        options
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        settings.log.level = level;
    }
    if let Some(format) = cli.log_format {
        settings.log.format = format;
    }
    telephone_log::init_with(settings.log.clone()).context("failed to initialize logging")?;

    match cli.command {
        Commands::Migrate(args) => migrate(&args, settings.migrate),
    }
}

fn migrate(args: &MigrateArgs, configured: MigrateOptions) -> anyhow::Result<ExitCode> {
    let options = args.apply(configured);
    tracing::debug!(?options, path = %args.path.display(), "starting migration");

    let report = telephone_migrate::migrate(&args.path, &options)
        .with_context(|| format!("failed to migrate {}", args.path.display()))?;

    print_report(&mut io::stdout().lock(), &report)?;

    if args.check && !report.is_clean() {
        eprintln!(
            "{} file(s) still use `required: true` without `validates:`",
            report.changed.len()
        );
        return Ok(ExitCode::from(EXIT_NEEDS_MIGRATION));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(out: &mut impl Write, report: &MigrationReport) -> io::Result<()> {
    let verb = if report.dry_run { "would rewrite" } else { "rewrote" };
    for change in &report.changed {
        writeln!(
            out,
            "{verb} {} ({} line(s): {})",
            change.path.display(),
            change.lines.len(),
            join(&change.lines)
        )?;
    }
    for path in &report.skipped {
        writeln!(out, "skipped {} (not UTF-8)", path.display())?;
    }
    writeln!(
        out,
        "{} file(s) scanned, {} file(s) {}, {} line(s)",
        report.scanned.len(),
        report.changed.len(),
        if report.dry_run { "to rewrite" } else { "rewritten" },
        report.changed_lines()
    )
}

fn join(lines: &[usize]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
