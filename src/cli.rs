//! CLI: schema JSON → (Go source | summary)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::codegen::DEFAULT_PACKAGE;
use crate::generate::Report;
use crate::scalars::ScalarRegistry;
use crate::schema::{Schema, load_schema};

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV: &str = "GQL_CODEGEN_LOG";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Go type declarations from a JSON GraphQL schema description
#[derive(Parser, Debug)]
#[command(name = "gql-codegen", version)]
pub struct CommandLineInterface {
    /// log at debug level (overrides GQL_CODEGEN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate the Go source file
    Generate(GenerateOut),
    /// decode the schema and print what it contains
    Check(SchemaSettings),
}

#[derive(Args, Debug, Clone)]
struct SchemaSettings {
    /// schema description (.json)
    #[arg(long, short)]
    schema: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateOut {
    #[command(flatten)]
    schema_settings: SchemaSettings,

    /// scalar mapping (.json), merged over the built-in scalars
    #[arg(long)]
    scalars: Option<PathBuf>,

    /// Go package name of the generated file
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    package: String,

    /// output .go file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaSettings {
    fn load(&self) -> anyhow::Result<Schema> {
        Ok(load_schema(&self.schema)?)
    }
}

impl GenerateOut {
    fn scalar_registry(&self) -> anyhow::Result<ScalarRegistry> {
        let Some(path) = self.scalars.as_ref() else {
            return Ok(ScalarRegistry::default());
        };
        let custom = ScalarRegistry::from_mapping_file(path)?;
        Ok(ScalarRegistry::default().merge(custom))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> ExitCode {
        init_tracing(self.verbose);
        match self.execute() {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(error) => {
                eprintln!("{} {error:#}", "error:".red().bold());
                ExitCode::FAILURE
            }
        }
    }

    /// `Ok(false)` when generation finished with per-entity failures.
    pub fn execute(&self) -> anyhow::Result<bool> {
        match &self.cmd {
            Command::Generate(target) => {
                let schema = target.schema_settings.load()?;
                let scalars = target.scalar_registry()?;
                let (go_src, report) = crate::generate_go_source(&schema, &scalars, &target.package);

                // partial output is still written
                match target.out.as_deref() {
                    Some(out) => write_output(out, &go_src)?,
                    None => print!("{go_src}"),
                }
                print_report(&report);
                Ok(report.is_success())
            }
            Command::Check(target) => {
                let schema = target.load()?;
                let server = &schema.server;
                eprintln!(
                    "{} {}: {} enums, {} unions, {} objects, {} inputs, {} scalars, {} directives",
                    "ok".green().bold(),
                    target.schema.display(),
                    server.enums.len(),
                    server.unions.len(),
                    server.objects.len(),
                    server.inputs.len(),
                    server.scalars.len(),
                    server.directives.len(),
                );
                Ok(true)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn write_output(out: &Path, src: &str) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("couldn't create output directory {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("couldn't write {}", out.display()))
}

fn print_report(report: &Report) {
    for failure in &report.failures {
        eprintln!("{} {failure}", "failed".red().bold());
    }
    if report.is_success() {
        eprintln!("{} {} entities generated", "ok".green().bold(), report.emitted);
    } else {
        eprintln!(
            "{} {} entities generated, {} failed",
            "partial".yellow().bold(),
            report.emitted,
            report.failures.len()
        );
    }
}
