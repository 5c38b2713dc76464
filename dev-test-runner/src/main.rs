//! Runs every `fixtures/*.json` schema through the generator twice and checks
//! the output is byte-identical. A sibling `<name>.scalars.json`, when present,
//! is merged over the default scalars.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use gql_codegen::{ScalarRegistry, generate_go_source, load_schema};

const SCALARS_SUFFIX: &str = ".scalars.json";

enum Outcome {
    Clean { emitted: usize },
    Partial { emitted: usize, failed: usize },
    Unstable,
}

fn main() -> ExitCode {
    let pattern = std::env::args().nth(1).unwrap_or_else(|| "fixtures/*.json".to_string());
    match run(&pattern) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(pattern: &str) -> anyhow::Result<bool> {
    let fixtures = glob::glob(pattern)
        .with_context(|| format!("bad fixture pattern {pattern}"))?
        .collect::<Result<Vec<PathBuf>, _>>()?
        .into_iter()
        .filter(|path| !path.to_string_lossy().ends_with(SCALARS_SUFFIX))
        .collect::<Vec<_>>();
    anyhow::ensure!(!fixtures.is_empty(), "no fixtures match {pattern}");

    let mut all_stable = true;
    for fixture in &fixtures {
        let label = fixture.display();
        match check_fixture(fixture) {
            Ok(Outcome::Clean { emitted }) => {
                eprintln!("{} {label} ({emitted} entities)", "✅".green());
            }
            Ok(Outcome::Partial { emitted, failed }) => {
                eprintln!("{} {label} ({emitted} entities, {failed} failed)", "⚠️".yellow());
            }
            Ok(Outcome::Unstable) => {
                all_stable = false;
                eprintln!("{} {label}: output differs between runs", "❌".red());
            }
            Err(error) => {
                all_stable = false;
                eprintln!("{} {label}: {error:#}", "❌".red());
            }
        }
    }
    eprintln!("{} fixtures checked", fixtures.len());
    Ok(all_stable)
}

fn check_fixture(path: &Path) -> anyhow::Result<Outcome> {
    let schema = load_schema(path)?;
    let scalars = match scalar_mapping_for(path) {
        Some(mapping) => ScalarRegistry::default().merge(ScalarRegistry::from_mapping_file(mapping)?),
        None => ScalarRegistry::default(),
    };

    let (first, report) = generate_go_source(&schema, &scalars, "graphql");
    let (second, _) = generate_go_source(&schema, &scalars, "graphql");
    if first != second {
        return Ok(Outcome::Unstable);
    }
    if report.is_success() {
        Ok(Outcome::Clean { emitted: report.emitted })
    } else {
        Ok(Outcome::Partial { emitted: report.emitted, failed: report.failures.len() })
    }
}

fn scalar_mapping_for(schema: &Path) -> Option<PathBuf> {
    let stem = schema.file_stem()?.to_str()?;
    let mapping = schema.with_file_name(format!("{stem}{SCALARS_SUFFIX}"));
    mapping.exists().then_some(mapping)
}
