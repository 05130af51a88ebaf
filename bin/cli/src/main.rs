// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `cdc-ddl [--config <file>] [<event.json> | -]`
//!
//! Reads one change event (from the file, or stdin when absent or `-`) and
//! prints the synthesized DDL. Logging goes to stderr, filtered by `RUST_LOG`.

use std::{
	fs,
	io::{self, Read},
	path::PathBuf,
	process::ExitCode,
};

use cdc_ddl::{ChangeEvent, Config, Synthesizer};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
	#[error("{0}")]
	Usage(String),

	#[error(transparent)]
	Ddl(#[from] cdc_ddl::Error),

	#[error("failed to read input: {0}")]
	Io(#[from] io::Error),
}

#[derive(Debug, Default, PartialEq)]
struct Args {
	config: Option<PathBuf>,
	input: Option<PathBuf>,
}

impl Args {
	fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, CliError> {
		let mut parsed = Args::default();
		let mut args = args.into_iter();
		while let Some(arg) = args.next() {
			match arg.as_str() {
				"--config" | "-c" => {
					let path = args.next().ok_or_else(|| CliError::Usage("--config needs a path".into()))?;
					parsed.config = Some(PathBuf::from(path));
				}
				"-" if parsed.input.is_none() => {}
				flag if flag.starts_with('-') => {
					return Err(CliError::Usage(format!("unknown option {flag}")));
				}
				_ if parsed.input.is_some() => {
					return Err(CliError::Usage("only one input file is accepted".into()));
				}
				_ => parsed.input = Some(PathBuf::from(arg)),
			}
		}
		Ok(parsed)
	}
}

fn setup_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(io::stderr)
		.try_init();
}

fn run(args: Args) -> Result<String, CliError> {
	let synthesizer = match &args.config {
		Some(path) => {
			debug!(path = %path.display(), "loading config");
			Config::from_path(path)?.build()
		}
		None => Synthesizer::default(),
	};

	let json = match &args.input {
		Some(path) => fs::read_to_string(path)?,
		None => {
			let mut json = String::new();
			io::stdin().read_to_string(&mut json)?;
			json
		}
	};

	let event = ChangeEvent::from_json(&json)?;
	Ok(synthesizer.synthesize(&event)?)
}

fn main() -> ExitCode {
	setup_logging();

	match Args::parse(std::env::args().skip(1)).and_then(run) {
		Ok(sql) => {
			println!("{sql}");
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!(%err, "conversion failed");
			eprintln!("cdc-ddl: {err}");
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Result<Args, CliError> {
		Args::parse(args.iter().map(|arg| arg.to_string()))
	}

	#[test]
	fn test_parse_defaults_to_stdin() {
		assert_eq!(parse(&[]).unwrap(), Args::default());
		assert_eq!(parse(&["-"]).unwrap(), Args::default());
	}

	#[test]
	fn test_parse_config_and_input() {
		assert_eq!(
			parse(&["--config", "ddl.json", "event.json"]).unwrap(),
			Args {
				config: Some(PathBuf::from("ddl.json")),
				input: Some(PathBuf::from("event.json")),
			}
		);
	}

	#[test]
	fn test_parse_rejects_bad_arguments() {
		assert!(matches!(parse(&["--config"]), Err(CliError::Usage(_))));
		assert!(matches!(parse(&["--verbose"]), Err(CliError::Usage(_))));
		assert!(matches!(parse(&["a.json", "b.json"]), Err(CliError::Usage(_))));
	}

	#[test]
	fn test_run_reports_missing_input() {
		let args = Args {
			config: None,
			input: Some(PathBuf::from("/nonexistent/event.json")),
		};
		assert!(matches!(run(args), Err(CliError::Io(_))));
	}
}
