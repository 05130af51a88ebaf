// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result, Synthesizer, mapper::RenameMapper};

/// Keywords and punctuation of the target dialect.
///
/// Defaults to openGauss: double-quoted identifiers, `;` between statements,
/// one clause per tab-indented line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dialect {
	/// Wrapped around every identifier, not escaped.
	pub quote: String,
	/// Placed between statements, never before the first or after the last.
	pub statement_separator: String,
	/// Precedes every clause inside the table body.
	pub clause_prefix: String,
	/// Placed between clauses and between clause groups.
	pub group_separator: String,
	/// Placed between identifiers of a column list.
	pub list_separator: String,
}

impl Default for Dialect {
	fn default() -> Self {
		Self {
			quote: "\"".to_string(),
			statement_separator: ";".to_string(),
			clause_prefix: "\n\t".to_string(),
			group_separator: ",".to_string(),
			list_separator: ", ".to_string(),
		}
	}
}

impl Dialect {
	pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
		self.quote = quote.into();
		self
	}

	pub fn with_statement_separator(mut self, separator: impl Into<String>) -> Self {
		self.statement_separator = separator.into();
		self
	}

	pub fn with_clause_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.clause_prefix = prefix.into();
		self
	}

	pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
		self.group_separator = separator.into();
		self
	}

	pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
		self.list_separator = separator.into();
		self
	}

	pub fn validate(&self) -> Result<()> {
		if self.quote.is_empty() {
			return Err(Error::config("quote must not be empty"));
		}
		if self.statement_separator.is_empty() {
			return Err(Error::config("statement_separator must not be empty"));
		}
		if self.group_separator.is_empty() {
			return Err(Error::config("group_separator must not be empty"));
		}
		Ok(())
	}
}

/// Synthesizer configuration as read from a JSON file.
///
/// ```json
/// { "dialect": { "quote": "`" }, "column_names": { "desc": "description" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub dialect: Dialect,
	/// Source column name to target column name.
	pub column_names: IndexMap<String, String>,
}

impl Config {
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Config = serde_json::from_str(json)?;
		config.dialect.validate()?;
		Ok(config)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let json = fs::read_to_string(path)?;
		Self::from_json(&json)
	}

	pub fn build(self) -> Synthesizer {
		Synthesizer::new(self.dialect, RenameMapper::new(self.column_names))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_dialect_keeps_defaults() {
		let config = Config::from_json(r#"{"dialect": {"quote": "`"}}"#).unwrap();
		assert_eq!(config.dialect, Dialect::default().with_quote("`"));
		assert!(config.column_names.is_empty());
	}

	#[test]
	fn test_column_names_keep_order() {
		let config = Config::from_json(r#"{"column_names": {"b": "y", "a": "x"}}"#).unwrap();
		let keys: Vec<_> = config.column_names.keys().map(String::as_str).collect();
		assert_eq!(keys, ["b", "a"]);
	}

	#[test]
	fn test_empty_quote_is_rejected() {
		let err = Config::from_json(r#"{"dialect": {"quote": ""}}"#).unwrap_err();
		assert!(matches!(err, Error::Config { .. }));
		assert_eq!(err.to_string(), "invalid configuration: quote must not be empty");
	}

	#[test]
	fn test_unknown_field_is_rejected() {
		let err = Config::from_json(r#"{"dialect": {"quoting": "`"}}"#).unwrap_err();
		assert!(matches!(err, Error::Decode(_)));
	}

	#[test]
	fn test_missing_file() {
		let err = Config::from_path("/nonexistent/cdc-ddl.json").unwrap_err();
		assert!(matches!(err, Error::Io(_)));
	}
}
