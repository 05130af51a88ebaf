// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;

/// Translates a source column name into the name used in the target table.
///
/// Consulted once per column, before quoting. Implementations must be total
/// and deterministic: the same input always yields the same output and a
/// mapping never fails the conversion.
pub trait NameMapper: Send + Sync {
	fn map_column_name(&self, name: &str) -> String;
}

/// Keeps every name as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl NameMapper for IdentityMapper {
	fn map_column_name(&self, name: &str) -> String {
		name.to_string()
	}
}

/// Renames columns through a fixed table; names without an entry pass through.
/// Lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct RenameMapper {
	names: IndexMap<String, String>,
}

impl RenameMapper {
	pub fn new(names: IndexMap<String, String>) -> Self {
		Self {
			names,
		}
	}

	pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
		self.names.insert(from.into(), to.into());
		self
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

impl NameMapper for RenameMapper {
	fn map_column_name(&self, name: &str) -> String {
		self.names.get(name).cloned().unwrap_or_else(|| name.to_string())
	}
}

impl<F> NameMapper for F
where
	F: Fn(&str) -> String + Send + Sync,
{
	fn map_column_name(&self, name: &str) -> String {
		self(name)
	}
}
