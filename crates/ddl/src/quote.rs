// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Identifier quoting and punctuation helpers shared by the clause builders.

use std::fmt::Display;

use crate::Dialect;

/// Wraps an identifier in the dialect quote. Special characters inside the
/// identifier, including the quote itself, are passed through as they are.
pub fn wrap_quote(dialect: &Dialect, identifier: &str) -> String {
	format!("{q}{identifier}{q}", q = dialect.quote)
}

pub fn add_brackets(value: impl Display) -> String {
	format!("({value})")
}

/// `"s"."t"`
pub fn qualified_name(dialect: &Dialect, schema: &str, table: &str) -> String {
	format!("{}.{}", wrap_quote(dialect, schema), wrap_quote(dialect, table))
}

/// Splits a comma-joined column spec and quotes each part. Parts are not trimmed.
pub fn split_composite(dialect: &Dialect, spec: &str) -> String {
	spec.split(',').map(|column| wrap_quote(dialect, column)).collect::<Vec<_>>().join(&dialect.list_separator)
}

pub fn is_composite(spec: &str) -> bool {
	spec.contains(',')
}

/// Prefixes a clause with the dialect's clause prefix.
pub fn clause(dialect: &Dialect, body: impl Display) -> String {
	format!("{}{body}", dialect.clause_prefix)
}

/// Joins clause groups with the group separator. Empty groups contribute
/// nothing, so no separator ever dangles.
pub fn join_groups(dialect: &Dialect, groups: &[Vec<String>]) -> String {
	groups.iter().flatten().map(String::as_str).collect::<Vec<_>>().join(&dialect.group_separator)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wrap_quote_passes_through() {
		let dialect = Dialect::default();
		assert_eq!(wrap_quote(&dialect, "id"), r#""id""#);
		assert_eq!(wrap_quote(&dialect, r#"we"ird"#), r#""we"ird""#);
		assert_eq!(wrap_quote(&Dialect::default().with_quote("`"), "id"), "`id`");
	}

	#[test]
	fn test_add_brackets() {
		assert_eq!(add_brackets(20), "(20)");
		assert_eq!(add_brackets("a > 0"), "(a > 0)");
	}

	#[test]
	fn test_split_composite() {
		let dialect = Dialect::default();
		assert_eq!(split_composite(&dialect, "a,b"), r#""a", "b""#);
		assert_eq!(split_composite(&dialect, "a, b"), r#""a", " b""#);
		assert_eq!(split_composite(&dialect, "a"), r#""a""#);
	}

	#[test]
	fn test_join_groups_skips_empty() {
		let dialect = Dialect::default();
		let groups = vec![vec![], vec!["a".to_string(), "b".to_string()], vec![], vec!["c".to_string()], vec![]];
		assert_eq!(join_groups(&dialect, &groups), "a,b,c");
		assert_eq!(join_groups(&dialect, &[vec![], vec![]]), "");
	}
}
