// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Decoded schema change events.
//!
//! These types mirror the JSON emitted by the change-data-capture feed. The
//! synthesizer only ever reads them.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// One schema change event: the table it targets and the table definitions
/// it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
	pub source: Source,
	#[serde(default)]
	pub table_changes: Vec<TableChange>,
}

impl ChangeEvent {
	pub fn new(source: Source) -> Self {
		Self {
			source,
			table_changes: Vec::new(),
		}
	}

	pub fn table_change(mut self, change: TableChange) -> Self {
		self.table_changes.push(change);
		self
	}

	/// Decodes an event from JSON. Accepts both the feed envelope
	/// (`{"schema": ..., "payload": {...}}`) and the bare payload.
	pub fn from_json(json: &str) -> Result<Self> {
		let value: Value = serde_json::from_str(json)?;
		let payload = match value {
			Value::Object(mut map) => match map.remove("payload") {
				Some(payload) => payload,
				None => Value::Object(map),
			},
			other => other,
		};
		Ok(serde_json::from_value(payload)?)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
	pub schema: String,
	pub table: String,
}

impl Source {
	pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			schema: schema.into(),
			table: table.into(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
	#[default]
	Create,
	Alter,
	Drop,
}

impl Display for ChangeKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ChangeKind::Create => f.write_str("CREATE"),
			ChangeKind::Alter => f.write_str("ALTER"),
			ChangeKind::Drop => f.write_str("DROP"),
		}
	}
}

/// Full target definition of one table.
///
/// On the wire the definition is nested under `table`; it is flattened here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "wire::TableChange", into = "wire::TableChange")]
pub struct TableChange {
	pub kind: ChangeKind,
	pub columns: Vec<Column>,
	/// Treated as a set when rendered; duplicates collapse.
	pub primary_key: Vec<String>,
	pub foreign_keys: Vec<ForeignKey>,
	pub uniques: Vec<UniqueConstraint>,
	pub checks: Vec<CheckConstraint>,
}

impl TableChange {
	pub fn new(kind: ChangeKind) -> Self {
		Self {
			kind,
			..Self::default()
		}
	}

	pub fn create() -> Self {
		Self::new(ChangeKind::Create)
	}

	pub fn column(mut self, column: Column) -> Self {
		self.columns.push(column);
		self
	}

	pub fn primary_key(mut self, column: impl Into<String>) -> Self {
		self.primary_key.push(column.into());
		self
	}

	pub fn foreign_key(mut self, foreign_key: ForeignKey) -> Self {
		self.foreign_keys.push(foreign_key);
		self
	}

	pub fn unique(mut self, unique: UniqueConstraint) -> Self {
		self.uniques.push(unique);
		self
	}

	pub fn check(mut self, check: CheckConstraint) -> Self {
		self.checks.push(check);
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
	pub name: String,
	pub type_name: String,
	/// Zero, negative or absent means no length clause.
	#[serde(default)]
	pub length: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value_expression: Option<String>,
	#[serde(default)]
	pub optional: bool,
}

impl Column {
	pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_name: type_name.into(),
			length: None,
			default_value_expression: None,
			optional: false,
		}
	}

	pub fn length(mut self, length: i32) -> Self {
		self.length = Some(length);
		self
	}

	pub fn default_value(mut self, expression: impl Into<String>) -> Self {
		self.default_value_expression = Some(expression.into());
		self
	}

	pub fn optional(mut self, optional: bool) -> Self {
		self.optional = optional;
		self
	}
}

/// Column specs may hold a comma-joined list for composite keys, e.g. `"a,b"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
	#[serde(rename = "fkName")]
	pub name: String,
	#[serde(rename = "fkColumnName")]
	pub columns: String,
	#[serde(rename = "pktableSchem")]
	pub referenced_schema: String,
	#[serde(rename = "pktableName")]
	pub referenced_table: String,
	#[serde(rename = "pkColumnName")]
	pub referenced_columns: String,
}

impl ForeignKey {
	pub fn new(
		name: impl Into<String>,
		columns: impl Into<String>,
		referenced_schema: impl Into<String>,
		referenced_table: impl Into<String>,
		referenced_columns: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			columns: columns.into(),
			referenced_schema: referenced_schema.into(),
			referenced_table: referenced_table.into(),
			referenced_columns: referenced_columns.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueConstraint {
	#[serde(rename = "indexName")]
	pub name: String,
	#[serde(rename = "columnName")]
	pub column: String,
}

impl UniqueConstraint {
	pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			column: column.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConstraint {
	#[serde(rename = "indexName")]
	pub name: String,
	pub condition: String,
}

impl CheckConstraint {
	pub fn new(name: impl Into<String>, condition: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			condition: condition.into(),
		}
	}
}

mod wire {
	use serde::{Deserialize, Serialize};

	use super::{ChangeKind, CheckConstraint, Column, ForeignKey, UniqueConstraint};

	#[derive(Serialize, Deserialize)]
	pub(super) struct TableChange {
		#[serde(rename = "type", default)]
		kind: ChangeKind,
		table: Table,
	}

	#[derive(Serialize, Deserialize)]
	#[serde(rename_all = "camelCase")]
	struct Table {
		#[serde(default)]
		columns: Vec<Column>,
		#[serde(default)]
		primary_key_column_names: Vec<String>,
		#[serde(default)]
		foreign_key_columns: Vec<ForeignKey>,
		#[serde(default)]
		unique_columns: Vec<UniqueConstraint>,
		#[serde(default)]
		check_columns: Vec<CheckConstraint>,
	}

	impl From<TableChange> for super::TableChange {
		fn from(change: TableChange) -> Self {
			let table = change.table;
			Self {
				kind: change.kind,
				columns: table.columns,
				primary_key: table.primary_key_column_names,
				foreign_keys: table.foreign_key_columns,
				uniques: table.unique_columns,
				checks: table.check_columns,
			}
		}
	}

	impl From<super::TableChange> for TableChange {
		fn from(change: super::TableChange) -> Self {
			Self {
				kind: change.kind,
				table: Table {
					columns: change.columns,
					primary_key_column_names: change.primary_key,
					foreign_key_columns: change.foreign_keys,
					unique_columns: change.uniques,
					check_columns: change.checks,
				},
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_enveloped_event() {
		let json = r#"{
			"schema": {"type": "struct"},
			"payload": {
				"source": {"schema": "public", "table": "orders", "db": "shop"},
				"ddl": "CREATE TABLE orders (id INT NOT NULL)",
				"tableChanges": [{
					"type": "CREATE",
					"id": "\"shop\".\"orders\"",
					"table": {
						"primaryKeyColumnNames": ["id"],
						"columns": [
							{"name": "id", "typeName": "INT", "optional": false, "position": 1},
							{"name": "note", "typeName": "VARCHAR", "length": 64, "optional": true,
							 "defaultValueExpression": "'n/a'"}
						],
						"uniqueColumns": [{"indexName": "uk_note", "columnName": "note"}],
						"checkColumns": [{"indexName": "ck_id", "condition": "id > 0"}],
						"foreignKeyColumns": [{
							"fkName": "fk_customer", "fkColumnName": "customer_id",
							"pktableSchem": "public", "pktableName": "customers", "pkColumnName": "id"
						}]
					}
				}]
			}
		}"#;

		let event = ChangeEvent::from_json(json).unwrap();
		assert_eq!(event.source, Source::new("public", "orders"));
		assert_eq!(event.table_changes.len(), 1);

		let change = &event.table_changes[0];
		assert_eq!(change.kind, ChangeKind::Create);
		assert_eq!(change.primary_key, vec!["id".to_string()]);
		assert_eq!(change.columns[0], Column::new("id", "INT"));
		assert_eq!(change.columns[1], Column::new("note", "VARCHAR").length(64).default_value("'n/a'").optional(true));
		assert_eq!(change.uniques, vec![UniqueConstraint::new("uk_note", "note")]);
		assert_eq!(change.checks, vec![CheckConstraint::new("ck_id", "id > 0")]);
		assert_eq!(
			change.foreign_keys,
			vec![ForeignKey::new("fk_customer", "customer_id", "public", "customers", "id")]
		);
	}

	#[test]
	fn test_decode_bare_event_with_missing_lists() {
		let json = r#"{
			"source": {"schema": "s", "table": "t"},
			"tableChanges": [{"type": "DROP", "table": {}}]
		}"#;

		let event = ChangeEvent::from_json(json).unwrap();
		assert_eq!(event.table_changes, vec![TableChange::new(ChangeKind::Drop)]);
	}

	#[test]
	fn test_decode_null_length() {
		let json = r#"{"name": "id", "typeName": "INT", "length": null}"#;
		let column: Column = serde_json::from_str(json).unwrap();
		assert_eq!(column.length, None);
		assert!(!column.optional);
	}

	#[test]
	fn test_decode_rejects_unknown_kind() {
		let json = r#"{"source": {"schema": "s", "table": "t"}, "tableChanges": [{"type": "RENAME", "table": {}}]}"#;
		assert!(matches!(ChangeEvent::from_json(json), Err(crate::Error::Decode(_))));
	}

	#[test]
	fn test_table_change_serializes_nested() {
		let change = TableChange::create().column(Column::new("id", "INT")).primary_key("id");
		let value = serde_json::to_value(&change).unwrap();
		assert_eq!(value["type"], "CREATE");
		assert_eq!(value["table"]["primaryKeyColumnNames"][0], "id");
		assert_eq!(value["table"]["columns"][0]["typeName"], "INT");
	}
}
