// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexSet;
use tracing::{debug, instrument, trace};

use crate::{
	Dialect, Error, Result,
	mapper::{IdentityMapper, NameMapper},
	model::{ChangeEvent, ChangeKind, CheckConstraint, Column, ForeignKey, Source, TableChange, UniqueConstraint},
	quote::{add_brackets, clause, is_composite, join_groups, qualified_name, split_composite, wrap_quote},
};

/// Turns decoded change events into DDL text for the target dialect.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of threads.
pub struct Synthesizer {
	dialect: Dialect,
	mapper: Box<dyn NameMapper>,
}

impl Default for Synthesizer {
	fn default() -> Self {
		Self::new(Dialect::default(), IdentityMapper)
	}
}

impl Synthesizer {
	pub fn new(dialect: Dialect, mapper: impl NameMapper + 'static) -> Self {
		Self {
			dialect,
			mapper: Box::new(mapper),
		}
	}

	pub fn dialect(&self) -> &Dialect {
		&self.dialect
	}

	/// Renders one `CREATE TABLE` statement per table change, in order,
	/// joined by the statement separator. An event without table changes
	/// yields an empty string.
	#[instrument(name = "ddl::convert", level = "debug", skip(self, event), fields(
		schema = %event.source.schema,
		table = %event.source.table,
		changes = event.table_changes.len()
	))]
	pub fn convert(&self, event: &ChangeEvent) -> String {
		let statements: Vec<String> = event
			.table_changes
			.iter()
			.map(|change| Statement::CreateTable.emit(self, &event.source, change))
			.collect();
		statements.join(&self.dialect.statement_separator)
	}

	/// Like [`Synthesizer::convert`], but picks the statement from each
	/// change's kind. Fails for kinds without a statement, leaving nothing
	/// partially rendered.
	#[instrument(name = "ddl::synthesize", level = "debug", skip(self, event), fields(
		schema = %event.source.schema,
		table = %event.source.table,
		changes = event.table_changes.len()
	))]
	pub fn synthesize(&self, event: &ChangeEvent) -> Result<String> {
		let mut statements = Vec::with_capacity(event.table_changes.len());
		for change in &event.table_changes {
			let Some(statement) = Statement::for_kind(change.kind) else {
				debug!(kind = %change.kind, "no statement for change kind");
				return Err(Error::UnsupportedChange {
					kind: change.kind,
					table: qualified_name(&self.dialect, &event.source.schema, &event.source.table),
				});
			};
			statements.push(statement.emit(self, &event.source, change));
		}
		Ok(statements.join(&self.dialect.statement_separator))
	}
}

/// Statement kinds the synthesizer can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
	CreateTable,
	DropTable,
}

impl Statement {
	pub fn for_kind(kind: ChangeKind) -> Option<Self> {
		match kind {
			ChangeKind::Create => Some(Statement::CreateTable),
			ChangeKind::Drop => Some(Statement::DropTable),
			ChangeKind::Alter => None,
		}
	}

	pub fn emit(&self, synthesizer: &Synthesizer, source: &Source, change: &TableChange) -> String {
		match self {
			Statement::CreateTable => emit_create_table(synthesizer, source, change),
			Statement::DropTable => emit_drop_table(&synthesizer.dialect, source),
		}
	}
}

// ── CREATE TABLE ────────────────────────────────────────────────────────

fn emit_create_table(synthesizer: &Synthesizer, source: &Source, change: &TableChange) -> String {
	let dialect = &synthesizer.dialect;

	let columns: Vec<String> = change.columns.iter().map(|col| emit_column(synthesizer, col)).collect();
	let primary_key: Vec<String> = emit_primary_key(dialect, &change.primary_key).into_iter().collect();
	let uniques: Vec<String> = change.uniques.iter().map(|u| emit_unique(dialect, u)).collect();
	let checks: Vec<String> = change.checks.iter().map(|c| emit_check(dialect, c)).collect();
	let foreign_keys: Vec<String> = change.foreign_keys.iter().map(|fk| emit_foreign_key(dialect, fk)).collect();

	trace!(
		columns = columns.len(),
		primary_key = primary_key.len(),
		uniques = uniques.len(),
		checks = checks.len(),
		foreign_keys = foreign_keys.len(),
		"emit create table"
	);

	// Group order is significant: columns, primary key, unique, check, foreign key.
	let body = join_groups(dialect, &[columns, primary_key, uniques, checks, foreign_keys]);

	format!("CREATE TABLE {} ({body})", qualified_name(dialect, &source.schema, &source.table))
}

fn emit_column(synthesizer: &Synthesizer, column: &Column) -> String {
	let dialect = &synthesizer.dialect;
	let name = synthesizer.mapper.map_column_name(&column.name);

	let mut sql = format!("{} {}", wrap_quote(dialect, &name), column.type_name);
	if let Some(length) = column.length.filter(|length| *length > 0) {
		sql.push_str(&add_brackets(length));
	}
	if let Some(expr) = column.default_value_expression.as_deref().filter(|expr| !expr.is_empty()) {
		sql.push_str(" DEFAULT ");
		sql.push_str(expr);
	}
	if !column.optional {
		sql.push_str(" NOT NULL");
	}
	clause(dialect, sql)
}

/// Duplicate key columns collapse to their first occurrence. The clause keeps
/// a trailing line break, so a body ending with it closes on its own line.
fn emit_primary_key(dialect: &Dialect, primary_key: &[String]) -> Option<String> {
	let columns: IndexSet<String> = primary_key.iter().map(|col| wrap_quote(dialect, col)).collect();
	if columns.is_empty() {
		return None;
	}
	let list = columns.into_iter().collect::<Vec<_>>().join(&dialect.list_separator);
	Some(format!("{}\n", clause(dialect, format!("PRIMARY KEY {}", add_brackets(list)))))
}

fn emit_unique(dialect: &Dialect, unique: &UniqueConstraint) -> String {
	clause(
		dialect,
		format!(
			"CONSTRAINT {} UNIQUE {}",
			wrap_quote(dialect, &unique.name),
			add_brackets(wrap_quote(dialect, &unique.column))
		),
	)
}

/// The condition is inserted verbatim.
fn emit_check(dialect: &Dialect, check: &CheckConstraint) -> String {
	clause(dialect, format!("CONSTRAINT {} CHECK {}", wrap_quote(dialect, &check.name), add_brackets(&check.condition)))
}

// Whether the key is composite is decided by the local column spec alone, for
// both sides of the reference.
fn emit_foreign_key(dialect: &Dialect, foreign_key: &ForeignKey) -> String {
	let composite = is_composite(&foreign_key.columns);
	let columns = |spec: &str| {
		if composite {
			split_composite(dialect, spec)
		} else {
			wrap_quote(dialect, spec)
		}
	};

	clause(
		dialect,
		format!(
			"CONSTRAINT {} FOREIGN KEY {} REFERENCES {} {}",
			wrap_quote(dialect, &foreign_key.name),
			add_brackets(columns(&foreign_key.columns)),
			qualified_name(dialect, &foreign_key.referenced_schema, &foreign_key.referenced_table),
			add_brackets(columns(&foreign_key.referenced_columns)),
		),
	)
}

// ── DROP TABLE ──────────────────────────────────────────────────────────

fn emit_drop_table(dialect: &Dialect, source: &Source) -> String {
	format!("DROP TABLE {}", qualified_name(dialect, &source.schema, &source.table))
}
