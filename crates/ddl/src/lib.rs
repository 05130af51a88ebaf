// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Synthesizes `CREATE TABLE` statements from decoded change-data-capture
//! schema change events.
//!
//! ```
//! use cdc_ddl::{ChangeEvent, Column, Source, Synthesizer, TableChange};
//!
//! let event = ChangeEvent::new(Source::new("s", "t"))
//! 	.table_change(TableChange::create().column(Column::new("id", "INT")).primary_key("id"));
//!
//! assert_eq!(
//! 	Synthesizer::default().convert(&event),
//! 	"CREATE TABLE \"s\".\"t\" (\n\t\"id\" INT NOT NULL,\n\tPRIMARY KEY (\"id\")\n)"
//! );
//! ```

mod dialect;
mod emit;
mod error;
pub mod mapper;
pub mod model;
pub mod quote;

pub use dialect::{Config, Dialect};
pub use emit::{Statement, Synthesizer};
pub use error::{Error, Result};
pub use mapper::{IdentityMapper, NameMapper, RenameMapper};
pub use model::{ChangeEvent, ChangeKind, CheckConstraint, Column, ForeignKey, Source, TableChange, UniqueConstraint};
