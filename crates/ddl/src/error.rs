// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io;

use crate::model::ChangeKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to decode JSON: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("invalid configuration: {message}")]
	Config {
		message: String,
	},

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("{kind} change for table {table} cannot be synthesized")]
	UnsupportedChange {
		kind: ChangeKind,
		table: String,
	},
}

impl Error {
	pub(crate) fn config(message: impl Into<String>) -> Self {
		Error::Config {
			message: message.into(),
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
