// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::path::PathBuf;
use crate::{parsing::{InputError, WorkflowError}, workflow::LoadError};


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error("could not read {path:?}: {source}")]
	Io { path: PathBuf, source: std::io::Error },
	#[error("malformed input: {0:?}")]
	MalformedInput(InputError),
	#[error("workflow on line {line} does not end in a rule without condition")]
	NonTerminatingWorkflow { line: usize },
	#[error(transparent)]
	Load(#[from] LoadError),
}

impl From<InputError> for Error {
	fn from(err: InputError) -> Self {
		match err {
			InputError::Workflow { line, source: WorkflowError::NoFallback } =>
				Error::NonTerminatingWorkflow { line },
			err => Error::MalformedInput(err),
		}
	}
}
