//! Error families raised while declaring symmetries and assembling bases.
//!
//! Each family wraps an [`ErrorInfo`] whose `code` is stable across releases,
//! so callers can match on codes such as `map-not-bijective` or
//! `sector-out-of-range` without parsing messages.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and lattice context of a failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code naming the violated check.
    pub code: String,
    /// One-line description of the failure.
    pub message: String,
    /// Offending values keyed by name: sites, periods, quantum numbers, labels.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How to declare the input so the check passes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Starts a payload for check `code`.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records an offending value; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remedy, e.g. which sign rule a generator needs.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Failure raised by any stage between a declared lattice and a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum QsbError {
    /// Site maps, generator periods and group closure.
    #[error("symmetry error: {0}")]
    Symmetry(ErrorInfo),
    /// Quantum numbers that do not fit the generator periods.
    #[error("sector error: {0}")]
    Sector(ErrorInfo),
    /// Candidate sources and the states they produce.
    #[error("enumeration error: {0}")]
    Enumeration(ErrorInfo),
    /// Operator labels, sites and strings.
    #[error("operator error: {0}")]
    Operator(ErrorInfo),
    /// Basis tables, matrix assembly and worker pools.
    #[error("basis error: {0}")]
    Basis(ErrorInfo),
    /// JSON basis documents.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl QsbError {
    /// Payload shared by every family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            QsbError::Symmetry(info)
            | QsbError::Sector(info)
            | QsbError::Enumeration(info)
            | QsbError::Operator(info)
            | QsbError::Basis(info)
            | QsbError::Config(info) => info,
        }
    }

    /// Code of the failed check.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Family name, matching the `family` tag of the JSON form.
    pub fn family(&self) -> &'static str {
        match self {
            QsbError::Symmetry(_) => "Symmetry",
            QsbError::Sector(_) => "Sector",
            QsbError::Enumeration(_) => "Enumeration",
            QsbError::Operator(_) => "Operator",
            QsbError::Basis(_) => "Basis",
            QsbError::Config(_) => "Config",
        }
    }
}
