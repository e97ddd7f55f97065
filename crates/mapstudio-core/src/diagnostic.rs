// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Import diagnostics.
use core::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Import continued with a substitute (e.g. a placeholder).
    Warning,
    /// The entry or slot was dropped.
    Error,
}

/// One problem surfaced by a transcoding pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Record name of the entry concerned.
    pub referrer: String,
    /// Record field concerned, if any.
    pub field: Option<String>,
    /// Slot index for array references.
    pub slot: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Warning about `referrer`.
    pub fn warning(referrer: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            referrer: referrer.to_owned(),
            field: None,
            slot: None,
            message: message.into(),
        }
    }

    /// Error about `referrer`.
    pub fn error(referrer: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(referrer, message)
        }
    }

    /// Attaches the field and slot the diagnostic is about.
    pub fn at(mut self, field: &str, slot: Option<usize>) -> Self {
        self.field = Some(field.to_owned());
        self.slot = slot;
        self
    }

    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: `{}`", self.referrer)?;
        if let Some(field) = &self.field {
            write!(f, ".{field}")?;
        }
        if let Some(slot) = self.slot {
            write!(f, "[{slot}]")?;
        }
        write!(f, ": {}", self.message)
    }
}
