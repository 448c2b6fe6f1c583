//! Audit trail models.
//!
//! Each calculation records the rule it applied as an [`AuditStep`] and any
//! recoverable problem as an [`AuditWarning`], so a monthly report can be
//! traced back to its inputs.

use serde::{Deserialize, Serialize};

/// Warning code for a break value that could not be parsed as a duration.
pub const WARN_BREAK_UNPARSEABLE: &str = "BREAK_UNPARSEABLE";

/// Warning code for a break longer than the entry it belongs to.
pub const WARN_BREAK_EXCEEDS_SPAN: &str = "BREAK_EXCEEDS_SPAN";

/// Warning code for a monthly summary that was skipped during roll-up.
pub const WARN_SUMMARY_SKIPPED: &str = "SUMMARY_SKIPPED";

/// How much a warning affects the trustworthiness of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    /// The result is still exact.
    Low,
    /// A value was replaced by a fallback.
    Medium,
    /// Part of the input is missing from the result.
    High,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate problems that were recovered from locally and did not
/// stop the calculation.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{AuditWarning, WarningSeverity};
///
/// let warning = AuditWarning::new(
///     "BREAK_UNPARSEABLE",
///     WarningSeverity::Medium,
///     "row 3: 'lunch' is not a duration",
/// );
/// assert_eq!(warning.severity, WarningSeverity::Medium);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(code: impl Into<String>, severity: WarningSeverity, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }
}

/// The complete audit trace for a monthly calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if any warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
