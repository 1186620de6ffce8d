//! Audit trail records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::AuditEventId;

/// Severity of an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Info,
    Success,
    Warning,
    Error,
}

impl AuditSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditSeverity::Info => "info",
            AuditSeverity::Success => "success",
            AuditSeverity::Warning => "warning",
            AuditSeverity::Error => "error",
        }
    }
}

/// Functional area an audit entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    Administration,
    Demands,
    Family,
}

impl AuditCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditCategory::Administration => "administration",
            AuditCategory::Demands => "demands",
            AuditCategory::Family => "family",
        }
    }
}

/// One line of the audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEventId,
    pub title: String,
    pub message: String,
    pub severity: AuditSeverity,
    pub category: AuditCategory,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        severity: AuditSeverity,
        category: AuditCategory,
    ) -> Self {
        Self {
            id: AuditEventId::new_v7(),
            title: title.into(),
            message: message.into(),
            severity,
            category,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(
            serde_json::to_string(&AuditSeverity::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(
            serde_json::to_string(&AuditCategory::Administration).unwrap(),
            "\"administration\""
        );
    }
}
