use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const PRIORITY_HIGH: &str = "high";
pub const COVERAGE_MISSING: &str = "missing";

/// One entry of the coverage analyzer's output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CoverageGap {
    pub feature: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub coverage_status: String,
    #[serde(default)]
    pub suggested_test_file: String,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl CoverageGap {
    /// High priority and not covered by any existing test.
    pub fn is_actionable(&self) -> bool {
        self.priority == PRIORITY_HIGH && self.coverage_status == COVERAGE_MISSING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unknown_fields() {
        let gap: CoverageGap = serde_json::from_str(
            r#"{"feature":"csv","description":"d","priority":"high",
                "coverage_status":"missing","suggested_test_file":"t.spec.ts","owner":"qa"}"#,
        )
        .unwrap();
        assert!(gap.is_actionable());
        assert_eq!(gap.extra.get("owner"), Some(&Value::from("qa")));
    }

    #[test]
    fn partial_coverage_is_not_actionable() {
        let gap: CoverageGap = serde_json::from_str(
            r#"{"feature":"fav","priority":"high","coverage_status":"partial"}"#,
        )
        .unwrap();
        assert!(!gap.is_actionable());
    }
}
