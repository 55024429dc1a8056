// src/report.rs
//! Summary of one rewrite run, for --stats and verbose output

use serde::Serialize;

/// Counters accumulated while rewriting a single module
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    /// Lines read from the input
    pub lines_in: usize,
    /// Lines in the output buffer, synthesized exports included
    pub lines_out: usize,
    /// Module-loader statements rewritten to `import * as …`
    pub imports_rewritten: usize,
    /// `goog.exportSymbol` statements collected for synthesis
    pub exports_collected: usize,
    /// Package name captured from the export aggregation statement
    pub parent_package: Option<String>,
}

impl RewriteReport {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize rewrite report: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_to_json() {
        let report = RewriteReport {
            lines_in: 4,
            lines_out: 5,
            imports_rewritten: 2,
            exports_collected: 1,
            parent_package: Some("proto.pkg".to_string()),
        };

        let json = report.to_json().unwrap();
        assert!(json.contains("\"lines_in\": 4"));
        assert!(json.contains("\"imports_rewritten\": 2"));
        assert!(json.contains("\"parent_package\": \"proto.pkg\""));
    }

    #[test]
    fn test_default_report_has_no_parent() {
        let report = RewriteReport::default();
        assert_eq!(report.parent_package, None);
        assert_eq!(report.exports_collected, 0);
    }
}
