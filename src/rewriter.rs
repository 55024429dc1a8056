// src/rewriter.rs
//! CommonJS-to-ES6 line rewriter for protoc-generated protobuf modules

use regex::Regex;

use crate::report::RewriteReport;

const JSPB_REQUIRE: &str = "var jspb = require('google-protobuf');\n";
const JSPB_IMPORT: &str = "import * as jspb from 'google-protobuf';\n";
const EXPORT_SYMBOL_PREFIX: &str = "goog.exportSymbol(";
const EXTEND_EXPORTS_PREFIX: &str = "goog.object.extend(exports, ";

/// Line rewriter for one generated module dialect.
///
/// Turns `var X = require(Y);` loader statements into `import * as X from Y;`,
/// blanks the `goog.object.extend(exports, …)` aggregation statement, and
/// appends one `export const` declaration per `goog.exportSymbol(…)` line.
pub struct EsmRewriter {
    require_re: Regex,
    extend_re: Regex,
}

/// Result of one rewrite run
#[derive(Debug)]
pub struct Rewrite {
    /// Full rewritten text, ready to be written out as-is
    pub output: String,
    pub report: RewriteReport,
}

/// Everything the forward scan accumulates, consumed by the synthesis pass
struct Scan {
    lines: Vec<String>,
    exports: Vec<String>,
    parent_pkg: Option<String>,
    imports_rewritten: usize,
}

impl EsmRewriter {
    pub fn new() -> Self {
        Self {
            require_re: Regex::new(r"^var (.*) = require\((.*)\);$")
                .expect("require pattern must compile"),
            extend_re: Regex::new(r"^goog\.object\.extend\(exports, (.*)\);$")
                .expect("extend pattern must compile"),
        }
    }

    /// Rewrite a whole generated module in memory.
    ///
    /// The returned output carries one extra trailing newline, matching the
    /// final flush of the generator pipeline this slots into.
    pub fn rewrite(&self, source: &str) -> Result<Rewrite, String> {
        let scan = self.scan(source)?;
        let synthesized = self.synthesize(&scan.exports, scan.parent_pkg.as_deref())?;

        let mut output = String::with_capacity(source.len() + 1);
        for line in &scan.lines {
            output.push_str(line);
        }
        for line in &synthesized {
            output.push_str(line);
        }
        output.push('\n');

        let report = RewriteReport {
            lines_in: scan.lines.len(),
            lines_out: scan.lines.len() + synthesized.len(),
            imports_rewritten: scan.imports_rewritten,
            exports_collected: scan.exports.len(),
            parent_package: scan.parent_pkg,
        };

        Ok(Rewrite { output, report })
    }

    /// Single forward pass over the input lines.
    ///
    /// The import rules replace a line's buffered value; the export and
    /// parent-package rules always inspect the line's original text.
    fn scan(&self, source: &str) -> Result<Scan, String> {
        let mut lines = Vec::new();
        let mut exports = Vec::new();
        let mut parent_pkg: Option<String> = None;
        let mut imports_rewritten = 0usize;

        for raw in source.split_inclusive('\n') {
            let mut line = raw.to_string();

            if raw == JSPB_REQUIRE {
                line = JSPB_IMPORT.to_string();
                imports_rewritten += 1;
            } else if raw.contains(" require(") {
                if let Some(caps) = self.require_re.captures(trim_newline(raw)) {
                    line = format!("import * as {} from {};\n", &caps[1], &caps[2]);
                    imports_rewritten += 1;
                }
            }

            if raw.starts_with(EXPORT_SYMBOL_PREFIX) {
                exports.push(raw.to_string());
            }

            if raw.starts_with(EXTEND_EXPORTS_PREFIX) {
                let caps = self.extend_re.captures(trim_newline(raw)).ok_or_else(|| {
                    format!(
                        "Malformed export aggregation statement: {}",
                        trim_newline(raw)
                    )
                })?;
                parent_pkg = Some(caps[1].to_string());
                // Blank the line rather than remove it, keeping line numbers stable
                line = "\n".to_string();
            }

            lines.push(line);
        }

        Ok(Scan {
            lines,
            exports,
            parent_pkg,
            imports_rewritten,
        })
    }

    /// Turn every collected `goog.exportSymbol` line into an `export const`
    /// declaration, in collection order.
    ///
    /// The parent package name is interpolated into the pattern verbatim;
    /// its dots therefore match any character, which is harmless for the
    /// dotted identifiers protoc emits. A symbol outside the captured parent
    /// package (or a run that never saw an aggregation statement) is fatal.
    fn synthesize(&self, exports: &[String], parent_pkg: Option<&str>) -> Result<Vec<String>, String> {
        if exports.is_empty() {
            return Ok(Vec::new());
        }

        let parent = parent_pkg.unwrap_or("");
        let pattern = format!(r"^goog.exportSymbol\('({}\.(.*))', .*$", parent);
        let export_re = Regex::new(&pattern)
            .map_err(|e| format!("Failed to build export pattern for '{}': {}", parent, e))?;

        let mut synthesized = Vec::with_capacity(exports.len());
        for export in exports {
            let stripped = trim_newline(export);
            let caps = export_re.captures(stripped).ok_or_else(|| {
                format!(
                    "Export symbol does not belong to package '{}': {}",
                    parent, stripped
                )
            })?;
            let full = &caps[1];
            let ident = caps[2].replace('.', "");
            synthesized.push(format!("export const {} = {}\n", ident, full));
        }

        Ok(synthesized)
    }
}

fn trim_newline(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(source: &str) -> Rewrite {
        EsmRewriter::new().rewrite(source).unwrap()
    }

    #[test]
    fn test_jspb_require_rewrite() {
        let result = rewrite("var jspb = require('google-protobuf');\n");
        assert_eq!(result.output, "import * as jspb from 'google-protobuf';\n\n");
        assert_eq!(result.report.imports_rewritten, 1);
    }

    #[test]
    fn test_generic_require_rewrite() {
        let result = rewrite("var other_pb = require('./other_pb.js');\n");
        assert_eq!(
            result.output,
            "import * as other_pb from './other_pb.js';\n\n"
        );
    }

    #[test]
    fn test_require_without_var_shape_passes_through() {
        let source = "const x = require('./x.js');\nvar f = foo require('y');\n";
        let result = rewrite(source);
        assert_eq!(result.output, format!("{}\n", source));
        assert_eq!(result.report.imports_rewritten, 0);
    }

    #[test]
    fn test_plain_lines_pass_through_in_order() {
        let source = "// header\nvar x = 1;\nfunction f() {}\n";
        let result = rewrite(source);
        assert_eq!(result.output, format!("{}\n", source));
        assert_eq!(result.report.lines_in, 3);
        assert_eq!(result.report.lines_out, 3);
    }

    #[test]
    fn test_extend_line_blanked_and_parent_captured() {
        let result = rewrite("goog.object.extend(exports, proto.pkg);\n");
        assert_eq!(result.output, "\n\n");
        assert_eq!(result.report.parent_package.as_deref(), Some("proto.pkg"));
    }

    #[test]
    fn test_last_parent_wins() {
        let source = "goog.exportSymbol('proto.b.Foo', null, proto.b);\n\
                      goog.object.extend(exports, proto.a);\n\
                      goog.object.extend(exports, proto.b);\n";
        let result = rewrite(source);
        assert_eq!(result.report.parent_package.as_deref(), Some("proto.b"));
        assert!(result.output.contains("export const Foo = proto.b.Foo\n"));
    }

    #[test]
    fn test_export_synthesis_preserves_order() {
        let source = "goog.exportSymbol('proto.pkg.Foo', null, proto.pkg);\n\
                      goog.exportSymbol('proto.pkg.Bar', null, proto.pkg);\n\
                      goog.object.extend(exports, proto.pkg);\n";
        let result = rewrite(source);
        assert_eq!(
            result.output,
            "goog.exportSymbol('proto.pkg.Foo', null, proto.pkg);\n\
             goog.exportSymbol('proto.pkg.Bar', null, proto.pkg);\n\
             \n\
             export const Foo = proto.pkg.Foo\n\
             export const Bar = proto.pkg.Bar\n\
             \n"
        );
    }

    #[test]
    fn test_nested_symbol_ident_strips_dots() {
        let source = "goog.exportSymbol('proto.pkg.Foo.Bar', null, proto.pkg.Foo);\n\
                      goog.object.extend(exports, proto.pkg);\n";
        let result = rewrite(source);
        assert!(result
            .output
            .contains("export const FooBar = proto.pkg.Foo.Bar\n"));
    }

    #[test]
    fn test_full_generated_module() {
        let source = "var jspb = require('google-protobuf');\n\
                      var other_pb = require('./other_pb.js');\n\
                      goog.exportSymbol('proto.pkg.Foo', null, proto.pkg);\n\
                      goog.object.extend(exports, proto.pkg);\n";
        let result = rewrite(source);
        assert_eq!(
            result.output,
            "import * as jspb from 'google-protobuf';\n\
             import * as other_pb from './other_pb.js';\n\
             goog.exportSymbol('proto.pkg.Foo', null, proto.pkg);\n\
             \n\
             export const Foo = proto.pkg.Foo\n\
             \n"
        );
    }

    #[test]
    fn test_second_pass_rewrites_nothing() {
        // Import and pass-through lines are stable on a second run; only the
        // final flush newline accumulates.
        let source = "var jspb = require('google-protobuf');\n\
                      var other_pb = require('./other_pb.js');\n\
                      var x = 1;\n";
        let first = rewrite(source);
        let second = rewrite(&first.output);
        assert_eq!(second.output, format!("{}\n", first.output));
        assert_eq!(second.report.imports_rewritten, 0);
        assert_eq!(second.report.exports_collected, 0);
    }

    #[test]
    fn test_export_without_parent_is_fatal() {
        let source = "goog.exportSymbol('proto.pkg.Foo', null, proto.pkg);\n";
        let err = EsmRewriter::new().rewrite(source).unwrap_err();
        assert!(err.contains("does not belong to package ''"));
    }

    #[test]
    fn test_export_with_foreign_parent_is_fatal() {
        let source = "goog.exportSymbol('proto.other.Foo', null, proto.other);\n\
                      goog.object.extend(exports, proto.pkg);\n";
        let err = EsmRewriter::new().rewrite(source).unwrap_err();
        assert!(err.contains("proto.pkg"));
    }

    #[test]
    fn test_malformed_extend_line_is_fatal() {
        let source = "goog.object.extend(exports, proto.pkg)\n";
        let err = EsmRewriter::new().rewrite(source).unwrap_err();
        assert!(err.contains("Malformed export aggregation statement"));
    }

    #[test]
    fn test_empty_input_yields_single_newline() {
        let result = rewrite("");
        assert_eq!(result.output, "\n");
        assert_eq!(result.report.lines_in, 0);
        assert_eq!(result.report.lines_out, 0);
    }

    #[test]
    fn test_missing_final_newline_still_rewrites() {
        let result = rewrite("var other_pb = require('./other_pb.js');");
        assert_eq!(
            result.output,
            "import * as other_pb from './other_pb.js';\n\n"
        );
    }

    #[test]
    fn test_report_counters() {
        let source = "var jspb = require('google-protobuf');\n\
                      var other_pb = require('./other_pb.js');\n\
                      goog.exportSymbol('proto.pkg.Foo', null, proto.pkg);\n\
                      goog.object.extend(exports, proto.pkg);\n";
        let report = rewrite(source).report;
        assert_eq!(report.lines_in, 4);
        assert_eq!(report.lines_out, 5);
        assert_eq!(report.imports_rewritten, 2);
        assert_eq!(report.exports_collected, 1);
        assert_eq!(report.parent_package.as_deref(), Some("proto.pkg"));
    }
}
