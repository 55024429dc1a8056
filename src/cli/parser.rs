// src/cli/parser.rs
use clap::Parser;

use crate::cli::commands::Command;

/// CommonJS-to-ES6 rewriter for protoc-generated protobuf modules
#[derive(Parser)]
#[command(
    name = "es6fix",
    version = env!("CARGO_PKG_VERSION"),
    author = "F2LB Tooling",
    about = "Rewrites protoc-generated CommonJS protobuf modules into ES6 modules",
    long_about = r#"
es6fix
======

Rewrites the module-loading and symbol-export statements emitted by the
protoc JavaScript plugin from the CommonJS/Closure convention into ES6
modules, line by line:

• var X = require(Y);            →  import * as X from Y;
• goog.object.extend(exports, P) →  (blanked, package name captured)
• goog.exportSymbol('P.S', …)    →  export const S = P.S   (appended)

With no subcommand and piped input it behaves as a plain filter:

  cat foo_pb.js | es6fix > foo_pb.mjs
"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn parse() -> Self {
        Parser::parse()
    }
}
