// src/cli/mod.rs
pub mod commands;
pub mod parser;

use std::io::{self, IsTerminal};

use colored::*;
use commands::{CommandExecutor, FixArgs};

pub fn run() -> Result<(), String> {
    let cli = parser::Cli::parse();

    match cli.command {
        Some(command) => command.execute(),
        None => {
            // Bare invocation: act as a filter when fed a pipe, otherwise
            // show help instead of blocking on a terminal read
            if io::stdin().is_terminal() {
                print_help();
                Ok(())
            } else {
                FixArgs::stdin_filter().execute()
            }
        }
    }
}

fn print_help() {
    // Fixed width for the box
    let box_width = 60;
    let separator = "─".repeat(box_width - 2); // -2 for border characters

    println!();
    println!("┌{}┐", separator.cyan());

    // Center the title
    let title = "ES6FIX";
    let title_padding = (box_width - 2 - title.len()) / 2;
    println!(
        "│{}{}{}│",
        " ".repeat(title_padding),
        title.cyan().bold(),
        " ".repeat(box_width - 2 - title.len() - title_padding)
    );

    println!("├{}┤", separator.cyan());

    // Description lines
    print_box_line("Rewrites protoc-generated CommonJS protobuf modules", box_width, Color::White, false);
    print_box_line("into ES6 modules, line by line.", box_width, Color::White, false);
    print_box_line("", box_width, Color::White, false);

    // USAGE section
    print_box_line("USAGE:", box_width, Color::Yellow, true);
    print_box_line("  es6fix [COMMAND] [OPTIONS]", box_width, Color::White, false);
    print_box_line("", box_width, Color::White, false);

    // COMMANDS section
    print_box_line("COMMANDS:", box_width, Color::Yellow, true);
    print_box_line("  fix         Rewrite a generated module to ES6", box_width, Color::White, false);
    print_box_line("  version     Show version information", box_width, Color::White, false);
    print_box_line("", box_width, Color::White, false);

    // EXAMPLES section
    print_box_line("EXAMPLES:", box_width, Color::Yellow, true);
    print_box_line("  cat foo_pb.js | es6fix > foo_pb.mjs", box_width, Color::Green, false);
    print_box_line("  es6fix fix foo_pb.js -o foo_pb.mjs --stats", box_width, Color::Green, false);
    print_box_line("", box_width, Color::White, false);

    // Footer
    print_box_line("Use '--help' with any command for detailed information.", box_width, Color::Blue, false);

    println!("└{}┘", separator.cyan());
    println!();
}

fn print_box_line(text: &str, box_width: usize, color: Color, bold: bool) {
    let padded_text = if text.is_empty() {
        " ".repeat(box_width - 2)
    } else {
        format!(" {:<width$}", text, width = box_width - 3)
    };

    let mut colored_text = padded_text.color(color);
    if bold {
        colored_text = colored_text.bold();
    }

    println!("│{}│", colored_text);
}

pub fn print_version() {
    let version = env!("CARGO_PKG_VERSION");
    let box_width = 60;
    let separator = "─".repeat(box_width - 2);

    println!();
    println!("┌{}┐", separator.cyan());

    // Center the title
    let title = format!("ES6FIX v{}", version);
    let title_padding = (box_width - 2 - title.len()) / 2;
    println!(
        "│{}{}{}│",
        " ".repeat(title_padding),
        title.cyan().bold(),
        " ".repeat(box_width - 2 - title.len() - title_padding)
    );

    println!("├{}┤", separator.cyan());

    // Description
    print_box_line("A line rewriter for generated protobuf JavaScript,", box_width, Color::White, false);
    print_box_line("from CommonJS/Closure exports to ES6 modules.", box_width, Color::White, false);
    print_box_line("", box_width, Color::White, false);

    // REWRITES section
    print_box_line("REWRITES:", box_width, Color::Yellow, true);

    let rewrites = [
        "• var X = require(Y);  ->  import * as X from Y;",
        "• goog.object.extend(exports, P)  ->  blank line",
        "• goog.exportSymbol('P.S', ...)  ->  export const",
    ];

    for rewrite in rewrites.iter() {
        print_box_line(&format!("  {}", rewrite), box_width, Color::Green, false);
    }
    print_box_line("", box_width, Color::White, false);

    // Footer
    print_box_line("AUTHORS: F2LB Tooling", box_width, Color::Blue, false);
    print_box_line("LICENSE: MIT", box_width, Color::Blue, false);

    println!("└{}┘", separator.cyan());
    println!();
}
