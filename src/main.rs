// src/main.rs
//! es6fix - rewrites protoc-generated CommonJS modules into ES6 modules

fn main() {
    if let Err(e) = es6fix::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
