//! wordbook CLI - Command-line interface library
//!
//! This library provides the CLI functionality for wordbook:
//! - Convert: Turn a DOCX file into a GitBook-style Markdown book
//! - Toc: Print the table of contents a conversion would produce
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert a document into ./gitbook_output
//! wordbook convert report.docx
//!
//! # Custom output directory, title and TOC depth
//! wordbook convert report.docx -o book -t "Annual Report" --max-toc-level 2 --clean
//!
//! # Inspect the table of contents as JSON
//! wordbook toc report.docx --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{convert_command, toc_command, write_book};
pub use app::{run_cli, ConvertArgs, TocFormat, DEFAULT_OUTPUT_DIR};
