//! Parsers for query and reference record lists.
//!
//! Inputs are plain text with one record per line, optionally gzip compressed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fuzzmap::parsing::records::read_records;
//! use std::path::Path;
//!
//! let hosts = read_records(Path::new("hosts.txt")).unwrap();
//! let names = read_records(Path::new("taxo_names.txt.gz")).unwrap();
//! ```

pub mod records;
