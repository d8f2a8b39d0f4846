// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Maildir address ranking
//!
//! Scans maildir-style mail stores, collects every address seen in the
//! To, From, Cc and Bcc headers together with the message date, and ranks
//! the addresses by how often and how recently they were seen. The result is
//! a plain text address book for mail client completion.
//!
//! # Features
//!
//! - RFC 2047 aware header decoding
//! - Incremental scans backed by a JSON cache of seen messages
//! - Frequency/recency blended ranking with deterministic tie-breaks
//! - Deny-list and regex filtering of automated senders
//! - SVG charts of address book growth
//!
//! # Example
//!
//! ```rust
//! use maildir_rank_addr::parse_header;
//!
//! let addresses = parse_header(b"\"Doe, John\" <John@Example.com>, jane@example.org");
//!
//! assert_eq!(addresses.len(), 2);
//! assert_eq!(addresses[0].name, "Doe, John");
//! assert_eq!(addresses[0].address, "john@example.com");
//! ```

mod cache;
mod chart;
mod config;
mod error;
mod output;
mod parser;
mod rank;
mod scanner;
mod stats;
mod types;

pub use cache::{Cache, ScanStats};
pub use chart::{AxisFormat, LineChart, Series};
pub use config::{CACHE_FILE_NAME, Config, DEFAULT_FILTERS, DEFAULT_TEMPLATE, OUTPUT_FILE_NAME};
pub use error::{Error, Result};
pub use output::{
    AddressFilter, RunSummary, format_line, generate_addressbook, most_frequent_name,
    ranked_lines, write_addressbook,
};
pub use parser::{
    ADDRESS_HEADERS, decode_words, parse_address, parse_date, parse_header, parse_message,
    split_addresses,
};
pub use rank::{DEFAULT_FREQUENCY_WEIGHT, blended_score, calculate_ranks};
pub use scanner::{MAIL_SUBDIRS, is_mail, read_headers, walk_messages};
pub use stats::{
    COUNT_CHART_FILE, DATE_CHART_FILE, GrowthPoint, GrowthSeries, collect_messages,
    generate_report,
};
pub use types::*;
