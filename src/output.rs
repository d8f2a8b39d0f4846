//! Address book generation

use crate::cache::Cache;
use crate::config::{Config, DEFAULT_TEMPLATE};
use crate::error::{Error, Result};
use crate::rank::calculate_ranks;
use crate::types::local_part;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(address|name)\}").unwrap());

/// Decides which addresses are left out of the address book
#[derive(Debug, Clone, Default)]
pub struct AddressFilter {
    /// Case-sensitive substrings matched against the local part
    substrings: Vec<String>,
    /// Patterns matched against the whole address
    patterns: Vec<Regex>,
}

impl AddressFilter {
    #[must_use]
    pub const fn new(substrings: Vec<String>, patterns: Vec<Regex>) -> Self {
        Self {
            substrings,
            patterns,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.filters.clone(), config.compiled_filters()?))
    }

    #[must_use]
    pub fn is_filtered(&self, address: &str) -> bool {
        let local = local_part(address);
        self.substrings.iter().any(|s| local.contains(s.as_str()))
            || self.patterns.iter().any(|p| p.is_match(address))
    }
}

/// The name seen most often; on equal counts the one seen first wins
#[must_use]
pub fn most_frequent_name(names: &[String]) -> &str {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    let mut best = ("", 0);
    for (name, count) in counts {
        if count > best.1 {
            best = (name, count);
        }
    }
    best.0
}

/// Fill `{address}` and `{name}` in `template`
///
/// With the default template an address without a name is written bare.
/// Placeholders inside the substituted values are left alone.
#[must_use]
pub fn format_line(template: &str, address: &str, name: &str) -> String {
    if name.is_empty() && template == DEFAULT_TEMPLATE {
        return address.to_string();
    }

    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "address" => address,
            _ => name,
        })
        .into_owned()
}

/// Address book lines, best blended score first
///
/// Equal scores keep the insertion order of the cache.
#[must_use]
pub fn ranked_lines(
    cache: &Cache,
    filter: &AddressFilter,
    template: &str,
    frequency_weight: f64,
) -> Vec<String> {
    let ranks = calculate_ranks(&cache.addresses);

    let mut scored: Vec<(f64, String)> = cache
        .addresses
        .iter()
        .zip(ranks.values())
        .filter(|((address, _), _)| !filter.is_filtered(address))
        .map(|((address, entry), ranks)| {
            (
                ranks.blended(frequency_weight),
                format_line(template, address, most_frequent_name(&entry.names)),
            )
        })
        .collect();

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().map(|(_, line)| line).collect()
}

/// Write the address book, one line per address; returns the line count
pub fn write_addressbook(path: &Path, lines: &[String]) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(|e| Error::io(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;

    Ok(lines.len())
}

/// Summary of one extractor run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scan: crate::cache::ScanStats,
    /// Addresses known to the cache
    pub known: usize,
    /// Lines written to the address book
    pub written: usize,
}

/// Update the cache from the mail stores, persist it, then write the
/// ranked address book
pub fn generate_addressbook(config: &Config) -> Result<RunSummary> {
    let filter = AddressFilter::from_config(config)?;
    let cache_path = config.cache_file();

    let mut cache = Cache::load(&cache_path)?;
    let scan = cache.update(config)?;
    cache.save(&cache_path)?;

    let lines = ranked_lines(&cache, &filter, &config.template, config.frequency_weight);
    let output_path = config.output_path();
    let written = write_addressbook(&output_path, &lines)?;
    info!("{written} addresses written to {}", output_path.display());

    Ok(RunSummary {
        scan,
        known: cache.addresses.len(),
        written,
    })
}
