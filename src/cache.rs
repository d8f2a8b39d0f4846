//! Persistent scan cache: seen message ids and per-address history

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::parse_message;
use crate::scanner::{read_headers, walk_messages};
use crate::types::{AddressEntry, MessageFields, MessageId};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Everything learned from previous scans
///
/// Both collections keep insertion order through a save/load cycle, which
/// makes rank tie-breaks reproducible between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cache {
    #[serde(default)]
    pub msgs_seen: IndexSet<MessageId>,

    #[serde(default)]
    pub addresses: IndexMap<String, AddressEntry>,
}

/// Counters for one cache update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Message files found in the mail stores
    pub scanned: usize,
    /// Messages read and recorded during this update
    pub added: usize,
    /// Messages skipped because their id was already seen
    pub already_seen: usize,
    /// Messages that could not be read or parsed
    pub failed: usize,
}

impl Cache {
    /// Load the cache, starting empty if the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No cache at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the whole cache, creating its directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|e| Error::io(path, e))
    }

    #[must_use]
    pub fn is_seen(&self, id: &MessageId) -> bool {
        self.msgs_seen.contains(id)
    }

    /// Append one message's sightings and mark it seen
    pub fn record(&mut self, id: MessageId, fields: &MessageFields) {
        for parsed in &fields.addresses {
            self.addresses
                .entry(parsed.address.clone())
                .or_default()
                .push(parsed.name.as_str(), fields.timestamp);
        }
        self.msgs_seen.insert(id);
    }

    /// Scan every configured maildir and record messages not seen before
    ///
    /// Only the message id decides whether a message is read again. A message
    /// that fails to read or parse is skipped without being marked seen.
    pub fn update(&mut self, config: &Config) -> Result<ScanStats> {
        let mut stats = ScanStats::default();

        for root in &config.maildirs {
            info!("Scanning {}", root.display());
            for path in walk_messages(root)? {
                stats.scanned += 1;
                let Some(id) = MessageId::from_path(&path) else {
                    continue;
                };
                if self.is_seen(&id) {
                    stats.already_seen += 1;
                    continue;
                }

                match read_headers(&path).and_then(|raw| parse_message(&raw)) {
                    Ok(fields) => {
                        self.record(id, &fields);
                        stats.added += 1;
                    }
                    Err(err) => {
                        debug!("Skipping {}: {err}", path.display());
                        stats.failed += 1;
                    }
                }
            }
        }

        info!(
            "Scanned {} messages: {} new, {} already seen, {} unreadable",
            stats.scanned, stats.added, stats.already_seen, stats.failed
        );
        Ok(stats)
    }
}
