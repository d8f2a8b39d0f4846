//! Address and message growth over time

use crate::chart::{AxisFormat, LineChart, Series};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::parse_message;
use crate::scanner::{read_headers, walk_messages};
use crate::types::MessageFields;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Chart of address and message counts against message date
pub const DATE_CHART_FILE: &str = "date-address.svg";

/// Chart of address count against message count
pub const COUNT_CHART_FILE: &str = "email-address.svg";

/// State of the mail store right after one dated message arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPoint {
    pub timestamp: i64,
    /// Distinct addresses seen so far
    pub address_count: usize,
    /// Dated messages seen so far, this one included
    pub message_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowthSeries {
    pub points: Vec<GrowthPoint>,
}

/// Read every message of every configured mail store, without the cache
///
/// Messages that cannot be read or parsed are left out.
pub fn collect_messages(config: &Config) -> Result<Vec<MessageFields>> {
    let mut messages = Vec::new();
    for root in &config.maildirs {
        for path in walk_messages(root)? {
            match read_headers(&path).and_then(|raw| parse_message(&raw)) {
                Ok(fields) => messages.push(fields),
                Err(err) => debug!("Leaving {} out of the statistics: {err}", path.display()),
            }
        }
    }
    Ok(messages)
}

impl GrowthSeries {
    /// Replay dated messages in chronological order
    ///
    /// Messages without a usable date (timestamp 0 or earlier) are dropped
    /// along with their addresses.
    #[must_use]
    pub fn from_messages(mut messages: Vec<MessageFields>) -> Self {
        messages.retain(|m| m.timestamp > 0);
        messages.sort_by_key(|m| m.timestamp);

        let mut seen: HashSet<String> = HashSet::new();
        let points = messages
            .into_iter()
            .enumerate()
            .map(|(idx, message)| {
                seen.extend(message.addresses.into_iter().map(|a| a.address));
                GrowthPoint {
                    timestamp: message.timestamp,
                    address_count: seen.len(),
                    message_count: idx + 1,
                }
            })
            .collect();

        Self { points }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Address and message counts against date
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn date_chart(&self) -> LineChart {
        let addresses = self
            .points
            .iter()
            .map(|p| (p.timestamp as f64, p.address_count as f64))
            .collect();
        let emails = self
            .points
            .iter()
            .map(|p| (p.timestamp as f64, p.message_count as f64))
            .collect();

        LineChart::new("date", "count")
            .with_x_format(AxisFormat::Date)
            .with_series(Series::new("# addresses", addresses))
            .with_series(Series::new("# emails", emails))
            .with_legend()
    }

    /// Address count against message count
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn count_chart(&self) -> LineChart {
        let points = self
            .points
            .iter()
            .map(|p| (p.message_count as f64, p.address_count as f64))
            .collect();

        LineChart::new("# emails", "# addresses").with_series(Series::new("# addresses", points))
    }

    /// Write both charts into `dir`, returning their paths
    pub fn render(&self, dir: &Path) -> Result<[PathBuf; 2]> {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        let date_path = dir.join(DATE_CHART_FILE);
        let count_path = dir.join(COUNT_CHART_FILE);
        self.date_chart().save(&date_path)?;
        self.count_chart().save(&count_path)?;
        Ok([date_path, count_path])
    }
}

/// Rescan the mail stores and write both growth charts into `report_dir`
pub fn generate_report(config: &Config) -> Result<GrowthSeries> {
    let series = GrowthSeries::from_messages(collect_messages(config)?);
    let [date_path, count_path] = series.render(&config.report_dir)?;
    info!(
        "{} dated messages charted to {} and {}",
        series.len(),
        date_path.display(),
        count_path.display()
    );
    Ok(series)
}
