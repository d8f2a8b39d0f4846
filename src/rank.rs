//! Frequency and recency ranking

use crate::types::{AddressEntry, Ranks};
use indexmap::IndexMap;
use std::cmp::Reverse;

/// Default weight of the frequency rank in the blended score
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 0.5;

/// Rank every address by how often and how recently it was seen
///
/// Both orders are descending and stable, so equal counts or dates keep the
/// insertion order of `addresses`. The result has the same key order.
#[must_use]
pub fn calculate_ranks(addresses: &IndexMap<String, AddressEntry>) -> IndexMap<String, Ranks> {
    let entries: Vec<&AddressEntry> = addresses.values().collect();
    let mut ranks = vec![Ranks::default(); entries.len()];

    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&i| Reverse(entries[i].frequency()));
    for (rank, &i) in order.iter().enumerate() {
        ranks[i].frequency_rank = rank;
    }

    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&i| Reverse(entries[i].recency()));
    for (rank, &i) in order.iter().enumerate() {
        ranks[i].recency_rank = rank;
    }

    addresses.keys().cloned().zip(ranks).collect()
}

/// `frequency_rank * weight + (1 - weight) * recency_rank`; lower is better
#[must_use]
pub fn blended_score(ranks: &Ranks, frequency_weight: f64) -> f64 {
    ranks.blended(frequency_weight)
}
