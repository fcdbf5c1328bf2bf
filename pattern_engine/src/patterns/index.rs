//! Label → timestamps event index.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::detectors::Detection;
use crate::models::bar::Bar;
use crate::patterns::label::PatternLabel;

/// Mapping from label to the time-ascending timestamps where it fired.
///
/// Only labels with at least one occurrence are stored; a missing key means
/// "no occurrences". Iteration follows [`PatternLabel::ALL`] order regardless of
/// which detector produced an entry. Deserialized input is normalized the same
/// way, whatever its key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PatternIndex {
    entries: IndexMap<PatternLabel, Vec<DateTime<Utc>>>,
}

impl PatternIndex {
    /// Build the index from raw detections against the bars they refer to.
    ///
    /// Repeated `(index, label)` pairs collapse to one timestamp. Detections
    /// pointing past the end of `bars` are ignored.
    pub fn from_detections(bars: &[Bar], detections: &[Detection]) -> Self {
        let mut entries = IndexMap::new();
        for label in PatternLabel::ALL {
            let positions: BTreeSet<usize> = detections
                .iter()
                .filter(|d| d.label == label && d.index < bars.len())
                .map(|d| d.index)
                .collect();
            if positions.is_empty() {
                continue;
            }
            let timestamps = positions.into_iter().map(|i| bars[i].timestamp).collect();
            entries.insert(label, timestamps);
        }
        Self { entries }
    }

    /// Rebuild from arbitrary `label -> timestamps` entries: vocabulary order,
    /// sorted and deduplicated timestamps, empty labels dropped.
    fn from_entries(mut raw: IndexMap<PatternLabel, Vec<DateTime<Utc>>>) -> Self {
        let mut entries = IndexMap::new();
        for label in PatternLabel::ALL {
            let Some(mut timestamps) = raw.swap_remove(&label) else {
                continue;
            };
            timestamps.sort_unstable();
            timestamps.dedup();
            if !timestamps.is_empty() {
                entries.insert(label, timestamps);
            }
        }
        Self { entries }
    }

    /// The full vocabulary, whether or not a label fired.
    pub fn known_labels() -> &'static [PatternLabel] {
        &PatternLabel::ALL
    }

    pub fn get(&self, label: PatternLabel) -> Option<&[DateTime<Utc>]> {
        self.entries.get(&label).map(Vec::as_slice)
    }

    /// Occurrences of `label`, empty when it never fired.
    pub fn timestamps(&self, label: PatternLabel) -> &[DateTime<Utc>] {
        self.get(label).unwrap_or(&[])
    }

    pub fn contains(&self, label: PatternLabel, timestamp: DateTime<Utc>) -> bool {
        self.timestamps(label).binary_search(&timestamp).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternLabel, &[DateTime<Utc>])> {
        self.entries.iter().map(|(label, ts)| (*label, ts.as_slice()))
    }

    /// Number of labels with at least one occurrence.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of events across all labels.
    pub fn event_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<'de> Deserialize<'de> for PatternIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::deserialize(deserializer).map(Self::from_entries)
    }
}
