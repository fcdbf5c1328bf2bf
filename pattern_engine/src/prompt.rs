//! Plain-text rendering of a [`PatternIndex`] for narrative commentary.
//!
//! The engine never calls a language model itself; these helpers only produce
//! the text handed to one.

use chrono::SecondsFormat;

use crate::patterns::index::PatternIndex;

pub const NO_PATTERNS: &str = "No patterns detected.";

/// One line per label that fired, in vocabulary order:
/// `Label: 2024-01-03T00:00:00Z, 2024-01-05T00:00:00Z`.
pub fn render_pattern_summary(index: &PatternIndex) -> String {
    if index.is_empty() {
        return NO_PATTERNS.to_string();
    }
    index
        .iter()
        .map(|(label, timestamps)| {
            let stamps: Vec<String> = timestamps
                .iter()
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
                .collect();
            format!("{label}: {}", stamps.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full prompt asking for commentary on the detected patterns.
pub fn build_commentary_prompt(symbol: &str, index: &PatternIndex) -> String {
    format!(
        "You are a technical analyst reviewing daily price action for {symbol}.\n\
         The following chart patterns were detected (label: dates of occurrence):\n\
         \n\
         {summary}\n\
         \n\
         Summarize what these patterns suggest about recent price behaviour. \
         Refer only to the patterns and dates listed above.",
        summary = render_pattern_summary(index),
    )
}
