//! The fixed pattern vocabulary shared with downstream consumers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Detector family a label belongs to. A bar carries at most one label per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    HeadAndShoulders,
    MultipleTopBottom,
    Triangle,
    Wedge,
    Channel,
    DoubleTopBottom,
    Trendline,
    Pivot,
}

/// A recognized chart formation.
///
/// The serialized form is the exact display string (e.g. `"Head and Shoulder"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternLabel {
    #[serde(rename = "Head and Shoulder")]
    HeadAndShoulder,
    #[serde(rename = "Inverse Head and Shoulder")]
    InverseHeadAndShoulder,
    #[serde(rename = "Multiple Top")]
    MultipleTop,
    #[serde(rename = "Multiple Bottom")]
    MultipleBottom,
    #[serde(rename = "Ascending Triangle")]
    AscendingTriangle,
    #[serde(rename = "Descending Triangle")]
    DescendingTriangle,
    #[serde(rename = "Wedge Up")]
    WedgeUp,
    #[serde(rename = "Wedge Down")]
    WedgeDown,
    #[serde(rename = "Channel Up")]
    ChannelUp,
    #[serde(rename = "Channel Down")]
    ChannelDown,
    #[serde(rename = "Double Top")]
    DoubleTop,
    #[serde(rename = "Double Bottom")]
    DoubleBottom,
    #[serde(rename = "Support Trendline")]
    SupportTrendline,
    #[serde(rename = "Resistance Trendline")]
    ResistanceTrendline,
    #[serde(rename = "Higher High")]
    HigherHigh,
    #[serde(rename = "Lower Low")]
    LowerLow,
    #[serde(rename = "Lower High")]
    LowerHigh,
    #[serde(rename = "Higher Low")]
    HigherLow,
}

impl PatternLabel {
    /// Every known label, in the order used for index iteration and reports.
    pub const ALL: [PatternLabel; 18] = [
        PatternLabel::HeadAndShoulder,
        PatternLabel::InverseHeadAndShoulder,
        PatternLabel::MultipleTop,
        PatternLabel::MultipleBottom,
        PatternLabel::AscendingTriangle,
        PatternLabel::DescendingTriangle,
        PatternLabel::WedgeUp,
        PatternLabel::WedgeDown,
        PatternLabel::ChannelUp,
        PatternLabel::ChannelDown,
        PatternLabel::DoubleTop,
        PatternLabel::DoubleBottom,
        PatternLabel::SupportTrendline,
        PatternLabel::ResistanceTrendline,
        PatternLabel::HigherHigh,
        PatternLabel::LowerLow,
        PatternLabel::LowerHigh,
        PatternLabel::HigherLow,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PatternLabel::HeadAndShoulder => "Head and Shoulder",
            PatternLabel::InverseHeadAndShoulder => "Inverse Head and Shoulder",
            PatternLabel::MultipleTop => "Multiple Top",
            PatternLabel::MultipleBottom => "Multiple Bottom",
            PatternLabel::AscendingTriangle => "Ascending Triangle",
            PatternLabel::DescendingTriangle => "Descending Triangle",
            PatternLabel::WedgeUp => "Wedge Up",
            PatternLabel::WedgeDown => "Wedge Down",
            PatternLabel::ChannelUp => "Channel Up",
            PatternLabel::ChannelDown => "Channel Down",
            PatternLabel::DoubleTop => "Double Top",
            PatternLabel::DoubleBottom => "Double Bottom",
            PatternLabel::SupportTrendline => "Support Trendline",
            PatternLabel::ResistanceTrendline => "Resistance Trendline",
            PatternLabel::HigherHigh => "Higher High",
            PatternLabel::LowerLow => "Lower Low",
            PatternLabel::LowerHigh => "Lower High",
            PatternLabel::HigherLow => "Higher Low",
        }
    }

    pub const fn family(self) -> PatternFamily {
        match self {
            PatternLabel::HeadAndShoulder | PatternLabel::InverseHeadAndShoulder => {
                PatternFamily::HeadAndShoulders
            }
            PatternLabel::MultipleTop | PatternLabel::MultipleBottom => {
                PatternFamily::MultipleTopBottom
            }
            PatternLabel::AscendingTriangle | PatternLabel::DescendingTriangle => {
                PatternFamily::Triangle
            }
            PatternLabel::WedgeUp | PatternLabel::WedgeDown => PatternFamily::Wedge,
            PatternLabel::ChannelUp | PatternLabel::ChannelDown => PatternFamily::Channel,
            PatternLabel::DoubleTop | PatternLabel::DoubleBottom => PatternFamily::DoubleTopBottom,
            PatternLabel::SupportTrendline | PatternLabel::ResistanceTrendline => {
                PatternFamily::Trendline
            }
            PatternLabel::HigherHigh
            | PatternLabel::LowerLow
            | PatternLabel::LowerHigh
            | PatternLabel::HigherLow => PatternFamily::Pivot,
        }
    }
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown label text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pattern label: {0}")]
pub struct UnknownLabelError(pub String);

impl FromStr for PatternLabel {
    type Err = UnknownLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabelError(s.to_string()))
    }
}
