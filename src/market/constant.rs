//! Chart time frames.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Aggregation interval of the displayed candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "30m")]
    Minute30,
    #[default]
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
}

impl TimeFrame {
    /// Every selectable time frame, in selector order.
    pub const ALL: [TimeFrame; 7] = [
        TimeFrame::Minute1,
        TimeFrame::Minute5,
        TimeFrame::Minute30,
        TimeFrame::Hour1,
        TimeFrame::Hour4,
        TimeFrame::Day1,
        TimeFrame::Week1,
    ];

    /// Exchange interval string, also used as the button label
    pub fn value(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute30 => "30m",
            TimeFrame::Hour1 => "1h",
            TimeFrame::Hour4 => "4h",
            TimeFrame::Day1 => "1d",
            TimeFrame::Week1 => "1w",
        }
    }

    /// Length of one interval in seconds
    pub fn seconds(&self) -> i64 {
        match self {
            TimeFrame::Minute1 => 60,
            TimeFrame::Minute5 => 300,
            TimeFrame::Minute30 => 1_800,
            TimeFrame::Hour1 => 3_600,
            TimeFrame::Hour4 => 14_400,
            TimeFrame::Day1 => 86_400,
            TimeFrame::Week1 => 604_800,
        }
    }

    /// strftime pattern for time axis labels
    pub fn axis_format(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 | TimeFrame::Minute5 | TimeFrame::Minute30 => "%H:%M",
            TimeFrame::Hour1 | TimeFrame::Hour4 => "%m-%d %H:%M",
            TimeFrame::Day1 | TimeFrame::Week1 => "%Y-%m-%d",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for TimeFrame {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeFrame::ALL
            .into_iter()
            .find(|tf| tf.value() == s)
            .ok_or_else(|| FetchError::UnsupportedInterval(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_frame_value() {
        assert_eq!(TimeFrame::Minute1.value(), "1m");
        assert_eq!(TimeFrame::Hour4.value(), "4h");
        assert_eq!(TimeFrame::Week1.to_string(), "1w");
    }

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(TimeFrame::default(), TimeFrame::Hour1);
    }

    #[test]
    fn test_parse_rejects_unknown_interval() {
        assert_eq!("30m".parse::<TimeFrame>().unwrap(), TimeFrame::Minute30);
        let err = "15m".parse::<TimeFrame>().unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedInterval(s) if s == "15m"));
    }

    #[test]
    fn test_serde_uses_exchange_strings() {
        let json = serde_json::to_string(&TimeFrame::Day1).unwrap();
        assert_eq!(json, "\"1d\"");
        let tf: TimeFrame = serde_json::from_str("\"5m\"").unwrap();
        assert_eq!(tf, TimeFrame::Minute5);
    }
}
