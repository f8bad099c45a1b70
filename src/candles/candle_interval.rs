use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CandleInterval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    FourHours,
    OneDay,
    OneWeek,
}

impl CandleInterval {
    pub fn as_minutes(self) -> u64 {
        match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
            Self::FourHours => 240,
            Self::OneDay => 1_440,
            Self::OneWeek => 10_080,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.as_minutes() * 60)
    }

    pub fn as_millis(self) -> u64 {
        self.as_duration().as_millis() as u64
    }
}

impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
        };

        write!(f, "{label}")
    }
}

impl FromStr for CandleInterval {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1m" => Ok(Self::OneMinute),
            "5m" => Ok(Self::FiveMinutes),
            "15m" => Ok(Self::FifteenMinutes),
            "30m" => Ok(Self::ThirtyMinutes),
            "1h" => Ok(Self::OneHour),
            "4h" => Ok(Self::FourHours),
            "1d" => Ok(Self::OneDay),
            "1w" => Ok(Self::OneWeek),
            other => Err(anyhow!("unsupported candle interval: {other}")),
        }
    }
}

impl TryFrom<String> for CandleInterval {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_back_and_forth() {
        for label in ["1m", "5m", "15m", "30m", "1h", "4h", "1d", "1w"] {
            let interval: CandleInterval = label.parse().unwrap();
            assert_eq!(interval.to_string(), label);
        }
    }

    #[test]
    fn durations() {
        assert_eq!(CandleInterval::OneMinute.as_millis(), 60_000);
        assert_eq!(CandleInterval::FourHours.as_minutes(), 240);
        assert_eq!(CandleInterval::OneHour.as_duration(), Duration::from_secs(3_600));
    }

    #[test]
    fn rejects_unknown_label() {
        assert!("3m".parse::<CandleInterval>().is_err());
    }
}
