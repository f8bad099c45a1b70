use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::Deserialize;

/// Trading pair, written `BASE-QUOTE` (`BASE/QUOTE` is accepted too).
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Instrument {
    base: String,
    quote: String,
}

impl Instrument {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl FromStr for Instrument {
    type Err = anyhow::Error;

    fn from_str(symbol: &str) -> Result<Self> {
        let Some((base, quote)) = symbol.split_once(['-', '/']) else {
            bail!("invalid trading pair: {symbol}");
        };

        let (base, quote) = (base.trim(), quote.trim());
        if base.is_empty() || quote.is_empty() {
            bail!("invalid trading pair: {symbol}");
        }

        Ok(Self::new(base, quote))
    }
}

impl TryFrom<String> for Instrument {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}-{}", self.base, self.quote)
    }
}

impl fmt::Debug for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instrument({})", self)
    }
}
