use serde::{Deserialize, Serialize};

/// Side of the long EMA the price (or fast EMA) sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Above,
    Below,
}

/// Trend transition detected on the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    PriceAboveEma200,
    PriceBelowEma200,
    GoldenCross,
    DeathCross,
}

impl Signal {
    pub fn direction(self) -> Direction {
        match self {
            Signal::PriceAboveEma200 | Signal::GoldenCross => Direction::Above,
            Signal::PriceBelowEma200 | Signal::DeathCross => Direction::Below,
        }
    }

    /// Telegram HTML headline used in the report caption.
    pub fn headline(self) -> &'static str {
        match self {
            Signal::PriceAboveEma200 => "🚀 Price crossed <b>ABOVE</b> 200 EMA",
            Signal::PriceBelowEma200 => "🔻 Price crossed <b>BELOW</b> 200 EMA",
            Signal::GoldenCross => "🌟 <b>GOLDEN CROSS</b> (50 &gt; 200)",
            Signal::DeathCross => "☠️ <b>DEATH CROSS</b> (50 &lt; 200)",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Signal::PriceAboveEma200 => "PRICE_ABOVE_EMA200",
            Signal::PriceBelowEma200 => "PRICE_BELOW_EMA200",
            Signal::GoldenCross => "GOLDEN_CROSS",
            Signal::DeathCross => "DEATH_CROSS",
        };
        f.write_str(name)
    }
}
