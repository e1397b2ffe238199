//! RSI computation and the buy/sell/hold threshold policy.
//!
//! The RSI here is a single compact window, not Wilder's rolling smoothing:
//! sums of up to [`RSI_PERIOD`] consecutive changes, each divided by the
//! fixed period. Prices are most recent first and each change is taken as
//! `prices[i - 1] - prices[i]`, i.e. walking backwards in time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of pairwise changes in the window, and the fixed averaging divisor.
pub const RSI_PERIOD: usize = 14;
/// Strictly below this is oversold.
pub const OVERSOLD: f64 = 30.0;
/// Strictly above this is overbought.
pub const OVERBOUGHT: f64 = 70.0;
/// Reported when the window has neither gains nor losses.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Recommendation derived from the RSI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl Decision {
    /// First match wins: below 30 buys, above 70 sells, anything else holds.
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi < OVERSOLD {
            Decision::Buy
        } else if rsi > OVERBOUGHT {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    /// Supporting text shown under the recommendation.
    pub fn interpretation(&self) -> &'static str {
        match self {
            Decision::Buy => {
                "RSI oversold. Possible buying opportunity. Enter with a 7-10% stop-loss."
            }
            Decision::Sell => "RSI overbought. Consider taking profits or activating a stop-loss.",
            Decision::Hold => {
                "RSI neutral. No clear signal. Hold your position with a stop-loss or wait for a better entry."
            }
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Buy => write!(f, "BUY"),
            Decision::Sell => write!(f, "SELL"),
            Decision::Hold => write!(f, "HOLD"),
        }
    }
}

/// Output of [`evaluate`]. `rsi` is already rounded to one decimal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub rsi: f64,
    pub decision: Decision,
}

/// Computes the unrounded RSI of a most-recent-first price slice.
///
/// Short slices use however many changes exist; the divisor stays
/// [`RSI_PERIOD`]. Never returns NaN: no losses with gains is 100, no
/// movement at all (including a single price or an empty slice) is
/// [`NEUTRAL_RSI`].
pub fn compute_rsi(prices: &[f64]) -> f64 {
    let window = RSI_PERIOD.min(prices.len().saturating_sub(1));
    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=window {
        let change = prices[i - 1] - prices[i];
        if change > 0.0 {
            gains += change;
        } else if change < 0.0 {
            losses += -change;
        }
    }

    let avg_gain = gains / RSI_PERIOD as f64;
    let avg_loss = losses / RSI_PERIOD as f64;

    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { NEUTRAL_RSI };
    }
    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
}

/// Evaluates a most-recent-first price slice. The decision uses the exact
/// RSI; only the reported value is rounded.
pub fn evaluate(prices: &[f64]) -> Evaluation {
    let rsi = compute_rsi(prices);
    Evaluation {
        rsi: round_to_tenth(rsi),
        decision: Decision::from_rsi(rsi),
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
