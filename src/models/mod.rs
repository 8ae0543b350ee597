use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One price bar, projected down to what the indicators need
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    pub time: DateTime<Utc>,
    pub close: f64,
}

/// A price bar with the indicator values computed at that bar.
/// Rows inside an indicator's lookback window carry `None`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IndicatorRow {
    pub time: DateTime<Utc>,
    pub close: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
}

impl IndicatorRow {
    /// Both indicators are defined (and finite) at this row
    pub fn is_complete(&self) -> bool {
        matches!((self.rsi, self.macd), (Some(r), Some(m)) if r.is_finite() && m.is_finite())
    }
}

/// Trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        };
        f.write_str(label)
    }
}

/// Bar interval, named the way Alpaca's data API names them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeFrame {
    #[serde(rename = "1Min")]
    Minute,
    #[default]
    #[serde(rename = "1Hour")]
    Hour,
    #[serde(rename = "1Day")]
    Day,
}

impl TimeFrame {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Minute => "1Min",
            TimeFrame::Hour => "1Hour",
            TimeFrame::Day => "1Day",
        }
    }

    /// Length of one bar
    pub fn duration(&self) -> Duration {
        match self {
            TimeFrame::Minute => Duration::minutes(1),
            TimeFrame::Hour => Duration::hours(1),
            TimeFrame::Day => Duration::days(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Good till canceled
    Gtc,
}

/// Order submission payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub qty: Decimal,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
}

impl OrderRequest {
    /// Market order, good till canceled
    pub fn market(symbol: impl Into<String>, qty: Decimal, side: OrderSide) -> Self {
        Self {
            symbol: symbol.into(),
            qty,
            side,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::Gtc,
        }
    }
}

/// The part of the brokerage's order record we read back
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    #[serde(default)]
    pub client_order_id: Option<String>,
    pub symbol: String,
    pub side: OrderSide,
    pub status: String,
}

/// Outcome of the trade step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeResult {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
}

/// What one invocation returns to its caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvocationResponse {
    pub action: Signal,
    pub result: TradeResult,
}
