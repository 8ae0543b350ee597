use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::collections::HashMap;

use super::{MarketDataSource, OrderGateway};
use crate::config::Settings;
use crate::error::{BrokerError, ServiceError};
use crate::models::{Order, OrderRequest, PriceBar, TimeFrame};

// Alpaca REST API
// Docs: https://docs.alpaca.markets/reference
pub const PAPER_API_BASE: &str = "https://paper-api.alpaca.markets";
pub const DATA_API_BASE: &str = "https://data.alpaca.markets";

const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

// Request window in bar lengths per requested bar; hours without trades produce no bar
const HISTORY_SLACK: i32 = 2;
const MAX_WINDOW_BARS: usize = 10_000;

/// Client for the Alpaca trading and market data APIs
#[derive(Clone)]
pub struct AlpacaClient {
    client: Client,
    api_key: String,
    secret_key: String,
    base_url: String,
    data_url: String,
}

// ============== Response Types ==============

#[derive(Debug, Deserialize)]
struct BarsResponse {
    #[serde(default)]
    bars: HashMap<String, Vec<RawBar>>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    t: DateTime<Utc>,
    c: f64,
}

/// Error body Alpaca returns with non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

// ============== Implementation ==============

impl AlpacaClient {
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
        data_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            base_url: trim_base(base_url.into()),
            data_url: trim_base(data_url.into()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.api_key.clone(),
            settings.secret_key.clone(),
            settings.base_url.clone(),
            settings.data_url.clone(),
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(KEY_ID_HEADER, &self.api_key)
            .header(SECRET_KEY_HEADER, &self.secret_key)
    }

    /// Get crypto bars
    /// Endpoint: GET /v1beta3/crypto/us/bars?symbols={symbol}&timeframe={tf}&start={t}&limit={n}&sort=desc
    ///
    /// Without `start` Alpaca only returns bars since midnight UTC, so the
    /// window is opened `limit` bars back (with slack). Sorted newest first so
    /// `limit` keeps the latest bars, then reversed.
    pub async fn get_crypto_bars(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<PriceBar>, ServiceError> {
        let url = format!("{}/v1beta3/crypto/us/bars", self.data_url);
        let limit_param = limit.to_string();
        let start_param =
            history_start(Utc::now(), timeframe, limit).to_rfc3339_opts(SecondsFormat::Secs, true);

        tracing::debug!(
            symbol,
            timeframe = timeframe.as_str(),
            start = %start_param,
            limit,
            "Requesting bars"
        );

        let response = self
            .authorized(self.client.get(&url))
            .query(&[
                ("symbols", symbol),
                ("timeframe", timeframe.as_str()),
                ("start", start_param.as_str()),
                ("limit", limit_param.as_str()),
                ("sort", "desc"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let (_, message) = read_error(response).await;
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let mut data: BarsResponse =
            serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;

        if data.next_page_token.is_some() {
            tracing::debug!(symbol, "More bars available than requested, ignoring next page");
        }

        let raw = data
            .bars
            .remove(symbol)
            .ok_or_else(|| ServiceError::MissingSymbol(symbol.to_string()))?;

        let mut bars: Vec<PriceBar> = raw
            .into_iter()
            .map(|bar| PriceBar {
                time: bar.t,
                close: bar.c,
            })
            .collect();
        bars.sort_by_key(|bar| bar.time);

        Ok(bars)
    }

    /// Submit an order
    /// Endpoint: POST /v2/orders
    pub async fn post_order(&self, request: &OrderRequest) -> Result<Order, BrokerError> {
        let url = format!("{}/v2/orders", self.base_url);

        tracing::debug!(
            symbol = %request.symbol,
            side = ?request.side,
            qty = %request.qty,
            "Submitting order"
        );

        let response = self
            .authorized(self.client.post(&url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let (code, message) = read_error(response).await;
            return Err(BrokerError::Rejected {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BrokerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MarketDataSource for AlpacaClient {
    async fn get_bars(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<PriceBar>, ServiceError> {
        self.get_crypto_bars(symbol, timeframe, limit).await
    }
}

#[async_trait]
impl OrderGateway for AlpacaClient {
    async fn submit_order(&self, request: &OrderRequest) -> Result<Order, BrokerError> {
        self.post_order(request).await
    }
}

/// Earliest bar time to request so that `limit` bars fit in the window
fn history_start(now: DateTime<Utc>, timeframe: TimeFrame, limit: usize) -> DateTime<Utc> {
    let bars = limit.clamp(1, MAX_WINDOW_BARS) as i32;
    now - timeframe.duration() * (bars * HISTORY_SLACK)
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Pull Alpaca's `{code, message}` out of an error response, falling back to the raw body
async fn read_error(response: Response) -> (Option<i64>, String) {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<ApiError>(&body) {
        Ok(err) => (err.code, err.message),
        Err(_) => (None, body),
    }
}
