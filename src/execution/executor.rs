use std::sync::Arc;

use rust_decimal::Decimal;

use crate::api::OrderGateway;
use crate::error::BrokerError;
use crate::models::{OrderRequest, OrderSide, Signal, TradeResult};

pub const NO_TRADE_STATUS: &str = "No trade executed";

/// Turns a signal into a fixed-size market order
pub struct TradeExecutor {
    gateway: Arc<dyn OrderGateway>,
    symbol: String,
    quantity: Decimal,
}

impl TradeExecutor {
    pub fn new(gateway: Arc<dyn OrderGateway>, symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            gateway,
            symbol: symbol.into(),
            quantity,
        }
    }

    /// Place the order a signal calls for
    ///
    /// Buy and Sell submit a GTC market order for the configured quantity.
    /// Hold submits nothing. Rejections are returned as-is, never retried.
    pub async fn place_trade(&self, signal: Signal) -> Result<TradeResult, BrokerError> {
        let side = match signal {
            Signal::Buy => OrderSide::Buy,
            Signal::Sell => OrderSide::Sell,
            Signal::Hold => {
                tracing::info!(symbol = %self.symbol, "Hold signal, no order placed");
                return Ok(TradeResult {
                    status: NO_TRADE_STATUS.to_string(),
                    order_id: None,
                });
            }
        };

        let request = OrderRequest::market(self.symbol.clone(), self.quantity, side);
        let order = self.gateway.submit_order(&request).await?;

        tracing::info!(
            symbol = %order.symbol,
            side = ?order.side,
            qty = %request.qty,
            order_id = %order.id,
            status = %order.status,
            "Order submitted"
        );

        Ok(TradeResult {
            status: format!("{} executed", signal),
            order_id: Some(order.id),
        })
    }
}
