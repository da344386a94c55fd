use std::collections::HashMap;

use async_std::sync::Arc;
use futures::future::{join_all, BoxFuture};
use tracing::error;

use super::*;

/// Fetches a current price for every symbol in a refresh cycle's snapshot,
/// then keeps refetching the same snapshot at the update interval.
///
/// Responses are keyed by ticker symbol and stamped with the generation the
/// cycle was dispatched for, so the store can discard results that arrive
/// after the portfolio has changed.
pub struct QuoteBatch {
    generation: u64,
    symbols: Vec<String>,
}

impl QuoteBatch {
    pub fn new(generation: u64, symbols: Vec<String>) -> QuoteBatch {
        QuoteBatch {
            generation,
            symbols,
        }
    }
}

/// Prices from one refresh cycle, keyed by ticker symbol. Symbols whose
/// request failed are absent.
#[derive(Debug, Clone)]
pub struct QuoteUpdate {
    pub generation: u64,
    pub prices: HashMap<String, f64>,
}

impl AsyncTask for QuoteBatch {
    type Input = (u64, Vec<String>);
    type Response = QuoteUpdate;

    fn update_interval(&self) -> Option<Duration> {
        Some(Duration::from_secs(*crate::UPDATE_INTERVAL))
    }

    fn input(&self) -> Self::Input {
        (self.generation, self.symbols.clone())
    }

    fn task<'a>(input: Arc<Self::Input>) -> BoxFuture<'a, Option<Self::Response>> {
        Box::pin(async move {
            let (generation, symbols) = input.as_ref();

            if symbols.is_empty() {
                return None;
            }

            let responses = join_all(symbols.iter().map(|symbol| async move {
                (symbol.as_str(), crate::CLIENT.get_quote(symbol).await)
            }))
            .await;

            let mut prices = HashMap::new();

            for (symbol, response) in responses {
                match response {
                    Ok(quote) => {
                        prices.insert(symbol.to_string(), quote.current);
                    }
                    Err(e) => error!("quote fetch failed for {}: {:#}", symbol, e),
                }
            }

            Some(QuoteUpdate {
                generation: *generation,
                prices,
            })
        })
    }
}
