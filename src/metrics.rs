use std::collections::HashMap;

use crate::portfolio::Position;

/// Position with the highest current price across the portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct TopPerformer {
    pub name: String,
    pub symbol: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub top: Option<TopPerformer>,
    /// Display name -> percentage share of total value. Positions holding
    /// the same instrument have their shares summed.
    pub distribution: HashMap<String, f64>,
}

/// Derive metrics from the position list and its precomputed total value.
///
/// Ties for top performer break toward the earlier position. A zero total
/// value pins every share to 0 instead of dividing by it.
pub fn compute(positions: &[Position], total_value: f64) -> Metrics {
    let top = positions
        .iter()
        .fold(None::<&Position>, |top, position| match top {
            Some(best) if best.price() >= position.price() => Some(best),
            _ => Some(position),
        })
        .map(|position| TopPerformer {
            name: position.name().to_string(),
            symbol: position.symbol().to_string(),
            price: position.price(),
        });

    let mut distribution = HashMap::new();

    for position in positions {
        let share = if total_value == 0.0 {
            0.0
        } else {
            position.market_value() / total_value * 100.0
        };

        *distribution.entry(position.name().to_string()).or_insert(0.0) += share;
    }

    Metrics { top, distribution }
}
