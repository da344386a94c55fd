use std::collections::HashMap;

use itertools::Itertools;
use rand::Rng;

use crate::catalog::{self, Instrument};
use crate::metrics::{self, Metrics};

/// A held quantity of a catalog instrument plus its fetched current price.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    id: u64,
    name: String,
    symbol: String,
    quantity: u32,
    current_price: Option<f64>,
}

impl Position {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn current_price(&self) -> Option<f64> {
        self.current_price
    }

    /// Price treated as 0 until the first fetch succeeds.
    pub fn price(&self) -> f64 {
        self.current_price.unwrap_or(0.0)
    }

    pub fn market_value(&self) -> f64 {
        f64::from(self.quantity) * self.price()
    }
}

/// Owns every piece of portfolio state and exposes the only mutation entry
/// points.
///
/// Each mutation bumps `generation`, the token a refresh cycle is stamped
/// with at dispatch. A quote update carrying an older generation arrived for
/// a portfolio that no longer exists and is discarded in [`apply_quotes`].
///
/// [`apply_quotes`]: Portfolio::apply_quotes
#[derive(Debug, Default)]
pub struct Portfolio {
    positions: Vec<Position>,
    next_id: u64,
    generation: u64,
    total_value: f64,
    metrics: Metrics,
}

impl Portfolio {
    pub fn new() -> Portfolio {
        Portfolio::default()
    }

    /// Seed with `count` random catalog instruments at quantity 1.
    pub fn seeded<R: Rng>(rng: &mut R, count: usize) -> Portfolio {
        let mut portfolio = Portfolio::new();

        for instrument in catalog::random_selection(rng, count) {
            portfolio.add(instrument, 1);
        }

        portfolio
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn get(&self, id: u64) -> Option<&Position> {
        self.positions.iter().find(|position| position.id == id)
    }

    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ordered list of distinct ticker symbols, the snapshot a refresh cycle
    /// is dispatched with.
    pub fn symbols(&self) -> Vec<String> {
        self.positions
            .iter()
            .map(|position| position.symbol.clone())
            .unique()
            .collect()
    }

    /// Append a position for a catalog instrument, returning its fresh id.
    pub fn add(&mut self, instrument: &Instrument, quantity: u32) -> u64 {
        self.next_id += 1;
        let id = self.next_id;

        self.positions.push(Position {
            id,
            name: instrument.name.to_string(),
            symbol: instrument.symbol.to_string(),
            quantity,
            current_price: None,
        });

        self.bump();

        id
    }

    /// Replace a position's instrument and quantity in place. The symbol is
    /// always re-derived from the catalog entry; id and list order stay
    /// unchanged. The stale price is dropped when the instrument changed.
    pub fn update(&mut self, id: u64, instrument: &Instrument, quantity: u32) -> bool {
        let position = match self.positions.iter_mut().find(|position| position.id == id) {
            Some(position) => position,
            None => return false,
        };

        if position.symbol != instrument.symbol {
            position.current_price = None;
        }

        position.name = instrument.name.to_string();
        position.symbol = instrument.symbol.to_string();
        position.quantity = quantity;

        self.bump();

        true
    }

    /// Remove a position by id. No confirmation, irreversible.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.positions.len();
        self.positions.retain(|position| position.id != id);

        let removed = self.positions.len() != before;
        if removed {
            self.bump();
        }

        removed
    }

    /// Apply one refresh cycle's prices, keyed by ticker symbol. Returns
    /// false and leaves the store untouched when the cycle's generation is
    /// stale. Symbols absent from the map keep their previous price.
    pub fn apply_quotes(&mut self, generation: u64, prices: &HashMap<String, f64>) -> bool {
        if generation != self.generation {
            return false;
        }

        for position in self.positions.iter_mut() {
            if let Some(price) = prices.get(&position.symbol) {
                position.current_price = Some(*price);
            }
        }

        self.recalculate();

        true
    }

    fn bump(&mut self) {
        self.generation += 1;
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.total_value = self.positions.iter().map(Position::market_value).sum();
        self.metrics = metrics::compute(&self.positions, self.total_value);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::SEED_COUNT;

    fn instrument(name: &str) -> &'static Instrument {
        catalog::find_by_name(name).unwrap()
    }

    fn prices(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect()
    }

    #[test]
    fn empty_portfolio_is_worth_nothing() {
        let portfolio = Portfolio::new();

        assert_eq!(portfolio.total_value(), 0.0);
        assert!(portfolio.positions().is_empty());
    }

    #[test]
    fn total_value_is_the_sum_of_market_values() {
        let mut portfolio = Portfolio::new();
        portfolio.add(instrument("Amazon"), 2);
        portfolio.add(instrument("Apple"), 3);
        portfolio.add(instrument("Nike"), 1);

        // Nike left unquoted, so it contributes 0
        portfolio.apply_quotes(
            portfolio.generation(),
            &prices(&[("AMZN", 100.0), ("AAPL", 10.0)]),
        );

        assert_eq!(portfolio.total_value(), 230.0);

        let expected: f64 = portfolio.positions().iter().map(Position::market_value).sum();
        assert_eq!(portfolio.total_value(), expected);
    }

    #[test]
    fn add_appends_one_position_with_the_catalog_symbol() {
        let mut portfolio = Portfolio::new();

        let id = portfolio.add(instrument("Amazon"), 2);

        assert_eq!(portfolio.positions().len(), 1);

        let position = portfolio.get(id).unwrap();
        assert_eq!(position.name(), "Amazon");
        assert_eq!(position.symbol(), "AMZN");
        assert_eq!(position.quantity(), 2);
        assert_eq!(position.current_price(), None);
    }

    #[test]
    fn ids_stay_unique_across_removals() {
        let mut portfolio = Portfolio::new();

        let first = portfolio.add(instrument("Amazon"), 1);
        let second = portfolio.add(instrument("Apple"), 1);
        portfolio.remove(first);
        let third = portfolio.add(instrument("Tesla"), 1);

        let ids: HashSet<_> = portfolio.positions().iter().map(Position::id).collect();
        assert_eq!(ids.len(), portfolio.positions().len());
        assert_ne!(third, second);
        assert_ne!(third, first);
    }

    #[test]
    fn update_rewrites_in_place_and_keeps_the_id() {
        let mut portfolio = Portfolio::new();
        let id = portfolio.add(instrument("Amazon"), 2);
        portfolio.add(instrument("Nike"), 1);

        assert!(portfolio.update(id, instrument("Apple"), 5));

        assert_eq!(portfolio.positions().len(), 2);

        let position = portfolio.get(id).unwrap();
        assert_eq!(position.name(), "Apple");
        assert_eq!(position.symbol(), "AAPL");
        assert_eq!(position.quantity(), 5);

        assert!(!portfolio.update(9999, instrument("Apple"), 1));
    }

    #[test]
    fn update_drops_the_price_only_when_the_instrument_changes() {
        let mut portfolio = Portfolio::new();
        let id = portfolio.add(instrument("Amazon"), 2);
        portfolio.apply_quotes(portfolio.generation(), &prices(&[("AMZN", 100.0)]));

        portfolio.update(id, instrument("Amazon"), 3);
        assert_eq!(portfolio.get(id).unwrap().current_price(), Some(100.0));

        portfolio.update(id, instrument("Apple"), 3);
        assert_eq!(portfolio.get(id).unwrap().current_price(), None);
    }

    #[test]
    fn remove_deletes_exactly_one_position() {
        let mut portfolio = Portfolio::new();
        let first = portfolio.add(instrument("Amazon"), 1);
        let second = portfolio.add(instrument("Apple"), 1);
        let third = portfolio.add(instrument("Tesla"), 1);

        assert!(portfolio.remove(second));
        assert!(!portfolio.remove(second));

        let ids: Vec<_> = portfolio.positions().iter().map(Position::id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn quotes_match_by_symbol_not_by_position_order() {
        let mut portfolio = Portfolio::new();
        portfolio.add(instrument("Amazon"), 1);
        let apple = portfolio.add(instrument("Apple"), 1);

        // Membership changed after the snapshot would have been taken; the
        // map still lands on the right positions because it is symbol-keyed.
        portfolio.remove(apple);
        portfolio.add(instrument("Apple"), 4);

        portfolio.apply_quotes(
            portfolio.generation(),
            &prices(&[("AAPL", 10.0), ("AMZN", 1.0)]),
        );

        for position in portfolio.positions() {
            match position.symbol() {
                "AMZN" => assert_eq!(position.current_price(), Some(1.0)),
                "AAPL" => assert_eq!(position.current_price(), Some(10.0)),
                other => panic!("unexpected symbol {}", other),
            }
        }
    }

    #[test]
    fn stale_refresh_cycles_are_discarded() {
        let mut portfolio = Portfolio::new();
        portfolio.add(instrument("Amazon"), 1);

        let dispatched = portfolio.generation();

        // Portfolio changes while the request is in flight
        portfolio.add(instrument("Apple"), 1);

        assert!(!portfolio.apply_quotes(dispatched, &prices(&[("AMZN", 100.0)])));
        assert_eq!(portfolio.total_value(), 0.0);
        assert_eq!(portfolio.get(1).unwrap().current_price(), None);

        assert!(portfolio.apply_quotes(portfolio.generation(), &prices(&[("AMZN", 100.0)])));
        assert_eq!(portfolio.total_value(), 100.0);
    }

    #[test]
    fn applying_quotes_refreshes_metrics() {
        let mut portfolio = Portfolio::new();
        portfolio.add(instrument("Amazon"), 2);

        portfolio.apply_quotes(portfolio.generation(), &prices(&[("AMZN", 100.0)]));

        assert_eq!(portfolio.total_value(), 200.0);
        assert_eq!(portfolio.metrics().top.as_ref().unwrap().name, "Amazon");
        assert_eq!(portfolio.metrics().distribution["Amazon"], 100.0);
    }

    #[test]
    fn seeding_is_reproducible_and_starts_at_quantity_one() {
        let first = Portfolio::seeded(&mut StdRng::seed_from_u64(3), SEED_COUNT);
        let second = Portfolio::seeded(&mut StdRng::seed_from_u64(3), SEED_COUNT);

        assert_eq!(first.positions().len(), SEED_COUNT);

        let names: Vec<_> = first.positions().iter().map(Position::name).collect();
        let names_again: Vec<_> = second.positions().iter().map(Position::name).collect();
        assert_eq!(names, names_again);

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), SEED_COUNT);

        for position in first.positions() {
            assert_eq!(position.quantity(), 1);
            assert_eq!(position.current_price(), None);
        }
    }

    #[test]
    fn symbols_are_deduplicated_in_dispatch_order() {
        let mut portfolio = Portfolio::new();
        portfolio.add(instrument("Apple"), 1);
        portfolio.add(instrument("Amazon"), 1);
        portfolio.add(instrument("Apple"), 2);

        assert_eq!(portfolio.symbols(), vec!["AAPL", "AMZN"]);
    }
}
