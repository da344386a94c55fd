use super::Service;
use crate::portfolio::Portfolio;
use crate::task::{AsyncTask, AsyncTaskHandle, QuoteBatch, QuoteUpdate};

/// Owns the in-flight refresh cycle. Dispatching a new cycle replaces the
/// previous handle, which cancels the task behind it.
pub struct QuoteService {
    batch_handle: Option<AsyncTaskHandle<QuoteUpdate>>,
}

impl QuoteService {
    pub fn new() -> QuoteService {
        QuoteService { batch_handle: None }
    }

    /// Dispatch a refresh cycle for the store's current membership snapshot.
    pub fn refresh(&mut self, portfolio: &Portfolio) {
        let symbols = portfolio.symbols();

        if symbols.is_empty() {
            self.batch_handle = None;
            return;
        }

        let task = QuoteBatch::new(portfolio.generation(), symbols);
        self.batch_handle = Some(task.connect());
    }
}

impl Service for QuoteService {
    type Update = QuoteUpdate;

    fn updates(&self) -> Vec<Self::Update> {
        self.batch_handle
            .as_ref()
            .map(|handle| handle.response().try_iter().collect())
            .unwrap_or_default()
    }
}
