use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::entity::{Quote, QuoteDraft, QuoteId, QuoteUpdate};
use crate::error::{QuoteError, Result};

/// Default upper bound for generated ids.
pub const DEFAULT_MAX_ID: QuoteId = 100_000;

/// Random draws attempted before falling back to a scan for a free id.
const MAX_DRAW_ATTEMPTS: usize = 16;

/// In-memory owner of the live quote collection.
///
/// Records are kept in insertion order. Removal closes the gap, so later
/// records shift down by one; list order is never a stable sort key.
/// The store does no locking of its own; callers serialize access.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    rng: StdRng,
    max_id: QuoteId,
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteStore {
    /// Create an empty store drawing ids from `1..=DEFAULT_MAX_ID`.
    pub fn new() -> Self {
        Self::with_max_id(DEFAULT_MAX_ID)
    }

    /// Create an empty store drawing ids from `1..=max_id`.
    ///
    /// A `max_id` below 1 is clamped to 1.
    pub fn with_max_id(max_id: QuoteId) -> Self {
        Self {
            quotes: Vec::new(),
            rng: StdRng::from_entropy(),
            max_id: max_id.max(1),
        }
    }

    /// Replace the id generator with a deterministically seeded one.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn max_id(&self) -> QuoteId {
        self.max_id
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn contains(&self, id: QuoteId) -> bool {
        self.position(id).is_some()
    }

    /// Get the first record with a matching id.
    pub fn get(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// All records in current order.
    pub fn list(&self) -> &[Quote] {
        &self.quotes
    }

    /// Store a new quote under a fresh id, stamped with the current time.
    pub fn insert(&mut self, draft: QuoteDraft) -> Result<Quote> {
        let id = self.next_id()?;
        let quote = Quote::new(id, draft);
        debug!(id, "inserted quote");
        self.quotes.push(quote.clone());
        Ok(quote)
    }

    /// Append a fully formed record, keeping its id and timestamp.
    ///
    /// Returns `false` and stores nothing if the id is already live or
    /// below 1 (0 is the id of the empty record).
    pub fn insert_record(&mut self, quote: Quote) -> bool {
        if quote.id < 1 || self.contains(quote.id) {
            return false;
        }
        self.quotes.push(quote);
        true
    }

    /// Overwrite the supplied fields on the matching record.
    pub fn apply_update(&mut self, id: QuoteId, update: QuoteUpdate) -> Option<Quote> {
        let index = self.position(id)?;
        let quote = &mut self.quotes[index];
        update.apply_to(quote);
        debug!(id, "updated quote");
        Some(quote.clone())
    }

    /// Remove the first matching record, compacting the collection.
    pub fn remove(&mut self, id: QuoteId) -> Option<Quote> {
        let index = self.position(id)?;
        debug!(id, index, "removed quote");
        Some(self.quotes.remove(index))
    }

    /// Draw an id not currently live.
    pub fn next_id(&mut self) -> Result<QuoteId> {
        for _ in 0..MAX_DRAW_ATTEMPTS {
            let candidate = self.rng.gen_range(1..=self.max_id);
            if !self.contains(candidate) {
                return Ok(candidate);
            }
        }

        debug!(max_id = self.max_id, "random id draws collided, scanning");
        let live: HashSet<QuoteId> = self.quotes.iter().map(|q| q.id).collect();
        (1..=self.max_id)
            .find(|id| !live.contains(id))
            .ok_or(QuoteError::IdSpaceExhausted {
                max_id: self.max_id,
            })
    }

    fn position(&self, id: QuoteId) -> Option<usize> {
        self.quotes.iter().position(|q| q.id == id)
    }
}
