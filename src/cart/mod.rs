//! Persistent, ordered collection of cart lines.
//!
//! The store keeps the cart in memory and writes the whole collection, as a
//! JSON array, to a single key of the `KeyValueStore` port after every
//! mutation. Mutations are synchronous and never interleaved; observers
//! registered with [`CartStore::subscribe`] run right after each one.

pub mod actions;

use thiserror::Error;

use crate::context::ServiceContext;
use crate::model::CartLine;

/// Storage key the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Recoverable cart persistence failures.
#[derive(Debug, Error)]
pub enum CartError {
    /// Storage could not be read; the cart started empty.
    #[error("failed to read persisted cart: {0}")]
    Read(String),

    /// The persisted payload was not a cart; the cart started empty.
    #[error("persisted cart is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The cart could not be written; in-memory state is kept.
    #[error("failed to persist cart: {0}")]
    Write(String),
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<'a> = Box<dyn FnMut(&[CartLine]) + 'a>;

/// Persistence-backed cart.
///
/// All I/O goes through `ctx.storage` so that the store works with file,
/// in-memory and test adapters alike.
pub struct CartStore<'a> {
    ctx: &'a ServiceContext,
    key: String,
    lines: Vec<CartLine>,
    listeners: Vec<(ListenerId, Listener<'a>)>,
    next_listener: u64,
    last_persist_error: Option<CartError>,
}

impl<'a> CartStore<'a> {
    /// Creates an empty store persisting under [`DEFAULT_CART_KEY`].
    ///
    /// Call [`CartStore::initialize`] to pick up a previously saved cart.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self::with_key(ctx, DEFAULT_CART_KEY)
    }

    /// Creates an empty store persisting under a custom key.
    pub fn with_key(ctx: &'a ServiceContext, key: impl Into<String>) -> Self {
        Self {
            ctx,
            key: key.into(),
            lines: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
            last_persist_error: None,
        }
    }

    /// Creates a store and loads the persisted cart, logging any load failure.
    #[must_use]
    pub fn open(ctx: &'a ServiceContext) -> Self {
        let mut store = Self::new(ctx);
        if let Err(e) = store.initialize() {
            tracing::warn!("starting with an empty cart: {e}");
        }
        store
    }

    /// Replaces the current state with the persisted cart.
    ///
    /// A missing key yields an empty cart. On failure the cart is also left
    /// empty and the error is returned for the caller to report.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Read`] if storage cannot be read and
    /// [`CartError::Malformed`] if the payload does not parse. Lines with a
    /// repeated id or a zero quantity are dropped rather than rejected.
    pub fn initialize(&mut self) -> Result<(), CartError> {
        self.lines.clear();

        let stored = self.ctx.storage.get(&self.key);
        let stored = stored.map_err(|e| CartError::Read(e.to_string()))?;
        let Some(payload) = stored else {
            tracing::debug!(key = %self.key, "no persisted cart");
            return Ok(());
        };

        let lines: Vec<CartLine> = serde_json::from_str(&payload)?;
        self.lines = sanitize(lines);
        tracing::debug!(key = %self.key, lines = self.lines.len(), "loaded persisted cart");
        Ok(())
    }

    /// Inserts `line`, or replaces the line with the same id in place.
    pub fn upsert(&mut self, line: CartLine) {
        match self.position(&line.id) {
            Some(index) => self.lines[index] = line,
            None => self.lines.push(line),
        }
        self.commit();
    }

    /// Drops the line with the given id. Does nothing if it is absent.
    pub fn remove(&mut self, id: &str) {
        let Some(index) = self.position(id) else {
            return;
        };
        self.lines.remove(index);
        self.commit();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.commit();
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Returns `true` when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        total_item_count(&self.lines)
    }

    /// The most recent persist failure, cleared by the next successful write.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&CartError> {
        self.last_persist_error.as_ref()
    }

    /// Registers a callback run with the new snapshot after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[CartLine]) + 'a) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a previously registered callback. Returns `false` if unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    fn commit(&mut self) {
        self.persist();
        for (_, listener) in &mut self.listeners {
            listener(&self.lines);
        }
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.lines)
            .map_err(|e| CartError::Write(e.to_string()))
            .and_then(|payload| {
                let written = self.ctx.storage.set(&self.key, &payload);
                written.map_err(|e| CartError::Write(e.to_string()))
            });

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!(key = %self.key, "{e}; cart kept in memory only");
                self.last_persist_error = Some(e);
            }
        }
    }
}

/// Sum of the quantities of `lines`.
#[must_use]
pub fn total_item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// Keeps the first line for each id and drops zero quantities, so a
/// hand-edited payload cannot break the one-line-per-id rule or store an
/// empty line.
fn sanitize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut out: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            tracing::debug!(id = %line.id, "dropping zero-quantity persisted cart line");
            continue;
        }
        if out.iter().any(|existing| existing.id == line.id) {
            tracing::debug!(id = %line.id, "dropping duplicate persisted cart line");
            continue;
        }
        out.push(line);
    }
    out
}
