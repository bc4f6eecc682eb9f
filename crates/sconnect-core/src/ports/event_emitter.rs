//! Event emitter trait for cross-crate event broadcasting.
//!
//! Implementations handle transport details (channels, SSE, UI bridges);
//! the core only hands them committed [`OrderEvent`]s.

use crate::events::OrderEvent;

/// Trait for emitting order lifecycle events.
///
/// Keeps event plumbing out of the public API surface: services emit after
/// a state change commits, and adapters decide what to do with it.
pub trait OrderEventEmitter: Send + Sync {
    /// Emit an event. Must not block; implementations buffer or drop.
    fn emit(&self, event: OrderEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn OrderEventEmitter>;
}

/// A no-op event emitter for tests and embeddings without a listener.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OrderEventEmitter for NoopEmitter {
    fn emit(&self, _event: OrderEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn OrderEventEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn noop_emitter_discards_events() {
        let emitter: Arc<dyn OrderEventEmitter> = Arc::new(NoopEmitter::new());
        emitter.emit(OrderEvent::OrderCreated {
            order_id: "abc".to_string(),
            customer_id: 1,
        });
        let _boxed: Box<dyn OrderEventEmitter> = emitter.clone_box();
    }
}
