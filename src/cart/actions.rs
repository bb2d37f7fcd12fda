//! Caller-level quantity policy built on the `CartStore` primitives.
//!
//! A stored line always has a quantity of at least one: decrementing the
//! last unit removes the line instead.

use super::CartStore;
use crate::model::{Assembly, CartLine};

/// What a cart action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A new line was appended.
    Added,
    /// An existing line was replaced; carries the new quantity.
    Updated(u32),
    /// The line was dropped.
    Removed,
    /// No line with that id exists; nothing changed.
    Missing,
}

/// Adds one unit of an existing line.
pub fn increase(store: &mut CartStore<'_>, id: &str) -> ActionOutcome {
    let Some(line) = store.get(id) else {
        return ActionOutcome::Missing;
    };
    let quantity = line.quantity.saturating_add(1);
    let updated = line.with_quantity(quantity);
    store.upsert(updated);
    ActionOutcome::Updated(quantity)
}

/// Removes one unit, dropping the line when it reaches zero.
pub fn decrease(store: &mut CartStore<'_>, id: &str) -> ActionOutcome {
    let Some(line) = store.get(id) else {
        return ActionOutcome::Missing;
    };
    if line.quantity > 1 {
        let quantity = line.quantity - 1;
        let updated = line.with_quantity(quantity);
        store.upsert(updated);
        ActionOutcome::Updated(quantity)
    } else {
        store.remove(id);
        ActionOutcome::Removed
    }
}

/// Selects an assembly from a diagram hotspot.
///
/// Always stores a quantity of one: picking an assembly that is already in
/// the cart resets its quantity rather than adding to it.
pub fn add_from_hotspot(store: &mut CartStore<'_>, assembly: &Assembly) -> ActionOutcome {
    let outcome = if store.get(&assembly.id).is_some() {
        ActionOutcome::Updated(1)
    } else {
        ActionOutcome::Added
    };
    let description = assembly.description.clone();
    store.upsert(CartLine::new(assembly.id.clone(), description, 1));
    outcome
}

/// Removes a line outright.
pub fn remove(store: &mut CartStore<'_>, id: &str) -> ActionOutcome {
    if store.get(id).is_none() {
        return ActionOutcome::Missing;
    }
    store.remove(id);
    ActionOutcome::Removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ServiceContext;

    fn line(id: &str, quantity: u32) -> CartLine {
        CartLine::new(id, None, quantity)
    }

    fn assembly(id: &str) -> Assembly {
        Assembly {
            id: id.into(),
            description: Some("Brake caliper".into()),
            quantity: Some(4),
            hotspot: None,
        }
    }

    #[test]
    fn increase_adds_one() {
        let ctx = ServiceContext::in_memory();
        let mut store = CartStore::new(&ctx);
        store.upsert(line("A", 1));
        assert_eq!(increase(&mut store, "A"), ActionOutcome::Updated(2));
        assert_eq!(store.snapshot(), &[line("A", 2)]);
    }

    #[test]
    fn decrease_from_one_removes_line() {
        let ctx = ServiceContext::in_memory();
        let mut store = CartStore::new(&ctx);
        store.upsert(line("A", 1));
        assert_eq!(decrease(&mut store, "A"), ActionOutcome::Removed);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn decrease_above_one_keeps_position() {
        let ctx = ServiceContext::in_memory();
        let mut store = CartStore::new(&ctx);
        store.upsert(line("A", 3));
        store.upsert(line("B", 1));
        assert_eq!(decrease(&mut store, "A"), ActionOutcome::Updated(2));
        assert_eq!(store.snapshot(), &[line("A", 2), line("B", 1)]);
    }

    #[test]
    fn actions_on_missing_ids_change_nothing() {
        let ctx = ServiceContext::in_memory();
        let mut store = CartStore::new(&ctx);
        assert_eq!(increase(&mut store, "nope"), ActionOutcome::Missing);
        assert_eq!(decrease(&mut store, "nope"), ActionOutcome::Missing);
        assert_eq!(remove(&mut store, "nope"), ActionOutcome::Missing);
        assert!(ctx.storage.get("cart").unwrap().is_none());
    }

    #[test]
    fn hotspot_pick_adds_single_unit() {
        let ctx = ServiceContext::in_memory();
        let mut store = CartStore::new(&ctx);
        let outcome = add_from_hotspot(&mut store, &assembly("A"));
        assert_eq!(outcome, ActionOutcome::Added);
        let expected = CartLine::new("A", Some("Brake caliper".into()), 1);
        assert_eq!(store.snapshot(), &[expected]);
    }

    #[test]
    fn repeat_hotspot_pick_resets_quantity() {
        let ctx = ServiceContext::in_memory();
        let mut store = CartStore::new(&ctx);
        add_from_hotspot(&mut store, &assembly("A"));
        increase(&mut store, "A");
        increase(&mut store, "A");
        assert_eq!(store.get("A").unwrap().quantity, 3);

        let outcome = add_from_hotspot(&mut store, &assembly("A"));
        assert_eq!(outcome, ActionOutcome::Updated(1));
        assert_eq!(store.get("A").unwrap().quantity, 1);
        assert_eq!(store.snapshot().len(), 1);
    }
}
