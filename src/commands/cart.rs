//! `partcart cart` commands.

use crate::cart::actions::{self, ActionOutcome};
use crate::cart::CartStore;
use crate::cli::CartCommand;
use crate::context::ServiceContext;
use crate::model::CartLine;
use crate::view::cart_panel::render_cart;

/// Execute a `cart` subcommand and print the resulting cart.
///
/// # Errors
///
/// Returns an error string when the command targets a part that is not in
/// the cart.
pub fn run(ctx: &ServiceContext, command: &CartCommand) -> Result<(), String> {
    let mut store = CartStore::open(ctx);

    match command {
        CartCommand::Show => {}
        CartCommand::Add { id, description, quantity } => {
            let existed = store.get(id).is_some();
            store.upsert(CartLine::new(id.clone(), description.clone(), *quantity));
            let verb = if existed { "Updated" } else { "Added" };
            println!("{verb} {id} (qty {quantity}).");
        }
        CartCommand::Inc { id } => report(id, actions::increase(&mut store, id))?,
        CartCommand::Dec { id } => report(id, actions::decrease(&mut store, id))?,
        CartCommand::Remove { id } => report(id, actions::remove(&mut store, id))?,
        CartCommand::Clear => {
            store.clear();
            println!("Cart cleared.");
        }
    }

    let panel = render_cart(store.snapshot(), store.total_item_count());
    print!("{panel}");
    Ok(())
}

fn report(id: &str, outcome: ActionOutcome) -> Result<(), String> {
    match outcome {
        ActionOutcome::Added => println!("Added {id}."),
        ActionOutcome::Updated(quantity) => println!("{id} now has qty {quantity}."),
        ActionOutcome::Removed => println!("Removed {id}."),
        ActionOutcome::Missing => return Err(format!("Part {id} is not in the cart")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_dec_empties_cart() {
        let ctx = ServiceContext::in_memory();
        let add = CartCommand::Add {
            id: "A".into(),
            description: None,
            quantity: 1,
        };
        run(&ctx, &add).unwrap();
        run(&ctx, &CartCommand::Dec { id: "A".into() }).unwrap();

        let store = CartStore::open(&ctx);
        assert!(store.is_empty());
    }

    #[test]
    fn inc_on_missing_part_fails() {
        let ctx = ServiceContext::in_memory();
        let err = run(&ctx, &CartCommand::Inc { id: "ghost".into() }).unwrap_err();
        assert!(err.contains("ghost"));
    }

    #[test]
    fn changes_persist_between_runs() {
        let ctx = ServiceContext::in_memory();
        let add = CartCommand::Add {
            id: "A".into(),
            description: Some("Hub".into()),
            quantity: 2,
        };
        run(&ctx, &add).unwrap();
        run(&ctx, &CartCommand::Inc { id: "A".into() }).unwrap();
        run(&ctx, &CartCommand::Show).unwrap();

        let store = CartStore::open(&ctx);
        let expected = CartLine::new("A", Some("Hub".into()), 3);
        assert_eq!(store.snapshot(), &[expected]);
    }
}
