//! `partcart diagram` commands.

use crate::cart::actions::ActionOutcome;
use crate::cart::{self, CartStore};
use crate::cli::{DiagramArgs, DiagramCommand};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::hotspot::HotspotMapper;
use crate::model::NaturalSize;
use crate::view::cart_panel::render_cart;
use crate::view::{render_diagram, DiagramStatus, DiagramView};

/// Execute a `diagram` subcommand.
///
/// # Errors
///
/// Returns an error string if the diagram data is unavailable, the diagram
/// does not exist, or the pick does not hit a hotspot.
pub fn run(ctx: &ServiceContext, config: &Config, command: &DiagramCommand) -> Result<(), String> {
    match command {
        DiagramCommand::Show(args) => {
            let view = open_view(ctx, config, args)?;
            print!("{}", render_diagram(&view));
            Ok(())
        }
        DiagramCommand::Click { target, assembly, at } => {
            let view = open_view(ctx, config, target)?;
            let mut store = CartStore::open(ctx);
            store.subscribe(|lines| {
                let panel = render_cart(lines, cart::total_item_count(lines));
                print!("{panel}");
            });

            let outcome = match (assembly, at) {
                (Some(id), _) => view.select(&mut store, id),
                (None, Some(point)) => view.click_at(&mut store, *point),
                (None, None) => return Err("Pass --assembly or --at".to_string()),
            }
            .map_err(|e| e.to_string())?;

            let verb = match outcome {
                ActionOutcome::Added => "Added to cart",
                _ => "Reset to qty 1",
            };
            println!("{verb}.");
            Ok(())
        }
    }
}

/// Loads the diagram page and resolves its image size.
fn open_view<'a>(
    ctx: &'a ServiceContext,
    config: &Config,
    args: &DiagramArgs,
) -> Result<DiagramView<'a>, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let mapper = HotspotMapper::new(config.display, args.mode.into());
    let mut view = DiagramView::new(ctx, mapper);
    let _ticket = view.navigate(&args.vehicle_id, &args.diagram_id);

    runtime.block_on(async {
        view.load().await;
        if let Some(width) = args.natural_width {
            view.on_image_load(NaturalSize::new(width, args.natural_height.unwrap_or(0)));
        } else {
            view.probe_image().await;
        }
    });

    if matches!(view.status(), DiagramStatus::Ready(_)) {
        Ok(view)
    } else {
        Err(render_diagram(&view))
    }
}
