//! CLI argument definitions.

use clap::{value_parser, ArgAction, ArgGroup, Args, Parser, Subcommand, ValueEnum};

use crate::hotspot::MapMode;
use crate::model::Point;

/// Top-level CLI parser for `partcart`.
#[derive(Debug, Parser)]
#[command(
    name = "partcart",
    version,
    about = "Pick parts from vehicle diagrams into a cart"
)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or edit the cart.
    #[command(subcommand)]
    Cart(CartCommand),
    /// Inspect a vehicle diagram and pick its hotspots.
    #[command(subcommand)]
    Diagram(DiagramCommand),
}

/// `partcart cart ...`
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Print the cart.
    Show,
    /// Add a part, or replace the quantity of one already in the cart.
    Add {
        /// Assembly id.
        id: String,
        /// Label shown in the cart.
        #[arg(long)]
        description: Option<String>,
        /// Quantity to store.
        #[arg(short = 'q', long, default_value_t = 1)]
        #[arg(value_parser = value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Add one unit of a part already in the cart.
    Inc {
        /// Assembly id.
        id: String,
    },
    /// Remove one unit; the part is dropped when its last unit goes.
    Dec {
        /// Assembly id.
        id: String,
    },
    /// Drop a part from the cart.
    Remove {
        /// Assembly id.
        id: String,
    },
    /// Empty the cart.
    Clear,
}

/// `partcart diagram ...`
#[derive(Debug, Subcommand)]
pub enum DiagramCommand {
    /// Load a diagram and list its hotspots in display coordinates.
    Show(DiagramArgs),
    /// Pick a hotspot and add its assembly to the cart.
    #[command(group(ArgGroup::new("pick").required(true)))]
    Click {
        /// Which diagram to load.
        #[command(flatten)]
        target: DiagramArgs,
        /// Pick the hotspot of this assembly.
        #[arg(long, group = "pick")]
        assembly: Option<String>,
        /// Pick whatever hotspot lies under this display point, as `X,Y`.
        #[arg(long, group = "pick", value_parser = parse_point)]
        at: Option<Point>,
    },
}

/// Vehicle, diagram and rendering options shared by diagram commands.
#[derive(Debug, Args)]
pub struct DiagramArgs {
    /// OEM vehicle id sent to the assemblies search.
    pub vehicle_id: String,
    /// Diagram id within the vehicle's diagrams.
    pub diagram_id: String,
    /// Overlay shape.
    #[arg(long, value_enum, default_value_t = ModeArg::Region)]
    pub mode: ModeArg,
    /// Use this natural image width instead of downloading the image.
    #[arg(long)]
    pub natural_width: Option<u32>,
    /// Natural image height, reported alongside `--natural-width`.
    #[arg(long, requires = "natural_width")]
    pub natural_height: Option<u32>,
}

/// Overlay shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Padded rectangles over each hotspot.
    Region,
    /// Dots at each hotspot's centre.
    Marker,
}

impl From<ModeArg> for MapMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Region => MapMode::Region,
            ModeArg::Marker => MapMode::Marker,
        }
    }
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let Some((x, y)) = raw.split_once(',') else {
        return Err(format!("expected X,Y but got `{raw}`"));
    };
    Ok(Point::new(parse_coordinate(x)?, parse_coordinate(y)?))
}

fn parse_coordinate(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) => Ok(value),
        Err(e) => Err(format!("invalid coordinate `{raw}`: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(line.split_whitespace())
    }

    #[test]
    fn parses_cart_add_with_quantity() {
        let cli = parse("partcart cart add A1 --description Strut -q 3").unwrap();
        match cli.command {
            Command::Cart(CartCommand::Add { id, description, quantity }) => {
                assert_eq!(id, "A1");
                assert_eq!(description.as_deref(), Some("Strut"));
                assert_eq!(quantity, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_quantity() {
        assert!(parse("partcart cart add A1 -q 0").is_err());
    }

    #[test]
    fn counts_verbosity_anywhere() {
        let cli = parse("partcart cart show -vv").unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parses_diagram_click_at_point() {
        let cli = parse("partcart diagram click VEH D1 --mode marker --at 12.5,40").unwrap();
        match cli.command {
            Command::Diagram(DiagramCommand::Click { target, assembly, at }) => {
                assert_eq!(target.vehicle_id, "VEH");
                assert_eq!(target.diagram_id, "D1");
                assert_eq!(target.mode, ModeArg::Marker);
                assert!(assembly.is_none());
                assert_eq!(at, Some(Point::new(12.5, 40.0)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn click_requires_exactly_one_pick() {
        assert!(parse("partcart diagram click VEH D1").is_err());
        let both = parse("partcart diagram click VEH D1 --assembly A1 --at 1,2");
        assert!(both.is_err());
        assert!(parse("partcart diagram click VEH D1 --assembly A1").is_ok());
    }

    #[test]
    fn natural_height_requires_width() {
        let height_only = parse("partcart diagram show VEH D1 --natural-height 800");
        assert!(height_only.is_err());
        let width_only = parse("partcart diagram show VEH D1 --natural-width 1200");
        assert!(width_only.is_ok());
    }

    #[test]
    fn point_parser_reports_bad_input() {
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
        assert_eq!(parse_point(" 1 , 2 ").unwrap(), Point::new(1.0, 2.0));
    }
}
