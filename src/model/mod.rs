//! Data types shared by the cart, the hotspot mapper and the catalog port.
//!
//! Cart lines are owned and mutated by `CartStore`. Diagrams and assemblies
//! are read-only snapshots deserialized from the assemblies search API.

mod assembly;
mod cart_line;
mod geometry;

pub use assembly::{Assembly, Diagram, DiagramRecord, Hotspot, SearchResponse};
pub use cart_line::CartLine;
pub use geometry::{NaturalSize, Point};
