//! Diagram view: glue between the catalog, the hotspot mapper and the cart.
//!
//! The view owns the load lifecycle for one vehicle/diagram pair:
//!
//! ```text
//! navigate ──► Loading ──► Ready(response) ──► image probe ──► interactive
//!                    └───► Unavailable(message)
//! ```
//!
//! Every `navigate` or `begin_load` bumps a generation counter. A response
//! tagged with an older generation is dropped, so a slow request for a page
//! the user already left never overwrites the current one.

pub mod cart_panel;

use thiserror::Error;

use crate::cart::actions::{self, ActionOutcome};
use crate::cart::CartStore;
use crate::context::ServiceContext;
use crate::hotspot::{self, HotspotMapper, MapMode, MappedHotspot};
use crate::model::{Diagram, NaturalSize, Point, SearchResponse};
use crate::ports::PortError;

/// Where the diagram data stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Nothing has been requested yet.
    Idle,
    /// A search is in flight.
    Loading,
    /// The search succeeded.
    Ready(SearchResponse),
    /// The search failed; carries a user-facing message.
    Unavailable(String),
}

/// What the view should show for the selected diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramStatus<'v> {
    /// Still waiting for data.
    Loading,
    /// Data could not be loaded.
    Unavailable(&'v str),
    /// Data loaded but has no diagram with the selected id.
    NotFound,
    /// The diagram to render.
    Ready(Diagram),
}

/// Proof of which request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

/// Reasons a selection on the diagram did not reach the cart.
#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    /// Diagram data is not available.
    #[error("diagram is not loaded")]
    NotLoaded,

    /// The image has not loaded, so hotspot positions are not final yet.
    #[error("hotspots are not interactive until the diagram image has loaded")]
    NotInteractive,

    /// No hotspot lies under the given display point.
    #[error("no hotspot at ({}, {})", .0.x, .0.y)]
    NoHotspot(Point),

    /// The assembly does not exist or has no hotspot on this diagram.
    #[error("assembly `{0}` is not on this diagram")]
    NotOnDiagram(String),
}

/// State for one diagram page.
pub struct DiagramView<'a> {
    ctx: &'a ServiceContext,
    mapper: HotspotMapper,
    vehicle_id: String,
    diagram_id: String,
    generation: u64,
    state: LoadState,
    natural: NaturalSize,
}

impl<'a> DiagramView<'a> {
    /// Creates a view with no page selected.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, mapper: HotspotMapper) -> Self {
        Self {
            ctx,
            mapper,
            vehicle_id: String::new(),
            diagram_id: String::new(),
            generation: 0,
            state: LoadState::Idle,
            natural: NaturalSize::default(),
        }
    }

    /// Selects a vehicle/diagram pair and starts a fresh load.
    ///
    /// Any response still in flight for the previous page becomes stale.
    pub fn navigate(
        &mut self,
        vehicle_id: impl Into<String>,
        diagram_id: impl Into<String>,
    ) -> LoadTicket {
        self.vehicle_id = vehicle_id.into();
        self.diagram_id = diagram_id.into();
        self.natural = NaturalSize::default();
        self.begin_load()
    }

    /// Marks the view as loading and returns the ticket for the new request.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Applies a search result. Returns `false` if the ticket is stale and
    /// the result was discarded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SearchResponse, PortError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale diagram response"
            );
            return false;
        }

        self.state = match result {
            Ok(response) => {
                tracing::info!(
                    vehicle_id = %self.vehicle_id,
                    diagrams = response.diagrams.len(),
                    assemblies = response.assemblies.len(),
                    "diagram data loaded"
                );
                LoadState::Ready(response)
            }
            Err(e) => {
                tracing::warn!(vehicle_id = %self.vehicle_id, "diagram data unavailable: {e}");
                LoadState::Unavailable(e.to_string())
            }
        };
        true
    }

    /// Fetches diagram data for the current page through the catalog port.
    pub async fn load(&mut self) -> bool {
        let ticket = self.begin_load();
        let result = self.ctx.catalog.search(&self.vehicle_id).await;
        self.finish_load(ticket, result)
    }

    /// Records the image's natural size, making hotspots interactive.
    pub fn on_image_load(&mut self, natural: NaturalSize) {
        tracing::debug!(width = natural.width, height = natural.height, "diagram image loaded");
        self.natural = natural;
    }

    /// Discovers the natural size through the image probe port.
    ///
    /// On failure the size stays unknown and hotspots stay unscaled.
    pub async fn probe_image(&mut self) -> bool {
        let DiagramStatus::Ready(diagram) = self.status() else {
            return false;
        };
        let generation = self.generation;
        match self.ctx.images.natural_size(&diagram.url).await {
            Ok(natural) if generation == self.generation => {
                self.on_image_load(natural);
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(url = %diagram.url, "could not load diagram image: {e}");
                false
            }
        }
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Natural size of the diagram image, `0 x 0` until loaded.
    #[must_use]
    pub fn natural_size(&self) -> NaturalSize {
        self.natural
    }

    /// Selected diagram id.
    #[must_use]
    pub fn diagram_id(&self) -> &str {
        &self.diagram_id
    }

    /// Mapper in use.
    #[must_use]
    pub fn mapper(&self) -> &HotspotMapper {
        &self.mapper
    }

    /// Current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.mapper.scale(self.natural)
    }

    /// What to show for the selected diagram.
    #[must_use]
    pub fn status(&self) -> DiagramStatus<'_> {
        match &self.state {
            LoadState::Idle | LoadState::Loading => DiagramStatus::Loading,
            LoadState::Unavailable(message) => DiagramStatus::Unavailable(message),
            LoadState::Ready(response) => match response.diagram(&self.diagram_id) {
                Some(diagram) => DiagramStatus::Ready(diagram),
                None => DiagramStatus::NotFound,
            },
        }
    }

    /// Returns `true` once the image size is known.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.natural.is_loaded() && matches!(self.status(), DiagramStatus::Ready(_))
    }

    /// Overlays for every assembly on the selected diagram.
    #[must_use]
    pub fn hotspots(&self) -> Vec<MappedHotspot> {
        match &self.state {
            LoadState::Ready(response) if response.diagrams.contains_key(&self.diagram_id) => {
                let assemblies = response.assemblies.values();
                self.mapper.map(&self.diagram_id, assemblies, self.natural)
            }
            _ => Vec::new(),
        }
    }

    /// Adds the assembly under a display-space point to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectError`] when the diagram is not ready or nothing is
    /// under the point.
    pub fn click_at(
        &self,
        cart: &mut CartStore<'_>,
        point: Point,
    ) -> Result<ActionOutcome, SelectError> {
        self.ensure_interactive()?;
        let hotspots = self.hotspots();
        let Some(hit) = hotspot::hit_test(&hotspots, point) else {
            return Err(SelectError::NoHotspot(point));
        };
        self.select(cart, &hit.assembly_id)
    }

    /// Adds an assembly on the selected diagram to the cart by id.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectError`] when the diagram is not ready or the
    /// assembly has no hotspot on it.
    pub fn select(
        &self,
        cart: &mut CartStore<'_>,
        assembly_id: &str,
    ) -> Result<ActionOutcome, SelectError> {
        self.ensure_interactive()?;
        let LoadState::Ready(response) = &self.state else {
            return Err(SelectError::NotLoaded);
        };
        let assembly = response
            .assembly(assembly_id)
            .filter(|a| a.is_on_diagram(&self.diagram_id))
            .ok_or_else(|| SelectError::NotOnDiagram(assembly_id.to_string()))?;

        let outcome = actions::add_from_hotspot(cart, assembly);
        tracing::info!(assembly_id, ?outcome, "hotspot selected");
        Ok(outcome)
    }

    fn ensure_interactive(&self) -> Result<(), SelectError> {
        if !matches!(self.status(), DiagramStatus::Ready(_)) {
            return Err(SelectError::NotLoaded);
        }
        if !self.natural.is_loaded() {
            return Err(SelectError::NotInteractive);
        }
        Ok(())
    }
}

/// Renders the diagram header and its overlays as text.
#[must_use]
pub fn render_diagram(view: &DiagramView<'_>) -> String {
    let diagram = match view.status() {
        DiagramStatus::Loading => return "Loading diagram...".to_string(),
        DiagramStatus::Unavailable(message) => {
            return format!("Diagram data unavailable: {message}");
        }
        DiagramStatus::NotFound => return format!("Diagram {} not found.", view.diagram_id()),
        DiagramStatus::Ready(diagram) => diagram,
    };

    let name = if diagram.name.is_empty() {
        "Vehicle Diagram"
    } else {
        diagram.name.as_str()
    };
    let mode = match view.mapper().mode() {
        MapMode::Region => "region",
        MapMode::Marker => "marker",
    };
    let natural = view.natural_size();
    let mut out = format!("{name}\n{}\noverlay {mode}\n", diagram.url);
    if natural.is_loaded() {
        out.push_str(&format!(
            "image {}x{} px, scale {:.4}\n",
            natural.width,
            natural.height,
            view.scale()
        ));
    } else {
        out.push_str("image size unknown, hotspots unscaled and not selectable\n");
    }

    let hotspots = view.hotspots();
    if hotspots.is_empty() {
        out.push_str("No hotspots on this diagram.\n");
        return out;
    }

    let id_width = hotspots
        .iter()
        .map(|h| h.assembly_id.len())
        .max()
        .unwrap_or(2)
        .max(2);
    out.push_str(&format!(
        "{:<id_width$}  {:>8}  {:>8}  {:>8}  {:>8}  DESCRIPTION\n",
        "ID", "LEFT", "TOP", "WIDTH", "HEIGHT"
    ));
    for h in &hotspots {
        let b = h.bounds;
        out.push_str(&format!(
            "{:<id_width$}  {:>8.1}  {:>8.1}  {:>8.1}  {:>8.1}  {}\n",
            h.assembly_id,
            b.left,
            b.top,
            b.width,
            b.height,
            h.description.as_deref().unwrap_or("")
        ));
    }
    out
}
