//! Hotspot coordinate mapping.
//!
//! Converts hotspot rectangles from a diagram image's native pixel space
//! into display-space overlays. The image is rendered at a fixed display
//! width and scaled uniformly, so one scale factor serves both axes.
//!
//! Two overlay shapes are supported:
//!
//! - [`MapMode::Region`]: a padded rectangle anchored at its top-left corner,
//!   shifted by the container's layout offset;
//! - [`MapMode::Marker`]: a fixed-size dot centred on the hotspot centroid.

mod geometry;

pub use geometry::Rect;

use serde::Deserialize;

use crate::model::{Assembly, Hotspot, NaturalSize, Point};

/// Rendering constants shared by geometry computation and the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Width the diagram image is rendered at.
    pub display_width: f64,
    /// Extra space around region overlays.
    pub padding: f64,
    /// Container padding added to region overlay placement on both axes.
    pub layout_offset: f64,
    /// Diameter of marker dots.
    pub marker_size: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            display_width: 600.0,
            padding: 4.0,
            layout_offset: 16.0,
            marker_size: 16.0,
        }
    }
}

/// Overlay shape to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MapMode {
    /// Padded rectangle over the hotspot.
    #[default]
    Region,
    /// Centroid dot.
    Marker,
}

/// An assembly's overlay in display space.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedHotspot {
    /// Assembly the overlay selects.
    pub assembly_id: String,
    /// Tooltip text.
    pub description: Option<String>,
    /// Shape the overlay was mapped with.
    pub mode: MapMode,
    /// Placement in display pixels, top-left anchored. For markers this is
    /// the square enclosing the dot.
    pub bounds: Rect,
}

impl MappedHotspot {
    /// Returns `true` if a display-space point falls on this overlay.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self.mode {
            MapMode::Region => self.bounds.contains(point),
            MapMode::Marker => {
                let center = self.bounds.center();
                let radius = self.bounds.width / 2.0;
                let (dx, dy) = (point.x - center.x, point.y - center.y);
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}

/// Ratio between the display width and the image's natural width.
///
/// Falls back to `1.0` while the natural width is unknown (zero), which
/// yields unscaled but well-formed geometry.
#[must_use]
pub fn scale_factor(display_width: f64, natural_width: u32) -> f64 {
    if natural_width > 0 {
        display_width / f64::from(natural_width)
    } else {
        1.0
    }
}

/// Maps hotspots to display-space overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HotspotMapper {
    config: MapperConfig,
    mode: MapMode,
}

impl HotspotMapper {
    /// Creates a mapper with the given constants and overlay shape.
    #[must_use]
    pub const fn new(config: MapperConfig, mode: MapMode) -> Self {
        Self { config, mode }
    }

    /// Overlay shape in use.
    #[must_use]
    pub const fn mode(&self) -> MapMode {
        self.mode
    }

    /// Scale factor for an image of the given natural size.
    #[must_use]
    pub fn scale(&self, natural: NaturalSize) -> f64 {
        scale_factor(self.config.display_width, natural.width)
    }

    /// Padded region rectangle before the layout offset is applied.
    #[must_use]
    pub fn region_rect(&self, hotspot: &Hotspot, scale: f64) -> Rect {
        let p = self.config.padding;
        let (tl, br) = (hotspot.top_left, hotspot.bottom_right);
        Rect {
            left: tl.x * scale - p,
            top: tl.y * scale - p / 2.0,
            width: (br.x - tl.x) * scale + 3.0 * p,
            height: (br.y - tl.y) * scale + 2.0 * p,
        }
    }

    /// Centroid of a hotspot in display space.
    #[must_use]
    pub fn marker_center(hotspot: &Hotspot, scale: f64) -> Point {
        let (tl, br) = (hotspot.top_left, hotspot.bottom_right);
        Point::new((tl.x + br.x) / 2.0 * scale, (tl.y + br.y) / 2.0 * scale)
    }

    /// Final overlay placement for one hotspot.
    #[must_use]
    pub fn place(&self, hotspot: &Hotspot, scale: f64) -> Rect {
        match self.mode {
            MapMode::Region => {
                let rect = self.region_rect(hotspot, scale);
                rect.offset(self.config.layout_offset)
            }
            MapMode::Marker => {
                let center = Self::marker_center(hotspot, scale);
                Rect::centered(center, self.config.marker_size)
            }
        }
    }

    /// Maps every assembly whose hotspot lies on `diagram_id`.
    ///
    /// Assemblies on other diagrams, or without a hotspot, are left out.
    /// Output order follows the input order.
    pub fn map<'a, I>(
        &self,
        diagram_id: &str,
        assemblies: I,
        natural: NaturalSize,
    ) -> Vec<MappedHotspot>
    where
        I: IntoIterator<Item = &'a Assembly>,
    {
        let scale = self.scale(natural);
        assemblies
            .into_iter()
            .filter_map(|assembly| {
                let hotspot = assembly.hotspot.as_ref()?;
                if hotspot.diagram_id != diagram_id {
                    return None;
                }
                Some(MappedHotspot {
                    assembly_id: assembly.id.clone(),
                    description: assembly.description.clone(),
                    mode: self.mode,
                    bounds: self.place(hotspot, scale),
                })
            })
            .collect()
    }
}

/// Finds the overlay under a display-space point.
///
/// Overlays later in the slice are drawn on top, so the last match wins.
#[must_use]
pub fn hit_test(mapped: &[MappedHotspot], point: Point) -> Option<&MappedHotspot> {
    mapped.iter().rev().find(|hotspot| hotspot.contains(point))
}
