// Map projection - in-world tile coordinates to overview-map pixels
//
// A query tile is bracketed by the two nearest calibration vectors that bound
// it from below and from above, then interpolated per axis between them. The
// map art is only locally affine, so this is an approximation anchored at the
// hand-authored vectors; at a vector's own tile the result is exact.

use std::collections::HashMap;

use crate::catalog::{MapVector, VectorCatalog};
use crate::mines::MineRules;

// =============================================================================
// DATA STRUCTURES
// =============================================================================

/// A pixel position on the overview map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPixel {
    pub x: i32,
    pub y: i32,
}

impl MapPixel {
    /// Sentinel far outside the canvas; callers skip drawing anything here
    pub const OFF_MAP: MapPixel = MapPixel { x: -1000, y: -1000 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this is the "unknown location" sentinel
    pub fn is_off_map(&self) -> bool {
        *self == Self::OFF_MAP
    }
}

/// Pixel overrides consulted before any tile math (e.g. movable farm buildings)
pub type PixelOverrides = HashMap<String, MapPixel>;

/// A projection result with the bracket vectors used, for diagnostic display
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub pixel: MapPixel,
    /// Bracket at or below the query tile (interpolated queries only)
    pub lower: Option<MapVector>,
    /// Bracket at or above the query tile (interpolated queries only)
    pub upper: Option<MapVector>,
}

impl Projection {
    fn direct(pixel: MapPixel) -> Self {
        Self {
            pixel,
            lower: None,
            upper: None,
        }
    }
}

// =============================================================================
// MAP PROJECTOR
// =============================================================================

/// Projects (location, tile) queries onto the overview map
#[derive(Debug, Clone)]
pub struct MapProjector {
    catalog: VectorCatalog,
    mines: MineRules,
}

impl MapProjector {
    pub fn new(catalog: VectorCatalog, mines: MineRules) -> Self {
        Self { catalog, mines }
    }

    /// Projector over the built-in catalog with default mine rules
    pub fn builtin() -> Self {
        Self::new(VectorCatalog::builtin(), MineRules::default())
    }

    pub fn catalog(&self) -> &VectorCatalog {
        &self.catalog
    }

    pub fn mines(&self) -> &MineRules {
        &self.mines
    }

    /// Whether a location resolves to calibration data or an override
    pub fn knows(&self, location_name: &str, overrides: &PixelOverrides) -> bool {
        overrides.contains_key(location_name)
            || self.catalog.contains(self.mines.canonicalize(location_name))
    }

    /// Project a location/tile query to a map pixel.
    ///
    /// Unknown locations yield [`MapPixel::OFF_MAP`]; a missing tile or a
    /// single-vector location yields that location's fixed point.
    pub fn project(
        &self,
        location_name: &str,
        tile: Option<(i32, i32)>,
        overrides: &PixelOverrides,
    ) -> MapPixel {
        self.project_detailed(location_name, tile, overrides).pixel
    }

    /// Like [`project`](Self::project), but also reports the brackets used
    pub fn project_detailed(
        &self,
        location_name: &str,
        tile: Option<(i32, i32)>,
        overrides: &PixelOverrides,
    ) -> Projection {
        // Movable structures carry their own pixel position, no tile math
        if let Some(&pixel) = overrides.get(location_name) {
            return Projection::direct(pixel);
        }

        let name = self.mines.canonicalize(location_name);

        let vectors = match self.catalog.get(name) {
            Some(v) => v,
            None => return Projection::direct(MapPixel::OFF_MAP),
        };

        // Fixed locations and tile-less queries short-circuit interpolation
        let (tile_x, tile_y) = match tile {
            Some(t) if vectors.len() > 1 => t,
            _ => {
                let v = vectors[0];
                return Projection::direct(MapPixel::new(v.map_x, v.map_y));
            }
        };

        let (lower, upper) = select_brackets(vectors, tile_x, tile_y);
        let pixel = MapPixel::new(
            interpolate_axis(tile_x, lower.tile_x, upper.tile_x, lower.map_x, upper.map_x),
            interpolate_axis(tile_y, lower.tile_y, upper.tile_y, lower.map_y, upper.map_y),
        );

        Projection {
            pixel,
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

// =============================================================================
// BRACKET SELECTION
// =============================================================================

/// Pick the lower/upper bracket pair for a query tile.
///
/// Vectors are scanned nearest-first (stable, so catalog order breaks ties).
/// Once both brackets are set the scan continues only while they share a tile
/// axis, looking for a replacement that opens a proper rectangle. A missing
/// bracket falls back to the nearest vector overall, skipping the other pick
/// when it already claimed that spot.
fn select_brackets(vectors: &[MapVector], tile_x: i32, tile_y: i32) -> (MapVector, MapVector) {
    let mut sorted: Vec<MapVector> = vectors.to_vec();
    sorted.sort_by(|a, b| {
        tile_distance_sq(a, tile_x, tile_y).total_cmp(&tile_distance_sq(b, tile_x, tile_y))
    });

    let mut lower: Option<usize> = None;
    let mut upper: Option<usize> = None;
    let mut shared_axis = false;

    for (i, vector) in sorted.iter().enumerate() {
        if let (Some(l), Some(u)) = (lower, upper) {
            if sorted[l].tile_x == sorted[u].tile_x || sorted[l].tile_y == sorted[u].tile_y {
                shared_axis = true;
            } else {
                break;
            }
        }

        if (lower.is_none() || shared_axis) && tile_x >= vector.tile_x && tile_y >= vector.tile_y {
            lower = Some(i);
            continue;
        }

        if (upper.is_none() || shared_axis) && tile_x <= vector.tile_x && tile_y <= vector.tile_y {
            upper = Some(i);
        }
    }

    // Not enough bounding vectors; fall back to the nearest distinct pair
    let lower = match lower {
        Some(i) => i,
        None => {
            if upper == Some(0) {
                1
            } else {
                0
            }
        }
    };
    let upper = match upper {
        Some(i) => i,
        None => {
            if lower == 0 {
                1
            } else {
                0
            }
        }
    };

    (sorted[lower], sorted[upper])
}

fn tile_distance_sq(vector: &MapVector, tile_x: i32, tile_y: i32) -> f64 {
    let dx = (vector.tile_x - tile_x) as f64;
    let dy = (vector.tile_y - tile_y) as f64;
    dx * dx + dy * dy
}

/// Linear interpolation on one axis between the bracket vectors.
///
/// A zero-width axis holds the lower bound's pixel instead of dividing.
fn interpolate_axis(query: i32, lower_tile: i32, upper_tile: i32, lower_map: i32, upper_map: i32) -> i32 {
    let span = upper_tile - lower_tile;
    if span == 0 {
        return lower_map;
    }
    let t = (query - lower_tile) as f64 / span as f64;
    (lower_map as f64 + t * (upper_map - lower_map) as f64) as i32
}
