// Reference point catalog - tile-to-pixel calibration data
//
// Every projectable location carries an ordered list of map vectors, each
// binding one in-world tile to one pixel on the overview map. Large outdoor
// regions have several vectors, fixed rooms have exactly one. The table is
// layered: a compiled-in base table, optionally replaced by a JSON file and
// extended by a second JSON file of custom entries. Merging happens once at
// build time; the resulting catalog is read-only.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// =============================================================================
// DATA STRUCTURES
// =============================================================================

/// A calibration point binding one in-world tile to one map pixel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapVector {
    /// Pixel X on the overview map
    pub map_x: i32,
    /// Pixel Y on the overview map
    pub map_y: i32,
    /// Tile X inside the location (0 for fixed single-point locations)
    #[serde(default)]
    pub tile_x: i32,
    /// Tile Y inside the location (0 for fixed single-point locations)
    #[serde(default)]
    pub tile_y: i32,
}

impl MapVector {
    /// A vector anchored to a specific tile
    pub fn new(map_x: i32, map_y: i32, tile_x: i32, tile_y: i32) -> Self {
        Self {
            map_x,
            map_y,
            tile_x,
            tile_y,
        }
    }

    /// A fixed-position vector: every tile in the location projects here
    pub fn fixed(map_x: i32, map_y: i32) -> Self {
        Self::new(map_x, map_y, 0, 0)
    }
}

/// Error type for catalog loading
#[derive(Debug)]
pub enum CatalogError {
    /// Failed to read the catalog file
    ReadError(std::io::Error),
    /// Failed to parse the catalog file
    ParseError(serde_json::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::ReadError(e) => write!(f, "Failed to read catalog file: {}", e),
            CatalogError::ParseError(e) => write!(f, "Failed to parse catalog file: {}", e),
        }
    }
}

// =============================================================================
// BUILT-IN BASE TABLE
// =============================================================================

/// Base calibration table for the standard overview map.
///
/// Outdoor regions are anchored at their corners (and doorways where the art
/// distorts the tile grid); interiors get a single fixed point. Hosts with a
/// custom map replace this wholesale via `CatalogSettings::vectors_file`.
static BASE_VECTORS: Lazy<HashMap<String, Vec<MapVector>>> = Lazy::new(|| {
    let mut table = HashMap::new();

    // Outdoor regions
    table.insert(
        "Farm".to_string(),
        vec![
            MapVector::new(330, 237, 0, 0),
            MapVector::new(477, 345, 80, 65),
        ],
    );
    table.insert(
        "Town".to_string(),
        vec![
            MapVector::new(580, 238, 0, 0),
            MapVector::new(780, 251, 45, 2),
            MapVector::new(595, 420, 4, 109),
            MapVector::new(908, 430, 120, 110),
        ],
    );
    table.insert(
        "Forest".to_string(),
        vec![
            MapVector::new(250, 383, 0, 0),
            MapVector::new(554, 383, 120, 0),
            MapVector::new(250, 552, 0, 120),
            MapVector::new(554, 552, 120, 120),
        ],
    );
    table.insert(
        "Mountain".to_string(),
        vec![
            MapVector::new(718, 81, 0, 0),
            MapVector::new(968, 81, 135, 0),
            MapVector::new(718, 185, 0, 41),
            MapVector::new(968, 185, 135, 41),
        ],
    );
    table.insert(
        "Beach".to_string(),
        vec![
            MapVector::new(726, 541, 0, 0),
            MapVector::new(968, 541, 104, 0),
            MapVector::new(726, 648, 0, 50),
            MapVector::new(968, 648, 104, 50),
        ],
    );
    table.insert(
        "Desert".to_string(),
        vec![
            MapVector::new(22, 58, 0, 0),
            MapVector::new(200, 58, 50, 0),
            MapVector::new(22, 175, 0, 60),
            MapVector::new(200, 175, 50, 60),
        ],
    );
    table.insert(
        "BusStop".to_string(),
        vec![
            MapVector::new(508, 238, 0, 0),
            MapVector::new(570, 320, 35, 30),
        ],
    );
    table.insert(
        "Backwoods".to_string(),
        vec![
            MapVector::new(434, 92, 0, 0),
            MapVector::new(558, 210, 50, 40),
        ],
    );
    table.insert(
        "Railroad".to_string(),
        vec![
            MapVector::new(588, 10, 0, 0),
            MapVector::new(970, 78, 70, 62),
        ],
    );

    // Interiors and fixed points
    table.insert("Mine".to_string(), vec![MapVector::fixed(861, 59)]);
    table.insert("SkullCave".to_string(), vec![MapVector::fixed(68, 36)]);
    table.insert("Greenhouse".to_string(), vec![MapVector::fixed(393, 268)]);
    table.insert("FarmHouse".to_string(), vec![MapVector::fixed(470, 260)]);
    table.insert("FarmCave".to_string(), vec![MapVector::fixed(380, 244)]);
    table.insert("SeedShop".to_string(), vec![MapVector::fixed(696, 296)]);
    table.insert("Saloon".to_string(), vec![MapVector::fixed(714, 354)]);
    table.insert("Hospital".to_string(), vec![MapVector::fixed(677, 304)]);
    table.insert("Blacksmith".to_string(), vec![MapVector::fixed(852, 388)]);
    table.insert("ScienceHouse".to_string(), vec![MapVector::fixed(732, 148)]);
    table.insert("Tent".to_string(), vec![MapVector::fixed(784, 128)]);
    table.insert("CommunityCenter".to_string(), vec![MapVector::fixed(692, 204)]);
    table.insert("JoshHouse".to_string(), vec![MapVector::fixed(740, 320)]);
    table.insert("HaleyHouse".to_string(), vec![MapVector::fixed(652, 408)]);
    table.insert("SamHouse".to_string(), vec![MapVector::fixed(612, 396)]);
    table.insert("Trailer".to_string(), vec![MapVector::fixed(780, 360)]);
    table.insert("ManorHouse".to_string(), vec![MapVector::fixed(780, 417)]);
    table.insert("AnimalShop".to_string(), vec![MapVector::fixed(420, 392)]);
    table.insert("LeahHouse".to_string(), vec![MapVector::fixed(452, 436)]);
    table.insert("WizardHouse".to_string(), vec![MapVector::fixed(196, 352)]);
    table.insert("ElliottHouse".to_string(), vec![MapVector::fixed(826, 550)]);
    table.insert("FishShop".to_string(), vec![MapVector::fixed(844, 608)]);
    table.insert("Sewer".to_string(), vec![MapVector::fixed(380, 596)]);
    table.insert("SandyHouse".to_string(), vec![MapVector::fixed(40, 115)]);
    table.insert("Club".to_string(), vec![MapVector::fixed(60, 92)]);
    table.insert("WitchSwamp".to_string(), vec![MapVector::fixed(100, 460)]);

    table
});

// =============================================================================
// VECTOR CATALOG
// =============================================================================

/// Read-only lookup table: location name -> ordered calibration vectors
#[derive(Debug, Clone, Default)]
pub struct VectorCatalog {
    vectors: HashMap<String, Vec<MapVector>>,
}

impl VectorCatalog {
    /// An empty catalog (every lookup misses)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The compiled-in base table for the standard overview map
    pub fn builtin() -> Self {
        Self {
            vectors: BASE_VECTORS.clone(),
        }
    }

    /// Parse a catalog from a JSON object: `{ "Location": [ { "map_x": .. }, .. ] }`
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let vectors: HashMap<String, Vec<MapVector>> =
            serde_json::from_str(json).map_err(CatalogError::ParseError)?;
        Ok(Self { vectors })
    }

    /// Load a catalog from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(CatalogError::ReadError)?;
        Self::from_json_str(&contents)
    }

    /// Merge another catalog on top of this one.
    ///
    /// Entries replace whole per-location lists; the merged-in catalog wins
    /// for every location it names.
    pub fn merge(&mut self, other: VectorCatalog) {
        for (name, vectors) in other.vectors {
            self.vectors.insert(name, vectors);
        }
    }

    /// Calibration vectors for a location, if it is known
    pub fn get(&self, location_name: &str) -> Option<&[MapVector]> {
        self.vectors
            .get(location_name)
            .map(|v| v.as_slice())
            .filter(|v| !v.is_empty())
    }

    /// Whether the catalog has at least one vector for this location
    pub fn contains(&self, location_name: &str) -> bool {
        self.get(location_name).is_some()
    }

    /// Number of known locations
    pub fn location_count(&self) -> usize {
        self.vectors.len()
    }

    /// Total number of calibration vectors
    pub fn vector_count(&self) -> usize {
        self.vectors.values().map(|v| v.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_core_locations() {
        let catalog = VectorCatalog::builtin();
        assert!(catalog.contains("Farm"));
        assert!(catalog.contains("Town"));
        assert!(catalog.contains("Mine"));
        assert!(catalog.contains("SkullCave"));
        assert!(catalog.vector_count() > catalog.location_count());
    }

    #[test]
    fn test_fixed_vector_defaults_tiles_to_zero() {
        let catalog =
            VectorCatalog::from_json_str(r#"{ "Shed": [ { "map_x": 10, "map_y": 20 } ] }"#)
                .unwrap();
        let vectors = catalog.get("Shed").unwrap();
        assert_eq!(vectors[0], MapVector::fixed(10, 20));
    }

    #[test]
    fn test_merge_replaces_whole_entries() {
        let mut base = VectorCatalog::from_json_str(
            r#"{
                "Farm": [ { "map_x": 0, "map_y": 0 }, { "map_x": 9, "map_y": 9, "tile_x": 9, "tile_y": 9 } ],
                "Town": [ { "map_x": 5, "map_y": 5 } ]
            }"#,
        )
        .unwrap();
        let custom =
            VectorCatalog::from_json_str(r#"{ "Farm": [ { "map_x": 100, "map_y": 100 } ] }"#)
                .unwrap();

        base.merge(custom);

        assert_eq!(base.get("Farm").unwrap().len(), 1);
        assert_eq!(base.get("Farm").unwrap()[0], MapVector::fixed(100, 100));
        assert!(base.contains("Town"));
    }

    #[test]
    fn test_empty_vector_list_is_not_projectable() {
        let catalog = VectorCatalog::from_json_str(r#"{ "Void": [] }"#).unwrap();
        assert!(catalog.get("Void").is_none());
        assert!(!catalog.contains("Void"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(VectorCatalog::from_json_str("not json").is_err());
    }
}
