// Farm building overrides
//
// Constructed farm buildings move between saves, so their interiors carry a
// per-save unique name and no authored calibration points. Their map pixels
// are derived instead by projecting each building's door tile inside the farm
// region. The resulting table is consulted before any catalog lookup.

use std::collections::HashMap;

use crate::projection::{MapPixel, MapProjector, PixelOverrides};

/// The outdoor region buildings are placed in
pub const FARM_LOCATION: &str = "Farm";

/// Barn sprites hang a little above their door tile on the map art
const BARN_MARKER_NUDGE: i32 = 3;

/// Shift from the greenhouse anchor to its sprite center
const GREENHOUSE_OFFSET_X: i32 = 6;
const GREENHOUSE_OFFSET_Y: i32 = 9;

/// One constructed building, as supplied by the host
#[derive(Debug, Clone)]
pub struct FarmBuilding {
    /// Per-save unique interior name (e.g. "Barn1187022"); this is the name
    /// entities inside the building report as their location
    pub unique_name: String,
    /// Shared building type ("Barn", "Coop", "Shed", ...)
    pub building_type: String,
    /// Door tile inside the farm region
    pub tile_x: i32,
    pub tile_y: i32,
}

/// A building entry in the override table
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingMarker {
    pub building_type: String,
    pub position: MapPixel,
}

/// Compute the per-save pixel override table from the farm's buildings.
///
/// Buildings with a missing interior name are skipped. The greenhouse has a
/// fixed calibration point and joins the table once unlocked.
pub fn building_overrides(
    buildings: &[FarmBuilding],
    greenhouse_unlocked: bool,
    projector: &MapProjector,
) -> HashMap<String, BuildingMarker> {
    let mut overrides = HashMap::new();
    let no_overrides = PixelOverrides::new();

    for building in buildings {
        // Some interiors report the literal string "null"
        if building.unique_name.is_empty() || building.unique_name == "null" {
            continue;
        }

        let mut position = projector.project(
            FARM_LOCATION,
            Some((building.tile_x, building.tile_y)),
            &no_overrides,
        );
        if building.building_type.contains("Barn") {
            position.y += BARN_MARKER_NUDGE;
        }

        overrides.insert(
            building.unique_name.clone(),
            BuildingMarker {
                building_type: building.building_type.clone(),
                position,
            },
        );
    }

    if greenhouse_unlocked {
        let mut position = projector.project("Greenhouse", None, &no_overrides);
        position.x -= GREENHOUSE_OFFSET_X;
        position.y -= GREENHOUSE_OFFSET_Y;
        overrides.insert(
            "Greenhouse".to_string(),
            BuildingMarker {
                building_type: "Greenhouse".to_string(),
                position,
            },
        );
    }

    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VectorCatalog;
    use crate::mines::MineRules;

    fn projector() -> MapProjector {
        let catalog = VectorCatalog::from_json_str(
            r#"{
                "Farm": [
                    { "map_x": 0, "map_y": 0, "tile_x": 0, "tile_y": 0 },
                    { "map_x": 100, "map_y": 100, "tile_x": 100, "tile_y": 100 }
                ],
                "Greenhouse": [ { "map_x": 393, "map_y": 268 } ]
            }"#,
        )
        .unwrap();
        MapProjector::new(catalog, MineRules::default())
    }

    fn building(unique_name: &str, building_type: &str, tile_x: i32, tile_y: i32) -> FarmBuilding {
        FarmBuilding {
            unique_name: unique_name.to_string(),
            building_type: building_type.to_string(),
            tile_x,
            tile_y,
        }
    }

    #[test]
    fn test_building_projects_through_farm_region() {
        let overrides = building_overrides(
            &[building("Coop42", "Coop", 30, 40)],
            false,
            &projector(),
        );
        assert_eq!(overrides["Coop42"].position, MapPixel::new(30, 40));
        assert_eq!(overrides["Coop42"].building_type, "Coop");
    }

    #[test]
    fn test_barn_marker_is_nudged_down() {
        let overrides = building_overrides(
            &[
                building("Barn7", "Deluxe Barn", 30, 40),
                building("Coop8", "Coop", 30, 40),
            ],
            false,
            &projector(),
        );
        assert_eq!(overrides["Barn7"].position, MapPixel::new(30, 43));
        assert_eq!(overrides["Coop8"].position, MapPixel::new(30, 40));
    }

    #[test]
    fn test_nameless_interiors_are_skipped() {
        let overrides = building_overrides(
            &[building("", "Shed", 1, 1), building("null", "Shed", 2, 2)],
            false,
            &projector(),
        );
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_greenhouse_joins_once_unlocked() {
        let locked = building_overrides(&[], false, &projector());
        assert!(!locked.contains_key("Greenhouse"));

        let unlocked = building_overrides(&[], true, &projector());
        assert_eq!(
            unlocked["Greenhouse"].position,
            MapPixel::new(393 - 6, 268 - 9)
        );
    }
}
