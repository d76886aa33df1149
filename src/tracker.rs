// Map Tracker - Main tracking logic

use std::collections::HashMap;

use tracing::{info, warn};

use crate::alerts::{AlertFlags, Severity};
use crate::buildings::{building_overrides, BuildingMarker, FarmBuilding};
use crate::catalog::VectorCatalog;
use crate::config::Config;
use crate::location_graph::{classify, Location, LocationContext};
use crate::markers::CharacterMarker;
use crate::projection::{MapPixel, MapProjector, PixelOverrides, Projection};
use crate::sync::SyncedLocationData;

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Per-tick state of one tracked NPC, as supplied by the host
#[derive(Debug, Clone)]
pub struct CharacterSnapshot {
    pub name: String,
    pub location_name: String,
    pub tile_x: i32,
    pub tile_y: i32,
    /// Host's visibility verdict; only affects draw layering here
    pub hidden: bool,
    pub has_quest: bool,
    pub is_birthday: bool,
}

/// Per-tick state of one connected player
#[derive(Debug, Clone)]
pub struct FarmerSnapshot {
    pub id: u64,
    pub name: String,
    pub location_name: String,
    pub tile_x: i32,
    pub tile_y: i32,
}

// =============================================================================
// MAP TRACKER
// =============================================================================

/// Central tracking state: catalog, location graph, and marker bookkeeping
pub struct MapTracker {
    config: Config,
    projector: MapProjector,
    contexts: HashMap<String, LocationContext>,
    buildings: HashMap<String, BuildingMarker>,
    building_pixels: PixelOverrides,
    npc_markers: HashMap<String, CharacterMarker>,
    farmer_markers: HashMap<u64, CharacterMarker>,
    alerts: AlertFlags,
}

impl MapTracker {
    /// Create a tracker, loading catalog files named by the config.
    ///
    /// A missing or malformed catalog file falls back to the built-in table;
    /// tracking a world with slightly wrong pixels beats not tracking it.
    pub fn new(config: Config) -> Self {
        info!("Initializing map tracker...");

        let mut catalog = if config.catalog.vectors_file.is_empty() {
            VectorCatalog::builtin()
        } else {
            match VectorCatalog::from_file(&config.catalog.vectors_file) {
                Ok(c) => {
                    info!(
                        "Loaded vector catalog from {}: {} locations, {} vectors",
                        config.catalog.vectors_file,
                        c.location_count(),
                        c.vector_count()
                    );
                    c
                }
                Err(e) => {
                    warn!(
                        "Failed to load vector catalog from {}: {}. Using built-in table.",
                        config.catalog.vectors_file, e
                    );
                    VectorCatalog::builtin()
                }
            }
        };

        if !config.catalog.custom_vectors_file.is_empty() {
            match VectorCatalog::from_file(&config.catalog.custom_vectors_file) {
                Ok(custom) => {
                    info!(
                        "Merged {} custom locations from {}",
                        custom.location_count(),
                        config.catalog.custom_vectors_file
                    );
                    catalog.merge(custom);
                }
                Err(e) => {
                    warn!(
                        "Failed to load custom vectors from {}: {}. Skipping.",
                        config.catalog.custom_vectors_file, e
                    );
                }
            }
        }

        let projector = MapProjector::new(catalog, config.mines.clone());

        Self {
            config,
            projector,
            contexts: HashMap::new(),
            buildings: HashMap::new(),
            building_pixels: PixelOverrides::new(),
            npc_markers: HashMap::new(),
            farmer_markers: HashMap::new(),
            alerts: AlertFlags::new(),
        }
    }

    /// Tracker over the built-in catalog with default settings
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    // =========================================================================
    // REBUILDS
    // =========================================================================

    /// Rebuild the location classification from a fresh world snapshot.
    /// Call whenever the location set changes; the old graph is discarded.
    pub fn rebuild_locations(&mut self, locations: &[Location]) {
        self.contexts = classify(locations);
        let unresolved = self.contexts.values().filter(|c| c.root.is_none()).count();
        info!(
            "Classified {} locations ({} unresolved)",
            self.contexts.len(),
            unresolved
        );
    }

    /// Rebuild the movable-building override table
    pub fn rebuild_buildings(&mut self, buildings: &[FarmBuilding], greenhouse_unlocked: bool) {
        self.buildings = building_overrides(buildings, greenhouse_unlocked, &self.projector);
        self.building_pixels = self
            .buildings
            .iter()
            .map(|(name, marker)| (name.clone(), marker.position))
            .collect();
        info!("Placed {} building overrides", self.buildings.len());
    }

    // =========================================================================
    // PROJECTION
    // =========================================================================

    /// Project a location/tile query to a map pixel
    pub fn locate(&self, location_name: &str, tile: Option<(i32, i32)>) -> MapPixel {
        self.projector.project(location_name, tile, &self.building_pixels)
    }

    /// Like [`locate`](Self::locate), but also reports the brackets used
    pub fn locate_detailed(&self, location_name: &str, tile: Option<(i32, i32)>) -> Projection {
        self.projector
            .project_detailed(location_name, tile, &self.building_pixels)
    }

    /// Whether two locations belong to the same outdoor root.
    /// Mine levels are folded onto their buckets before comparing.
    pub fn is_same_area(&self, a: &str, b: &str) -> bool {
        let mines = self.projector.mines();
        let a = mines.canonicalize(a);
        let b = mines.canonicalize(b);
        if a == b {
            return true;
        }

        match (self.contexts.get(a), self.contexts.get(b)) {
            (Some(ctx_a), Some(ctx_b)) => {
                ctx_a.root.is_some() && ctx_a.root == ctx_b.root
            }
            _ => false,
        }
    }

    // =========================================================================
    // MARKER UPDATES
    // =========================================================================

    /// Update NPC markers from host-supplied snapshots
    pub fn update_npc_markers(&mut self, snapshots: &[CharacterSnapshot]) {
        for snap in snapshots {
            let marker = self
                .npc_markers
                .entry(snap.name.clone())
                .or_insert_with(|| CharacterMarker::new(&snap.name));
            marker.location_name = snap.location_name.clone();
            marker.has_quest = snap.has_quest;
            marker.is_birthday = snap.is_birthday;

            let location_name = marker.effective_location().to_string();
            let canonical = self.projector.mines().canonicalize(&location_name).to_string();

            if !self.projector.knows(&location_name, &self.building_pixels) {
                Self::report_unknown(&self.alerts, &self.config, &location_name);
                continue;
            }

            marker.is_outdoors = self
                .contexts
                .get(canonical.as_str())
                .map(|ctx| ctx.is_outdoors())
                .unwrap_or(false);
            marker.update_layer(snap.hidden);

            // Synced markers are positioned by the host's payload; the local
            // tile would lag behind it
            if marker.synced_location_name.is_none() {
                let anchor = self.projector.project(
                    &location_name,
                    Some((snap.tile_x, snap.tile_y)),
                    &self.building_pixels,
                );
                marker.center_on(anchor);
            }
        }
    }

    /// Update connected-player markers from host-supplied snapshots
    pub fn update_farmer_markers(&mut self, snapshots: &[FarmerSnapshot]) {
        for snap in snapshots {
            if !self.projector.knows(&snap.location_name, &self.building_pixels) {
                Self::report_unknown(&self.alerts, &self.config, &snap.location_name);
            }

            let marker = self
                .farmer_markers
                .entry(snap.id)
                .or_insert_with(|| CharacterMarker::new(&snap.name));
            marker.location_name = snap.location_name.clone();
            marker.is_outdoors = self
                .contexts
                .get(self.projector.mines().canonicalize(&snap.location_name))
                .map(|ctx| ctx.is_outdoors())
                .unwrap_or(false);

            let position = self.projector.project(
                &snap.location_name,
                Some((snap.tile_x, snap.tile_y)),
                &self.building_pixels,
            );
            marker.apply_draw_delay(position, &snap.location_name);
        }
    }

    /// Apply a host's synced payload to the NPC markers.
    /// Markers absent from the payload are parked off the map.
    pub fn apply_synced_locations(&mut self, data: &SyncedLocationData) {
        for (name, marker) in self.npc_markers.iter_mut() {
            match data.get(name) {
                Some(synced) => {
                    marker.synced_location_name = Some(synced.location_name.clone());
                    let anchor = self.projector.project(
                        &synced.location_name,
                        Some((synced.tile_x, synced.tile_y)),
                        &self.building_pixels,
                    );
                    marker.center_on(anchor);
                }
                None => marker.park_off_map(),
            }
        }
    }

    /// Drop all marker state (e.g. at the start of a new day)
    pub fn clear_markers(&mut self) {
        self.npc_markers.clear();
        self.farmer_markers.clear();
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn projector(&self) -> &MapProjector {
        &self.projector
    }

    pub fn contexts(&self) -> &HashMap<String, LocationContext> {
        &self.contexts
    }

    pub fn buildings(&self) -> &HashMap<String, BuildingMarker> {
        &self.buildings
    }

    pub fn npc_markers(&self) -> &HashMap<String, CharacterMarker> {
        &self.npc_markers
    }

    pub fn farmer_markers(&self) -> &HashMap<u64, CharacterMarker> {
        &self.farmer_markers
    }

    pub fn alerts(&self) -> &AlertFlags {
        &self.alerts
    }

    /// Report a location with no calibration data, once per distinct name.
    ///
    /// Cabins and mine levels are exempt: cabins are per-save movable
    /// structures resolved through the override table, and mine levels
    /// without a numeric suffix are transient interstitials.
    fn report_unknown(alerts: &AlertFlags, config: &Config, location_name: &str) {
        if location_name.contains("Cabin") || location_name.contains(config.mines.prefix.as_str())
        {
            return;
        }
        alerts.report_once(
            &format!("UnknownLocation:{}", location_name),
            Severity::Warn,
            &format!("Unknown location: {}.", location_name),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mines::MineRules;

    fn test_tracker() -> MapTracker {
        let mut tracker = MapTracker::with_defaults();
        let catalog = VectorCatalog::from_json_str(
            r#"{
                "Town": [
                    { "map_x": 0, "map_y": 0, "tile_x": 0, "tile_y": 0 },
                    { "map_x": 200, "map_y": 200, "tile_x": 100, "tile_y": 100 }
                ],
                "Farm": [
                    { "map_x": 0, "map_y": 0, "tile_x": 0, "tile_y": 0 },
                    { "map_x": 100, "map_y": 100, "tile_x": 100, "tile_y": 100 }
                ],
                "Greenhouse": [ { "map_x": 50, "map_y": 60 } ],
                "SeedShop": [ { "map_x": 120, "map_y": 130 } ],
                "Mine": [ { "map_x": 180, "map_y": 20 } ]
            }"#,
        )
        .unwrap();
        tracker.projector = MapProjector::new(catalog, MineRules::default());
        tracker
    }

    fn snapshot(name: &str, location: &str, tile_x: i32, tile_y: i32) -> CharacterSnapshot {
        CharacterSnapshot {
            name: name.to_string(),
            location_name: location.to_string(),
            tile_x,
            tile_y,
            hidden: false,
            has_quest: false,
            is_birthday: false,
        }
    }

    fn town_world() -> Vec<Location> {
        vec![
            Location::new("Town", true, &[]),
            Location::new("SeedShop", false, &["Town"]),
        ]
    }

    #[test]
    fn test_npc_marker_is_centered_on_projection() {
        let mut tracker = test_tracker();
        tracker.rebuild_locations(&town_world());
        tracker.update_npc_markers(&[snapshot("Abigail", "Town", 50, 50)]);

        let marker = &tracker.npc_markers()["Abigail"];
        // Anchor (100, 100) minus the sprite-centering offset
        assert_eq!(marker.map_position, MapPixel::new(84, 85));
        assert!(marker.is_outdoors);
        assert_eq!(marker.layer, 6);
    }

    #[test]
    fn test_indoor_npc_layers_below_outdoor() {
        let mut tracker = test_tracker();
        tracker.rebuild_locations(&town_world());
        tracker.update_npc_markers(&[snapshot("Pierre", "SeedShop", 3, 4)]);

        let marker = &tracker.npc_markers()["Pierre"];
        assert!(!marker.is_outdoors);
        assert_eq!(marker.layer, 2);
        assert_eq!(marker.map_position, MapPixel::new(120 - 16, 130 - 15));
    }

    #[test]
    fn test_unknown_location_reports_once_and_keeps_marker_parked() {
        let mut tracker = test_tracker();
        tracker.rebuild_locations(&town_world());

        tracker.update_npc_markers(&[snapshot("Kent", "Atlantis", 1, 1)]);
        tracker.update_npc_markers(&[snapshot("Kent", "Atlantis", 2, 2)]);

        assert_eq!(tracker.alerts().raised_count(), 1);
        assert!(tracker.npc_markers()["Kent"].map_position.is_off_map());
    }

    #[test]
    fn test_cabin_and_mine_names_are_exempt_from_alerts() {
        let mut tracker = test_tracker();
        tracker.update_npc_markers(&[
            snapshot("Farmhand", "Cabin1187", 1, 1),
            snapshot("Ghost", "UndergroundMineEntrance", 1, 1),
        ]);
        assert_eq!(tracker.alerts().raised_count(), 0);
    }

    #[test]
    fn test_mine_level_marker_lands_on_bucket_point() {
        let mut tracker = test_tracker();
        tracker.update_npc_markers(&[snapshot("Dwarf", "UndergroundMine42", 7, 9)]);
        let marker = &tracker.npc_markers()["Dwarf"];
        assert_eq!(marker.map_position, MapPixel::new(180 - 16, 20 - 15));
    }

    #[test]
    fn test_building_override_beats_catalog() {
        let mut tracker = test_tracker();
        tracker.rebuild_buildings(
            &[FarmBuilding {
                unique_name: "Barn1234".to_string(),
                building_type: "Barn".to_string(),
                tile_x: 20,
                tile_y: 20,
            }],
            false,
        );

        // Barn anchor is its projected farm tile plus the barn nudge
        let expected = MapPixel::new(20, 23);
        assert_eq!(tracker.locate("Barn1234", Some((5, 5))), expected);

        tracker.update_npc_markers(&[snapshot("Marnie", "Barn1234", 5, 5)]);
        let marker = &tracker.npc_markers()["Marnie"];
        assert_eq!(marker.map_position, MapPixel::new(expected.x - 16, expected.y - 15));
    }

    #[test]
    fn test_synced_payload_overrides_live_location() {
        let mut tracker = test_tracker();
        tracker.rebuild_locations(&town_world());
        tracker.update_npc_markers(&[
            snapshot("Abigail", "Town", 0, 0),
            snapshot("Pierre", "SeedShop", 0, 0),
        ]);

        let mut data = SyncedLocationData::new();
        data.add_location("Abigail", "Town", 50, 50);
        tracker.apply_synced_locations(&data);

        let abigail = &tracker.npc_markers()["Abigail"];
        assert_eq!(abigail.map_position, MapPixel::new(84, 85));
        assert_eq!(abigail.synced_location_name.as_deref(), Some("Town"));

        // Absent from the payload: parked until the next sync
        assert!(tracker.npc_markers()["Pierre"].map_position.is_off_map());
    }

    #[test]
    fn test_farmer_draw_delay_on_position_glitch() {
        let mut tracker = test_tracker();
        tracker.rebuild_locations(&town_world());

        let farmer = |x, y| FarmerSnapshot {
            id: 1,
            name: "Host".to_string(),
            location_name: "Town".to_string(),
            tile_x: x,
            tile_y: y,
        };

        tracker.update_farmer_markers(&[farmer(10, 10)]);
        assert_eq!(tracker.farmer_markers()[&1].draw_delay, 0);

        // Tile teleports across the region without a location change
        tracker.update_farmer_markers(&[farmer(90, 10)]);
        assert!(tracker.farmer_markers()[&1].draw_delay > 0);
    }

    #[test]
    fn test_same_area_compares_roots() {
        let mut tracker = test_tracker();
        tracker.rebuild_locations(&town_world());

        assert!(tracker.is_same_area("SeedShop", "Town"));
        assert!(tracker.is_same_area("Town", "Town"));
        assert!(!tracker.is_same_area("Town", "Atlantis"));
        // Mine levels fold to the same bucket before comparing
        assert!(tracker.is_same_area("UndergroundMine10", "UndergroundMine110"));
        assert!(!tracker.is_same_area("UndergroundMine10", "UndergroundMine130"));
    }

    #[test]
    fn test_unresolved_roots_are_never_same_area() {
        let mut tracker = test_tracker();
        tracker.rebuild_locations(&[
            Location::new("A", false, &["B"]),
            Location::new("B", false, &["A"]),
        ]);
        assert!(!tracker.is_same_area("A", "B"));
    }

    #[test]
    fn test_locate_single_point_ignores_tile() {
        let tracker = test_tracker();
        assert_eq!(
            tracker.locate("Greenhouse", Some((40, 2))),
            MapPixel::new(50, 60)
        );
        assert_eq!(tracker.locate("Greenhouse", None), MapPixel::new(50, 60));
    }

    #[test]
    fn test_locate_unknown_is_off_map() {
        let tracker = test_tracker();
        assert!(tracker.locate("Atlantis", None).is_off_map());
    }

    #[test]
    fn test_default_tracker_uses_builtin_catalog() {
        let tracker = MapTracker::with_defaults();
        assert!(tracker.projector().catalog().contains("Farm"));
        assert!(tracker.projector().catalog().contains("SkullCave"));
    }
}
