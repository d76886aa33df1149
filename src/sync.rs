// Multiplayer location sync payload
//
// Only the host sees every entity's live location. Once a second it builds
// this payload and ships it to the other players, whose trackers apply it in
// place of their own (incomplete) view. Transport is the host application's
// concern; this module just defines the message.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One entity's synced position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedLocation {
    pub location_name: String,
    pub tile_x: i32,
    pub tile_y: i32,
}

/// Payload mapping entity names to their current locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncedLocationData {
    pub locations: HashMap<String, SyncedLocation>,
}

impl SyncedLocationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_location(&mut self, name: &str, location_name: &str, tile_x: i32, tile_y: i32) {
        self.locations.insert(
            name.to_string(),
            SyncedLocation {
                location_name: location_name.to_string(),
                tile_x,
                tile_y,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&SyncedLocation> {
        self.locations.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut data = SyncedLocationData::new();
        data.add_location("Abigail", "SeedShop", 10, 12);

        let loc = data.get("Abigail").unwrap();
        assert_eq!(loc.location_name, "SeedShop");
        assert_eq!((loc.tile_x, loc.tile_y), (10, 12));
        assert!(data.get("Sebastian").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut data = SyncedLocationData::new();
        data.add_location("Abigail", "SeedShop", 10, 12);
        data.add_location("Linus", "Mountain", 4, 5);

        let json = serde_json::to_string(&data).unwrap();
        let restored: SyncedLocationData = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.locations.len(), 2);
        assert_eq!(restored.get("Abigail"), data.get("Abigail"));
        assert_eq!(restored.get("Linus"), data.get("Linus"));
    }
}
