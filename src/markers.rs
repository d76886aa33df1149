// Character markers
//
// Per-entity bookkeeping for the overview map: where the marker sits, where
// it sat last tick, and which layer it draws on. Deciding which markers are
// visible is the host's policy; this module only keeps the positions and
// ordering it needs to draw the ones it picks.

use crate::projection::MapPixel;

/// Offset centering a marker sprite on its anchor pixel
pub const MARKER_OFFSET_X: i32 = 16;
pub const MARKER_OFFSET_Y: i32 = 15;

/// Frames to hold a marker after a suspicious position jump
pub const DRAW_DELAY: u8 = 3;

/// Pixel jump above which a same-location move is treated as a glitch
pub const POSITION_JUMP_THRESHOLD: i32 = 15;

/// Marker state for one tracked entity
#[derive(Debug, Clone)]
pub struct CharacterMarker {
    pub name: String,
    /// Location the entity reported last update
    pub location_name: String,
    /// Host-synced location, when the entity lives on another machine;
    /// takes precedence over `location_name`
    pub synced_location_name: Option<String>,
    pub map_position: MapPixel,
    pub prev_map_position: MapPixel,
    pub prev_location_name: String,
    pub is_outdoors: bool,
    pub is_birthday: bool,
    pub has_quest: bool,
    /// Draw order; higher draws in front
    pub layer: i32,
    /// Frames left before the marker may move again
    pub draw_delay: u8,
}

impl CharacterMarker {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            location_name: String::new(),
            synced_location_name: None,
            map_position: MapPixel::OFF_MAP,
            prev_map_position: MapPixel::OFF_MAP,
            prev_location_name: String::new(),
            is_outdoors: false,
            is_birthday: false,
            has_quest: false,
            layer: 0,
            draw_delay: 0,
        }
    }

    /// The location this marker should be drawn at
    pub fn effective_location(&self) -> &str {
        self.synced_location_name
            .as_deref()
            .unwrap_or(&self.location_name)
    }

    /// Center the marker sprite on an anchor pixel
    pub fn center_on(&mut self, anchor: MapPixel) {
        self.map_position = MapPixel::new(anchor.x - MARKER_OFFSET_X, anchor.y - MARKER_OFFSET_Y);
    }

    /// Park the marker outside the canvas so it is not drawn
    pub fn park_off_map(&mut self) {
        self.map_position = MapPixel::OFF_MAP;
    }

    /// Recompute the draw layer.
    ///
    /// Outdoor markers draw above indoor ones; hidden markers sink below
    /// their group; a quest or birthday flag lifts a marker inside its group.
    pub fn update_layer(&mut self, hidden: bool) {
        let mut layer = if self.is_outdoors { 6 } else { 2 };
        if hidden {
            layer -= 2;
        }
        if self.has_quest || self.is_birthday {
            layer += 1;
        }
        self.layer = layer;
    }

    /// Apply the draw-delay heuristic for a freshly projected position.
    ///
    /// The location name changes a tick before the tile position does, which
    /// would briefly draw the marker at the wrong spot; a large jump without
    /// a location change is held for a few frames instead.
    pub fn apply_draw_delay(&mut self, position: MapPixel, location_name: &str) {
        let dx = position.x - self.prev_map_position.x;
        let dy = position.y - self.prev_map_position.y;

        if self.prev_location_name == location_name
            && (dx - dy).abs() > POSITION_JUMP_THRESHOLD
        {
            self.draw_delay = DRAW_DELAY;
        } else if self.draw_delay > 0 {
            self.draw_delay -= 1;
        }

        self.map_position = position;
        self.prev_map_position = position;
        self.prev_location_name = location_name.to_string();
    }
}
