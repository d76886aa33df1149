// Map Tracking - location graph and map projection engine
// Copyright (C) 2024 [Your Name]
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

// =============================================================================
// MODULES
// =============================================================================

pub mod alerts;
pub mod buildings;
pub mod catalog;
pub mod config;
pub mod location_graph;
pub mod markers;
pub mod mines;
pub mod projection;
pub mod sync;
pub mod tracker;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use alerts::{AlertFlags, Severity};
pub use buildings::{building_overrides, BuildingMarker, FarmBuilding};
pub use catalog::{CatalogError, MapVector, VectorCatalog};
pub use config::{Config, ConfigError};
pub use location_graph::{classify, Location, LocationContext, LocationKind, Warp};
pub use markers::CharacterMarker;
pub use mines::{canonicalize, MineRules};
pub use projection::{MapPixel, MapProjector, PixelOverrides, Projection};
pub use sync::{SyncedLocation, SyncedLocationData};
pub use tracker::{CharacterSnapshot, FarmerSnapshot, MapTracker};
