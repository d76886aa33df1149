// Location graph classification
//
// The world is a directed graph of named locations connected by warps. Every
// interior ultimately chains out to an outdoor region; markers for indoor
// entities are grouped and layered by that outdoor root. Classification walks
// the warp graph once per snapshot and is rebuilt wholesale whenever the
// location set changes (a new building, a removed cabin).

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

// =============================================================================
// DATA STRUCTURES
// =============================================================================

/// A directed passage to another location
#[derive(Debug, Clone, Deserialize)]
pub struct Warp {
    /// Name of the target location; may no longer exist
    pub target: String,
}

impl Warp {
    pub fn to(target: &str) -> Self {
        Self {
            target: target.to_string(),
        }
    }
}

/// Caller-supplied snapshot of one world location
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub outdoors: bool,
    /// Outgoing warps in their defined order
    #[serde(default)]
    pub warps: Vec<Warp>,
}

impl Location {
    pub fn new(name: &str, outdoors: bool, warp_targets: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            outdoors,
            warps: warp_targets.iter().map(|t| Warp::to(t)).collect(),
        }
    }
}

/// What a location is, relative to the overview map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// A root region drawn directly on the map
    Outdoors,
    /// An interior with a warp chain that saw an outdoor target
    Indoors,
    /// A nested interior reached only through other interiors
    Room,
}

/// Classification of one location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationContext {
    /// `None` until the warp walk classifies the location
    pub kind: Option<LocationKind>,
    /// The outdoor region this location ultimately connects to; `None` when
    /// no root was reachable this pass
    pub root: Option<String>,
}

impl LocationContext {
    pub fn is_outdoors(&self) -> bool {
        self.kind == Some(LocationKind::Outdoors)
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classify every location in the snapshot.
///
/// Each location gets a context entry even when its root stays unresolved.
/// The walk follows warps in their defined order and takes the first one that
/// reaches an outdoor root; it is a first-found policy, not shortest-path.
/// Re-running on an unchanged snapshot yields identical output.
pub fn classify(locations: &[Location]) -> HashMap<String, LocationContext> {
    let by_name: HashMap<&str, &Location> =
        locations.iter().map(|l| (l.name.as_str(), l)).collect();

    let mut contexts = HashMap::new();
    for location in locations {
        let mut visited = HashSet::new();
        resolve_root(location, &by_name, &mut contexts, &mut visited, None, false);
    }
    contexts
}

/// Walk warps out of `location` until an outdoor root is found.
///
/// Self-loops and immediate back-edges are skipped; the visited set bounds
/// the walk on arbitrary warp cycles. Returns the root name when one was
/// reached through any warp, recording kind and root for every location on
/// the successful chain.
fn resolve_root<'a>(
    location: &'a Location,
    by_name: &HashMap<&str, &'a Location>,
    contexts: &mut HashMap<String, LocationContext>,
    visited: &mut HashSet<&'a str>,
    prev: Option<&str>,
    mut has_outdoor_warp: bool,
) -> Option<String> {
    if location.outdoors {
        let ctx = contexts.entry(location.name.clone()).or_default();
        ctx.kind = Some(LocationKind::Outdoors);
        ctx.root = Some(location.name.clone());
        return Some(location.name.clone());
    }

    contexts.entry(location.name.clone()).or_default();

    // Each top-level resolution visits an interior at most once
    if !visited.insert(location.name.as_str()) {
        return None;
    }

    for warp in &location.warps {
        let target = match by_name.get(warp.target.as_str()) {
            Some(t) => *t,
            None => continue,
        };

        // Self-loops and immediate back-edges never lead anywhere new
        if warp.target == location.name || prev == Some(warp.target.as_str()) {
            continue;
        }

        if target.outdoors {
            has_outdoor_warp = true;
        }

        // A direct outdoor warp makes this an indoor building; a chain of
        // interior-only warps makes it a nested room
        let kind = if has_outdoor_warp {
            LocationKind::Indoors
        } else {
            LocationKind::Room
        };

        if let Some(root) = resolve_root(
            target,
            by_name,
            contexts,
            visited,
            Some(location.name.as_str()),
            has_outdoor_warp,
        ) {
            let ctx = contexts.entry(location.name.clone()).or_default();
            ctx.kind = Some(kind);
            ctx.root = Some(root.clone());
            return Some(root);
        }
    }

    // Dead end for this pass; a later start point may still resolve it
    None
}
