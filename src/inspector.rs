// Map Tracking Inspector
// Copyright (C) 2024 [Your Name]
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

use std::env;
use std::fs;

use map_tracking::{Config, Location, MapTracker};

fn usage() {
    eprintln!("Usage: map-tracking-inspect <locations.json> [config.toml]");
    eprintln!();
    eprintln!("  locations.json  Array of {{ name, outdoors, warps: [{{ target }}] }}");
    eprintln!("  config.toml     Optional tracker configuration");
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let locations_path = match args.get(1) {
        Some(p) => p,
        None => {
            usage();
            return;
        }
    };

    println!("===========================================");
    println!("           Map Tracking Inspector");
    println!("===========================================");
    println!();

    // Load config if given, otherwise run on defaults
    let config = match args.get(2) {
        Some(path) => match Config::load(path) {
            Ok(cfg) => {
                println!("[+] Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                eprintln!("[!] {}", e);
                return;
            }
        },
        None => Config::default(),
    };

    // Load the world snapshot
    let contents = match fs::read_to_string(locations_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[!] Failed to read {}: {}", locations_path, e);
            return;
        }
    };
    let locations: Vec<Location> = match serde_json::from_str(&contents) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[!] Failed to parse {}: {}", locations_path, e);
            return;
        }
    };
    println!("[+] Loaded {} locations from {}", locations.len(), locations_path);

    let mut tracker = MapTracker::new(config);
    tracker.rebuild_locations(&locations);

    println!();
    println!("{:<28} {:<10} {:<20} {}", "LOCATION", "KIND", "ROOT", "MAP PIXEL");
    println!("{}", "-".repeat(76));

    let mut names: Vec<&Location> = locations.iter().collect();
    names.sort_by(|a, b| a.name.cmp(&b.name));

    for location in names {
        let ctx = &tracker.contexts()[&location.name];
        let kind = match ctx.kind {
            Some(k) => format!("{:?}", k),
            None => "?".to_string(),
        };
        let root = ctx.root.as_deref().unwrap_or("-");

        let pixel = tracker.locate(&location.name, None);
        let pixel_str = if pixel.is_off_map() {
            "(off map)".to_string()
        } else {
            format!("({}, {})", pixel.x, pixel.y)
        };

        println!("{:<28} {:<10} {:<20} {}", location.name, kind, root, pixel_str);
    }

    println!();
    let unresolved = tracker
        .contexts()
        .values()
        .filter(|c| c.root.is_none())
        .count();
    if unresolved > 0 {
        println!("[!] {} location(s) have no reachable outdoor root", unresolved);
    } else {
        println!("[+] Every location resolved to an outdoor root");
    }
}
