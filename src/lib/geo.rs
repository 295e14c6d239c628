use crate::*;
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Zoom level of the default world view.
pub const WORLD_ZOOM: u32 = 2;
/// Zoom level used when a preset destination or a quick search result is focused.
pub const PRESET_ZOOM: u32 = 10;
/// Zoom level used when the search widget focuses a geocoding result.
pub const SEARCH_ZOOM: u32 = 12;
/// Center of the default world view.
pub const WORLD_CENTER: Coordinates = Coordinates {
    lat: 20.0,
    lon: 0.0,
};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the slippy map tile containing these coordinates at the given zoom level.
    pub fn tile(&self, zoom: u32) -> TileId {
        deg2num(self.lat, self.lon, zoom).into()
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct TileId {
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl From<TileCoordinate> for TileId {
    fn from(value: TileCoordinate) -> Self {
        let max = 2u32.pow(value.z).saturating_sub(1) as f64;
        Self {
            z: value.z,
            x: value.x.max(0.0).min(max) as u32,
            y: value.y.max(0.0).min(max) as u32,
        }
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileCoordinate {
    pub z: u32,
    pub x: f64,
    pub y: f64,
}

impl TileCoordinate {
    pub fn new(z: u32, x: f64, y: f64) -> Self {
        Self { z, x, y }
    }
}

fn deg2rad(deg: f64) -> f64 {
    2.0 * PI * deg / 360.0
}

pub fn deg2num(lat_deg: f64, lon_deg: f64, zoom: u32) -> TileCoordinate {
    let lat_rad = deg2rad(lat_deg);
    let n = 2f64.powi(zoom as i32);
    let xtile = (lon_deg + 180.0) / 360.0 * n;
    let ytile = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;

    TileCoordinate::new(zoom, xtile, ytile)
}

/// A pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub description: String,
    pub emoji: String,
    /// Set for markers built from a geocoding result rather than a preset.
    pub is_search_result: bool,
    pub display_name: Option<String>,
}

impl From<&PresetDestination> for Marker {
    fn from(preset: &PresetDestination) -> Self {
        Self {
            name: preset.name.to_string(),
            country: preset.country.to_string(),
            coordinates: preset.coordinates,
            description: preset.description.to_string(),
            emoji: preset.emoji.to_string(),
            is_search_result: false,
            display_name: None,
        }
    }
}

/// What the map currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u32,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// The fixed world view with all preset destinations pinned.
    pub fn world() -> Self {
        Self {
            center: WORLD_CENTER,
            zoom: WORLD_ZOOM,
            markers: PRESET_DESTINATIONS.iter().map(Marker::from).collect(),
        }
    }

    pub fn focus(&mut self, center: Coordinates, zoom: u32) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn center_tile(&self) -> TileId {
        self.center.tile(self.zoom)
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::world()
    }
}

#[test]
fn zurich_lands_in_the_expected_tile() {
    let zurich = Coordinates::new(47.3769, 8.5417);
    assert_eq!(zurich.tile(8), TileId::new(8, 134, 89));
}

#[test]
fn world_center_tile_is_clamped_to_the_grid() {
    let view = MapView::world();
    let tile = view.center_tile();
    assert_eq!(tile.z, WORLD_ZOOM);
    assert!(tile.x < 4 && tile.y < 4);
    assert_eq!(format!("{}", TileId::new(2, 2, 1)), "2/2/1");
}

#[test]
fn world_view_pins_every_preset() {
    let view = MapView::world();
    assert_eq!(view.center, Coordinates::new(20.0, 0.0));
    assert_eq!(view.zoom, 2);
    assert_eq!(view.markers.len(), PRESET_DESTINATIONS.len());
    assert!(view.markers.iter().all(|m| !m.is_search_result));
}
