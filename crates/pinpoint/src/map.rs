use std::fmt::Write as _;

use pinpoint_locate::Coordinates;

pub const DEFAULT_ZOOM: u8 = 13;
pub const MAX_ZOOM: u8 = 19;

pub const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "\u{a9} OpenStreetMap contributors";

const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
const LEAFLET_IMAGES: &str = "https://unpkg.com/leaflet@1.9.4/dist/images";

/// Web-Mercator stops at this latitude.
const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Where the map should look and where the pin goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: Coordinates,
    pub zoom: u8,
    pub marker: Coordinates,
}

impl Placement {
    /// Center on `coordinates` and pin the same spot.
    #[must_use]
    pub const fn pinned(coordinates: Coordinates, zoom: u8) -> Self {
        Self {
            center: coordinates,
            zoom,
            marker: coordinates,
        }
    }
}

/// Something that can draw a map for a view.
pub trait MapWidget: Send + Sync {
    fn draw(&self, placement: &Placement) -> String;
}

/// Tile server the map is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// Template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Credit line the tile provider requires.
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_TILES.to_owned(),
            attribution: OSM_ATTRIBUTION.to_owned(),
        }
    }
}

impl TileLayer {
    #[must_use]
    pub fn tile_url(&self, tile: Tile) -> String {
        let subdomain = SUBDOMAINS[((tile.x + tile.y) % 3) as usize];
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

/// Images used for the position pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            icon_url: format!("{LEAFLET_IMAGES}/marker-icon.png"),
            icon_retina_url: format!("{LEAFLET_IMAGES}/marker-icon-2x.png"),
            shadow_url: format!("{LEAFLET_IMAGES}/marker-shadow.png"),
        }
    }
}

/// A slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl Tile {
    /// The tile at `zoom` that contains `coordinates`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn containing(coordinates: Coordinates, zoom: u8) -> Self {
        let n = f64::from(1_u32 << zoom.min(MAX_ZOOM));
        let last = n - 1.0;
        let latitude = coordinates
            .latitude
            .clamp(-MAX_LATITUDE, MAX_LATITUDE)
            .to_radians();
        let x = ((coordinates.longitude + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - latitude.tan().asinh() / std::f64::consts::PI) / 2.0 * n).floor();
        Self {
            x: x.clamp(0.0, last) as u32,
            y: y.clamp(0.0, last) as u32,
            z: zoom.min(MAX_ZOOM),
        }
    }
}

/// Text rendition of a tiled map: names the tile under the center and the pin.
pub struct TileMap {
    tiles: TileLayer,
    icon: MarkerIcon,
}

impl TileMap {
    #[must_use]
    pub const fn new(tiles: TileLayer, icon: MarkerIcon) -> Self {
        Self { tiles, icon }
    }
}

impl MapWidget for TileMap {
    fn draw(&self, placement: &Placement) -> String {
        let center = placement.center;
        let marker = placement.marker;
        let tile = Tile::containing(center, placement.zoom);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Map centered on {}, {} at zoom {}",
            center.latitude, center.longitude, tile.z
        );
        let _ = writeln!(out, "  Tile:   {}", self.tiles.tile_url(tile));
        let _ = writeln!(
            out,
            "  Marker: {}, {} ({})",
            marker.latitude, marker.longitude, self.icon.icon_url
        );
        let _ = write!(out, "  {}", self.tiles.attribution);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_tile() {
        assert_eq!(
            Tile::containing(Coordinates::new(12.97, 77.59), 0),
            Tile { x: 0, y: 0, z: 0 }
        );
    }

    #[test]
    fn tiles_at_zoom_13() {
        assert_eq!(
            Tile::containing(Coordinates::new(12.97, 77.59), 13),
            Tile {
                x: 5861,
                y: 3798,
                z: 13
            }
        );
        assert_eq!(
            Tile::containing(Coordinates::new(1.0, 2.0), 13),
            Tile {
                x: 4141,
                y: 4073,
                z: 13
            }
        );
    }

    #[test]
    fn southern_hemisphere() {
        assert_eq!(
            Tile::containing(Coordinates::new(-33.87, 151.21), 10),
            Tile { x: 942, y: 614, z: 10 }
        );
    }

    #[test]
    fn poles_and_antimeridian_stay_on_the_grid() {
        let north = Tile::containing(Coordinates::new(90.0, 180.0), 2);
        assert_eq!(north, Tile { x: 3, y: 0, z: 2 });
        let south = Tile::containing(Coordinates::new(-90.0, -180.0), 2);
        assert_eq!(south, Tile { x: 0, y: 3, z: 2 });
    }

    #[test]
    fn tile_url_expands_template() {
        let tiles = TileLayer::default();
        assert_eq!(
            tiles.tile_url(Tile {
                x: 5861,
                y: 3798,
                z: 13
            }),
            "https://c.tile.openstreetmap.org/13/5861/3798.png"
        );
        assert_eq!(
            tiles.tile_url(Tile { x: 0, y: 0, z: 0 }),
            "https://a.tile.openstreetmap.org/0/0/0.png"
        );
    }

    #[test]
    fn default_icon_is_explicit_configuration() {
        let icon = MarkerIcon::default();
        assert_eq!(
            icon.icon_url,
            "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png"
        );
        assert!(icon.icon_retina_url.ends_with("marker-icon-2x.png"));
        assert!(icon.shadow_url.ends_with("marker-shadow.png"));
    }

    #[test]
    fn draw_names_tile_marker_and_attribution() {
        let custom = MarkerIcon {
            icon_url: "https://example.com/pin.png".into(),
            ..MarkerIcon::default()
        };
        let map = TileMap::new(TileLayer::default(), custom);
        let drawing = map.draw(&Placement::pinned(Coordinates::new(12.97, 77.59), 13));

        assert!(drawing.contains("Map centered on 12.97, 77.59 at zoom 13"));
        assert!(drawing.contains("https://c.tile.openstreetmap.org/13/5861/3798.png"));
        assert!(drawing.contains("https://example.com/pin.png"));
        assert!(drawing.ends_with("\u{a9} OpenStreetMap contributors"));
    }
}
