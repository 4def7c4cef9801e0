use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use pinpoint_locate::geocoding::nominatim;
use pinpoint_locate::position::{fixed, ip};
use pinpoint_locate::{Coordinates, PositionSource};

use crate::map::{self, MarkerIcon, TileLayer};
use crate::router::Route;

const DEFAULT_USER_AGENT: &str = concat!("pinpoint/", env!("CARGO_PKG_VERSION"));

/// Show where you are on a map; press Enter to see the raw GPS coordinates.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Config {
    /// Where the position comes from: `ip`, `denied`, or a fixed `LAT,LON`
    #[arg(long, default_value = "ip", allow_hyphen_values = true)]
    pub position: PositionSetting,
    /// Seconds to wait for a position before giving up (0 waits forever)
    #[arg(long, default_value_t = 15)]
    pub position_timeout: u64,
    /// IP geolocation endpoint used by `--position ip`
    #[arg(long, default_value = ip::DEFAULT_ENDPOINT)]
    pub ip_locator_url: String,
    /// Reverse geocoding endpoint (Nominatim compatible)
    #[arg(long, default_value = nominatim::DEFAULT_ENDPOINT)]
    pub geocoder_url: String,
    /// User agent sent with every HTTP request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
    /// Map zoom level
    #[arg(
        long,
        default_value_t = map::DEFAULT_ZOOM,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(map::MAX_ZOOM))
    )]
    pub zoom: u8,
    /// Tile server URL template
    #[arg(long, default_value = map::OSM_TILES)]
    pub tile_url: String,
    /// Attribution required by the tile server
    #[arg(long, default_value = map::OSM_ATTRIBUTION)]
    pub attribution: String,
    /// Route to open first: `/` or `/coords`
    #[arg(long, default_value = "/")]
    pub start: Route,
}

impl Config {
    #[must_use]
    pub const fn acquire_timeout(&self) -> Option<Duration> {
        match self.position_timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    #[must_use]
    pub fn position_source(&self) -> Box<dyn PositionSource> {
        match self.position {
            PositionSetting::Ip => Box::new(ip::Backend::new(
                self.ip_locator_url.clone(),
                self.user_agent.clone(),
            )),
            PositionSetting::Denied => Box::new(fixed::Denied),
            PositionSetting::Fixed(coordinates) => Box::new(fixed::Fixed(coordinates)),
        }
    }

    #[must_use]
    pub fn geocoder(&self) -> nominatim::Backend {
        nominatim::Backend::new(self.geocoder_url.clone(), self.user_agent.clone())
    }

    #[must_use]
    pub fn tile_map(&self) -> map::TileMap {
        let tiles = TileLayer {
            url_template: self.tile_url.clone(),
            attribution: self.attribution.clone(),
        };
        map::TileMap::new(tiles, MarkerIcon::default())
    }
}

/// Value of `--position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionSetting {
    Ip,
    Denied,
    Fixed(Coordinates),
}

#[derive(Debug)]
pub struct InvalidPosition(String);

impl fmt::Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidPosition {}

impl FromStr for PositionSetting {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ip" => return Ok(Self::Ip),
            "denied" => return Ok(Self::Denied),
            _ => {}
        }
        let Some((lat, lon)) = s.split_once(',') else {
            return Err(InvalidPosition(format!(
                "expected `ip`, `denied` or `LAT,LON`, got {s:?}"
            )));
        };
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| InvalidPosition(format!("invalid coordinate {part:?}: {e}")))
        };
        let coordinates = Coordinates::new(parse(lat)?, parse(lon)?);
        if !coordinates.is_valid() {
            return Err(InvalidPosition(format!(
                "{coordinates} is outside latitude [-90, 90] / longitude [-180, 180]"
            )));
        }
        Ok(Self::Fixed(coordinates))
    }
}
