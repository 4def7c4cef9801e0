pub mod nominatim;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::Coordinates;

/// Errors raised by geocoding backends.
#[derive(Debug)]
pub struct Error(String);

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}

/// The address fields a reverse lookup may report.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// The most specific non-empty field, tested in the order city, town,
    /// village, state, country.
    #[must_use]
    pub fn place_name(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.state,
            &self.country,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
    }
}

pub type ReverseFuture<'a> =
    Pin<Box<dyn Future<Output = exn::Result<Option<Address>, Error>> + Send + 'a>>;

/// A reverse geocoding provider.
pub trait Geocoder: Send + Sync + 'static {
    /// Look up the address at `coordinates`.
    ///
    /// Resolves to `Ok(None)` when the service answered but had no address
    /// object for the position.
    fn reverse_geocode(&self, coordinates: Coordinates) -> ReverseFuture<'_>;
}

/// Why no place name could be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    NoAddressData,
    LookupFailed,
    InvalidCoordinates,
    /// No position was available to look up in the first place.
    LocationUnavailable,
}

impl Unavailable {
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::NoAddressData => "no address data",
            Self::LookupFailed => "lookup failed",
            Self::InvalidCoordinates => "invalid coordinates",
            Self::LocationUnavailable => "location unavailable",
        }
    }
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Outcome of resolving a place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceResult {
    Unresolved,
    Resolved(String),
    Unavailable(Unavailable),
}

impl PlaceResult {
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// Move out of `Unresolved` into `next`.
    ///
    /// A settled result never changes again; returns whether `next` was
    /// applied.
    pub fn settle(&mut self, next: Self) -> bool {
        if self.is_settled() || !next.is_settled() {
            return false;
        }
        *self = next;
        true
    }
}

/// Turns coordinates into a display name with a single lookup.
///
/// Never fails: every transport or decoding problem is classified into
/// [`PlaceResult::Unavailable`].
pub struct PlaceResolver<'a> {
    geocoder: &'a dyn Geocoder,
}

impl<'a> PlaceResolver<'a> {
    #[must_use]
    pub fn new(geocoder: &'a dyn Geocoder) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, coordinates: Coordinates) -> PlaceResult {
        if !coordinates.is_valid() {
            tracing::warn!(%coordinates, "refusing to look up invalid coordinates");
            return PlaceResult::Unavailable(Unavailable::InvalidCoordinates);
        }

        match self.geocoder.reverse_geocode(coordinates).await {
            Ok(Some(address)) => match address.place_name() {
                Some(name) => {
                    tracing::info!(%coordinates, place = name, "place resolved");
                    PlaceResult::Resolved(name.to_owned())
                }
                None => {
                    tracing::info!(%coordinates, "address has no usable fields");
                    PlaceResult::Unavailable(Unavailable::NoAddressData)
                }
            },
            Ok(None) => {
                tracing::info!(%coordinates, "no address for position");
                PlaceResult::Unavailable(Unavailable::NoAddressData)
            }
            Err(e) => {
                tracing::warn!(?e, %coordinates, "reverse geocoding failed");
                PlaceResult::Unavailable(Unavailable::LookupFailed)
            }
        }
    }
}
