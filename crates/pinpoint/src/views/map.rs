use std::fmt::Write as _;

use pinpoint_locate::{
    AcquisitionState, Coordinates, LocationError, PlaceResolver, PlaceResult, Unavailable,
};

use crate::keyboard::{Key, Listener};
use crate::map::Placement;
use crate::router::Route;

use super::Context;

/// Key that switches to the coordinates view.
pub const SWITCH_KEY: Key = Key::Enter;

const LOCATION_ALERT: &str = "Enable location access!";

/// Where the map view is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Initializing,
    AwaitingLocation,
    LocationFailed(LocationError),
    /// The map is drawn; the place label resolves on its own from here.
    LocationReady(Coordinates),
}

/// The default screen: a map around the device with the place name on top.
pub struct MapView<'a> {
    ctx: &'a Context,
    phase: Phase,
    place: PlaceResult,
    drawing: Option<String>,
    _switch: Listener,
}

impl<'a> MapView<'a> {
    /// Attach the view-switch key observer and show the initial frame.
    ///
    /// The observer is released when the view is dropped, however that
    /// happens.
    pub fn mount(ctx: &'a Context) -> Self {
        let navigator = ctx.navigator.clone();
        let switch = ctx
            .keyboard
            .listen(SWITCH_KEY, move || navigator.navigate(Route::Coords));
        tracing::info!("map view mounted");

        let view = Self {
            ctx,
            phase: Phase::Initializing,
            place: PlaceResult::Unresolved,
            drawing: None,
            _switch: switch,
        };
        view.render();
        view
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub const fn place(&self) -> &PlaceResult {
        &self.place
    }

    /// Acquire the position, draw the map and resolve the place name.
    ///
    /// Runs once; later calls return immediately.
    pub async fn run(&mut self) {
        if self.phase != Phase::Initializing {
            return;
        }
        self.phase = Phase::AwaitingLocation;
        self.render();

        let ctx = self.ctx;
        let mut acquirer = ctx.acquirer();
        match acquirer.acquire().await {
            AcquisitionState::Succeeded(coordinates) => {
                self.drawing = Some(ctx.map.draw(&Placement::pinned(coordinates, ctx.zoom)));
                self.phase = Phase::LocationReady(coordinates);
                self.render();

                let place = PlaceResolver::new(ctx.geocoder.as_ref())
                    .resolve(coordinates)
                    .await;
                self.place.settle(place);
                self.render();
            }
            AcquisitionState::Failed(e) => {
                self.phase = Phase::LocationFailed(e);
                ctx.screen.alert(LOCATION_ALERT);
                self.place
                    .settle(PlaceResult::Unavailable(Unavailable::LocationUnavailable));
                self.render();
            }
            state => tracing::warn!(?state, "acquisition ended without an outcome"),
        }
    }

    #[must_use]
    pub fn frame(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Current Place: {}", place_label(&self.place));
        let _ = write!(out, "Press Enter to view your coordinates");
        match (&self.phase, &self.drawing) {
            (Phase::Initializing | Phase::AwaitingLocation, _) => {
                let _ = write!(out, "\n\nGetting your location...");
            }
            (Phase::LocationReady(_), Some(drawing)) => {
                let _ = write!(out, "\n\n{drawing}");
            }
            (Phase::LocationFailed(e), _) => {
                let _ = write!(out, "\n\nNo map: {e}");
            }
            (Phase::LocationReady(_), None) => {}
        }
        out
    }

    fn render(&self) {
        self.ctx.screen.render(&self.frame());
    }
}

impl Drop for MapView<'_> {
    fn drop(&mut self) {
        tracing::info!("map view unmounted");
    }
}

/// Text shown after "Current Place:".
#[must_use]
pub fn place_label(place: &PlaceResult) -> &str {
    match place {
        PlaceResult::Unresolved => "Fetching place...",
        PlaceResult::Resolved(name) => name,
        PlaceResult::Unavailable(Unavailable::NoAddressData | Unavailable::InvalidCoordinates) => {
            "Place not found"
        }
        PlaceResult::Unavailable(Unavailable::LookupFailed) => "Error fetching place",
        PlaceResult::Unavailable(Unavailable::LocationUnavailable) => "Location not available",
    }
}
