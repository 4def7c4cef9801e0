//! Test doubles for the view collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pinpoint_locate::geocoding::{Error, ReverseFuture};
use pinpoint_locate::{Address, Coordinates, Geocoder, PositionSource};

use crate::keyboard::Keyboard;
use crate::map::{MapWidget, Placement, DEFAULT_ZOOM};
use crate::router::Router;
use crate::screen::Screen;
use crate::views::Context;

pub const MAP_DRAWING: &str = "<map>";

/// What the scripted geocoder answers.
#[derive(Clone)]
pub enum Answer {
    Address(Address),
    Nothing,
    Failure,
}

#[derive(Clone)]
pub struct ScriptedGeocoder {
    answer: Answer,
    calls: Arc<AtomicUsize>,
}

impl ScriptedGeocoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for ScriptedGeocoder {
    fn reverse_geocode(&self, _coordinates: Coordinates) -> ReverseFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result: exn::Result<Option<Address>, Error> = match &self.answer {
            Answer::Address(address) => Ok(Some(address.clone())),
            Answer::Nothing => Ok(None),
            Answer::Failure => Err(Error::new("HTTP 503").into()),
        };
        Box::pin(async move { result })
    }
}

#[derive(Clone, Default)]
pub struct CountingMap {
    draws: Arc<AtomicUsize>,
}

impl CountingMap {
    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

impl MapWidget for CountingMap {
    fn draw(&self, _placement: &Placement) -> String {
        self.draws.fetch_add(1, Ordering::SeqCst);
        MAP_DRAWING.to_owned()
    }
}

#[derive(Default)]
struct Recorded {
    frames: Vec<String>,
    alerts: Vec<String>,
}

#[derive(Clone, Default)]
pub struct RecordingScreen {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingScreen {
    pub fn frames(&self) -> Vec<String> {
        self.recorded.lock().unwrap().frames.clone()
    }

    pub fn last_frame(&self) -> Option<String> {
        self.recorded.lock().unwrap().frames.last().cloned()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.recorded.lock().unwrap().alerts.clone()
    }
}

impl Screen for RecordingScreen {
    fn alert(&self, message: &str) {
        self.recorded.lock().unwrap().alerts.push(message.to_owned());
    }

    fn render(&self, frame: &str) {
        self.recorded.lock().unwrap().frames.push(frame.to_owned());
    }
}

/// A view context wired to test doubles, plus handles to inspect them.
pub struct Harness {
    pub ctx: Context,
    pub router: Router,
    pub geocoder: ScriptedGeocoder,
    pub map: CountingMap,
    pub screen: RecordingScreen,
}

pub fn harness(positions: impl PositionSource, answer: Answer) -> Harness {
    let (router, navigator) = Router::new();
    let geocoder = ScriptedGeocoder {
        answer,
        calls: Arc::default(),
    };
    let map = CountingMap::default();
    let screen = RecordingScreen::default();
    let ctx = Context {
        positions: Box::new(positions),
        geocoder: Box::new(geocoder.clone()),
        map: Box::new(map.clone()),
        screen: Box::new(screen.clone()),
        keyboard: Keyboard::new(),
        navigator,
        acquire_timeout: None,
        zoom: DEFAULT_ZOOM,
    };
    Harness {
        ctx,
        router,
        geocoder,
        map,
        screen,
    }
}
