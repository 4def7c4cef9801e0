pub mod coords;
pub mod map;

use std::time::Duration;

use pinpoint_locate::{Acquirer, Geocoder, PositionSource};

use crate::keyboard::Keyboard;
use crate::map::MapWidget;
use crate::router::Navigator;
use crate::screen::Screen;

/// Collaborators shared by every view.
///
/// Views borrow the context while mounted; all per-view state (acquisition,
/// place, key listener) lives in the view itself and dies with it.
pub struct Context {
    pub positions: Box<dyn PositionSource>,
    pub geocoder: Box<dyn Geocoder>,
    pub map: Box<dyn MapWidget>,
    pub screen: Box<dyn Screen>,
    pub keyboard: Keyboard,
    pub navigator: Navigator,
    pub acquire_timeout: Option<Duration>,
    pub zoom: u8,
}

impl Context {
    /// A fresh acquirer; each view activation gets its own.
    #[must_use]
    pub fn acquirer(&self) -> Acquirer<'_> {
        let acquirer = Acquirer::new(self.positions.as_ref());
        match self.acquire_timeout {
            Some(timeout) => acquirer.with_timeout(timeout),
            None => acquirer,
        }
    }
}
