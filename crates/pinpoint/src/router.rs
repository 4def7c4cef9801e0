use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

/// The screens the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`: map with the resolved place name.
    Map,
    /// `/coords`: raw latitude and longitude.
    Coords,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Map => "/",
            Self::Coords => "/coords",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug)]
pub struct UnknownRoute(String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown route {:?}, expected \"/\" or \"/coords\"", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('/') {
            "" => Ok(Self::Map),
            "/coords" => Ok(Self::Coords),
            _ => Err(UnknownRoute(s.to_owned())),
        }
    }
}

/// Requests a view switch. Cheap to clone; handed to key observers.
#[derive(Clone)]
pub struct Navigator {
    tx: async_channel::Sender<Route>,
}

impl Navigator {
    pub fn navigate(&self, route: Route) {
        tracing::info!(%route, "navigation requested");
        if self.tx.try_send(route).is_err() {
            tracing::warn!(%route, "router is gone, navigation dropped");
        }
    }
}

/// Receiving end of navigation requests; tracks the active route.
pub struct Router {
    rx: async_channel::Receiver<Route>,
    current: Mutex<Option<Route>>,
}

impl Router {
    #[must_use]
    pub fn new() -> (Self, Navigator) {
        let (tx, rx) = async_channel::unbounded();
        let router = Self {
            rx,
            current: Mutex::new(None),
        };
        (router, Navigator { tx })
    }

    /// The route whose view is mounted, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        *self.current.lock().expect("poisoned")
    }

    /// Record that the view for `route` is now mounted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn enter(&self, route: Route) {
        *self.current.lock().expect("poisoned") = Some(route);
    }

    /// Wait for a navigation to a route other than the current one.
    ///
    /// Requests for the active route are discarded. Returns `None` once
    /// every [`Navigator`] has been dropped.
    pub async fn next_change(&self) -> Option<Route> {
        loop {
            let route = self.rx.recv().await.ok()?;
            if self.current() == Some(route) {
                tracing::debug!(%route, "already active, navigation ignored");
                continue;
            }
            return Some(route);
        }
    }
}
