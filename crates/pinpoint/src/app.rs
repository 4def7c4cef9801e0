use futures_lite::future;

use crate::router::{Route, Router};
use crate::views::coords::CoordsView;
use crate::views::map::{MapView, Phase};
use crate::views::Context;

/// Show views, starting with `start`, switching whenever the router asks.
///
/// Exactly one view is mounted at a time. Switching drops the active view,
/// which releases its key observer and abandons any lookup still in flight.
/// Returns once the keyboard is closed and the active view has settled, or
/// when no navigator is left to request a switch.
pub async fn run(ctx: &Context, router: &Router, start: Route) {
    let mut route = start;
    loop {
        router.enter(route);
        tracing::info!(%route, listeners = ctx.keyboard.listeners(), "view active");
        let next = future::or(present(ctx, route), router.next_change()).await;
        let Some(next) = next else {
            tracing::info!(%route, "session over");
            return;
        };
        route = next;
    }
}

/// Mount the view for `route` and keep it mounted until the keyboard is
/// closed, then resolve to `None`.
async fn present(ctx: &Context, route: Route) -> Option<Route> {
    match route {
        Route::Map => {
            let mut view = MapView::mount(ctx);
            view.run().await;
            match view.phase() {
                Phase::LocationReady(coordinates) => {
                    tracing::debug!(%coordinates, place = ?view.place(), "map view settled");
                }
                phase => tracing::debug!(?phase, "map view settled"),
            }
            ctx.keyboard.closed().await;
            None
        }
        Route::Coords => {
            let mut view = CoordsView::mount(ctx);
            view.run().await;
            tracing::debug!(state = ?view.state(), "coordinates view settled");
            ctx.keyboard.closed().await;
            None
        }
    }
}
