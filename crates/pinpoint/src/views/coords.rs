use pinpoint_locate::{Acquirer, AcquisitionState};

use super::Context;

const FAILURE_ALERT: &str = "Couldn't fetch GPS coordinates.";

/// Shows the raw latitude and longitude from its own acquisition.
pub struct CoordsView<'a> {
    ctx: &'a Context,
    acquirer: Acquirer<'a>,
}

impl<'a> CoordsView<'a> {
    pub fn mount(ctx: &'a Context) -> Self {
        tracing::info!("coordinates view mounted");
        let view = Self {
            ctx,
            acquirer: ctx.acquirer(),
        };
        view.render();
        view
    }

    #[must_use]
    pub const fn state(&self) -> &AcquisitionState {
        self.acquirer.state()
    }

    pub async fn run(&mut self) {
        if self.acquirer.state().is_terminal() {
            return;
        }
        if let AcquisitionState::Failed(_) = self.acquirer.acquire().await {
            self.ctx.screen.alert(FAILURE_ALERT);
        }
        self.render();
    }

    #[must_use]
    pub fn frame(&self) -> String {
        match self.acquirer.state() {
            AcquisitionState::NotStarted | AcquisitionState::Pending => {
                "Loading coordinates...".to_owned()
            }
            AcquisitionState::Succeeded(coordinates) => format!(
                "\u{1f4cd} Your GPS Coordinates:\nLatitude: {}\nLongitude: {}",
                coordinates.latitude, coordinates.longitude
            ),
            AcquisitionState::Failed(e) => format!("Coordinates not available ({e})"),
        }
    }

    fn render(&self) {
        self.ctx.screen.render(&self.frame());
    }
}

impl Drop for CoordsView<'_> {
    fn drop(&mut self) {
        tracing::info!("coordinates view unmounted");
    }
}
