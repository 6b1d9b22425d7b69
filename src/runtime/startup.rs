use tracing::{info, warn};

use crate::app::App;
use crate::remote::RemoteGateway;

/// Kick off the initial collection fetch. The list shows the loading text
/// until it completes.
pub fn request_initial_load(app: &mut App, gateway: &RemoteGateway) {
    info!("loading songs");
    if gateway.send(app.reload()).is_err() {
        warn!("remote worker is gone; initial load not sent");
    }
    app.rerender();
}
