use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;

use tracing::{info, warn};

use super::client::StoreClient;
use super::types::{RemoteCmd, RemoteEvent};

/// Run store requests one at a time, in the order they were issued, and
/// report each outcome on `events`.
pub(super) fn spawn_remote_thread(
    client: StoreClient,
    rx: Receiver<RemoteCmd>,
    events: Sender<RemoteEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        info!(base = %client.base(), "remote worker started");

        while let Ok(cmd) = rx.recv() {
            let event = match cmd {
                RemoteCmd::Quit => break,
                RemoteCmd::FetchAll => RemoteEvent::Fetched(client.fetch_all()),
                RemoteCmd::Search(filter) => {
                    RemoteEvent::Searched(client.fetch_filtered(&filter))
                }
                RemoteCmd::Create { local_id, record } => RemoteEvent::Created {
                    local_id,
                    result: client.create(&record),
                },
                RemoteCmd::Remove { id } => {
                    let result = client.remove(&id);
                    RemoteEvent::Removed { id, result }
                }
                RemoteCmd::Update { id, patch } => {
                    let result = client.update(&id, &patch);
                    RemoteEvent::Updated { id, result }
                }
            };

            log_outcome(&event);

            // UI side is gone; nobody is left to apply the result.
            if events.send(event).is_err() {
                break;
            }
        }

        info!("remote worker stopped");
    })
}

fn log_outcome(event: &RemoteEvent) {
    match event {
        RemoteEvent::Fetched(Ok(records)) => info!(count = records.len(), "fetched songs"),
        RemoteEvent::Fetched(Err(e)) => warn!(error = %e, "fetch failed"),
        RemoteEvent::Searched(Ok(records)) => info!(count = records.len(), "search returned"),
        RemoteEvent::Searched(Err(e)) => warn!(error = %e, "search failed"),
        RemoteEvent::Created { local_id, result } => match result {
            Ok(rec) => info!(%local_id, record = ?rec, "song created"),
            Err(e) => warn!(%local_id, error = %e, "create failed"),
        },
        RemoteEvent::Removed { id, result } => match result {
            Ok(()) => info!(%id, "song deleted"),
            Err(e) => warn!(%id, error = %e, "delete failed"),
        },
        RemoteEvent::Updated { id, result } => match result {
            Ok(rec) => info!(%id, record = ?rec, "song updated"),
            Err(e) => warn!(%id, error = %e, "update failed"),
        },
    }
}
