use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::config::RemoteSettings;

use super::client::StoreClient;
use super::error::GatewayResult;
use super::thread::spawn_remote_thread;
use super::types::{RemoteCmd, RemoteEvent};

// Requests carry no timeout by default, so a hung call could block exit forever.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(300);

/// Handle to the remote worker thread.
pub struct RemoteGateway {
    tx: Sender<RemoteCmd>,
    events: Receiver<RemoteEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RemoteGateway {
    pub fn spawn(settings: &RemoteSettings) -> GatewayResult<Self> {
        let client = StoreClient::new(settings)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: StoreClient) -> Self {
        let (tx, rx) = mpsc::channel::<RemoteCmd>();
        let (event_tx, event_rx) = mpsc::channel::<RemoteEvent>();
        let join = spawn_remote_thread(client, rx, event_tx);

        Self {
            tx,
            events: event_rx,
            join: Mutex::new(Some(join)),
        }
    }

    /// Queue a command. Its outcome arrives later through `try_recv`.
    pub fn send(&self, cmd: RemoteCmd) -> Result<(), mpsc::SendError<RemoteCmd>> {
        self.tx.send(cmd)
    }

    /// Next completed operation, if any, without blocking.
    pub fn try_recv(&self) -> Option<RemoteEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the worker. Waits briefly for it to finish; an in-flight request
    /// past the grace period is abandoned.
    pub fn shutdown(&self) {
        let _ = self.send(RemoteCmd::Quit);

        let Ok(mut j) = self.join.lock() else {
            return;
        };
        let Some(handle) = j.take() else {
            return;
        };

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        if handle.is_finished() {
            let _ = handle.join();
        } else {
            warn!("remote worker still busy at shutdown; detaching");
        }
    }
}
