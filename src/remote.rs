//! Remote gateway: talks to the JSON song collection over HTTP.
//!
//! `remote::client` performs the blocking requests, `remote::thread` runs them
//! off the UI thread, and `RemoteGateway` is the handle the runtime holds.
//! Commands go in as `RemoteCmd`, outcomes come back as `RemoteEvent`.

mod client;
mod error;
mod gateway;
mod thread;
mod types;

pub use client::*;
pub use error::*;
pub use gateway::*;
pub use types::*;
