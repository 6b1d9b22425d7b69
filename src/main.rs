mod app;
mod board;
mod config;
mod present;
mod remote;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
