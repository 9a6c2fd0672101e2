#[macro_use]
extern crate serde_derive;

use std::process;

use anyhow::Result;
use log::{debug, error};

use crate::config::Config;
use crate::engine::Engine;
use crate::frame::Exit;
use crate::logging::init_logging;

#[macro_use]
mod glerror;

mod config;
mod engine;
mod event;
mod frame;
mod logging;
mod platform;
mod renderer;
mod shader;
mod vertex;

const CONFIG_PATH: &str = "eng.json";

fn run() -> Result<()> {
    let config = Config::load(CONFIG_PATH)?;
    init_logging(config.log_filter.as_deref());
    debug!("{:?}", config);

    let mut engine = Engine::new(&config)?;

    match frame::run(&mut engine, &config.vertex_file) {
        Exit::Quit => debug!("quit requested"),
        Exit::DataUnavailable(..) => debug!("stopped, vertex data unavailable"),
    }

    engine.shutdown(config.shutdown_delay_ms);

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // The config may have failed before the logger was set up.
        init_logging(None);
        error!("{:#}", err);
        process::exit(1);
    }
}
