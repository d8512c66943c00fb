//! Triangle demo application
//!
//! Opens an 800x600 window and draws a single green triangle on a teal
//! background until the window is closed or Escape is pressed.

use std::process::ExitCode;

use triangle_engine::foundation::logging;
use triangle_engine::prelude::*;

fn main() -> ExitCode {
    let config = StartupConfig::default();

    // Initialize logging
    logging::init(&config.engine);

    log::info!("Starting triangle demo");

    let result = Engine::run(config);

    match &result {
        Ok(stats) => {
            log::info!("Triangle demo completed after {} frames", stats.frames);
        }
        Err(e) => {
            log::debug!("Triangle demo failed: {:?}", e);
        }
    }

    ExitCode::from(exit_status(&result))
}
