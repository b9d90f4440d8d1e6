//! # Voxel World Entry Point
//!
//! Calls into the library's `run()` function, which generates a world and
//! executes session commands read from stdin.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json] < commands.txt
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match voxel_world::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
