//! `userdeck-gui`: launches the desktop client.

use std::fmt::Display;
use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(exit_status(userdeck_gui::run()))
}

/// Prints a launch failure to stderr and maps it to a non-zero status.
fn exit_status<E: Display>(result: Result<(), E>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("userdeck-gui: {}", err);
            1
        }
    }
}
