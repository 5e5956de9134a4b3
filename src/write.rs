extern crate termcolor;

use std::fmt::Display;
use termcolor::StandardStream;

/// Prints a fatal error and gives up on the value.
pub fn report<T, E: Display>(stdout: &mut StandardStream, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            write_error!(stdout, "Error", "{}", e);
            None
        }
    }
}
