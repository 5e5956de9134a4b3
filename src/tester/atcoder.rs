pub mod error;
pub mod problem;
mod retry;
pub mod sample;
pub mod session;

pub use error::{Error, Kind, Result};
pub use sample::Markers;
pub use session::Session;
