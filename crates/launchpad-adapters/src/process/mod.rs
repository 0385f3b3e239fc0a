//! Process adapters.

mod recording;
mod runner;

pub use recording::RecordingRunner;
pub use runner::ProcessRunner;
