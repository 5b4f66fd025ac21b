//! Command handlers for CLI operations

pub mod poll_once;
pub mod serve;

pub use poll_once::PollOnceCommandHandler;
pub use serve::ServeCommandHandler;
