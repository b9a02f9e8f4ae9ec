pub mod cli;
pub mod events;
