pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod preview;

// Unit test modules only
#[cfg(test)]
mod config_tests;

#[cfg(test)]
mod commands_tests;
