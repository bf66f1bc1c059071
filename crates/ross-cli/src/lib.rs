//! Command-line front end for the ROSS 1000 validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
