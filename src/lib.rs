pub mod commands;
pub mod config;
pub mod degradation;
pub mod fs;
pub mod git;
pub mod plan;
pub mod process;
pub mod providers;
pub mod verify;
