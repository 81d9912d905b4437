// pharos_sim/src/lib.rs

// This file defines the public modules of the simulation crate.
pub mod cli;
pub mod config;
pub mod error;
pub mod experiment;
pub mod runner;
pub mod sensors;
