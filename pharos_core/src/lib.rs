// pharos_core/src/lib.rs

// This file defines the public modules of your library.
pub mod agent;
pub mod constraints;
pub mod error;
pub mod estimation;
pub mod planner;
pub mod prelude;
pub mod types;
