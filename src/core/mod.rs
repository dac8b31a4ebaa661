//! Core application primitives (schedulers)

pub mod scheduler;

pub use scheduler::*;
