//! Modules layer - Adapters between the core and the outside world
//!
//! The terminal adapter answers the core's prompt capabilities from stdin.

pub mod terminal;
