//! Domain Layer - Pure selection logic with no I/O
//!
//! This module contains:
//! - Multiaddr parsing and dotted-quad validation
//! - Geographic coordinates and haversine distance
//! - Provider records, candidates and piece-size filtering
//! - The nearest-candidate reduction (strict less-than, first seen wins)

pub mod address;
pub mod candidate;
pub mod config;
pub mod coordinate;
pub mod errors;
pub mod nearest;

pub use address::*;
pub use candidate::*;
pub use config::*;
pub use coordinate::*;
pub use errors::*;
pub use nearest::*;
