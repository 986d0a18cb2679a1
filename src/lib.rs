//! Data products of a particle-detector reconstruction chain: reconstructed
//! signal hits and simulated optical photons.
//!
//! The types in this crate are plain values. They are produced and consumed
//! by reconstruction and simulation code elsewhere; here they only store
//! their quantities, order themselves and merge with each other.

/// Geometry tags and identifiers shared with the detector description.
pub mod geo;
/// Reconstructed signal hits.
pub mod hit;
/// Simulated optical photon containers.
pub mod photons;
/// Readout channel and time sample types.
pub mod raw;
