//! `ss-spatial` — per-tick spatial indexing of agent locations.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`index`] | `SpatialIndex` — R-tree (via `rstar`) rebuilt every tick      |
//!
//! Index queries have no failure modes: an empty population simply yields
//! empty results, so the crate has no error type.

pub mod index;


pub use index::SpatialIndex;
