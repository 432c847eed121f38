#![deny(unsafe_code)]
//! Core types for the lowpoly triangle pattern generator.
//!
//! Provides the [`RandomSource`] capability with its seeded [`Mulberry32`]
//! and unseeded [`ThreadRandom`] implementations, the displaced-grid
//! generator ([`generate`], [`triangulate`]), the [`GenerationParameters`]
//! recipe, [`Palette`] and [`Srgb`] colors, and the [`PatternError`] type.

pub mod color;
pub mod config;
pub mod error;
pub mod palette;
pub mod params;
pub mod pattern;
pub mod prng;

pub use color::Srgb;
pub use config::GenerationParameters;
pub use error::PatternError;
pub use palette::Palette;
pub use pattern::{generate, generate_with, triangulate, Diagonal, GridPoint, Lattice, Triangle};
pub use prng::{Mulberry32, RandomSource, ThreadRandom};
