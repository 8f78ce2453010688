//! Core traits for platform-agnostic settings access.
//!
//! This module provides trait abstractions that decouple the settings registry
//! from the firmware services it depends on.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations live in the firmware crate

pub mod profile;

pub use profile::{MockProfile, ProfileSource};
