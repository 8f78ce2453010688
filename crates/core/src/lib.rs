//! pico_settings_core - Pure no_std settings registry logic
//!
//! This crate contains the platform-agnostic half of the settings registry:
//! the generated descriptor tables and everything needed to decode, look up,
//! bound-check and locate a setting without touching hardware.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (ProfileSource)
//! - [`settings`]: Word dictionary, name codec, descriptor tables, parameter
//!   group registry and value locator

#![no_std]

pub mod settings;
pub mod traits;
