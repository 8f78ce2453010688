#![cfg_attr(not(test), no_std)]

//! pico_settings - Runtime settings registry for the pico_trail flight controller
//!
//! This library exposes the generated settings tables by name, type, bounds and
//! storage location, and serves them to the MSP configurator protocol and the
//! serial console.

// Logging macros, declared first so every module can use them
pub mod logging;

// Table installation, value access, profiles, persistence
pub mod settings;

// MSP settings commands
pub mod communication;

// Text console (get/set)
pub mod console;
