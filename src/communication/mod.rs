//! Communication Protocols
//!
//! # Protocols
//!
//! - **MSP v2**: Configurator access to the settings registry
//!   - Setting enumeration and metadata (`MSP2_COMMON_SETTING_INFO`)
//!   - Value read/write by name or index
//!   - Parameter group listing (`MSP2_COMMON_PG_LIST`)

pub mod msp;
