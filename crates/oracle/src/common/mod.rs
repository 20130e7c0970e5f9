//! Common utilities and types used throughout the prefetch engine.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Address Types:** A strong physical address type with block alignment helpers.
//! 2. **Constants:** Tick type, the "never" sentinel, and default geometry.
//! 3. **Error Handling:** Typed errors for trace loading, line parsing, and configuration.

/// Physical address type and block arithmetic.
pub mod addr;

/// Tick type and engine-wide constants.
pub mod constants;

/// Error types for trace loading, parsing, and configuration.
pub mod error;

pub use addr::PhysAddr;
pub use constants::{MAX_TICK, Tick};
pub use error::{ConfigError, ParseError, PrefetchError, TraceError};
