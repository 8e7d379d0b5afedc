//! Adapter implementations for the port traits.
//!
//! `live` speaks to the real services (HTTP task API, system clock,
//! console); `memory` provides deterministic in-process substitutes used
//! by tests and by demo mode.

pub mod live;
pub mod memory;
