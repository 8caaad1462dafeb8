//! dps-core: shared foundation for the dynamic process simulator.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers + raw entry parsing)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{DpsError, DpsResult};
pub use numeric::*;
