//! desorb-core: shared foundation for the desorption data-reduction workspace.
//!
//! Contains:
//! - constants (column geometry, molar masses, water density)
//! - units (uom length type for display)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use constants::PhysicalConstants;
pub use error::{CoreError, CoreResult};
pub use numeric::*;
