//! # revet-census
//!
//! Versioned organizational-role view ("census"): who a forge account maps
//! to inside the project, and which roles that person holds at a specific
//! census version.
//!
//! The census itself is maintained elsewhere; this crate only models the
//! read-only view one scheduling cycle resolves, plus the seam that does
//! the resolving. The bot's own service identity travels with the view so
//! nothing downstream reaches for ambient process-global state.

pub mod roles;
pub mod source;

pub use roles::{CensusSnapshot, Contributor, RoleFlags};
pub use source::{CensusContext, CensusError, CensusSource, FixedCensus};
