//! Zero-value strategies and registry for fieldjson.
//!
//! "Zero" is the canonical empty representation of a type: `""`, `0`,
//! `0.0`, `false`, an empty collection, or a registered custom empty
//! instance. The omit-when-empty marshal flag and null hydration both
//! route through this crate:
//! - [`ZeroState`]: per-type strategy answering "is this value zero"
//!   and producing a fresh zero instance
//! - [`ComparisonZeroState`] / [`StructuralZeroState`]: the two shipped
//!   strategies (prototype equality, structural emptiness)
//! - [`ZeroRegistry`]: the read-mostly, process-wide strategy table,
//!   substitutable per call for test isolation
//!
//! An unrecognized non-empty record is deliberately never zero: callers
//! rely on "omit only when provably empty".

mod registry;
mod state;

pub use registry::{
    is_zero_json, ZeroRegistry, ZERO_BOOLEAN, ZERO_FLOAT, ZERO_INTEGER, ZERO_STRING,
};
pub use state::{ComparisonZeroState, StructuralZeroState, ZeroState};
