//! Generation - starting population for every entity collection.
//!
//! Structure is fixed; values are drawn inside fixed ranges, so generated
//! entities always satisfy their invariants.

mod ambulances;
mod departments;
mod equipment;
mod predictions;

pub use ambulances::*;
pub use departments::*;
pub use equipment::*;
pub use predictions::*;
