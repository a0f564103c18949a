//! Systems - tick processors that turn one collection into its next value

mod ambulances;
mod beds;
mod derivation;
mod equipment;
mod patient_flow;
mod predictions;

pub use ambulances::*;
pub use beds::*;
pub use derivation::*;
pub use equipment::*;
pub use patient_flow::*;
pub use predictions::*;
