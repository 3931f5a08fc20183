pub mod defaults;
pub mod render;
pub mod workload;

pub use defaults::{DEFAULT_APP_NAME, DEFAULT_IMAGE, WorkloadDefaults};
pub use render::{DeriveError, derive_parts, owner_ref};
pub use workload::{ManagedWorkload, WorkloadParts};

#[cfg(test)]
mod render_tests;
