use crate::templates::{ManagedWorkload, WorkloadParts};

/// Everything that differs between the workload kinds. The probe, derive and
/// create sequence is shared; only the concrete object built from the derived
/// parts depends on the kind.
#[derive(Clone, Copy)]
pub struct KindDescriptor {
    pub build: fn(WorkloadParts) -> ManagedWorkload,
}

impl std::fmt::Debug for KindDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindDescriptor").finish_non_exhaustive()
    }
}
