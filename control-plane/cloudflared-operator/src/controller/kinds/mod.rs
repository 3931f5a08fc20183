pub mod descriptor;
pub mod descriptors_builtin;

pub use descriptor::KindDescriptor;
pub use descriptors_builtin::descriptor_for;
