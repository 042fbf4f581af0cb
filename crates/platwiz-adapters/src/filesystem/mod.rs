//! [`Filesystem`](platwiz_core::application::Filesystem) implementations:
//! the real disk, and an in-memory tree for dry runs and tests.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
