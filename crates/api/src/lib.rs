pub mod error;
pub mod index;
pub mod models;

// Re-export commonly used types
pub use error::{IndexError, IndexResult};
pub use index::{ANY_SIGNATURE, SupertypeWalk, TypeIndex, TypeIndexExt};
pub use models::*;
