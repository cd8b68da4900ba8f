pub mod outcome;
pub mod signature;
pub mod types;

pub use outcome::*;
pub use signature::*;
pub use types::*;
