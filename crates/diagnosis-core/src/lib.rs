pub mod error;
pub mod handoff;
pub mod report;
pub mod store;
pub mod types;

#[cfg(feature = "flip")]
pub mod flip;

#[cfg(feature = "subsidy")]
pub mod subsidy;

#[cfg(feature = "kominka")]
pub mod kominka;

#[cfg(feature = "legacy")]
pub mod legacy;

pub use error::DiagnosisError;
pub use handoff::{Brand, DiagnosisRecord};
pub use store::{FileStore, MemoryStore, ResultStore, STORAGE_KEY};
pub use types::*;

/// Standard result type for all diagnosis operations
pub type DiagnosisResult<T> = Result<T, DiagnosisError>;
