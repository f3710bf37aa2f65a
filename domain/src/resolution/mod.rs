//! Entity resolution domain logic: records, normalization, validation,
//! merge rules and host canonicalization.

pub mod candidate;
pub mod canonical;
pub mod host;
pub mod integrity;
pub mod merge;
pub mod normalize;

pub use candidate::CandidateRecord;
pub use canonical::CanonicalRecord;
