//! Application use cases.

pub mod merge_record;
pub mod resolve_company;
pub mod web_fallback;
