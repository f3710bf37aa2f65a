//! Logo download and storage adapters

mod clearbit;
mod file_store;

pub use clearbit::ClearbitLogoFetcher;
pub use file_store::FileImageStore;
