//! Web search provider adapters

mod tavily;

pub use tavily::TavilySearch;
