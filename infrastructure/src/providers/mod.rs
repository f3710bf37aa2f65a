//! Chat completion provider adapters

mod http_chat;

pub use http_chat::HttpChatCompleter;
