//! Domain reducers called from `update.rs`.
//!
//! `chat` owns the conversation, the request lifecycle and the execution
//! details; `flow` owns graph editing and the canvas viewport.

pub mod chat;
pub mod flow;
