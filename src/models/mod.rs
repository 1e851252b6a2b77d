//! Data models for the link deck.

pub mod link;

pub use link::{Link, LinkList};
