//! Backend services.

pub mod clipboard;
pub mod toast;
