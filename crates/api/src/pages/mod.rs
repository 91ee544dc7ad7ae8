//! Server-rendered HTML pages.

pub mod attributes;
