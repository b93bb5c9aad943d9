//! Featured read-more toolkit.
//!
//! Two independent flows share one crate: the editor-facing post selection
//! engine with its persisted block attributes and static fragment renderer,
//! and an audit CLI that searches published posts for occurrences of the
//! block within a date range.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
