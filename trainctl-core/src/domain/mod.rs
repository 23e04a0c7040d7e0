//! Core domain types
//!
//! These types describe the training job as the console sees it. They are
//! shared between the HTTP client (which decodes them) and the console
//! (which projects them onto the rendering surface).

pub mod catalog;
pub mod control;
pub mod status;
pub mod video;
