//! Trainctl Core
//!
//! Core types shared by the trainctl client and console.
//!
//! This crate contains:
//! - Domain types: job status, control projection, videos, training catalog
//! - DTOs: wire shapes exchanged with the training server

pub mod domain;
pub mod dto;
