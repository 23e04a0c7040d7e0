//! Data Transfer Objects for the training server API
//!
//! Wire representations of requests and responses. Domain code converts
//! these into the types in [`crate::domain`] at the client boundary.

pub mod training;
