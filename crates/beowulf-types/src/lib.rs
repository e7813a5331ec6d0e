//! Core types for the Beowulf blockchain.
//!
//! This crate provides the foundational types used across all Beowulf crates:
//! network constants, monetary assets, wire timestamps, authorities, the
//! polymorphic operation model, and the transaction container.

pub mod asset;
pub mod authority;
pub mod constants;
pub mod operation;
pub mod ops;
pub mod time;
pub mod transaction;

pub use asset::Asset;
pub use authority::Authority;
pub use constants::Network;
pub use operation::{OpKind, Operation};
pub use time::TimePoint;
pub use transaction::{Extension, Transaction};
