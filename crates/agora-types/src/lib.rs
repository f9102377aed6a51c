//! Agora Types - Identifiers shared by the voting engine and its hosts.
//!
//! This crate provides:
//! - Addresses (20-byte principal IDs, Bech32m or hex encoded)
//! - The error type for parsing them

pub mod address;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use error::TypesError;
