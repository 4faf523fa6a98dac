//! A pure Rust SRTP/SRTCP cryptographic transform core (RFC 3711):
//! session key derivation, per-SSRC context management, packet-index
//! reconstruction, the sliding replay window, the CTR/F8 stream
//! ciphers, and the HMAC/Skein-MAC authentication pipeline.
//!
//! Key exchange, the media pipeline, FEC, and network I/O are external
//! collaborators — this crate only transforms packets already in
//! memory.

#[macro_use]
extern crate lazy_static;

mod config;
mod context;
mod error;
mod factory;
mod kdf;
mod packet;
mod policy;
mod primitive;
mod replay;
mod stream_cipher;
mod transformer;

pub use config::Config;
pub use error::{Error, Result};
pub use factory::{ContextFactory, MasterKeyMaterial};
pub use policy::{AuthenticationType, EncryptionType, Policy};
pub use primitive::{aes_benchmark_outcome, reset_selection_for_test, BenchmarkOutcome};
pub use transformer::Transformer;
