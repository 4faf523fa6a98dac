//! Interchangeable implementations of the block cipher and keyed-MAC
//! primitives SRTP builds on, plus the benchmark-driven
//! algorithm-agility layer that elects between them.

pub(crate) mod block;
pub(crate) mod mac;
mod selector;

use crate::error::Result;
use crate::policy::AuthenticationType;

pub use selector::{reset_selection_for_test, BenchmarkOutcome};

/// Sets the process-wide AES provider preference hint
/// (`aes_provider_preference`). Affects every future selection.
pub(crate) fn set_aes_provider_preference(name: &str) {
    selector::aes_selector().set_preference(name);
}

/// Result of the most recent AES provider benchmark-driven election,
/// if one has run yet.
pub fn aes_benchmark_outcome() -> Option<BenchmarkOutcome> {
    selector::aes_selector().last_outcome()
}

/// A single-block (128-bit) cipher primitive.
///
/// After `init`, each call to `process_block` consumes exactly one
/// 16-byte block and writes exactly one 16-byte block. `reset` returns
/// the cipher to its just-initialized state without re-keying.
pub(crate) trait BlockCipher: Send {
    fn block_size(&self) -> usize {
        16
    }
    fn process_block(&mut self, input: &[u8], output: &mut [u8]);
    fn reset(&mut self);
}

/// A factory that can construct a keyed `BlockCipher`, used as one
/// candidate in the algorithm-agility benchmark.
pub(crate) trait BlockCipherFactory: Send + Sync {
    fn name(&self) -> &'static str;
    fn create(&self, key: &[u8]) -> Result<Box<dyn BlockCipher>>;
}

/// A keyed message authentication code.
///
/// `mac_size()` is constant once the Mac is constructed. `finalize`
/// leaves the Mac re-initialized with the same key, ready for the next
/// message, mirroring `hmac::Mac::finalize_reset`.
pub(crate) trait Mac: Send {
    fn mac_size(&self) -> usize;
    fn update(&mut self, data: &[u8]);
    fn finalize_into(&mut self, out: &mut [u8]);
}

/// Construct a keyed AES-128 block cipher, using whichever candidate
/// implementation the algorithm-agility layer has elected.
pub(crate) fn create_aes_block_cipher(key: &[u8]) -> Result<Box<dyn BlockCipher>> {
    selector::aes_selector().create(key)
}

/// Construct a keyed Twofish-128 block cipher (a non-standard optional suite).
#[cfg(feature = "twofish")]
pub(crate) fn create_twofish_block_cipher(key: &[u8]) -> Result<Box<dyn BlockCipher>> {
    block::twofish_portable::TwofishFactory.create(key)
}

/// Construct a keyed Mac for the given authentication type.
pub(crate) fn create_mac(auth_type: AuthenticationType, key: &[u8]) -> Result<Box<dyn Mac>> {
    match auth_type {
        AuthenticationType::Null => Ok(Box::new(mac::null::NullMac)),
        AuthenticationType::HmacSha1 => Ok(Box::new(mac::hmac_sha1::HmacSha1Mac::new(key)?)),
        #[cfg(feature = "skein-mac")]
        AuthenticationType::SkeinMac => Ok(Box::new(mac::skein_mac::SkeinMac::new(key)?)),
        #[cfg(not(feature = "skein-mac"))]
        AuthenticationType::SkeinMac => Err(crate::error::Error::Other(
            "Skein-MAC support was not compiled in (enable the `skein-mac` feature)".into(),
        )),
    }
}
