//! Per-SSRC cryptographic state shared by `SrtpContext` and
//! `SrtcpContext`: the keyed cipher/MAC pair plus the
//! little state machine ({UNINITIALIZED, KEYED, CLOSED}) both contexts
//! go through.

pub(crate) mod srtcp;
pub(crate) mod srtp;

use byteorder::{BigEndian, ByteOrder};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::policy::EncryptionType;
use crate::primitive::{create_aes_block_cipher, BlockCipher, Mac};
use crate::stream_cipher::{ctr, f8};

pub use srtcp::SrtcpContext;
pub use srtp::SrtpContext;

/// {UNINITIALIZED -> KEYED -> CLOSED}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContextState {
    Uninitialized,
    Keyed,
    Closed,
}

/// The keyed cipher/MAC pair for one context, plus the bookkeeping
/// F8-mode needs (an auxiliary cipher keyed with the masked key).
pub(crate) struct CipherSuite {
    enc_type: EncryptionType,
    cipher: Box<dyn BlockCipher>,
    f8_aux_cipher: Option<Box<dyn BlockCipher>>,
    mac: Box<dyn Mac>,
    /// Wire tag length (spec `Policy::auth_tag_length`), which may
    /// truncate the Mac's native `mac_size()` (e.g. HMAC-SHA1-32 keeps
    /// only the first 4 of HMAC-SHA1's 20 raw bytes).
    tag_len: usize,
}

impl CipherSuite {
    pub(crate) fn new(
        enc_type: EncryptionType,
        enc_key: &[u8],
        salt_key: &[u8],
        mac: Box<dyn Mac>,
        tag_len: usize,
    ) -> Result<Self> {
        let cipher = create_cipher(enc_type, enc_key)?;
        let f8_aux_cipher = match enc_type {
            EncryptionType::AesF8 | EncryptionType::TwofishF8 => {
                let masked = f8::masked_key(enc_key, salt_key);
                Some(create_cipher(enc_type, &masked)?)
            }
            _ => None,
        };
        Ok(CipherSuite {
            enc_type,
            cipher,
            f8_aux_cipher,
            mac,
            tag_len,
        })
    }

    /// Encrypts or decrypts `data` in place (the stream cipher
    /// constructions are XOR-symmetric). `header_first12`/`roc` are
    /// only consulted in F8 mode.
    pub(crate) fn crypt_in_place(
        &mut self,
        salt: &[u8],
        ssrc: u32,
        index48: u64,
        header_first12: &[u8; 12],
        roc: u32,
        data: &mut [u8],
    ) {
        match self.enc_type {
            EncryptionType::Null => {}
            EncryptionType::AesCm | EncryptionType::TwofishCm => {
                let iv = ctr::iv(salt, ssrc, index48);
                ctr::apply_keystream(self.cipher.as_mut(), &iv, data);
            }
            EncryptionType::AesF8 | EncryptionType::TwofishF8 => {
                let aux = self
                    .f8_aux_cipher
                    .as_mut()
                    .expect("F8 suite always has an auxiliary cipher");
                let iv_prime = f8::compute_iv_prime(aux.as_mut(), header_first12, roc);
                f8::apply_keystream(self.cipher.as_mut(), &iv_prime, data);
            }
        }
    }

    pub(crate) fn auth_tag_len(&self) -> usize {
        self.tag_len
    }

    /// Generates the authentication tag over `covered` (the packet
    /// bytes up to but not including the tag) plus an optional
    /// trailing 32-bit big-endian value (the ROC, for SRTP only),
    /// truncated to the policy's `auth_tag_length`.
    pub(crate) fn generate_tag(&mut self, covered: &[u8], trailing_be32: Option<u32>) -> Vec<u8> {
        self.mac.update(covered);
        if let Some(v) = trailing_be32 {
            let mut buf = [0u8; 4];
            BigEndian::write_u32(&mut buf, v);
            self.mac.update(&buf);
        }
        let mut full = vec![0u8; self.mac.mac_size()];
        self.mac.finalize_into(&mut full);
        full.truncate(self.tag_len);
        full
    }

    /// Verifies `actual_tag` against a freshly computed tag over the
    /// same input, in constant time.
    pub(crate) fn verify_tag(
        &mut self,
        covered: &[u8],
        trailing_be32: Option<u32>,
        actual_tag: &[u8],
    ) -> bool {
        let expected = self.generate_tag(covered, trailing_be32);
        expected.ct_eq(actual_tag).unwrap_u8() == 1
    }
}

fn create_cipher(enc_type: EncryptionType, key: &[u8]) -> Result<Box<dyn BlockCipher>> {
    match enc_type {
        EncryptionType::Null => create_aes_block_cipher(key),
        EncryptionType::AesCm | EncryptionType::AesF8 => create_aes_block_cipher(key),
        #[cfg(feature = "twofish")]
        EncryptionType::TwofishCm | EncryptionType::TwofishF8 => {
            crate::primitive::create_twofish_block_cipher(key)
        }
        #[cfg(not(feature = "twofish"))]
        EncryptionType::TwofishCm | EncryptionType::TwofishF8 => Err(Error::Other(
            "Twofish support was not compiled in (enable the `twofish` feature)".into(),
        )),
    }
}

/// Zeroes a key buffer in place with a wipe the optimizer cannot elide,
/// then drops it to an empty `Vec`.
pub(crate) fn wipe(buf: &mut Vec<u8>) {
    buf.zeroize();
    buf.clear();
}
