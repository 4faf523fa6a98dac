//! Accelerated AES-128 block primitive backed by OpenSSL (Cargo
//! feature `openssl`).
//!
//! Exposes only the single-block ECB primitive rather than driving a
//! full AES-128-CTR `CipherCtx` per packet, so that `stream_cipher` can
//! build CTR/F8 atop it generically: both the portable and accelerated
//! candidates end up sharing one counter-mode implementation instead
//! of each hand-rolling their own.

use openssl::cipher::Cipher;
use openssl::cipher_ctx::CipherCtx;

use super::super::{BlockCipher, BlockCipherFactory};
use crate::error::{Error, Result};

pub(crate) struct AesOpensslFactory;

impl BlockCipherFactory for AesOpensslFactory {
    fn name(&self) -> &'static str {
        "aes-openssl"
    }

    fn create(&self, key: &[u8]) -> Result<Box<dyn BlockCipher>> {
        let mut ctx = CipherCtx::new()
            .map_err(|e| Error::PrimitiveInitFailure("aes-openssl", e.to_string()))?;
        ctx.encrypt_init(Some(Cipher::aes_128_ecb()), Some(key), None)
            .map_err(|e| Error::PrimitiveInitFailure("aes-openssl", e.to_string()))?;
        ctx.set_padding(false);
        Ok(Box::new(OpensslAesBlockCipher { ctx }))
    }
}

struct OpensslAesBlockCipher {
    ctx: CipherCtx,
}

impl BlockCipher for OpensslAesBlockCipher {
    fn process_block(&mut self, input: &[u8], output: &mut [u8]) {
        let mut buf = [0u8; 32];
        let written = self
            .ctx
            .cipher_update(input, Some(&mut buf))
            .expect("single-block ECB update cannot fail");
        output[..16].copy_from_slice(&buf[..16]);
        debug_assert_eq!(written, 16);
    }

    fn reset(&mut self) {
        // ECB has no chaining state to reset between blocks.
    }
}
