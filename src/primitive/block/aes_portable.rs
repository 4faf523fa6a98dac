//! Portable AES-128 block primitive, pure Rust (the `aes` crate).
//!
//! Exposes only the raw single-block primitive; `stream_cipher` drives
//! the CTR/F8 constructions atop it, rather than delegating the whole
//! counter-mode loop to a CTR-specific crate tied to one concrete
//! cipher type.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::cipher::generic_array::GenericArray;
use aes::Aes128;

use super::super::{BlockCipher, BlockCipherFactory};
use crate::error::Result;

pub(crate) struct AesPortableFactory;

impl BlockCipherFactory for AesPortableFactory {
    fn name(&self) -> &'static str {
        "aes-portable"
    }

    fn create(&self, key: &[u8]) -> Result<Box<dyn BlockCipher>> {
        let cipher = Aes128::new(GenericArray::from_slice(key));
        Ok(Box::new(PortableAesBlockCipher { cipher }))
    }
}

struct PortableAesBlockCipher {
    cipher: Aes128,
}

impl BlockCipher for PortableAesBlockCipher {
    fn process_block(&mut self, input: &[u8], output: &mut [u8]) {
        output.copy_from_slice(input);
        self.cipher
            .encrypt_block(GenericArray::from_mut_slice(output));
    }

    fn reset(&mut self) {
        // Stateless besides the key: nothing to reset.
    }
}
