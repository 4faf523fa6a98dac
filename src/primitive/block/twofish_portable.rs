//! Twofish-128 block primitive, a non-standard optional suite,
//! via the `twofish` crate, behind the `twofish` Cargo feature.

use twofish::cipher::{BlockEncrypt, KeyInit};
use twofish::cipher::generic_array::GenericArray;
use twofish::Twofish;

use super::super::{BlockCipher, BlockCipherFactory};
use crate::error::Result;

pub(crate) struct TwofishFactory;

impl BlockCipherFactory for TwofishFactory {
    fn name(&self) -> &'static str {
        "twofish-portable"
    }

    fn create(&self, key: &[u8]) -> Result<Box<dyn BlockCipher>> {
        let cipher = Twofish::new(GenericArray::from_slice(key));
        Ok(Box::new(TwofishBlockCipher { cipher }))
    }
}

struct TwofishBlockCipher {
    cipher: Twofish,
}

impl BlockCipher for TwofishBlockCipher {
    fn process_block(&mut self, input: &[u8], output: &mut [u8]) {
        output.copy_from_slice(input);
        self.cipher
            .encrypt_block(GenericArray::from_mut_slice(output));
    }

    fn reset(&mut self) {}
}
