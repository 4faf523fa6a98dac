//! Skein-MAC, a non-standard optional suite, via the `skein` crate's
//! native keyed-hashing support. Unlike SHA-1, Skein's UBI construction
//! takes a key directly rather than needing an HMAC wrapper.

use skein::digest::{Digest, Update};
use skein::Skein512;
use zeroize::Zeroizing;

use super::super::Mac;
use crate::error::{Error, Result};

pub(crate) struct SkeinMac {
    key: Zeroizing<Vec<u8>>,
    inner: Skein512,
}

impl SkeinMac {
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::Other("Skein-MAC key must not be empty".into()));
        }
        Ok(SkeinMac {
            key: Zeroizing::new(key.to_vec()),
            inner: Skein512::new_with_key(key),
        })
    }
}

impl Mac for SkeinMac {
    fn mac_size(&self) -> usize {
        20
    }

    fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.inner, data);
    }

    fn finalize_into(&mut self, out: &mut [u8]) {
        let digest = std::mem::replace(&mut self.inner, Skein512::new_with_key(&self.key))
            .finalize();
        out[..20].copy_from_slice(&digest[..20]);
    }
}
