use hmac::{Hmac, Mac as HmacTrait};
use sha1::Sha1;
use zeroize::Zeroizing;

use super::super::Mac;
use crate::error::{Error, Result};

type HmacSha1Inner = Hmac<Sha1>;

/// HMAC-SHA1 keyed MAC, as a standalone `Mac` primitive the stream
/// cipher and tag-generation code drive without caring which MAC is
/// underneath.
pub(crate) struct HmacSha1Mac {
    key: Zeroizing<Vec<u8>>,
    inner: HmacSha1Inner,
}

impl HmacSha1Mac {
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        let inner =
            HmacSha1Inner::new_from_slice(key).map_err(|e| Error::Other(e.to_string()))?;
        Ok(HmacSha1Mac {
            key: Zeroizing::new(key.to_vec()),
            inner,
        })
    }
}

impl Mac for HmacSha1Mac {
    fn mac_size(&self) -> usize {
        20
    }

    fn update(&mut self, data: &[u8]) {
        HmacTrait::update(&mut self.inner, data);
    }

    fn finalize_into(&mut self, out: &mut [u8]) {
        let tag = self.inner.clone().finalize().into_bytes();
        out[..20].copy_from_slice(&tag);
        // Re-key to reset state so this instance can MAC the next message.
        self.inner = HmacSha1Inner::new_from_slice(&self.key)
            .expect("HMAC accepts any key length");
    }
}
