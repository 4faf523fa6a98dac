pub(crate) mod hmac_sha1;
pub(crate) mod null;

#[cfg(feature = "skein-mac")]
pub(crate) mod skein_mac;
