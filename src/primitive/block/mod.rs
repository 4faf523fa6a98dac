pub(crate) mod aes_portable;

#[cfg(feature = "openssl")]
pub(crate) mod aes_openssl;

#[cfg(feature = "twofish")]
pub(crate) mod twofish_portable;
