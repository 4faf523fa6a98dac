//! Stream cipher constructions built atop a chosen `BlockCipher`
//! primitive: CTR mode and F8 mode. These are used identically by
//! both the AES and Twofish primitive families — only the block
//! cipher underneath differs.

pub(crate) mod ctr;
pub(crate) mod f8;
