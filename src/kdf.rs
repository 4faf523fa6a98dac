//! Session key derivation (`derive_session_keys`, RFC 3711 §4.3/§8.1),
//! generalized to take an explicit key derivation rate instead of
//! assuming "derive once".

use byteorder::{BigEndian, ByteOrder};

use crate::error::Result;
use crate::primitive::create_aes_block_cipher;
use crate::stream_cipher::ctr;

pub(crate) const LABEL_SRTP_ENCRYPTION: u8 = 0x00;
pub(crate) const LABEL_SRTP_AUTHENTICATION: u8 = 0x01;
pub(crate) const LABEL_SRTP_SALT: u8 = 0x02;
pub(crate) const LABEL_SRTCP_ENCRYPTION: u8 = 0x03;
pub(crate) const LABEL_SRTCP_AUTHENTICATION: u8 = 0x04;
pub(crate) const LABEL_SRTCP_SALT: u8 = 0x05;

/// Derives `out_len` bytes of session key material for label `label`,
/// from `master_key`/`master_salt`, at packet `index` with key
/// derivation rate `kdr` (0 meaning "derive once, never re-derive").
///
/// ```text
/// key_id = (label << 48) | (index / kdr)   if kdr != 0
/// key_id =  label << 48                     if kdr == 0
/// iv[0..7]   = master_salt[0..7]
/// iv[7..14]  = master_salt[7..14] XOR big-endian7(key_id)
/// iv[14..16] = 0
/// ```
pub(crate) fn derive(
    label: u8,
    master_key: &[u8],
    master_salt: &[u8],
    index: u64,
    kdr: u32,
    out_len: usize,
) -> Result<Vec<u8>> {
    let key_id: u64 = if kdr == 0 {
        (label as u64) << 48
    } else {
        ((label as u64) << 48) | (index / kdr as u64)
    };

    let mut iv = [0u8; 16];
    iv[..master_salt.len().min(14)].copy_from_slice(&master_salt[..master_salt.len().min(14)]);

    let mut key_id_be7 = [0u8; 8];
    BigEndian::write_u64(&mut key_id_be7, key_id);
    // key_id_be7[0] is always zero (key_id fits in 56 bits); the
    // 7-byte big-endian value occupies key_id_be7[1..8].
    for (i, b) in key_id_be7[1..8].iter().enumerate() {
        iv[7 + i] ^= b;
    }
    iv[14] = 0;
    iv[15] = 0;

    let mut cipher = create_aes_block_cipher(master_key)?;
    Ok(ctr::generate_keystream(cipher.as_mut(), &iv, out_len))
}

#[cfg(test)]
mod kdf_test;
