//! SRTP F8-mode stream cipher (RFC 3711 §4.1.2).

use byteorder::{BigEndian, ByteOrder};

use crate::primitive::BlockCipher;

/// `masked_key = session_key XOR (salt ++ 0x55 0x55 ...)`, padded to
/// `session_key.len()` bytes.
pub(crate) fn masked_key(session_key: &[u8], salt: &[u8]) -> Vec<u8> {
    let mut masked = session_key.to_vec();
    for (i, byte) in masked.iter_mut().enumerate() {
        let pad = if i < salt.len() { salt[i] } else { 0x55 };
        *byte ^= pad;
    }
    masked
}

/// Encrypts the 16-byte raw IV (12 bytes of the RTP header with the
/// first octet cleared, plus the 4-byte big-endian ROC) under the
/// masked-key cipher to produce `IV'`.
pub(crate) fn compute_iv_prime(
    masked_cipher: &mut dyn BlockCipher,
    header_first12: &[u8; 12],
    roc: u32,
) -> [u8; 16] {
    let mut raw = [0u8; 16];
    raw[..12].copy_from_slice(header_first12);
    raw[0] = 0;
    BigEndian::write_u32(&mut raw[12..16], roc);

    let mut iv_prime = [0u8; 16];
    masked_cipher.process_block(&raw, &mut iv_prime);
    iv_prime
}

/// XORs `data` in place with the F8 keystream. Symmetric.
pub(crate) fn apply_keystream(cipher: &mut dyn BlockCipher, iv_prime: &[u8; 16], data: &mut [u8]) {
    let mut s = [0u8; 16];
    let mut j: u32 = 0;
    let mut input = [0u8; 16];
    for chunk in data.chunks_mut(16) {
        for i in 0..16 {
            input[i] = s[i] ^ iv_prime[i];
        }
        let mut j_block = [0u8; 16];
        BigEndian::write_u32(&mut j_block[12..16], j);
        for i in 0..16 {
            input[i] ^= j_block[i];
        }

        cipher.process_block(&input, &mut s);

        for (d, k) in chunk.iter_mut().zip(s.iter()) {
            *d ^= k;
        }
        j = j.wrapping_add(1);
    }
}
