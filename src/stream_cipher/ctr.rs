//! SRTP/SRTCP counter-mode IV formation and keystream application
//! (RFC 3711 §4.1.1).
//!
//! The RTP IV ("salt XOR ssrc XOR 48-bit packet index") and the RTCP
//! IV ("salt XOR ssrc XOR 31-bit SRTCP index") reduce to the same
//! construction: an SRTCP index fits in 31 bits, so when it is placed
//! in the same 48-bit field an RTP packet index would occupy, its two
//! high-order bytes are always zero and the nonzero bytes land exactly
//! at `iv[10..14]`.

use byteorder::{BigEndian, ByteOrder};

use crate::primitive::BlockCipher;

/// Forms the 128-bit counter-mode IV for either an RTP packet index
/// (48-bit `(ROC << 16) | SEQ`) or an SRTCP index (31-bit, passed as-is).
pub(crate) fn iv(salt: &[u8], ssrc: u32, index48: u64) -> [u8; 16] {
    let mut iv = [0u8; 16];
    BigEndian::write_u32(&mut iv[4..8], ssrc);
    // Bytes [8..14] carry the 48-bit index, big-endian.
    iv[8] = ((index48 >> 40) & 0xff) as u8;
    iv[9] = ((index48 >> 32) & 0xff) as u8;
    BigEndian::write_u32(&mut iv[10..14], (index48 & 0xffff_ffff) as u32);

    for (i, b) in salt.iter().enumerate().take(14) {
        iv[i] ^= b;
    }
    iv
}

/// XORs `data` in place with the keystream generated by repeatedly
/// encrypting `iv` with its low 16 bits replacing the block counter.
/// Symmetric: the same call encrypts or decrypts.
pub(crate) fn apply_keystream(cipher: &mut dyn BlockCipher, iv: &[u8; 16], data: &mut [u8]) {
    let mut counter = *iv;
    let mut block = [0u8; 16];
    for chunk in data.chunks_mut(16) {
        cipher.process_block(&counter, &mut block);
        for (d, k) in chunk.iter_mut().zip(block.iter()) {
            *d ^= k;
        }
        increment_block_counter(&mut counter);
    }
}

/// Generates `out_len` bytes of pure keystream (used by the session
/// key derivation PRF, which needs the keystream itself
/// rather than an XOR against plaintext).
pub(crate) fn generate_keystream(cipher: &mut dyn BlockCipher, iv: &[u8; 16], out_len: usize) -> Vec<u8> {
    let mut counter = *iv;
    let mut out = Vec::with_capacity(out_len + 16);
    let mut block = [0u8; 16];
    while out.len() < out_len {
        cipher.process_block(&counter, &mut block);
        out.extend_from_slice(&block);
        increment_block_counter(&mut counter);
    }
    out.truncate(out_len);
    out
}

fn increment_block_counter(counter: &mut [u8; 16]) {
    let n = BigEndian::read_u16(&counter[14..16]).wrapping_add(1);
    BigEndian::write_u16(&mut counter[14..16], n);
}
