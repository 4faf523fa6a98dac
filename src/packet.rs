//! RTP/RTCP header field accessors, operating directly on a mutable
//! byte buffer in place.
//!
//! No dependency on the separate `rtp`/`rtcp` parsing crates: this core
//! reads the handful of fixed-offset header fields the transform paths
//! actually touch directly off the wire bytes instead of building a
//! full packet object model. Resizing (appending a tag, stripping one,
//! growing for an SRTCP index field) is done with plain `Vec<u8>`
//! operations at each call site rather than through a wrapper type.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// RTP header field accessors (RFC 3550 §5.1), operating directly on
/// the wire bytes.
pub(crate) mod rtp {
    use super::*;

    pub(crate) const MIN_HEADER_LEN: usize = 12;

    pub(crate) fn version(buf: &[u8]) -> u8 {
        buf[0] >> 6
    }

    pub(crate) fn has_extension(buf: &[u8]) -> bool {
        (buf[0] >> 4) & 0x1 == 1
    }

    pub(crate) fn csrc_count(buf: &[u8]) -> usize {
        (buf[0] & 0x0f) as usize
    }

    pub(crate) fn sequence_number(buf: &[u8]) -> u16 {
        BigEndian::read_u16(&buf[2..4])
    }

    pub(crate) fn ssrc(buf: &[u8]) -> u32 {
        BigEndian::read_u32(&buf[8..12])
    }

    /// Length of the fixed header, CSRC list, and extension block (if
    /// present) — i.e. the offset at which the payload starts.
    pub(crate) fn header_length(buf: &[u8]) -> Result<usize> {
        if buf.len() < MIN_HEADER_LEN {
            return Err(Error::PacketTooShort(buf.len(), MIN_HEADER_LEN));
        }
        let mut len = MIN_HEADER_LEN + csrc_count(buf) * 4;
        if has_extension(buf) {
            if buf.len() < len + 4 {
                return Err(Error::PacketTooShort(buf.len(), len + 4));
            }
            let ext_words = BigEndian::read_u16(&buf[len + 2..len + 4]) as usize;
            len += 4 + ext_words * 4;
        }
        if buf.len() < len {
            return Err(Error::PacketTooShort(buf.len(), len));
        }
        Ok(len)
    }

    pub(crate) fn payload_length(buf: &[u8]) -> Result<usize> {
        Ok(buf.len() - header_length(buf)?)
    }
}

/// RTCP header field accessors (RFC 3550 §6.1) plus the SRTCP index
/// trailer.
pub(crate) mod rtcp {
    use super::*;

    pub(crate) const MIN_HEADER_LEN: usize = 8;
    pub(crate) const INDEX_FIELD_LEN: usize = 4;
    const E_FLAG: u32 = 1 << 31;

    pub(crate) fn ssrc(buf: &[u8]) -> Result<u32> {
        if buf.len() < MIN_HEADER_LEN {
            return Err(Error::PacketTooShort(buf.len(), MIN_HEADER_LEN));
        }
        Ok(BigEndian::read_u32(&buf[4..8]))
    }

    /// Reads the trailing 31-bit index and E-flag from a packet whose
    /// authentication tag is `tag_len` bytes long.
    pub(crate) fn read_index_and_flag(buf: &[u8], tag_len: usize) -> Result<(u32, bool)> {
        let need = tag_len + INDEX_FIELD_LEN;
        if buf.len() < need {
            return Err(Error::PacketTooShort(buf.len(), need));
        }
        let offset = buf.len() - need;
        let word = BigEndian::read_u32(&buf[offset..offset + INDEX_FIELD_LEN]);
        Ok((word & !E_FLAG, word & E_FLAG != 0))
    }

    pub(crate) fn encode_index_and_flag(index: u32, encrypted: bool) -> [u8; 4] {
        let mut word = index & !E_FLAG;
        if encrypted {
            word |= E_FLAG;
        }
        let mut out = [0u8; 4];
        BigEndian::write_u32(&mut out, word);
        out
    }
}

#[cfg(test)]
mod packet_test;
