//! SRTCP crypto context: structurally similar to
//! [`super::srtp::SrtpContext`] but carries an explicit 31-bit index
//! rather than reconstructing one from a wrapping 16-bit sequence
//! number.

use crate::context::{wipe, CipherSuite, ContextState};
use crate::error::{Error, Result};
use crate::kdf;
use crate::packet::rtcp;
use crate::policy::{AuthenticationType, EncryptionType, Policy};
use crate::primitive::create_mac;
use crate::replay::{ReplayVerdict, ReplayWindow};

const MAX_SRTCP_INDEX: u32 = 0x7fff_ffff;

pub(crate) struct SrtcpContext {
    state: ContextState,
    ssrc: u32,
    is_sender: bool,
    policy: Policy,
    kdr: u32,
    check_replay: bool,

    master_key: Vec<u8>,
    master_salt: Vec<u8>,
    salt_key: Vec<u8>,
    suite: Option<CipherSuite>,

    sent_index: u32,
    index_exhausted: bool,
    replay: ReplayWindow,
}

impl SrtcpContext {
    pub(crate) fn new_default(
        master_key: Vec<u8>,
        master_salt: Vec<u8>,
        policy: Policy,
        kdr: u32,
        check_replay: bool,
        is_sender: bool,
    ) -> Result<Self> {
        if master_key.len() != policy.enc_key_length {
            return Err(Error::MasterKeyLength(policy.enc_key_length, master_key.len()));
        }
        if master_salt.len() != policy.salt_key_length {
            return Err(Error::MasterSaltLength(
                policy.salt_key_length,
                master_salt.len(),
            ));
        }
        Ok(SrtcpContext {
            state: ContextState::Uninitialized,
            ssrc: 0,
            is_sender,
            policy,
            kdr,
            check_replay,
            master_key,
            master_salt,
            salt_key: Vec::new(),
            suite: None,
            sent_index: 0,
            index_exhausted: false,
            replay: ReplayWindow::new(check_replay),
        })
    }

    pub(crate) fn ssrc(&self) -> u32 {
        self.ssrc
    }

    pub(crate) fn is_keyed(&self) -> bool {
        self.state == ContextState::Keyed
    }

    pub(crate) fn derive_context(&self, new_ssrc: u32, new_kdr: u32) -> Self {
        SrtcpContext {
            state: ContextState::Uninitialized,
            ssrc: new_ssrc,
            is_sender: self.is_sender,
            policy: self.policy,
            kdr: new_kdr,
            check_replay: self.check_replay,
            master_key: self.master_key.clone(),
            master_salt: self.master_salt.clone(),
            salt_key: Vec::new(),
            suite: None,
            sent_index: 0,
            index_exhausted: false,
            replay: ReplayWindow::new(self.check_replay),
        }
    }

    pub(crate) fn derive_session_keys(&mut self, index: u64) -> Result<()> {
        if self.kdr != 0 {
            return Err(Error::NonZeroKdrNotSupported);
        }

        let mut enc_key = kdf::derive(
            kdf::LABEL_SRTCP_ENCRYPTION,
            &self.master_key,
            &self.master_salt,
            index,
            self.kdr,
            self.policy.enc_key_length,
        )?;
        let mut auth_key = kdf::derive(
            kdf::LABEL_SRTCP_AUTHENTICATION,
            &self.master_key,
            &self.master_salt,
            index,
            self.kdr,
            self.policy.auth_key_length,
        )?;
        let salt_key = kdf::derive(
            kdf::LABEL_SRTCP_SALT,
            &self.master_key,
            &self.master_salt,
            index,
            self.kdr,
            self.policy.salt_key_length,
        )?;

        let mac = create_mac(self.policy.auth_type, &auth_key)?;
        let suite = CipherSuite::new(
            self.policy.enc_type,
            &enc_key,
            &salt_key,
            mac,
            self.policy.auth_tag_length,
        )?;

        wipe(&mut enc_key);
        wipe(&mut auth_key);
        wipe(&mut self.master_key);

        self.salt_key = salt_key;
        self.suite = Some(suite);
        self.state = ContextState::Keyed;
        Ok(())
    }

    /// See `SrtpContext::log_replay_rejection`.
    fn log_replay_rejection(&self, index: u64) -> Option<bool> {
        match self.replay.check(index) {
            ReplayVerdict::Accept => None,
            ReplayVerdict::Duplicate => {
                if self.is_sender {
                    log::error!("srtcp ssrc={:#x} index={index}: duplicate packet in outbound stream (bug)", self.ssrc);
                } else {
                    log::debug!("srtcp ssrc={:#x} index={index}: duplicate packet, dropping", self.ssrc);
                }
                Some(false)
            }
            ReplayVerdict::TooOld => {
                if self.is_sender {
                    log::error!("srtcp ssrc={:#x} index={index}: replayed packet older than window in outbound stream (bug)", self.ssrc);
                } else {
                    log::debug!("srtcp ssrc={:#x} index={index}: packet older than replay window, dropping", self.ssrc);
                }
                Some(false)
            }
        }
    }

    fn require_keyed(&self) -> Result<()> {
        match self.state {
            ContextState::Keyed => Ok(()),
            ContextState::Closed => Err(Error::ContextClosed),
            ContextState::Uninitialized => Err(Error::ContextNotKeyed),
        }
    }

    /// There is no RTP-style header to feed the F8 IV formula for an
    /// RTCP packet (spec is silent on this). We use the 8-byte RTCP
    /// header zero-padded to 12 bytes, the same slot the RTP
    /// construction fills with its 12-byte fixed header.
    fn header_analog(packet: &[u8]) -> [u8; 12] {
        let mut buf = [0u8; 12];
        buf[..8].copy_from_slice(&packet[..8]);
        buf
    }

    /// Sender direction.
    pub(crate) fn transform(&mut self, packet: &mut Vec<u8>) -> Result<bool> {
        self.require_keyed()?;
        if self.index_exhausted {
            return Err(Error::IndexSpaceExhausted);
        }
        if packet.len() < rtcp::MIN_HEADER_LEN {
            return Err(Error::PacketTooShort(packet.len(), rtcp::MIN_HEADER_LEN));
        }
        let ssrc = rtcp::ssrc(packet)?;
        let index = self.sent_index;
        let encrypted = self.policy.enc_type != EncryptionType::Null;

        if encrypted {
            let header_first12 = Self::header_analog(packet);
            let suite = self.suite.as_mut().expect("KEYED state implies a suite");
            suite.crypt_in_place(
                &self.salt_key,
                ssrc,
                index as u64,
                &header_first12,
                index,
                &mut packet[rtcp::MIN_HEADER_LEN..],
            );
        }

        packet.extend_from_slice(&rtcp::encode_index_and_flag(index, encrypted));

        if self.policy.auth_type != AuthenticationType::Null {
            let suite = self.suite.as_mut().expect("KEYED state implies a suite");
            let tag = suite.generate_tag(packet, None);
            packet.extend_from_slice(&tag);
        }

        if index >= MAX_SRTCP_INDEX {
            self.index_exhausted = true;
        } else {
            self.sent_index = index + 1;
        }
        Ok(true)
    }

    /// Receiver direction.
    pub(crate) fn reverse_transform(&mut self, packet: &mut Vec<u8>) -> Result<bool> {
        self.require_keyed()?;
        let tag_len = if self.policy.auth_type != AuthenticationType::Null {
            self.suite.as_ref().expect("KEYED state implies a suite").auth_tag_len()
        } else {
            0
        };
        let need = rtcp::MIN_HEADER_LEN + rtcp::INDEX_FIELD_LEN + tag_len;
        if packet.len() < need {
            return Err(Error::PacketTooShort(packet.len(), need));
        }

        let (index, e_flag) = rtcp::read_index_and_flag(packet, tag_len)?;
        let index64 = index as u64;
        if let Some(verdict) = self.log_replay_rejection(index64) {
            return Ok(verdict);
        }

        if tag_len > 0 {
            let covered_len = packet.len() - tag_len;
            let received_tag = packet[covered_len..].to_vec();
            let suite = self.suite.as_mut().expect("KEYED state implies a suite");
            if !suite.verify_tag(&packet[..covered_len], None, &received_tag) {
                log::debug!("srtcp ssrc={:#x} index={index}: authentication tag mismatch, dropping", self.ssrc);
                return Ok(false);
            }
            packet.truncate(covered_len);
        }

        let new_len = packet.len() - rtcp::INDEX_FIELD_LEN;
        packet.truncate(new_len);

        if e_flag {
            let ssrc = rtcp::ssrc(packet)?;
            let header_first12 = Self::header_analog(packet);
            let suite = self.suite.as_mut().expect("KEYED state implies a suite");
            suite.crypt_in_place(
                &self.salt_key,
                ssrc,
                index64,
                &header_first12,
                index,
                &mut packet[rtcp::MIN_HEADER_LEN..],
            );
        }

        self.replay.update(index64);
        Ok(true)
    }

    /// `close()`, shared with the SRTP side's lifecycle.
    pub(crate) fn close(&mut self) {
        wipe(&mut self.master_key);
        wipe(&mut self.master_salt);
        wipe(&mut self.salt_key);
        self.suite = None;
        self.state = ContextState::Closed;
    }
}

#[cfg(test)]
mod srtcp_test;
