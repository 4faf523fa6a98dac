//! SRTP crypto context: one instance per SSRC (RFC 3711 §3.3, §3.3.1).
//! Rollover state is kept as separate `roc`/`s_l` fields rather than a
//! packed 48-bit index — the two are mathematically equivalent, but
//! this form follows RFC 3711 §3.3.1's own pseudocode line for line.

use crate::context::{wipe, CipherSuite, ContextState};
use crate::error::{Error, Result};
use crate::kdf;
use crate::packet::rtp;
use crate::policy::{AuthenticationType, Policy};
use crate::primitive::create_mac;
use crate::replay::{ReplayVerdict, ReplayWindow};

/// Per-SSRC SRTP cryptographic context. Either a "default" (template)
/// context holding only master material (`state == Uninitialized`), or
/// a live one produced by `derive_context` + `derive_session_keys`.
pub(crate) struct SrtpContext {
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

    roc: u32,
    s_l: u16,
    seq_num_set: bool,
    replay: ReplayWindow,
}

impl SrtpContext {
    /// Constructs the default (SSRC = 0, unkeyed) context a
    /// `ContextFactory` holds.
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
        Ok(SrtpContext {
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
            roc: 0,
            s_l: 0,
            seq_num_set: false,
            replay: ReplayWindow::new(check_replay),
        })
    }

    pub(crate) fn ssrc(&self) -> u32 {
        self.ssrc
    }

    pub(crate) fn is_keyed(&self) -> bool {
        self.state == ContextState::Keyed
    }

    /// `derive_context(new_ssrc, new_roc, new_kdr)`: a
    /// sibling sharing master key/salt/policy, with fresh replay state.
    /// `derive_session_keys` must still be called before use.
    pub(crate) fn derive_context(&self, new_ssrc: u32, new_roc: u32, new_kdr: u32) -> Self {
        SrtpContext {
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
            roc: new_roc,
            s_l: 0,
            seq_num_set: false,
            replay: ReplayWindow::new(self.check_replay),
        }
    }

    /// `derive_session_keys(index)`.
    pub(crate) fn derive_session_keys(&mut self, index: u64) -> Result<()> {
        if self.kdr != 0 {
            return Err(Error::NonZeroKdrNotSupported);
        }

        let mut enc_key = kdf::derive(
            kdf::LABEL_SRTP_ENCRYPTION,
            &self.master_key,
            &self.master_salt,
            index,
            self.kdr,
            self.policy.enc_key_length,
        )?;
        let mut auth_key = kdf::derive(
            kdf::LABEL_SRTP_AUTHENTICATION,
            &self.master_key,
            &self.master_salt,
            index,
            self.kdr,
            self.policy.auth_key_length,
        )?;
        let salt_key = kdf::derive(
            kdf::LABEL_SRTP_SALT,
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

    /// `guess_index(seq)` (RFC 3711 §3.3.1).
    fn guess_index(&self, seq: u16) -> (u32, u64, bool) {
        let mut overflow = false;
        let guessed_roc = if self.s_l < 0x8000 {
            if (seq as i32 - self.s_l as i32) > 0x8000 {
                self.roc.wrapping_sub(1)
            } else {
                self.roc
            }
        } else if (self.s_l as i32 - 0x8000) > seq as i32 {
            if self.roc == u32::MAX {
                overflow = true;
            }
            self.roc.wrapping_add(1)
        } else {
            self.roc
        };
        let guessed_index = ((guessed_roc as u64) << 16) | seq as u64;
        (guessed_roc, guessed_index, overflow)
    }

    /// `update(seq, guessed_index)`.
    fn update(&mut self, seq: u16, guessed_roc: u32, guessed_index: u64) {
        self.replay.update(guessed_index);
        if guessed_roc == self.roc {
            self.s_l = self.s_l.max(seq);
        } else if guessed_roc == self.roc.wrapping_add(1) {
            self.s_l = seq;
            self.roc = guessed_roc;
        }
    }

    /// Checks the replay window and logs a rejection
    /// ("ReplayOld"/"ReplayDuplicate": logged at error level for
    /// senders, debug otherwise). Returns `Some(false)` when the
    /// caller should reject the packet, `None` to continue.
    fn log_replay_rejection(&self, guessed_index: u64, seq: u16) -> Option<bool> {
        match self.replay.check(guessed_index) {
            ReplayVerdict::Accept => None,
            ReplayVerdict::Duplicate => {
                if self.is_sender {
                    log::error!("srtp ssrc={:#x} seq={seq}: duplicate packet in outbound stream (bug)", self.ssrc);
                } else {
                    log::debug!("srtp ssrc={:#x} seq={seq}: duplicate packet, dropping", self.ssrc);
                }
                Some(false)
            }
            ReplayVerdict::TooOld => {
                if self.is_sender {
                    log::error!("srtp ssrc={:#x} seq={seq}: replayed packet older than window in outbound stream (bug)", self.ssrc);
                } else {
                    log::debug!("srtp ssrc={:#x} seq={seq}: packet older than replay window, dropping", self.ssrc);
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

    /// `transform(rtp_packet) -> bool`, sender direction.
    /// `Ok(false)` is an expected protocol-level rejection (replay);
    /// `Err` signals a structural problem the caller should not retry.
    pub(crate) fn transform(&mut self, packet: &mut Vec<u8>) -> Result<bool> {
        self.require_keyed()?;
        if rtp::version(packet.as_slice()) != 2 {
            return Err(Error::BadVersion);
        }
        let header_len = rtp::header_length(packet.as_slice())?;
        let seq = rtp::sequence_number(packet.as_slice());
        if !self.seq_num_set {
            self.s_l = seq;
            self.seq_num_set = true;
        }
        let (guessed_roc, guessed_index, overflow) = self.guess_index(seq);
        if overflow {
            return Err(Error::IndexSpaceExhausted);
        }
        if let Some(verdict) = self.log_replay_rejection(guessed_index, seq) {
            return Ok(verdict);
        }

        let mut header_first12 = [0u8; 12];
        header_first12.copy_from_slice(&packet[..12]);
        let suite = self.suite.as_mut().expect("KEYED state implies a suite");
        suite.crypt_in_place(
            &self.salt_key,
            self.ssrc,
            guessed_index,
            &header_first12,
            guessed_roc,
            &mut packet[header_len..],
        );
        if self.policy.auth_type != AuthenticationType::Null {
            let tag = suite.generate_tag(packet, Some(guessed_roc));
            packet.extend_from_slice(&tag);
        }

        self.update(seq, guessed_roc, guessed_index);
        Ok(true)
    }

    /// `reverse_transform(srtp_packet) -> bool`, receiver direction.
    /// The authentication tag is read and the packet shrunk *before*
    /// the MAC is verified, so a MAC failure still leaves the packet
    /// shortened — carried over deliberately rather than "fixed",
    /// since a receiver observing this should already be dropping the
    /// packet regardless of its now-wrong length.
    pub(crate) fn reverse_transform(&mut self, packet: &mut Vec<u8>) -> Result<bool> {
        self.require_keyed()?;
        if rtp::version(packet.as_slice()) != 2 {
            return Err(Error::BadVersion);
        }
        let header_len = rtp::header_length(packet.as_slice())?;
        let seq = rtp::sequence_number(packet.as_slice());
        if !self.seq_num_set {
            self.s_l = seq;
            self.seq_num_set = true;
        }
        let (guessed_roc, guessed_index, overflow) = self.guess_index(seq);
        if overflow {
            return Err(Error::IndexSpaceExhausted);
        }
        if let Some(verdict) = self.log_replay_rejection(guessed_index, seq) {
            return Ok(verdict);
        }

        let suite = self.suite.as_mut().expect("KEYED state implies a suite");
        if self.policy.auth_type != AuthenticationType::Null {
            let tag_len = suite.auth_tag_len();
            if packet.len() < header_len + tag_len {
                return Err(Error::PacketTooShort(packet.len(), header_len + tag_len));
            }
            let received_tag = packet[packet.len() - tag_len..].to_vec();
            let new_len = packet.len() - tag_len;
            packet.truncate(new_len);

            let ok = suite.verify_tag(packet, Some(guessed_roc), &received_tag);
            if !ok {
                log::debug!("srtp ssrc={:#x} seq={seq}: authentication tag mismatch, dropping", self.ssrc);
                return Ok(false);
            }
        }

        let mut header_first12 = [0u8; 12];
        header_first12.copy_from_slice(&packet[..12]);
        let suite = self.suite.as_mut().expect("KEYED state implies a suite");
        suite.crypt_in_place(
            &self.salt_key,
            self.ssrc,
            guessed_index,
            &header_first12,
            guessed_roc,
            &mut packet[header_len..],
        );

        self.update(seq, guessed_roc, guessed_index);
        Ok(true)
    }

    /// `close()`: zero all session key buffers and the
    /// master key/salt, mark the context unusable.
    pub(crate) fn close(&mut self) {
        wipe(&mut self.master_key);
        wipe(&mut self.master_salt);
        wipe(&mut self.salt_key);
        self.suite = None;
        self.state = ContextState::Closed;
    }
}

#[cfg(test)]
mod srtp_test;
