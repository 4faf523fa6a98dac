//! Context factory: holds the master key material and a "default"
//! context per direction, and derives per-SSRC contexts lazily on
//! first sighting. One `ContextFactory` per `(is_sender, policy)` pair,
//! kept separate from the cipher objects it derives contexts from.

use crate::context::{SrtcpContext, SrtpContext};
use crate::error::Result;
use crate::policy::Policy;
use crate::Config;

/// Master key/salt handed down by the external key-management
/// collaborator. Not consumed directly by packet transforms;
/// each derived context keeps its own copy, wiped on that context's
/// `derive_session_keys`/`close`.
pub struct MasterKeyMaterial {
    pub master_key: Vec<u8>,
    pub master_salt: Vec<u8>,
}

/// Produces per-SSRC `SrtpContext`/`SrtcpContext` instances sharing one
/// master key and policy pair.
pub struct ContextFactory {
    is_sender: bool,
    default_srtp: SrtpContext,
    default_srtcp: SrtcpContext,
}

impl ContextFactory {
    pub fn new(
        is_sender: bool,
        key_material: MasterKeyMaterial,
        srtp_policy: Policy,
        srtcp_policy: Policy,
        config: &Config,
    ) -> Result<Self> {
        config.apply();
        let default_srtp = SrtpContext::new_default(
            key_material.master_key.clone(),
            key_material.master_salt.clone(),
            srtp_policy,
            0,
            config.check_replay,
            is_sender,
        )?;
        let default_srtcp = SrtcpContext::new_default(
            key_material.master_key,
            key_material.master_salt,
            srtcp_policy,
            0,
            config.check_replay,
            is_sender,
        )?;
        Ok(ContextFactory {
            is_sender,
            default_srtp,
            default_srtcp,
        })
    }

    pub fn is_sender(&self) -> bool {
        self.is_sender
    }

    /// Derives and keys a fresh SRTP context for `ssrc` from the
    /// default template.
    pub(crate) fn new_srtp_context(&self, ssrc: u32, initial_seq: u16) -> Result<SrtpContext> {
        let mut ctx = self.default_srtp.derive_context(ssrc, 0, 0);
        ctx.derive_session_keys(initial_seq as u64)?;
        Ok(ctx)
    }

    pub(crate) fn new_srtcp_context(&self, ssrc: u32) -> Result<SrtcpContext> {
        let mut ctx = self.default_srtcp.derive_context(ssrc, 0);
        ctx.derive_session_keys(0)?;
        Ok(ctx)
    }

    /// Wipes the default contexts' own master-key copies, closing the
    /// factory.
    pub fn close(&mut self) {
        self.default_srtp.close();
        self.default_srtcp.close();
    }
}
