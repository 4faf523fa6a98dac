//! Transformer facade: maps incoming packets to per-SSRC
//! contexts and dispatches to their transform/reverse-transform. Owns
//! no socket or async machinery of its own — callers hand it packets
//! already in memory and get back a protect/unprotect verdict.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::context::{SrtcpContext, SrtpContext};
use crate::error::{Error, Result};
use crate::factory::ContextFactory;
use crate::packet::{rtcp, rtp};

/// Owns a `ContextFactory` and the SSRC → context maps for one
/// direction of SRTP/SRTCP traffic.
pub struct Transformer {
    factory: ContextFactory,
    srtp_contexts: Mutex<HashMap<u32, SrtpContext>>,
    srtcp_contexts: Mutex<HashMap<u32, SrtcpContext>>,
}

impl Transformer {
    pub fn new(factory: ContextFactory) -> Self {
        Transformer {
            factory,
            srtp_contexts: Mutex::new(HashMap::new()),
            srtcp_contexts: Mutex::new(HashMap::new()),
        }
    }

    /// Applies the sender-direction SRTP transform in place.
    pub fn protect_rtp(&self, packet: &mut Vec<u8>) -> Result<bool> {
        self.dispatch_rtp(packet, true)
    }

    /// Applies the receiver-direction SRTP transform in place.
    pub fn unprotect_rtp(&self, packet: &mut Vec<u8>) -> Result<bool> {
        self.dispatch_rtp(packet, false)
    }

    /// Applies the sender-direction SRTCP transform in place.
    pub fn protect_rtcp(&self, packet: &mut Vec<u8>) -> Result<bool> {
        self.dispatch_rtcp(packet, true)
    }

    /// Applies the receiver-direction SRTCP transform in place.
    pub fn unprotect_rtcp(&self, packet: &mut Vec<u8>) -> Result<bool> {
        self.dispatch_rtcp(packet, false)
    }

    fn dispatch_rtp(&self, packet: &mut Vec<u8>, sending: bool) -> Result<bool> {
        if packet.len() < rtp::MIN_HEADER_LEN || rtp::version(packet.as_slice()) != 2 {
            return Ok(false);
        }
        let ssrc = rtp::ssrc(packet.as_slice());
        let seq = rtp::sequence_number(packet.as_slice());

        let mut contexts = self.srtp_contexts.lock().unwrap();
        if !contexts.contains_key(&ssrc) {
            log::trace!("srtp: deriving new context for ssrc={ssrc:#x}");
            let ctx = self.factory.new_srtp_context(ssrc, seq)?;
            contexts.insert(ssrc, ctx);
        }
        let ctx = contexts.get_mut(&ssrc).expect("just inserted if absent");

        let result = if sending {
            ctx.transform(packet)
        } else {
            ctx.reverse_transform(packet)
        };
        translate_bad_version(result)
    }

    fn dispatch_rtcp(&self, packet: &mut Vec<u8>, sending: bool) -> Result<bool> {
        if packet.len() < rtcp::MIN_HEADER_LEN {
            return Ok(false);
        }
        let ssrc = rtcp::ssrc(packet.as_slice())?;

        let mut contexts = self.srtcp_contexts.lock().unwrap();
        if !contexts.contains_key(&ssrc) {
            log::trace!("srtcp: deriving new context for ssrc={ssrc:#x}");
            let ctx = self.factory.new_srtcp_context(ssrc)?;
            contexts.insert(ssrc, ctx);
        }
        let ctx = contexts.get_mut(&ssrc).expect("just inserted if absent");

        let result = if sending {
            ctx.transform(packet)
        } else {
            ctx.reverse_transform(packet)
        };
        translate_bad_version(result)
    }

    /// Zeroes every stored context and closes the factory.
    pub fn close(&mut self) {
        for (_, mut ctx) in self.srtp_contexts.get_mut().unwrap().drain() {
            ctx.close();
        }
        for (_, mut ctx) in self.srtcp_contexts.get_mut().unwrap().drain() {
            ctx.close();
        }
        self.factory.close();
    }
}

/// RTP version mismatches are rejected "by returning nothing" at the
/// Transformer layer, not surfaced as an error.
fn translate_bad_version(result: Result<bool>) -> Result<bool> {
    match result {
        Err(Error::BadVersion) => Ok(false),
        other => other,
    }
}
