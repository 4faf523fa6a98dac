use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds produced by the SRTP/SRTCP core.
///
/// Errors raised while transforming a packet never unwind through to
/// the caller: `Transformer`/`SrtpContext`/`SrtcpContext` turn these
/// into a `bool`/`Option` at the call boundary. Errors raised during
/// context or factory construction are surfaced directly.
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("SRTP master key must be {0} bytes, got {1}")]
    MasterKeyLength(usize, usize),
    #[error("SRTP master salt must be {0} bytes, got {1}")]
    MasterSaltLength(usize, usize),
    #[error("no such protection profile")]
    NoSuchProfile,
    #[error("index_over_kdr > 0 is not supported")]
    NonZeroKdrNotSupported,

    #[error("packet too short: {0} bytes, need at least {1}")]
    PacketTooShort(usize, usize),
    #[error("RTP version field is not 2")]
    BadVersion,

    #[error("replayed packet (duplicate)")]
    ReplayDuplicate,
    #[error("replayed packet (older than the replay window)")]
    ReplayOld,

    #[error("RTP authentication tag mismatch")]
    RtpAuthFailure,
    #[error("RTCP authentication tag mismatch")]
    RtcpAuthFailure,

    #[error("context is not in the KEYED state")]
    ContextNotKeyed,
    #[error("context has been closed")]
    ContextClosed,

    #[error("primitive provider {0} failed to initialize: {1}")]
    PrimitiveInitFailure(&'static str, String),
    #[error("no primitive provider is available for this operation")]
    NoPrimitiveAvailable,

    #[error("packet index space exhausted for this SSRC; a new master key is required")]
    IndexSpaceExhausted,

    #[error("{0}")]
    Other(String),
}
