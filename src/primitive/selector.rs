//! Benchmark-driven election between interchangeable block cipher
//! factories: a portable pure-Rust AES candidate and, when the
//! `openssl` Cargo feature is enabled, an accelerated OpenSSL-backed
//! one. Both candidates are compiled in together and the faster one
//! measured on this host is elected at runtime, rather than picking a
//! backend at compile time.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::RngCore;

use super::block::aes_portable::AesPortableFactory;
use super::{BlockCipher, BlockCipherFactory};
use crate::error::{Error, Result};

/// How long an election stays valid before the selector re-benchmarks:
/// a coarse-grained timeout, not a per-packet cost.
const REELECTION_INTERVAL: Duration = Duration::from_secs(60);

/// Bytes of plaintext encrypted per candidate during a benchmark run.
const BENCH_PLAINTEXT_LEN: usize = 16 * 256;

/// Outcome of one election, kept around for diagnostics and tests.
#[derive(Debug, Clone)]
pub struct BenchmarkOutcome {
    pub elected: &'static str,
    pub candidates_tried: usize,
}

struct CandidateState {
    factory: Box<dyn BlockCipherFactory>,
    permanently_unavailable: bool,
}

struct ElectionState {
    candidates: Vec<CandidateState>,
    elected: Option<usize>,
    last_election: Option<Instant>,
    preference: Option<String>,
    last_outcome: Option<BenchmarkOutcome>,
}

pub(crate) struct AesSelector {
    state: Mutex<ElectionState>,
}

impl AesSelector {
    fn new() -> Self {
        let mut candidates: Vec<CandidateState> = Vec::new();

        #[cfg(feature = "openssl")]
        {
            candidates.push(CandidateState {
                factory: Box::new(super::block::aes_openssl::AesOpensslFactory),
                permanently_unavailable: false,
            });
        }

        // The portable candidate must always be present and last, so
        // that it is preferred as a tie-break and is never excluded.
        candidates.push(CandidateState {
            factory: Box::new(AesPortableFactory),
            permanently_unavailable: false,
        });

        AesSelector {
            state: Mutex::new(ElectionState {
                candidates,
                elected: None,
                last_election: None,
                preference: None,
                last_outcome: None,
            }),
        }
    }

    pub(crate) fn create(&self, key: &[u8]) -> Result<Box<dyn BlockCipher>> {
        let idx = self.elect()?;
        let state = self.state.lock().unwrap();
        state.candidates[idx].factory.create(key)
    }

    /// Result of the most recent benchmark-driven election, if one has
    /// run yet.
    pub(crate) fn last_outcome(&self) -> Option<BenchmarkOutcome> {
        self.state.lock().unwrap().last_outcome.clone()
    }

    /// Sets the `aes_provider_preference` hint:
    /// a named candidate to prefer, bypassing the benchmark, so long as
    /// it is present and not permanently unavailable. Read once at
    /// first context construction, like the rest of `Config`.
    pub(crate) fn set_preference(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.preference = Some(name.to_string());
        state.elected = None;
        state.last_election = None;
        state.last_outcome = None;
    }

    fn elect(&self) -> Result<usize> {
        let mut state = self.state.lock().unwrap();

        if let (Some(idx), Some(when)) = (state.elected, state.last_election) {
            if when.elapsed() < REELECTION_INTERVAL {
                return Ok(idx);
            }
        }

        if let Some(name) = state.preference.clone() {
            if let Some(idx) = state
                .candidates
                .iter()
                .position(|c| !c.permanently_unavailable && c.factory.name() == name)
            {
                state.elected = Some(idx);
                state.last_election = Some(Instant::now());
                state.last_outcome = Some(BenchmarkOutcome {
                    elected: state.candidates[idx].factory.name(),
                    candidates_tried: 0,
                });
                return Ok(idx);
            }
        }

        let mut bench_key = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bench_key);
        let mut plaintext = [0u8; BENCH_PLAINTEXT_LEN];
        rand::thread_rng().fill_bytes(&mut plaintext);

        let mut best: Option<(usize, Duration)> = None;
        let mut tried = 0usize;

        for (i, candidate) in state.candidates.iter_mut().enumerate() {
            if candidate.permanently_unavailable {
                continue;
            }
            tried += 1;
            match bench_one(candidate.factory.as_ref(), &bench_key, &plaintext) {
                Ok(elapsed) => {
                    if best.map(|(_, best_elapsed)| elapsed < best_elapsed).unwrap_or(true) {
                        best = Some((i, elapsed));
                    }
                }
                Err(e) => {
                    log::warn!(
                        "primitive provider {} failed during benchmark: {}",
                        candidate.factory.name(),
                        e
                    );
                    candidate.permanently_unavailable = true;
                }
            }
        }

        let (idx, _) = best.ok_or(Error::NoPrimitiveAvailable)?;
        state.elected = Some(idx);
        state.last_election = Some(Instant::now());
        state.last_outcome = Some(BenchmarkOutcome {
            elected: state.candidates[idx].factory.name(),
            candidates_tried: tried,
        });
        Ok(idx)
    }
}

fn bench_one(
    factory: &dyn BlockCipherFactory,
    key: &[u8],
    plaintext: &[u8],
) -> Result<Duration> {
    let mut cipher = factory.create(key)?;
    let mut out = [0u8; 16];
    let start = Instant::now();
    for block in plaintext.chunks_exact(16) {
        cipher.process_block(block, &mut out);
    }
    Ok(start.elapsed())
}

lazy_static! {
    static ref AES_SELECTOR: AesSelector = AesSelector::new();
}

pub(crate) fn aes_selector() -> &'static AesSelector {
    &AES_SELECTOR
}

/// Forces the next `create_aes_block_cipher` call to re-run the
/// benchmark and election, for tests that exercise re-election.
pub fn reset_selection_for_test() {
    let mut state = AES_SELECTOR.state.lock().unwrap();
    state.elected = None;
    state.last_election = None;
    state.last_outcome = None;
    for candidate in state.candidates.iter_mut() {
        candidate.permanently_unavailable = false;
    }
}

#[cfg(test)]
mod selector_test;
