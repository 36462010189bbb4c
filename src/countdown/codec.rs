//! # State Codec
//!
//! Turns a [`Configuration`] into a token that can ride in a URL fragment, and back.
//!
//! Pipeline: JSON → raw deflate → base64 (URL-safe alphabet, no padding). The
//! output only contains `A-Z a-z 0-9 - _`, so it needs no further escaping.
//!
//! Photos embed their full image payload as text, so compression is not optional:
//! even a handful of photos would make an uncompressed link unusable.
//!
//! Decoding is all-or-nothing. [`decode`] returns `None` for anything that is not a
//! complete, valid token; callers treat that as "no shared state". [`try_decode`]
//! keeps the reason for logging.
//!
//! ## Size advisories
//!
//! Browsers disagree on how long a URL may be. Two thresholds on the encoded token
//! size are part of the sharing contract, applied by callers before publishing:
//!
//! | Size                         | Advisory            |
//! |------------------------------|---------------------|
//! | ≤ [`SOFT_SHARE_LIMIT`]       | [`ShareAdvisory::Ok`]     |
//! | ≤ [`HARD_SHARE_LIMIT`]       | [`ShareAdvisory::Warn`]   |
//! | > [`HARD_SHARE_LIMIT`]       | [`ShareAdvisory::Refuse`] |

use crate::error::CodecError;
use crate::model::Configuration;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use tracing::debug;

/// Above this, a share link may not open in every browser.
pub const SOFT_SHARE_LIMIT: usize = 50 * 1024;

/// Above this, sharing is refused outright.
pub const HARD_SHARE_LIMIT: usize = 2 * SOFT_SHARE_LIMIT;

/// Ceiling on inflated payload size when decoding untrusted tokens.
pub const MAX_INFLATED_BYTES: usize = 16 * 1024 * 1024;

pub fn encode(config: &Configuration) -> Result<String, CodecError> {
    let json = serde_json::to_vec(config)?;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json).map_err(CodecError::Deflate)?;
    let compressed = encoder.finish().map_err(CodecError::Deflate)?;

    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

pub fn try_decode(token: &str) -> Result<Configuration, CodecError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CodecError::Empty);
    }

    let compressed = URL_SAFE_NO_PAD.decode(token)?;

    let mut inflated = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .take(MAX_INFLATED_BYTES as u64 + 1)
        .read_to_end(&mut inflated)
        .map_err(CodecError::Inflate)?;
    if inflated.len() > MAX_INFLATED_BYTES {
        return Err(CodecError::TooLarge {
            limit: MAX_INFLATED_BYTES,
        });
    }

    let json = String::from_utf8(inflated)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn decode(token: &str) -> Option<Configuration> {
    match try_decode(token) {
        Ok(config) => Some(config),
        Err(e) => {
            debug!(error = %e, token_len = token.len(), "discarding undecodable share token");
            None
        }
    }
}

/// Byte size of the token `encode` would produce.
pub fn measure_encoded_size(config: &Configuration) -> Result<usize, CodecError> {
    Ok(encode(config)?.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAdvisory {
    Ok,
    Warn,
    Refuse,
}

impl ShareAdvisory {
    pub fn for_size(bytes: usize) -> Self {
        if bytes > HARD_SHARE_LIMIT {
            ShareAdvisory::Refuse
        } else if bytes > SOFT_SHARE_LIMIT {
            ShareAdvisory::Warn
        } else {
            ShareAdvisory::Ok
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareSize {
    pub bytes: usize,
    pub advisory: ShareAdvisory,
}

impl ShareSize {
    pub fn kilobytes(&self) -> usize {
        (self.bytes + 512) / 1024
    }
}

pub fn assess(config: &Configuration) -> Result<ShareSize, CodecError> {
    let bytes = measure_encoded_size(config)?;
    Ok(ShareSize {
        bytes,
        advisory: ShareAdvisory::for_size(bytes),
    })
}
