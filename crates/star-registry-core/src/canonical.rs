//! Canonical CBOR encoding for deterministic hashing.
//!
//! Block headers are encoded following RFC 8949 Core Deterministic Encoding:
//! - Map keys are small integers, written in ascending order
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 seconds)
//!
//! The block hash is Blake3 over these bytes, so the same header must
//! produce identical bytes on every platform.
//!
//! Block bodies are application data and go through `ciborium`'s serde
//! encoder instead; they are hashed as opaque bytes.

use crate::block::BlockBody;
use crate::error::CoreError;
use crate::types::BlockHash;

/// Header field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const PREVIOUS_HASH: u64 = 2;
    pub const BODY: u64 = 3;

    pub const COUNT: u64 = 4;
}

/// Encode the hashed fields of a block to canonical CBOR bytes.
///
/// The block's own hash is never part of this encoding.
pub fn canonical_header_bytes(
    height: u64,
    timestamp: i64,
    previous_hash: Option<&BlockHash>,
    body: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(body.len() + 64);

    encode_uint(&mut buf, 5, keys::COUNT);

    encode_uint(&mut buf, 0, keys::HEIGHT);
    encode_uint(&mut buf, 0, height);

    encode_uint(&mut buf, 0, keys::TIMESTAMP);
    encode_int(&mut buf, timestamp);

    encode_uint(&mut buf, 0, keys::PREVIOUS_HASH);
    match previous_hash {
        Some(hash) => encode_bytes(&mut buf, hash.as_bytes()),
        None => buf.push(0xf6),
    }

    encode_uint(&mut buf, 0, keys::BODY);
    encode_bytes(&mut buf, body);

    buf
}

/// Encode a block body to bytes.
pub fn encode_body(body: &BlockBody) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    ciborium::into_writer(body, &mut buf).map_err(|e| CoreError::EncodingError(e.to_string()))?;
    Ok(buf)
}

/// Decode a block body from bytes.
pub fn decode_body(bytes: &[u8]) -> Result<BlockBody, CoreError> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}

/// Encode a signed integer (major types 0 and 1).
fn encode_int(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, !(n as u64));
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}
