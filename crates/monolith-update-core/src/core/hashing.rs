// monolith-update-core/src/core/hashing.rs
// ============================================================================
// Module: Monolith Update Content Hashing
// Description: SHA-256 content hashing for update artifacts.
// Purpose: Provide the integrity digest recorded against every stored file.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Artifact integrity hashes are SHA-256 over raw file bytes, encoded as
//! lowercase hex with no separators. The digest is computed once at save
//! time from the bytes read back off disk; the engine never re-verifies it
//! afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Hashes raw bytes with SHA-256 and returns the lowercase hex digest.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex_encode(&digest)
}

/// Encodes bytes as a lowercase hex string without separators.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
