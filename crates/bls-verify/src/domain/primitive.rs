//! # BLS Primitive (BLS12-381, `min_pk`)
//!
//! Wraps `blst` for the two operations the rest of the engine calls:
//! single-set verification and randomized multi-set batch verification.
//!
//! Ethereum consensus BLS uses the `min_pk` convention: 48-byte public
//! keys on G1, 96-byte signatures on G2, with the proof-of-possession
//! domain separation tag below.
//!
//! Neither function allocates beyond per-call scratch, both are
//! thread-safe, and both are pure compute (no I/O, no blocking).

use blst::min_pk::{PublicKey, Signature};
use blst::{blst_scalar, BLST_ERROR};
use rand::RngCore;

use super::entities::SignatureSet;
use super::errors::PrimitiveError;

/// Domain Separation Tag for BLS signatures (Ethereum 2.0 proof-of-possession scheme).
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Number of random bits drawn per set for the randomized multi-pairing
/// check in [`verify_many`]. 64 bits of entropy per coefficient is the
/// usual choice: it keeps the soundness error negligible while keeping
/// the scalar cheap to generate and multiply.
const RAND_BITS: usize = 64;

fn map_blst_error(e: BLST_ERROR) -> PrimitiveError {
    match e {
        BLST_ERROR::BLST_BAD_ENCODING
        | BLST_ERROR::BLST_POINT_NOT_ON_CURVE
        | BLST_ERROR::BLST_POINT_NOT_IN_GROUP
        | BLST_ERROR::BLST_PK_IS_INFINITY
        | BLST_ERROR::BLST_BAD_SCALAR => PrimitiveError::Malformed,
        other => PrimitiveError::Other(format!("{other:?}")),
    }
}

fn parse_set(set: &SignatureSet) -> Result<(PublicKey, Signature), PrimitiveError> {
    let pk = PublicKey::from_bytes(&set.public_key.0).map_err(map_blst_error)?;
    let sig = Signature::from_bytes(&set.signature.0).map_err(map_blst_error)?;
    Ok((pk, sig))
}

/// Verify a single signature set.
///
/// `Ok(false)` means "cryptographically invalid"; `Err` means "ill-formed
/// input or internal fault".
pub fn verify_set(set: &SignatureSet) -> Result<bool, PrimitiveError> {
    let (pk, sig) = parse_set(set)?;
    match sig.verify(true, &set.message, DST, &[], &pk, true) {
        BLST_ERROR::BLST_SUCCESS => Ok(true),
        BLST_ERROR::BLST_VERIFY_FAIL => Ok(false),
        e => Err(map_blst_error(e)),
    }
}

/// Verify many signature sets as a conjunction using randomized
/// aggregate (multi-pairing) verification: `true` iff *all* sets verify,
/// `false` iff *at least one* does not. Semantically equivalent to the
/// conjunction of `verify_set` calls, modulo a negligible soundness error
/// introduced by the per-set random scalars.
///
/// A "batch" of one job's sets is a valid input here: callers use this
/// both for genuine multi-job chunks and for single-job individual
/// fallback, per the batch verifier's own contract.
pub fn verify_many(sets: &[SignatureSet]) -> Result<bool, PrimitiveError> {
    if sets.is_empty() {
        return Err(PrimitiveError::EmptyInput);
    }

    let mut pks = Vec::with_capacity(sets.len());
    let mut sigs = Vec::with_capacity(sets.len());
    for set in sets {
        let (pk, sig) = parse_set(set)?;
        pks.push(pk);
        sigs.push(sig);
    }

    let msgs: Vec<&[u8]> = sets.iter().map(|s| s.message.as_slice()).collect();
    let pk_refs: Vec<&PublicKey> = pks.iter().collect();
    let sig_refs: Vec<&Signature> = sigs.iter().collect();
    let rands = random_scalars(sets.len());

    match Signature::verify_multiple_aggregate_signatures(
        &msgs, DST, &pk_refs, false, &sig_refs, true, &rands, RAND_BITS,
    ) {
        BLST_ERROR::BLST_SUCCESS => Ok(true),
        BLST_ERROR::BLST_VERIFY_FAIL => Ok(false),
        e => Err(map_blst_error(e)),
    }
}

/// Draw one fresh random scalar per set for the multi-pairing check.
/// `RAND_BITS` bits of entropy is all the underlying check consumes per
/// scalar, so only the low 8 bytes are filled; the rest stay zero.
fn random_scalars(n: usize) -> Vec<blst_scalar> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes[..RAND_BITS / 8]);
            let mut scalar = blst_scalar::default();
            unsafe {
                blst::blst_scalar_from_le_bytes(&mut scalar, bytes.as_ptr(), bytes.len());
            }
            scalar
        })
        .collect()
}
