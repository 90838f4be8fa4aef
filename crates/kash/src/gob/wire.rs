//! Primitive gob codecs: unsigned and signed integers, booleans and strings.
//!
//! Every composite in the stream is built from these four encodings, so they
//! are kept byte-exact with the Go implementation.

/// Growable byte buffer holding one gob message body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct WireBuffer {
    bytes: Vec<u8>,
}

impl WireBuffer {
    /// Append an unsigned integer.
    ///
    /// Values below `0x80` occupy one byte. Larger values are written as the
    /// negated byte count followed by the minimal big-endian representation.
    #[expect(
        clippy::big_endian_bytes,
        reason = "gob transmits multi-byte unsigned integers big-endian"
    )]
    pub(crate) fn uint(&mut self, value: u64) {
        match u8::try_from(value) {
            Ok(byte) if byte < 0x80 => self.bytes.push(byte),
            _ => {
                let be = value.to_be_bytes();
                let significant = be.iter().skip_while(|byte| **byte == 0);
                self.bytes.push(negated_width(significant.clone().count()));
                self.bytes.extend(significant);
            }
        }
    }

    /// Append a signed integer using the gob sign-folding scheme.
    pub(crate) fn int(&mut self, value: i64) {
        self.uint(fold_sign(value));
    }

    /// Append a boolean as the unsigned integer 0 or 1.
    pub(crate) fn bool(&mut self, value: bool) {
        self.uint(u64::from(value));
    }

    /// Append a length-prefixed string. Gob strings are byte strings, so
    /// the bytes need not be UTF-8.
    pub(crate) fn string(&mut self, value: &[u8]) {
        self.uint(value.len() as u64);
        self.bytes.extend_from_slice(value);
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a u64 spans at most eight bytes"
)]
fn negated_width(width: usize) -> u8 {
    (width as u8).wrapping_neg()
}

/// Fold the sign into the low bit: `i << 1` for non-negative values and
/// `(!i << 1) | 1` for negative ones.
#[expect(
    clippy::cast_sign_loss,
    reason = "both operands are non-negative once the sign is folded"
)]
const fn fold_sign(value: i64) -> u64 {
    if value < 0 {
        ((!value) as u64) << 1 | 1
    } else {
        (value as u64) << 1
    }
}
