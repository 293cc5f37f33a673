//! Short code generation strategies.
//!
//! Generators are pure: no storage access, no I/O. They only need enough
//! entropy that independent calls rarely collide; uniqueness itself is
//! enforced by the repository's atomic insert, never assumed here.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

/// Alphabet for short codes: base62, URL-safe without escaping.
pub const CODE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Produces candidate short codes of a fixed length.
pub trait CodeGenerator: Send + Sync {
    /// Returns a candidate code of [`Self::code_length`] characters over
    /// [`CODE_ALPHABET`].
    fn generate(&self) -> String;

    /// Length of every generated code.
    fn code_length(&self) -> usize;
}

/// Random allocation strategy.
///
/// Samples each character uniformly from the alphabet using the thread-local
/// CSPRNG, so codes are cryptographically unpredictable and resist
/// enumeration. This is the default strategy.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }

    fn code_length(&self) -> usize {
        self.length
    }
}

/// Sequential allocation strategy.
///
/// Base62-encodes an atomically incremented counter, left-padded to the
/// configured length. Codes are trivially enumerable; choose this only when
/// code-space enumeration is an accepted risk and dense allocation matters
/// more than unguessability.
#[derive(Debug)]
pub struct SequentialCodeGenerator {
    counter: AtomicU64,
    length: usize,
}

impl SequentialCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            counter: AtomicU64::new(0),
            length,
        }
    }
}

impl CodeGenerator for SequentialCodeGenerator {
    fn generate(&self) -> String {
        let value = self.counter.fetch_add(1, Ordering::Relaxed);
        let mut code = encode_base62(value);
        while code.len() < self.length {
            code.insert(0, CODE_ALPHABET[0] as char);
        }
        // Counter overflow past the code space wraps into longer strings;
        // truncating keeps the length contract and lets the store report the
        // collision.
        code.truncate(self.length);
        code
    }

    fn code_length(&self) -> usize {
        self.length
    }
}

/// Encodes `value` in base62 over [`CODE_ALPHABET`], most significant digit
/// first. Zero encodes as the first alphabet character.
fn encode_base62(mut value: u64) -> String {
    let base = CODE_ALPHABET.len() as u64;
    if value == 0 {
        return (CODE_ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(CODE_ALPHABET[(value % base) as usize]);
        value /= base;
    }
    digits.reverse();
    String::from_utf8(digits).expect("alphabet is ASCII")
}

/// Returns true if `code` could have been produced by a generator of the
/// given length.
pub fn is_well_formed_code(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}
