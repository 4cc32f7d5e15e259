//! Identifier generation
//!
//! Identifiers follow the emulated platform's convention: 18-character
//! alphanumeric strings, opaque to callers, never reused within one
//! instance's lifetime.

use std::collections::HashSet;

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of a generated record identifier.
pub const ID_LENGTH: usize = 18;

/// Generates unique record identifiers for one virtual instance.
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: HashSet<String>,
}

impl IdGenerator {
    /// Creates a generator with no issued identifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh identifier, guaranteed distinct from every
    /// identifier this generator has produced before.
    pub fn next_id(&mut self) -> String {
        loop {
            let candidate: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(ID_LENGTH)
                .map(char::from)
                .collect();
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let mut gen = IdGenerator::new();
        let id = gen.next_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut gen = IdGenerator::new();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(gen.next_id()));
        }
    }
}
