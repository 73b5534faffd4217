//! Salt generation for anonymous vertex names.
//!
//! Anonymous functions, lambdas, and call targets need globally unique names
//! within a file. Production uses random salts; tests inject a sequence
//! counter so graph output is deterministic and comparable.

use std::sync::atomic::{AtomicU64, Ordering};

/// Produces short unique suffixes for anonymous vertex names
pub trait SaltGenerator: Send + Sync {
    fn salt(&self) -> String;
}

/// Random 6-hex-char salts (uuid v4)
#[derive(Debug, Default)]
pub struct RandomSalt;

impl SaltGenerator for RandomSalt {
    fn salt(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()[..6].to_string()
    }
}

/// Monotonic counter salts for deterministic output
#[derive(Debug, Default)]
pub struct SequentialSalt {
    next: AtomicU64,
}

impl SaltGenerator for SequentialSalt {
    fn salt(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{n:06}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_salt_counts_up() {
        let salt = SequentialSalt::default();
        assert_eq!(salt.salt(), "000000");
        assert_eq!(salt.salt(), "000001");
    }

    #[test]
    fn test_random_salt_is_short_hex() {
        let salt = RandomSalt;
        let s = salt.salt();
        assert_eq!(s.len(), 6);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
