use sha2::{Digest, Sha256};

/// Cache key derived from an ordered answer sequence.
///
/// Each answer is length-prefixed before hashing, so answers containing any
/// separator-like text (`|`, newlines, ...) cannot collide with a different
/// split of the same characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_answers<S: AsRef<str>>(answers: &[S]) -> Self {
        let mut h = Sha256::new();
        h.update(answers.len().to_string().as_bytes());
        h.update(b"\n");
        for answer in answers {
            let bytes = answer.as_ref().as_bytes();
            h.update(bytes.len().to_string().as_bytes());
            h.update(b":");
            h.update(bytes);
            h.update(b"\n");
        }
        Self(hex::encode(h.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_sequences_equal_keys() {
        let a = CacheKey::from_answers(&["red", "small"]);
        let b = CacheKey::from_answers(&["red".to_string(), "small".to_string()]);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn order_matters() {
        assert_ne!(
            CacheKey::from_answers(&["a", "b"]),
            CacheKey::from_answers(&["b", "a"])
        );
    }

    #[test]
    fn separator_inside_answer_does_not_collide() {
        assert_ne!(
            CacheKey::from_answers(&["a|b", "c"]),
            CacheKey::from_answers(&["a", "b|c"])
        );
        assert_ne!(
            CacheKey::from_answers(&["a\n1:b"]),
            CacheKey::from_answers(&["a", "b"])
        );
    }

    #[test]
    fn empty_and_blank_answers_are_distinct() {
        let none: [&str; 0] = [];
        assert_ne!(CacheKey::from_answers(&none), CacheKey::from_answers(&[""]));
        assert_ne!(
            CacheKey::from_answers(&[""]),
            CacheKey::from_answers(&["", ""])
        );
    }
}
