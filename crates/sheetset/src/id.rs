//! Random identifiers for datasets and metadata.

/// Length of generated identifiers.
const ID_LENGTH: usize = 20;

/// Generate a fresh random alphanumeric identifier.
pub fn generate_id() -> String {
    std::iter::repeat_with(fastrand::alphanumeric)
        .take(ID_LENGTH)
        .collect()
}

/// Check that an identifier is safe to use as a file name.
pub(crate) fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let a = generate_id();
        let b = generate_id();
        assert_eq!(a.len(), ID_LENGTH);
        assert!(is_safe_id(&a));
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_safe_id() {
        assert!(is_safe_id("abc_123-X"));
        assert!(!is_safe_id(""));
        assert!(!is_safe_id("../etc"));
        assert!(!is_safe_id("a/b"));
    }
}
