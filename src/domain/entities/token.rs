//! Bearer credential value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Credential for an outbound service, masked in logs and wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretToken {
    value: String,
}

impl SecretToken {
    /// Creates token, rejecting blank values.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self { value })
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "cdn-token-0123456789abcdef";

    #[test]
    fn test_blank_token_rejected() {
        assert!(SecretToken::new("").is_none());
        assert!(SecretToken::new("   ").is_none());
    }

    #[test]
    fn test_token_is_trimmed() {
        let token = SecretToken::new(format!("  {RAW}\n")).unwrap();
        assert_eq!(token.as_str(), RAW);
    }

    #[test]
    fn test_token_masking() {
        let token = SecretToken::new(RAW).unwrap();
        let masked = token.masked();

        assert!(masked.contains("..."));
        assert!(!masked.contains(RAW));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = SecretToken::new(RAW).unwrap();
        assert!(!format!("{token:?}").contains(RAW));
        assert!(!format!("{token}").contains(RAW));
    }
}
