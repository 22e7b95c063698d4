//! Secret strings that are redacted in logs and wiped on drop.

use std::fmt;

use zeroize::Zeroize;

/// A credential value such as the signing secret or the directory token.
///
/// `Debug` never prints the value, and the backing buffer is zeroed when the
/// secret is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a credential value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value for use on the wire.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the value is empty once surrounding whitespace is ignored.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
