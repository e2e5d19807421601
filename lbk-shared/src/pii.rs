use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Number of trailing characters left readable when a value is logged.
const VISIBLE_TAIL: usize = 2;

/// Wrapper for client contact data (phone numbers, delivery addresses).
///
/// `Debug` and `Display` only reveal the last two characters so the value can
/// be correlated in logs without leaking it. Serialization writes the real
/// value: order records and messages need it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    fn masked(&self) -> String {
        let value = self.0.as_ref();
        let count = value.chars().count();
        if count <= VISIBLE_TAIL {
            return "*".repeat(count.max(1));
        }
        let tail: String = value.chars().skip(count - VISIBLE_TAIL).collect();
        format!("{}{}", "*".repeat(count - VISIBLE_TAIL), tail)
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
