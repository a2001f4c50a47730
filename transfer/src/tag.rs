use std::fmt;

use rand::Rng;

/// Byte width of a transfer tag, matching the store's object-id size.
pub const TAG_LEN: usize = 20;

/// Unique identifier correlating one in-flight task with a slot in the
/// external transfer layer. Allocated at dispatch time, consumed when the
/// task's result is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferTag([u8; TAG_LEN]);

impl TransferTag {
    /// Allocates a fresh random tag.
    pub fn random() -> Self {
        let mut bytes = [0u8; TAG_LEN];
        rand::rng().fill(&mut bytes[..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }
}

impl fmt::Display for TransferTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TransferTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransferTag({self})")
    }
}
