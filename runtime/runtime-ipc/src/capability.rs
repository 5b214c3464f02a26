use crate::Word;
use core::fmt;

/// Index of a capability slot in the component's capability space.
///
/// A thin wrapper around a slot number that carries intent and prevents
/// accidental mix-ups between capability indices and ordinary message
/// words. The slots themselves are assigned by the system build tool and
/// are fixed for the lifetime of the image; the well-known ones below are
/// part of the loader contract.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Capability(Word);

impl Capability {
    /// Endpoint every component blocks on for its deliveries.
    pub const INPUT_ENDPOINT: Self = Self::new(1);

    /// Endpoint the monitor blocks on for fault deliveries.
    pub const FAULT_ENDPOINT: Self = Self::new(2);

    /// Reply object used by the combined receive primitives.
    pub const REPLY: Self = Self::new(4);

    /// Monitor endpoint a passive component signals once after
    /// initialisation to hand back its scheduling context.
    pub const MONITOR_ENDPOINT: Self = Self::new(5);

    #[inline]
    #[must_use]
    pub const fn new(slot: Word) -> Self {
        Self(slot)
    }

    #[inline]
    #[must_use]
    pub const fn slot(self) -> Word {
        self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cap[{}]", self.0)
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({})", self.0)
    }
}
