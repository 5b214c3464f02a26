use core::fmt;

/// Channel index identifying one peer connection of a component.
///
/// Notification badges carry channels as bit positions; protected-call
/// badges carry the caller's channel in the masked low bits. Either way
/// the index is what the application keyed its handler table with.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Channel(u32);

impl Channel {
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

/// Badge-encoded identity of a protection domain, as carried in fault
/// reports.
///
/// The system build tool assigns each domain a small number; the kernel
/// stamps it into the fault badge so the monitor (or a parent domain) can
/// tell whose execution trapped. Values are already masked with
/// [`crate::DOMAIN_ID_MASK`] but otherwise passed through raw.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DomainId(u64);

impl DomainId {
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pd{}", self.0)
    }
}
