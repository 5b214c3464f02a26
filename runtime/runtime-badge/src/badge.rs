use crate::{CHANNEL_BITSET_MASK, CHANNEL_MASK, Channel, ChannelSet, DOMAIN_ID_MASK, DomainId};
use bitfield_struct::bitfield;

/// The sender badge in its raw bitfield form.
///
/// See the crate docs for the full layout. The two top bits select the
/// delivery kind; the 62-bit body is interpreted per kind. The type
/// allows access to the individual fields without manual masking or
/// shifting, using the [`bitfield_struct`](https://docs.rs/bitfield-struct/)
/// derive.
#[bitfield(u64)]
#[derive(PartialEq, Eq)]
pub struct Badge {
    /// Kind-specific payload (bits 0..=61).
    ///
    /// Notification bitset, caller channel, or faulting-domain identity,
    /// depending on the flags above.
    #[bits(62)]
    pub body: u64,

    /// Fault flag (bit 62). Takes precedence when classifying.
    pub is_fault: bool,

    /// Protected-call flag (bit 63).
    pub is_protected_call: bool,
}

/// What a badge says about its delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// A component's execution trapped; `source` is its badge-encoded
    /// identity.
    Fault { source: DomainId },
    /// Synchronous call expecting a reply, arriving on `channel`.
    ProtectedCall { channel: Channel },
    /// One or more fire-and-forget notifications, one per set bit.
    Notifications(ChannelSet),
}

impl Badge {
    /// Classifies this badge.
    ///
    /// Total over all 64-bit values. The kernel never sets both flags;
    /// should that impossible input appear anyway, the fault flag is
    /// tested first and wins, keeping the decode deterministic.
    #[must_use]
    pub const fn classify(self) -> Classification {
        let raw = self.into_bits();
        if self.is_fault() {
            Classification::Fault {
                source: DomainId::new(raw & DOMAIN_ID_MASK),
            }
        } else if self.is_protected_call() {
            #[allow(clippy::cast_possible_truncation)]
            let channel = Channel::new((raw & CHANNEL_MASK) as u32);
            Classification::ProtectedCall { channel }
        } else {
            Classification::Notifications(ChannelSet::from_bits(raw & CHANNEL_BITSET_MASK))
        }
    }
}

/// Classifies a raw badge word. Convenience for [`Badge::classify`].
#[inline]
#[must_use]
pub const fn classify(badge: u64) -> Classification {
    Badge::from_bits(badge).classify()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAULT: u64 = 1 << 62;
    const PROTECTED: u64 = 1 << 63;

    #[test]
    fn flag_bit_positions() {
        assert_eq!(Badge::new().with_is_fault(true).into_bits(), FAULT);
        assert_eq!(Badge::new().with_is_protected_call(true).into_bits(), PROTECTED);
        assert_eq!(Badge::new().with_body(1).into_bits(), 1);
    }

    #[test]
    fn fault_id_is_masked_independent_of_other_bits() {
        assert_eq!(
            classify(FAULT | 0x07),
            Classification::Fault {
                source: DomainId::new(7)
            }
        );
        // bits above the id mask do not leak into the identity
        assert_eq!(
            classify(FAULT | 0x3FFF_FFFF_FFFF_FE42),
            Classification::Fault {
                source: DomainId::new(0x42)
            }
        );
    }

    #[test]
    fn protected_call_channel_is_masked() {
        assert_eq!(
            classify(PROTECTED | 0x02),
            Classification::ProtectedCall {
                channel: Channel::new(2)
            }
        );
        assert_eq!(
            classify(PROTECTED | 0xFF),
            Classification::ProtectedCall {
                channel: Channel::new(0x3F)
            }
        );
    }

    #[test]
    fn both_flags_decode_as_fault() {
        // kernel-impossible, but decode must stay deterministic
        assert_eq!(
            classify(FAULT | PROTECTED | 0x05),
            Classification::Fault {
                source: DomainId::new(5)
            }
        );
    }

    #[test]
    fn notification_bits_map_to_ascending_channels() {
        let Classification::Notifications(set) = classify(0b101) else {
            panic!("expected notifications");
        };
        let channels: Vec<u32> = set.channels().map(Channel::index).collect();
        assert_eq!(channels, [0, 2]);
    }

    #[test]
    fn notification_boundary_bits() {
        // lowest and highest usable channel bits
        let Classification::Notifications(set) = classify(1 | (1 << 61)) else {
            panic!("expected notifications");
        };
        let channels: Vec<u32> = set.channels().map(Channel::index).collect();
        assert_eq!(channels, [0, 61]);
    }

    #[test]
    fn zero_badge_is_an_empty_batch() {
        let Classification::Notifications(set) = classify(0) else {
            panic!("expected notifications");
        };
        assert!(set.is_empty());
    }

    #[test]
    fn reclassifying_is_stable() {
        for badge in [0, 0b101, FAULT | 3, PROTECTED | 9, u64::MAX] {
            assert_eq!(classify(badge), classify(badge));
        }
    }
}
