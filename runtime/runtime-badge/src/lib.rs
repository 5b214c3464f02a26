//! # Badge Codec
//!
//! Pure decoding of the 64-bit sender badge the kernel attaches to every
//! delivery on a component's input endpoint. The codec is total: any
//! 64-bit value classifies into exactly one of three shapes, and decoding
//! has no side effects.
//!
//! ## Badge layout
//!
//! ```text
//! | 63 | 62 | 61 ........................... 0 |
//! | PC | F  |              body                |
//! ```
//!
//! | Bits  | Name | Meaning |
//! |-------|------|----------|
//! | 63    | `PC` | Delivery is a protected call; `body & CHANNEL_MASK` is the caller's channel |
//! | 62    | `F`  | Delivery is a fault report; `body & DOMAIN_ID_MASK` is the faulting domain |
//! | 0–61  | body | With both flags clear: notification bitset, one bit per channel |
//!
//! The kernel guarantees `PC` and `F` are never both set. Decoding stays
//! deterministic regardless: the fault flag is tested first.
//!
//! Out-of-range channel or domain values (beyond what the application
//! registered) pass through unchanged; bounds-checking against the
//! handler table is the application's concern.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

mod badge;
mod channel_set;
mod id;

pub use badge::{Badge, Classification, classify};
pub use channel_set::{ChannelIter, ChannelSet};
pub use id::{Channel, DomainId};

/// Mask extracting the faulting domain's identity from a fault badge.
pub const DOMAIN_ID_MASK: u64 = 0xFF;

/// Mask extracting the caller's channel from a protected-call badge.
pub const CHANNEL_MASK: u64 = 0x3F;

/// Number of badge bits available as notification channels.
///
/// The two top bits are reserved for the delivery-kind flags, leaving 62
/// distinct notification channels per endpoint.
pub const CHANNEL_BITS: u32 = 62;

/// Mask of all notification channel bits (bits `0..CHANNEL_BITS`).
pub const CHANNEL_BITSET_MASK: u64 = (1 << CHANNEL_BITS) - 1;
