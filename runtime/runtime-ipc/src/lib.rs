//! # Kernel IPC Wire Types
//!
//! The types exchanged across the kernel IPC boundary of a protection
//! domain, shared by the event runtime and the fault monitor.
//!
//! ## What you get
//! - A [`Capability`] newtype (u64 slot index) to avoid mixing capability
//!   slots with plain words.
//! - The kernel's message-info word as a typed bitfield ([`MessageInfo`]).
//! - A fixed-capacity [`Message`] record holding the message registers of
//!   one IPC transfer.
//! - The fault-message register layout as documented constants ([`fault`]).
//! - The blocking receive primitives as a trait ([`KernelPort`]) so the
//!   event loop can run against the real kernel binding in production and
//!   against a scripted port in host tests.
//!
//! ## Wire shape
//!
//! Every delivery is a `(badge, message)` pair:
//!
//! ```text
//! kernel ──► badge: u64          sender tag, interpreted by the badge codec
//!        ──► message info: u64   label | caps unwrapped | extra caps | length
//!        ──► MR0..MRn: u64       message registers (n = length)
//! ```
//!
//! The register file itself is shared between iterations of the event
//! loop; port implementations copy it into an owned [`Message`] before
//! returning, so handler code never observes it being reused.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

mod capability;
pub mod fault;
mod message;
mod port;

pub use capability::Capability;
pub use message::{MSG_MAX_WORDS, Message, MessageInfo};
pub use port::{Delivery, IpcError, KernelPort};

/// Machine word as used in badges and message registers.
pub type Word = u64;
