//! # Event Dispatch Runtime
//!
//! The long-running control loop at the heart of every protection domain:
//! block for the next kernel delivery on the shared input endpoint,
//! classify its badge, invoke the matching application callback, pick the
//! blocking primitive for the next iteration.
//!
//! ## Control flow
//!
//! ```text
//! kernel ──receive──► event loop ──classify──► badge codec
//!                         │
//!                         ├─ fault          ──► Handler::fault
//!                         ├─ protected call ──► Handler::protected ─► reply
//!                         └─ notifications  ──► Handler::notified (per bit)
//!                         │
//!                         └──next receive primitive──► kernel
//! ```
//!
//! ## Concurrency model
//!
//! One logical thread per protection domain. The blocking receive is the
//! only suspension point; handlers run to completion between receives,
//! strictly in order, with no interleaving. There are no locks because
//! there is nothing to share: the loop state is a single value threaded
//! through iterations. Side effects a handler causes are observed on the
//! *next* iteration, never the current one, and handlers must not attempt
//! to receive themselves.
//!
//! ## Passive components
//!
//! A component built without its own scheduling context signals the
//! monitor exactly once, on its very first blocking call, to hand the
//! donated context back; see [`DomainConfig::passive`] and
//! [`handoff_signal`].

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
extern crate alloc;

mod event_loop;
mod handler;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use event_loop::{DispatchError, DomainConfig, handoff_signal, run};
pub use handler::Handler;
