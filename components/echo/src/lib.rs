//! Sample protection domain: echoes protected calls back at their
//! callers and counts notification arrivals.
//!
//! Mostly useful as a template for real components and as an end-to-end
//! exercise of the runtime: wire an [`Echo`] to a kernel port, hand both
//! to [`runtime_dispatch::run`], done.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

use log::{info, warn};
use runtime_badge::{Channel, DomainId};
use runtime_dispatch::Handler;
use runtime_ipc::Message;

/// Echo component state.
#[derive(Default)]
pub struct Echo {
    notifications_seen: u64,
}

impl Echo {
    /// Notifications handled since start-up.
    #[must_use]
    pub const fn notifications_seen(&self) -> u64 {
        self.notifications_seen
    }
}

impl Handler for Echo {
    fn init(&mut self) {
        info!("echo: started");
    }

    fn notified(&mut self, channel: Channel) {
        self.notifications_seen += 1;
        info!("echo: notification on {channel}");
    }

    fn protected(&mut self, channel: Channel, msg: &Message) -> Message {
        info!(
            "echo: call on {channel}, label {:#x}, {} words",
            msg.label(),
            msg.length()
        );
        *msg
    }

    fn fault(&mut self, source: DomainId, msg: &Message) {
        warn!("echo: fault report from {source}, label {:#x}", msg.label());
    }
}
