//! Scripted stand-in for the kernel IPC boundary.
//!
//! Lets host tests drive the event loop through arbitrary delivery
//! sequences and then assert on the exact order of blocking calls the
//! loop made. Never compiled into production images.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use runtime_ipc::{Capability, Delivery, IpcError, KernelPort, Message};

/// One blocking call the loop made, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortOp {
    /// Plain receive.
    Recv,
    /// Combined reply-and-receive, with the reply payload.
    ReplyRecv { reply: Message },
    /// Combined signal-and-receive, with the signal target and payload.
    SignalRecv {
        endpoint: Capability,
        signal: Message,
    },
}

/// Kernel port replaying a fixed script of deliveries.
///
/// Each blocking call pops the next scripted delivery and records itself
/// in [`ops`](Self::ops). Once the script is exhausted the port reports
/// the endpoint as revoked, which makes [`crate::run`] return and lets
/// the test inspect the recording.
#[derive(Default)]
pub struct ScriptedPort {
    deliveries: VecDeque<Delivery>,
    /// Every blocking call made against this port, oldest first.
    pub ops: Vec<PortOp>,
}

impl ScriptedPort {
    #[must_use]
    pub fn new(deliveries: impl IntoIterator<Item = Delivery>) -> Self {
        Self {
            deliveries: deliveries.into_iter().collect(),
            ops: Vec::new(),
        }
    }

    fn next_delivery(&mut self) -> Result<Delivery, IpcError> {
        self.deliveries.pop_front().ok_or(IpcError::EndpointRevoked)
    }

    /// Count of signal-carrying receives made so far.
    #[must_use]
    pub fn signals_sent(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PortOp::SignalRecv { .. }))
            .count()
    }
}

impl KernelPort for ScriptedPort {
    fn recv(&mut self) -> Result<Delivery, IpcError> {
        self.ops.push(PortOp::Recv);
        self.next_delivery()
    }

    fn reply_recv(&mut self, reply: &Message) -> Result<Delivery, IpcError> {
        self.ops.push(PortOp::ReplyRecv { reply: *reply });
        self.next_delivery()
    }

    fn signal_recv(&mut self, target: Capability, signal: &Message) -> Result<Delivery, IpcError> {
        self.ops.push(PortOp::SignalRecv {
            endpoint: target,
            signal: *signal,
        });
        self.next_delivery()
    }
}
