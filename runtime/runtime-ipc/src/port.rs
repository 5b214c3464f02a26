use crate::{Capability, Message, Word};
use thiserror::Error;

/// One kernel delivery: the sender badge plus the copied-out payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    /// Raw sender badge; interpreted by the badge codec.
    pub badge: Word,
    /// Message registers of the transfer.
    pub message: Message,
}

/// Failure of a kernel IPC primitive.
///
/// These cannot be retried: without the kernel's receive guarantee the
/// event loop has no way to make forward progress, so every variant is
/// terminal for the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum IpcError {
    /// The endpoint capability is gone (revoked or never valid).
    #[error("endpoint capability is no longer valid")]
    EndpointRevoked,
    /// The reply to a protected call could not be delivered.
    #[error("reply delivery failed")]
    ReplyFailed,
    /// The outbound signal of a combined send-receive was refused.
    #[error("signal delivery failed")]
    SignalFailed,
}

/// The kernel's blocking receive primitives.
///
/// Exactly one implementation backs a production image (the kernel
/// binding, owning the IPC buffer handle); host tests substitute a
/// scripted port. All three calls block until the kernel hands over the
/// next message; they are the event loop's only suspension points, and
/// there is no timeout or cancellation below the kernel.
///
/// Implementations copy the shared register file into the returned
/// [`Delivery`] before handing it out, so callers may hold the message
/// across subsequent receives.
pub trait KernelPort {
    /// Blocks on the input endpoint until the next delivery.
    ///
    /// # Errors
    ///
    /// Returns [`IpcError`] if the kernel refuses the receive; see the
    /// type docs for why this is terminal.
    fn recv(&mut self) -> Result<Delivery, IpcError>;

    /// Replies to the caller of the previous protected call, then blocks
    /// for the next delivery. Reply and receive are one combined kernel
    /// operation, not two.
    ///
    /// # Errors
    ///
    /// Returns [`IpcError`] if the reply or the subsequent receive fails.
    fn reply_recv(&mut self, reply: &Message) -> Result<Delivery, IpcError>;

    /// Sends `signal` to `target` without blocking on the send, then
    /// blocks for the next delivery. Used exactly once, by passive
    /// components handing their scheduling context back to the monitor.
    ///
    /// # Errors
    ///
    /// Returns [`IpcError`] if the signal or the subsequent receive fails.
    fn signal_recv(&mut self, target: Capability, signal: &Message) -> Result<Delivery, IpcError>;
}
