use crate::Handler;
use core::convert::Infallible;
use log::{debug, trace};
use runtime_badge::{Classification, classify};
use runtime_ipc::{Capability, Delivery, IpcError, KernelPort, Message, MessageInfo};
use thiserror::Error;

/// Image-build-time configuration of one protection domain.
///
/// Resolved by the system build tool, never negotiated at runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DomainConfig {
    /// The component runs without its own scheduling context and must
    /// hand the donated one back to the monitor once initialised.
    pub passive: bool,
    /// Where the scheduling-context release signal goes.
    pub monitor_endpoint: Capability,
}

impl DomainConfig {
    /// An ordinary component with its own scheduling context.
    pub const ACTIVE: Self = Self {
        passive: false,
        monitor_endpoint: Capability::MONITOR_ENDPOINT,
    };

    /// A passive component using the well-known monitor endpoint slot.
    pub const PASSIVE: Self = Self {
        passive: true,
        monitor_endpoint: Capability::MONITOR_ENDPOINT,
    };
}

/// Fatal event-loop failure.
///
/// Every variant wraps a kernel primitive failure, tagged with the phase
/// it happened in. There is no recovery path below the kernel: the
/// embedding component reports the error and halts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A plain blocking receive failed.
    #[error("blocking receive failed: {0}")]
    Receive(#[source] IpcError),
    /// The combined reply-and-receive after a protected call failed.
    #[error("protected-call reply failed: {0}")]
    Reply(#[source] IpcError),
    /// The one-shot scheduling-context handoff failed.
    #[error("scheduling-context handoff failed: {0}")]
    Handoff(#[source] IpcError),
}

/// Blocking primitive to use on the next iteration.
///
/// Tracking pending-reply and pending-signal as two booleans would admit
/// an impossible both-true state; the tagged enum rules it out by
/// construction, so an iteration blocks in exactly one of the three
/// forms.
enum NextRecv {
    /// Plain receive on the input endpoint.
    Plain,
    /// Reply to the previous protected call, then receive.
    ReplyThenRecv(Message),
    /// Send the handoff signal, then receive. Constructed only before
    /// the first iteration of a passive component.
    SignalThenRecv {
        endpoint: Capability,
        signal: Message,
    },
}

/// Payload of the one-shot scheduling-context release signal: a single
/// zero register under label zero.
#[must_use]
pub fn handoff_signal() -> Message {
    let mut signal = Message::with_info(MessageInfo::new().with_length(1));
    signal.set_word(0, 0);
    signal
}

/// Runs the event loop of a protection domain. Does not return under
/// normal operation.
///
/// Calls `handler.init()` exactly once, performs the scheduling-context
/// handoff if `config.passive` is set, then blocks for deliveries and
/// dispatches them until the kernel fails a primitive.
///
/// # Errors
///
/// Returns the wrapped [`IpcError`] once any blocking primitive fails;
/// see [`DispatchError`] for the halt-only policy.
pub fn run<P, H>(
    port: &mut P,
    handler: &mut H,
    config: DomainConfig,
) -> Result<Infallible, DispatchError>
where
    P: KernelPort,
    H: Handler,
{
    handler.init();

    // A passive component is only now ready to lose its donated context;
    // delaying the signal to the first blocking call means the monitor
    // rebinds the context while this component is already receive-blocked.
    let mut next = if config.passive {
        debug!(
            "passive start-up, handing scheduling context to {}",
            config.monitor_endpoint
        );
        NextRecv::SignalThenRecv {
            endpoint: config.monitor_endpoint,
            signal: handoff_signal(),
        }
    } else {
        NextRecv::Plain
    };

    loop {
        let delivery = match core::mem::replace(&mut next, NextRecv::Plain) {
            NextRecv::Plain => port.recv().map_err(DispatchError::Receive)?,
            NextRecv::ReplyThenRecv(reply) => {
                port.reply_recv(&reply).map_err(DispatchError::Reply)?
            }
            NextRecv::SignalThenRecv { endpoint, signal } => port
                .signal_recv(endpoint, &signal)
                .map_err(DispatchError::Handoff)?,
        };
        next = dispatch(handler, &delivery);
    }
}

/// Classifies one delivery and runs the matching handler. Returns the
/// blocking primitive for the next iteration.
fn dispatch<H: Handler>(handler: &mut H, delivery: &Delivery) -> NextRecv {
    match classify(delivery.badge) {
        Classification::Fault { source } => {
            trace!("fault report from {source}");
            handler.fault(source, &delivery.message);
            NextRecv::Plain
        }
        Classification::ProtectedCall { channel } => {
            trace!("protected call on {channel}");
            let reply = handler.protected(channel, &delivery.message);
            NextRecv::ReplyThenRecv(reply)
        }
        Classification::Notifications(batch) => {
            trace!("notification batch {batch:?}");
            for channel in batch {
                handler.notified(channel);
            }
            NextRecv::Plain
        }
    }
}
