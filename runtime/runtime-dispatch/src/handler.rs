use runtime_badge::{Channel, DomainId};
use runtime_ipc::Message;

/// The application face of a protection domain.
///
/// A component supplies exactly one implementation; the event loop calls
/// into it for every delivery. `init` and `notified` must be provided;
/// `protected` and `fault` carry default implementations matching the
/// behaviour of a component that simply does not handle them (reply with
/// the zero message, ignore the fault report).
///
/// All methods run on the loop's single thread and must return; blocking
/// on a new receive from inside a handler is undefined for this design.
/// Payloads arrive as owned copies, so nothing needs to be copied out
/// before returning.
pub trait Handler {
    /// Invoked exactly once, before the first blocking receive.
    ///
    /// For a passive component, the scheduling-context handoff happens
    /// after this returns, so `init` still runs on the donated context.
    fn init(&mut self);

    /// A notification arrived on `channel`.
    ///
    /// Within one received batch this is called once per set badge bit,
    /// in ascending channel order, synchronously.
    fn notified(&mut self, channel: Channel);

    /// A protected call arrived on `channel`; the returned message is
    /// sent back to the caller on the next loop iteration.
    fn protected(&mut self, channel: Channel, msg: &Message) -> Message {
        let _ = (channel, msg);
        Message::empty()
    }

    /// The kernel reported that the component identified by `source`
    /// trapped. No reply is sent on the component's behalf; resuming the
    /// faulting component is a separate mechanism.
    fn fault(&mut self, source: DomainId, msg: &Message) {
        let _ = (source, msg);
    }
}
