use runtime_badge::{Channel, DomainId};
use runtime_dispatch::mock::{PortOp, ScriptedPort};
use runtime_dispatch::{DispatchError, DomainConfig, Handler, handoff_signal, run};
use runtime_ipc::{Capability, Delivery, IpcError, Message};
use std::collections::VecDeque;

const FAULT: u64 = 1 << 62;
const PROTECTED: u64 = 1 << 63;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Init,
    Notified(u32),
    Protected(u32, Message),
    Fault(u64, Message),
}

/// Handler recording every callback; protected calls answer with the
/// next queued reply (or the default zero message).
#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
    replies: VecDeque<Message>,
}

impl Recorder {
    fn with_replies(replies: impl IntoIterator<Item = Message>) -> Self {
        Self {
            events: Vec::new(),
            replies: replies.into_iter().collect(),
        }
    }
}

impl Handler for Recorder {
    fn init(&mut self) {
        self.events.push(Event::Init);
    }

    fn notified(&mut self, channel: Channel) {
        self.events.push(Event::Notified(channel.index()));
    }

    fn protected(&mut self, channel: Channel, msg: &Message) -> Message {
        self.events.push(Event::Protected(channel.index(), *msg));
        self.replies.pop_front().unwrap_or_else(Message::empty)
    }

    fn fault(&mut self, source: DomainId, msg: &Message) {
        self.events.push(Event::Fault(source.as_u64(), *msg));
    }
}

fn delivery(badge: u64, message: Message) -> Delivery {
    Delivery { badge, message }
}

#[test]
fn init_runs_once_even_when_the_first_receive_fails() {
    let mut port = ScriptedPort::default();
    let mut handler = Recorder::default();

    let err = run(&mut port, &mut handler, DomainConfig::ACTIVE).unwrap_err();

    assert_eq!(err, DispatchError::Receive(IpcError::EndpointRevoked));
    assert_eq!(handler.events, [Event::Init]);
    assert_eq!(port.ops, [PortOp::Recv]);
}

#[test]
fn notification_batch_runs_in_ascending_channel_order() {
    // bits 0 and 2 set, top bits clear
    let mut port = ScriptedPort::new([delivery(0b101, Message::empty())]);
    let mut handler = Recorder::default();

    let _ = run(&mut port, &mut handler, DomainConfig::ACTIVE);

    assert_eq!(
        handler.events,
        [Event::Init, Event::Notified(0), Event::Notified(2)]
    );
    // no reply pending afterwards: the next blocking call is plain
    assert_eq!(port.ops, [PortOp::Recv, PortOp::Recv]);
}

#[test]
fn zero_badge_completes_an_iteration_without_callbacks() {
    let mut port = ScriptedPort::new([delivery(0, Message::empty())]);
    let mut handler = Recorder::default();

    let _ = run(&mut port, &mut handler, DomainConfig::ACTIVE);

    assert_eq!(handler.events, [Event::Init]);
    assert_eq!(port.ops, [PortOp::Recv, PortOp::Recv]);
}

#[test]
fn protected_call_reply_carries_the_handler_return() {
    let request = Message::from_words(0x11, &[1, 2, 3]);
    let reply = Message::from_words(0x22, &[42]);
    let mut port = ScriptedPort::new([delivery(PROTECTED | 0x02, request)]);
    let mut handler = Recorder::with_replies([reply]);

    let _ = run(&mut port, &mut handler, DomainConfig::ACTIVE);

    assert_eq!(handler.events, [Event::Init, Event::Protected(2, request)]);
    assert_eq!(port.ops, [PortOp::Recv, PortOp::ReplyRecv { reply }]);
}

#[test]
fn one_reply_per_call_in_call_order() {
    let first = Message::from_words(1, &[10]);
    let second = Message::from_words(2, &[20]);
    let mut port = ScriptedPort::new([
        delivery(PROTECTED | 1, Message::empty()),
        delivery(PROTECTED | 5, Message::empty()),
    ]);
    let mut handler = Recorder::with_replies([first, second]);

    let _ = run(&mut port, &mut handler, DomainConfig::ACTIVE);

    assert_eq!(
        port.ops,
        [
            PortOp::Recv,
            PortOp::ReplyRecv { reply: first },
            PortOp::ReplyRecv { reply: second },
        ]
    );
}

#[test]
fn unhandled_protected_call_replies_with_the_zero_message() {
    /// Handler relying on the default `protected`/`fault` bodies.
    struct Minimal;
    impl Handler for Minimal {
        fn init(&mut self) {}
        fn notified(&mut self, _channel: Channel) {}
    }

    let mut port = ScriptedPort::new([delivery(PROTECTED | 3, Message::from_words(9, &[7]))]);
    let mut handler = Minimal;

    let _ = run(&mut port, &mut handler, DomainConfig::ACTIVE);

    assert_eq!(
        port.ops,
        [
            PortOp::Recv,
            PortOp::ReplyRecv {
                reply: Message::empty()
            },
        ]
    );
}

#[test]
fn fault_gets_no_reply_and_clears_a_pending_one() {
    let fault_msg = Message::from_words(5, &[0x1000, 0xdead, 0, 0]);
    let mut port = ScriptedPort::new([
        delivery(PROTECTED | 1, Message::empty()),
        // delivered by the reply-receive; must not itself be replied to
        delivery(FAULT | 0x07, fault_msg),
    ]);
    let mut handler = Recorder::default();

    let _ = run(&mut port, &mut handler, DomainConfig::ACTIVE);

    assert_eq!(
        handler.events,
        [
            Event::Init,
            Event::Protected(1, Message::empty()),
            Event::Fault(7, fault_msg),
        ]
    );
    // after the fault the loop falls back to a plain receive
    assert_eq!(
        port.ops,
        [
            PortOp::Recv,
            PortOp::ReplyRecv {
                reply: Message::empty()
            },
            PortOp::Recv,
        ]
    );
}

#[test]
fn passive_component_signals_the_monitor_exactly_once() {
    let mut port = ScriptedPort::new([
        delivery(0b10, Message::empty()),
        delivery(PROTECTED | 2, Message::empty()),
        delivery(FAULT | 1, Message::empty()),
    ]);
    let mut handler = Recorder::default();

    let _ = run(&mut port, &mut handler, DomainConfig::PASSIVE);

    // the very first blocking call carries the signal, nothing after it
    assert_eq!(
        port.ops[0],
        PortOp::SignalRecv {
            endpoint: Capability::MONITOR_ENDPOINT,
            signal: handoff_signal(),
        }
    );
    assert_eq!(port.signals_sent(), 1);
    assert_eq!(port.ops.len(), 4);
}

#[test]
fn active_component_never_signals() {
    let mut port = ScriptedPort::new([delivery(0b1, Message::empty())]);
    let mut handler = Recorder::default();

    let _ = run(&mut port, &mut handler, DomainConfig::ACTIVE);

    assert_eq!(port.signals_sent(), 0);
    assert_eq!(port.ops[0], PortOp::Recv);
}

#[test]
fn reply_phase_failure_is_tagged_as_reply() {
    // script ends right after the call, so the reply-receive fails
    let mut port = ScriptedPort::new([delivery(PROTECTED | 1, Message::empty())]);
    let mut handler = Recorder::default();

    let err = run(&mut port, &mut handler, DomainConfig::ACTIVE).unwrap_err();

    assert_eq!(err, DispatchError::Reply(IpcError::EndpointRevoked));
}

#[test]
fn handoff_failure_is_tagged_as_handoff() {
    let mut port = ScriptedPort::default();
    let mut handler = Recorder::default();

    let err = run(&mut port, &mut handler, DomainConfig::PASSIVE).unwrap_err();

    assert_eq!(err, DispatchError::Handoff(IpcError::EndpointRevoked));
    // init still ran on the donated scheduling context
    assert_eq!(handler.events, [Event::Init]);
}
