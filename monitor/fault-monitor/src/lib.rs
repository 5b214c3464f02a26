//! # Fault Monitor
//!
//! Decodes the kernel's fault messages into human-readable reports. The
//! monitor is a pure consumer of the fault wire format defined in
//! [`runtime_ipc::fault`]: it receives on the fault endpoint shared by
//! the system's protection domains, renders what it got, and goes back
//! to receiving. It makes no dispatch decisions, sends no replies, and
//! never resumes a faulting component.
//!
//! The badge on the fault endpoint carries the faulting domain's
//! identity, stamped by the system build tool.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod aarch64;
mod report;

pub use report::{FaultReport, LookupFailure};

use core::convert::Infallible;
use log::{error, info};
use runtime_badge::DomainId;
use runtime_ipc::{IpcError, KernelPort};

/// Receives on the fault endpoint forever, reporting every delivery.
///
/// # Errors
///
/// Returns once the kernel fails the receive. The embedding process
/// reports the error and halts; restarting crashed domains is an
/// external supervisor's job.
pub fn watch<P: KernelPort>(port: &mut P) -> Result<Infallible, IpcError> {
    info!("monitor started, waiting for faults");
    loop {
        let delivery = port.recv()?;
        let source = DomainId::new(delivery.badge);
        error!("{}", FaultReport::decode(source, &delivery.message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime_dispatch::mock::{PortOp, ScriptedPort};
    use runtime_ipc::fault::label;
    use runtime_ipc::{Delivery, Message};

    #[test]
    fn watch_consumes_every_delivery_with_plain_receives() {
        let mut port = ScriptedPort::new([
            Delivery {
                badge: 3,
                message: Message::from_words(label::VM_FAULT, &[0x1000, 0x2000, 0, 0]),
            },
            Delivery {
                badge: 7,
                message: Message::from_words(0x7F, &[]),
            },
        ]);

        let err = watch(&mut port).unwrap_err();

        assert_eq!(err, IpcError::EndpointRevoked);
        // one receive per delivery plus the failing one; never a reply
        assert_eq!(port.ops, [PortOp::Recv, PortOp::Recv, PortOp::Recv]);
    }
}
