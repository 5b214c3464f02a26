//! Fault-message wire format.
//!
//! When a component's execution traps, the kernel synthesises a message on
//! the monitor's fault endpoint. The fault kind travels in the info word's
//! label; the per-kind detail fields occupy fixed message-register slots.
//! Both are architecture-defined external ABI: readers must use these
//! offsets verbatim and must not reinterpret the raw values.
//!
//! Register slots are given as indices into [`crate::Message`].

use crate::Word;

/// Fault kinds, as carried in the message-info label.
pub mod label {
    use super::Word;

    /// Not a fault. Never delivered to the fault endpoint.
    pub const NULL_FAULT: Word = 0;
    /// Capability lookup failed during a send or receive phase.
    pub const CAP_FAULT: Word = 1;
    /// The component invoked a syscall number the kernel does not know.
    pub const UNKNOWN_SYSCALL: Word = 2;
    /// Architecture exception raised by the component itself.
    pub const USER_EXCEPTION: Word = 3;
    /// The component exhausted its scheduling budget.
    pub const TIMEOUT: Word = 4;
    /// Memory fault (translation, permission, alignment, ...).
    pub const VM_FAULT: Word = 5;
}

/// Register slots of a capability fault.
pub mod cap_fault {
    /// Instruction pointer at the time of the fault.
    pub const IP: usize = 0;
    /// Capability address whose lookup failed.
    pub const ADDR: usize = 1;
    /// Non-zero when the failure happened in the receive phase.
    pub const IN_RECV_PHASE: usize = 2;
    /// One of the [`super::lookup_failure`] codes.
    pub const LOOKUP_FAILURE_TYPE: usize = 3;
    /// Remaining unresolved bits of the capability address.
    ///
    /// Only meaningful for missing-capability, depth-mismatch and
    /// guard-mismatch failures.
    pub const BITS_LEFT: usize = 4;
    /// Bits found at the mismatching depth (depth-mismatch only).
    pub const DEPTH_BITS_FOUND: usize = 5;
    /// Guard value encountered (guard-mismatch only).
    ///
    /// Shares a slot with [`DEPTH_BITS_FOUND`]; the two failure kinds are
    /// mutually exclusive on the wire.
    pub const GUARD_FOUND: usize = 5;
    /// Size of the encountered guard (guard-mismatch only).
    pub const GUARD_BITS_FOUND: usize = 6;
}

/// Capability lookup failure codes, see [`cap_fault::LOOKUP_FAILURE_TYPE`].
pub mod lookup_failure {
    use super::Word;

    pub const NO_FAILURE: Word = 0;
    pub const INVALID_ROOT: Word = 1;
    pub const MISSING_CAPABILITY: Word = 2;
    pub const DEPTH_MISMATCH: Word = 3;
    pub const GUARD_MISMATCH: Word = 4;
}

/// Register slots of a user exception.
pub mod user_exception {
    /// Instruction pointer of the faulting instruction.
    pub const FAULT_IP: usize = 0;
    /// Stack pointer at the time of the exception.
    pub const SP: usize = 1;
    /// Saved processor flags.
    pub const FLAGS: usize = 2;
    /// Architecture exception number.
    pub const NUMBER: usize = 3;
    /// Architecture exception code.
    pub const CODE: usize = 4;
}

/// Register slots of a VM fault.
pub mod vm_fault {
    /// Instruction pointer of the faulting access.
    pub const IP: usize = 0;
    /// Faulting data or instruction address.
    pub const ADDR: usize = 1;
    /// Non-zero for instruction-fetch faults, zero for data faults.
    pub const PREFETCH_FAULT: usize = 2;
    /// Raw fault status register (ESR syndrome on AArch64).
    pub const FSR: usize = 3;
}
