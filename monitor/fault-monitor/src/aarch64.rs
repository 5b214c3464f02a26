//! AArch64 fault syndrome decoding.
//!
//! The VM-fault status slot carries the exception syndrome the CPU
//! reported to the kernel. The bit layouts below follow the Arm
//! architecture reference; the string tables cover the classes a
//! faulting protection domain can plausibly produce.

use bitfield_struct::bitfield;

/// Exception syndrome word, as found in the VM-fault status slot.
///
/// ### Bit layout
///
/// | Bits  | Name  | Meaning |
/// |-------|-------|----------|
/// | 0–24  | `ISS` | Instruction-specific syndrome, layout depends on `EC` |
/// | 25    | `IL`  | Trapped instruction was 32-bit (set) or 16-bit (clear) |
/// | 26–31 | `EC`  | Exception class, see [`exception_class_name`] |
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct Syndrome {
    /// Instruction-specific syndrome (bits 0..=24).
    #[bits(25)]
    pub iss: u32,

    /// Instruction length bit (bit 25).
    pub il: bool,

    /// Exception class (bits 26..=31).
    #[bits(6)]
    pub ec: u8,
}

/// Exception class of a data abort taken from a lower exception level.
///
/// The one class whose ISS this monitor decodes further, see
/// [`DataAbortIss`].
pub const EC_DATA_ABORT_LOWER_EL: u8 = 0x24;

/// ISS layout of a data abort.
///
/// Partial decoding: the fields below are the commonly useful ones, the
/// remaining ISS bits pass through undecoded in the rendered report.
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct DataAbortIss {
    /// Data fault status code (bits 0..=5), see [`data_fault_status_name`].
    #[bits(6)]
    pub dfsc: u8,

    /// Write-not-read: the faulting access was a write (bit 6).
    pub wnr: bool,

    /// Stage-2 fault taken during a stage-1 page-table walk (bit 7).
    pub s1ptw: bool,

    /// Fault raised by a cache maintenance operation (bit 8).
    pub cm: bool,

    /// External abort (bit 9).
    pub ea: bool,

    #[bits(22)]
    __: u32,
}

/// Human-readable name of an exception class.
#[must_use]
pub const fn exception_class_name(ec: u8) -> &'static str {
    match ec {
        0x00 => "unknown reason",
        0x01 => "trapped WFI or WFE instruction execution",
        0x03 => "trapped MCR or MRC access (coproc 0b1111)",
        0x04 => "trapped MCRR or MRRC access (coproc 0b1111)",
        0x05 => "trapped MCR or MRC access (coproc 0b1110)",
        0x06 => "trapped LDC or STC access",
        0x07 => "access to SVC, Advanced SIMD or floating-point functionality trapped",
        0x0C => "trapped MRRC access (coproc 0b1110)",
        0x0D => "branch target exception",
        0x11 => "SVC instruction execution in AArch32 state",
        0x15 => "SVC instruction execution in AArch64 state",
        0x18 => "trapped MSR, MRS or system instruction execution in AArch64 state",
        0x19 => "access to SVE functionality trapped",
        0x1C => "exception from a pointer authentication instruction authentication failure",
        0x20 => "instruction abort from a lower exception level",
        0x21 => "instruction abort taken without a change in exception level",
        0x22 => "PC alignment fault exception",
        0x24 => "data abort from a lower exception level",
        0x25 => "data abort taken without a change in exception level",
        0x26 => "SP alignment fault exception",
        0x28 => "trapped floating-point exception taken from AArch32 state",
        0x2C => "trapped floating-point exception taken from AArch64 state",
        0x2F => "SError interrupt",
        0x30 => "breakpoint exception from a lower exception level",
        0x31 => "breakpoint exception taken without a change in exception level",
        0x32 => "software step exception from a lower exception level",
        0x33 => "software step exception taken without a change in exception level",
        0x34 => "watchpoint exception from a lower exception level",
        0x35 => "watchpoint exception taken without a change in exception level",
        0x38 => "BKPT instruction execution in AArch32 state",
        0x3C => "BRK instruction execution in AArch64 state",
        _ => "<invalid EC>",
    }
}

/// Human-readable name of a data fault status code.
#[must_use]
pub const fn data_fault_status_name(dfsc: u8) -> &'static str {
    match dfsc {
        0x00 => "address size fault, level 0",
        0x01 => "address size fault, level 1",
        0x02 => "address size fault, level 2",
        0x03 => "address size fault, level 3",
        0x04 => "translation fault, level 0",
        0x05 => "translation fault, level 1",
        0x06 => "translation fault, level 2",
        0x07 => "translation fault, level 3",
        0x09 => "access flag fault, level 1",
        0x0A => "access flag fault, level 2",
        0x0B => "access flag fault, level 3",
        0x0D => "permission fault, level 1",
        0x0E => "permission fault, level 2",
        0x0F => "permission fault, level 3",
        0x10 => "synchronous external abort",
        0x11 => "synchronous tag check fault",
        0x14 => "synchronous external abort, level 0",
        0x15 => "synchronous external abort, level 1",
        0x16 => "synchronous external abort, level 2",
        0x17 => "synchronous external abort, level 3",
        0x18 => "synchronous parity or ECC error",
        0x1C => "synchronous parity or ECC error, level 0",
        0x1D => "synchronous parity or ECC error, level 1",
        0x1E => "synchronous parity or ECC error, level 2",
        0x1F => "synchronous parity or ECC error, level 3",
        0x21 => "alignment fault",
        0x30 => "TLB conflict abort",
        0x31 => "unsupported atomic hardware update fault",
        _ => "<unexpected DFSC>",
    }
}
