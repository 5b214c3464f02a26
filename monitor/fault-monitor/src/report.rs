use crate::aarch64::{
    DataAbortIss, EC_DATA_ABORT_LOWER_EL, Syndrome, data_fault_status_name, exception_class_name,
};
use core::fmt;
use runtime_badge::DomainId;
use runtime_ipc::fault::{cap_fault, label, lookup_failure, user_exception, vm_fault};
use runtime_ipc::{Message, Word};

/// Decoded capability lookup failure of a cap fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LookupFailure {
    None,
    InvalidRoot,
    MissingCapability {
        bits_left: Word,
    },
    DepthMismatch {
        bits_left: Word,
        bits_found: Word,
    },
    GuardMismatch {
        bits_left: Word,
        guard_found: Word,
        bits_found: Word,
    },
    /// Unrecognised failure code, passed through raw.
    Unknown(Word),
}

impl LookupFailure {
    fn decode(msg: &Message) -> Self {
        let bits_left = msg.word(cap_fault::BITS_LEFT);
        match msg.word(cap_fault::LOOKUP_FAILURE_TYPE) {
            lookup_failure::NO_FAILURE => Self::None,
            lookup_failure::INVALID_ROOT => Self::InvalidRoot,
            lookup_failure::MISSING_CAPABILITY => Self::MissingCapability { bits_left },
            lookup_failure::DEPTH_MISMATCH => Self::DepthMismatch {
                bits_left,
                bits_found: msg.word(cap_fault::DEPTH_BITS_FOUND),
            },
            lookup_failure::GUARD_MISMATCH => Self::GuardMismatch {
                bits_left,
                guard_found: msg.word(cap_fault::GUARD_FOUND),
                bits_found: msg.word(cap_fault::GUARD_BITS_FOUND),
            },
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "lookup=no failure"),
            Self::InvalidRoot => write!(f, "lookup=invalid root"),
            Self::MissingCapability { bits_left } => {
                write!(f, "lookup=missing capability bits_left={bits_left}")
            }
            Self::DepthMismatch {
                bits_left,
                bits_found,
            } => write!(
                f,
                "lookup=depth mismatch bits_left={bits_left} bits_found={bits_found}"
            ),
            Self::GuardMismatch {
                bits_left,
                guard_found,
                bits_found,
            } => write!(
                f,
                "lookup=guard mismatch bits_left={bits_left} guard_found={guard_found:#x} bits_found={bits_found}"
            ),
            Self::Unknown(code) => write!(f, "lookup=unknown({code:#x})"),
        }
    }
}

/// One decoded fault message, ready for rendering.
///
/// Decoding reads the per-kind register slots documented in
/// [`runtime_ipc::fault`] and nothing else; unrecognised labels come out
/// as [`FaultReport::Unknown`] rather than an error, so a misbehaving
/// sender cannot wedge the monitor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaultReport {
    CapFault {
        source: DomainId,
        ip: Word,
        addr: Word,
        in_recv_phase: bool,
        lookup: LookupFailure,
    },
    UserException {
        source: DomainId,
        ip: Word,
        sp: Word,
        flags: Word,
        number: Word,
        code: Word,
    },
    VmFault {
        source: DomainId,
        ip: Word,
        addr: Word,
        is_instruction: bool,
        fsr: Word,
    },
    Unknown {
        source: DomainId,
        label: Word,
    },
}

impl FaultReport {
    /// Decodes one fault message from `source`.
    #[must_use]
    pub fn decode(source: DomainId, msg: &Message) -> Self {
        match msg.label() {
            label::CAP_FAULT => Self::CapFault {
                source,
                ip: msg.word(cap_fault::IP),
                addr: msg.word(cap_fault::ADDR),
                in_recv_phase: msg.word(cap_fault::IN_RECV_PHASE) != 0,
                lookup: LookupFailure::decode(msg),
            },
            label::USER_EXCEPTION => Self::UserException {
                source,
                ip: msg.word(user_exception::FAULT_IP),
                sp: msg.word(user_exception::SP),
                flags: msg.word(user_exception::FLAGS),
                number: msg.word(user_exception::NUMBER),
                code: msg.word(user_exception::CODE),
            },
            label::VM_FAULT => Self::VmFault {
                source,
                ip: msg.word(vm_fault::IP),
                addr: msg.word(vm_fault::ADDR),
                is_instruction: msg.word(vm_fault::PREFETCH_FAULT) != 0,
                fsr: msg.word(vm_fault::FSR),
            },
            other => Self::Unknown {
                source,
                label: other,
            },
        }
    }
}

impl fmt::Display for FaultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapFault {
                source,
                ip,
                addr,
                in_recv_phase,
                lookup,
            } => write!(
                f,
                "{source}: cap fault: ip={ip:#x} fault_addr={addr:#x} in_recv_phase={in_recv_phase} {lookup}"
            ),
            Self::UserException {
                source,
                ip,
                sp,
                flags,
                number,
                code,
            } => write!(
                f,
                "{source}: user exception: ip={ip:#x} sp={sp:#x} flags={flags:#x} number={number:#x} code={code:#x}"
            ),
            Self::VmFault {
                source,
                ip,
                addr,
                is_instruction,
                fsr,
            } => {
                let kind = if *is_instruction {
                    "instruction fault"
                } else {
                    "data fault"
                };
                write!(
                    f,
                    "{source}: vm fault ({kind}): ip={ip:#x} fault_addr={addr:#x} fsr={fsr:#x}"
                )?;
                #[allow(clippy::cast_possible_truncation)]
                let syndrome = Syndrome::from_bits(*fsr as u32);
                write!(
                    f,
                    "\n  ec={:#04x} ({}) il={} iss={:#x}",
                    syndrome.ec(),
                    exception_class_name(syndrome.ec()),
                    u8::from(syndrome.il()),
                    syndrome.iss()
                )?;
                if syndrome.ec() == EC_DATA_ABORT_LOWER_EL {
                    let iss = DataAbortIss::from_bits(syndrome.iss());
                    write!(
                        f,
                        "\n  dfsc={:#04x} ({})",
                        iss.dfsc(),
                        data_fault_status_name(iss.dfsc())
                    )?;
                    if iss.ea() {
                        write!(f, " -- external abort")?;
                    }
                    if iss.cm() {
                        write!(f, " -- cache maintenance")?;
                    }
                    if iss.s1ptw() {
                        write!(f, " -- stage 2 fault during stage 1 walk")?;
                    }
                    if iss.wnr() {
                        write!(f, " -- write not read")?;
                    }
                }
                Ok(())
            }
            Self::Unknown { source, label } => {
                write!(f, "{source}: unknown fault (label {label:#x})")
            }
        }
    }
}
