use crate::Word;
use bitfield_struct::bitfield;
use core::fmt;

/// Number of message registers a [`Message`] carries.
///
/// The kernel register file is larger, but the protocols spoken over this
/// runtime's endpoint touch at most eight registers (a capability fault);
/// sixteen leaves headroom for application payloads while keeping the
/// record cheap to copy as loop state.
pub const MSG_MAX_WORDS: usize = 16;

/// The kernel's message-info word in its raw bitfield form.
///
/// Accompanies every IPC transfer and describes the payload in the message
/// registers. The layout is a fixed external ABI; this type allows
/// read/write access to the individual fields without manual masking or
/// shifting, using the [`bitfield_struct`](https://docs.rs/bitfield-struct/)
/// derive.
///
/// ### Bit layout (canonical)
///
/// | Bits  | Name             | Meaning |
/// |-------|------------------|----------|
/// | 0–6   | `length`         | Number of message registers transferred |
/// | 7–8   | `extra_caps`     | Capabilities sent alongside the message |
/// | 9–11  | `caps_unwrapped` | Which received capabilities were unwrapped into badges |
/// | 12–63 | `label`          | Protocol-defined tag; fault kind on fault messages |
///
/// ### Example
/// ```rust
/// # use runtime_ipc::MessageInfo;
/// let info = MessageInfo::new().with_label(5).with_length(4);
/// assert_eq!(info.label(), 5);
/// assert_eq!(info.length(), 4);
/// ```
#[bitfield(u64)]
#[derive(PartialEq, Eq)]
pub struct MessageInfo {
    /// Count of message registers carried by this transfer (bits 0..=6).
    #[bits(7)]
    pub length: u8,

    /// Number of capabilities transferred alongside (bits 7..=8).
    ///
    /// Always zero for the protocols in this repository; kept so the word
    /// round-trips bit-exactly through the kernel.
    #[bits(2)]
    pub extra_caps: u8,

    /// Mask of capability slots the kernel unwrapped (bits 9..=11).
    ///
    /// Set by the kernel on receive, never by senders.
    #[bits(3)]
    pub caps_unwrapped: u8,

    /// Protocol-defined message tag (bits 12..=63).
    ///
    /// Fault messages use this for the fault kind, see [`crate::fault::label`].
    #[bits(52)]
    pub label: u64,
}

/// The message registers of one IPC transfer, owned.
///
/// Used both for received payloads (fault and protected-call messages) and
/// for the reply or signal payload a handler produces. Ports copy the
/// shared kernel register file into this record on receive, so the record
/// stays valid across later receives.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Message {
    info: MessageInfo,
    words: [Word; MSG_MAX_WORDS],
}

impl Message {
    /// The zero message: label 0, no registers.
    ///
    /// This is the default protected-call reply and the inert payload of
    /// plain notifications.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            info: MessageInfo::new(),
            words: [0; MSG_MAX_WORDS],
        }
    }

    /// A message with the given info word and zeroed registers.
    #[inline]
    #[must_use]
    pub const fn with_info(info: MessageInfo) -> Self {
        Self {
            info,
            words: [0; MSG_MAX_WORDS],
        }
    }

    /// Builds a message from a label and register values.
    ///
    /// At most [`MSG_MAX_WORDS`] registers are representable; anything
    /// beyond that is dropped and the length saturates at capacity.
    #[must_use]
    pub const fn from_words(label: u64, words: &[Word]) -> Self {
        let mut msg = Self::empty();
        let mut index = 0;
        while index < words.len() && index < MSG_MAX_WORDS {
            msg.words[index] = words[index];
            index += 1;
        }
        #[allow(clippy::cast_possible_truncation)]
        let length = index as u8;
        msg.info = MessageInfo::new().with_label(label).with_length(length);
        msg
    }

    #[inline]
    #[must_use]
    pub const fn info(&self) -> MessageInfo {
        self.info
    }

    pub const fn set_info(&mut self, info: MessageInfo) {
        self.info = info;
    }

    /// Convenience accessor for the info word's label field.
    #[inline]
    #[must_use]
    pub const fn label(&self) -> u64 {
        self.info.label()
    }

    /// Register count, capped at this record's capacity.
    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        let claimed = self.info.length() as usize;
        if claimed < MSG_MAX_WORDS {
            claimed
        } else {
            MSG_MAX_WORDS
        }
    }

    /// Reads message register `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`MSG_MAX_WORDS`].
    #[inline]
    #[must_use]
    pub const fn word(&self, index: usize) -> Word {
        self.words[index]
    }

    /// Writes message register `index`.
    ///
    /// The length field is not adjusted; senders set it through the info
    /// word.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`MSG_MAX_WORDS`].
    pub const fn set_word(&mut self, index: usize, value: Word) {
        self.words[index] = value;
    }

    /// The registers actually carried by this transfer.
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words[..self.length()]
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("label", &self.label())
            .field("length", &self.length())
            .field("words", &self.words())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_field_positions() {
        // length occupies the lowest seven bits
        assert_eq!(MessageInfo::new().with_length(1).into_bits(), 1);
        assert_eq!(MessageInfo::new().with_length(0x7F).into_bits(), 0x7F);
        // label starts at bit 12
        assert_eq!(MessageInfo::new().with_label(1).into_bits(), 1 << 12);
        // extra caps at bit 7, unwrapped mask at bit 9
        assert_eq!(MessageInfo::new().with_extra_caps(1).into_bits(), 1 << 7);
        assert_eq!(MessageInfo::new().with_caps_unwrapped(1).into_bits(), 1 << 9);
    }

    #[test]
    fn info_round_trip() {
        let info = MessageInfo::from_bits(0xDEAD_BEEF_0000_1042);
        assert_eq!(MessageInfo::from_bits(info.into_bits()), info);
        assert_eq!(info.length(), 0x42);
    }

    #[test]
    fn empty_message_is_all_zero() {
        let msg = Message::empty();
        assert_eq!(msg.info().into_bits(), 0);
        assert_eq!(msg.length(), 0);
        assert!(msg.words().is_empty());
    }

    #[test]
    fn from_words_sets_length_and_payload() {
        let msg = Message::from_words(7, &[10, 20, 30]);
        assert_eq!(msg.label(), 7);
        assert_eq!(msg.length(), 3);
        assert_eq!(msg.words(), &[10, 20, 30]);
        assert_eq!(msg.word(1), 20);
    }

    #[test]
    fn from_words_saturates_at_capacity() {
        let long = [1_u64; MSG_MAX_WORDS + 4];
        let msg = Message::from_words(0, &long);
        assert_eq!(msg.length(), MSG_MAX_WORDS);
        assert_eq!(msg.words().len(), MSG_MAX_WORDS);
    }

    #[test]
    fn claimed_length_beyond_capacity_is_capped() {
        let mut msg = Message::empty();
        msg.set_info(MessageInfo::new().with_length(0x7F));
        assert_eq!(msg.length(), MSG_MAX_WORDS);
        assert_eq!(msg.words().len(), MSG_MAX_WORDS);
    }
}
