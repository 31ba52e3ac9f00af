//! Bluefruit Connect control-pad packet codec.
//!
//! Wire frame (6 bytes, no checksum):
//! ```text
//! Byte 0: '!'  - start of frame
//! Byte 1: 'B'  - packet kind: button event
//! Byte 2: button identifier, '1'..'8'
//! Byte 3: '1' = pressed, '0' = released
//! Byte 4: CR
//! Byte 5: LF
//! ```
//! Other packet kinds of the same family ('!' + kind byte + payload,
//! CR/LF terminated) may appear on the same stream; the decoder skips
//! them without error.


use core::fmt;

/// Start-of-frame marker shared by every packet kind.
pub const START_BYTE: u8 = b'!';

/// Kind byte identifying a button event.
pub const BUTTON_KIND: u8 = b'B';

/// Encoded length of a button frame.
pub const BUTTON_FRAME_LEN: usize = 6;

const TERMINATOR: [u8; 2] = [b'\r', b'\n'];

// Anything shorter than "!K\r\n" cannot carry a kind byte.
const MIN_FRAME_LEN: usize = 4;

/// Control-pad button identifiers, in wire-code order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Button1,
    Button2,
    Button3,
    Button4,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Wire code for this button (`'1'..'8'`).
    pub const fn code(self) -> u8 {
        match self {
            Button::Button1 => b'1',
            Button::Button2 => b'2',
            Button::Button3 => b'3',
            Button::Button4 => b'4',
            Button::Up => b'5',
            Button::Down => b'6',
            Button::Left => b'7',
            Button::Right => b'8',
        }
    }

    /// Inverse of [`Button::code`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b'1' => Some(Button::Button1),
            b'2' => Some(Button::Button2),
            b'3' => Some(Button::Button3),
            b'4' => Some(Button::Button4),
            b'5' => Some(Button::Up),
            b'6' => Some(Button::Down),
            b'7' => Some(Button::Left),
            b'8' => Some(Button::Right),
            _ => None,
        }
    }
}

/// One button event, constructed per keystroke or per received frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPacket {
    pub button: Button,
    pub pressed: bool,
}

impl ButtonPacket {
    /// Build a packet from a raw identifier byte.
    ///
    /// Fails with [`PacketError::InvalidButton`] for anything outside
    /// `'1'..'8'`; no bytes are ever emitted for a bad identifier.
    pub fn new(code: u8, pressed: bool) -> Result<Self, PacketError> {
        match Button::from_code(code) {
            Some(button) => Ok(Self { button, pressed }),
            None => Err(PacketError::InvalidButton(code)),
        }
    }

    /// Encode into the fixed wire frame.
    pub fn to_bytes(&self) -> [u8; BUTTON_FRAME_LEN] {
        [
            START_BYTE,
            BUTTON_KIND,
            self.button.code(),
            if self.pressed { b'1' } else { b'0' },
            TERMINATOR[0],
            TERMINATOR[1],
        ]
    }
}

/// Codec errors. All variants carry only fixed-size data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Encode was asked for a button identifier outside the enumeration.
    InvalidButton(u8),
    /// Frame missing its start byte, cut off before the terminator, or
    /// carrying an out-of-range field.
    Malformed,
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketError::InvalidButton(code) => {
                write!(f, "invalid button identifier {:?}", *code as char)
            }
            PacketError::Malformed => write!(f, "malformed packet frame"),
        }
    }
}

/// One decoded frame: either a button event or a foreign packet kind
/// this crate does not interpret (skippable data, not an error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    Button(ButtonPacket),
    Other { kind: u8 },
}

/// Decode exactly one frame from the front of `buf`.
///
/// Returns the frame and the number of bytes consumed (through the
/// CR/LF terminator), so callers can keep their stream position when
/// foreign frames are interleaved with button frames.
///
/// Fails with [`PacketError::Malformed`] if the start byte is absent
/// or the buffer ends before the terminator (truncated frame).
pub fn decode(buf: &[u8]) -> Result<(Frame, usize), PacketError> {
    if buf.first() != Some(&START_BYTE) {
        return Err(PacketError::Malformed);
    }

    let end = terminator_end(buf).ok_or(PacketError::Malformed)?;
    let frame = &buf[..end];
    if frame.len() < MIN_FRAME_LEN {
        return Err(PacketError::Malformed);
    }

    let kind = frame[1];
    if kind != BUTTON_KIND {
        return Ok((Frame::Other { kind }, end));
    }

    if frame.len() != BUTTON_FRAME_LEN {
        return Err(PacketError::Malformed);
    }
    let pressed = match frame[3] {
        b'1' => true,
        b'0' => false,
        _ => return Err(PacketError::Malformed),
    };
    let packet = ButtonPacket::new(frame[2], pressed).map_err(|_| PacketError::Malformed)?;
    Ok((Frame::Button(packet), end))
}

/// Index one past the first CR/LF in `buf`, if present.
fn terminator_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == TERMINATOR).map(|i| i + 2)
}

/// Reassembles frames from raw characteristic writes.
///
/// BLE writes carry arbitrary byte runs: one write may hold half a
/// frame or several whole ones. Bytes are accumulated here and frames
/// popped off the front as they complete. Leading bytes that are not a
/// start byte are discarded (resync after corruption).
pub struct FrameBuffer<const N: usize> {
    buf: heapless::Vec<u8, N>,
}

impl<const N: usize> FrameBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
        }
    }

    /// Append received bytes. If the buffer cannot hold them the stale
    /// partial frame can never complete, so it is dropped and only the
    /// most recent bytes are kept.
    pub fn push(&mut self, data: &[u8]) {
        if self.buf.extend_from_slice(data).is_err() {
            self.buf.clear();
            let take = data.len().min(N);
            let _ = self.buf.extend_from_slice(&data[data.len() - take..]);
        }
    }

    /// Pop the next complete frame, if any.
    ///
    /// `None` means the buffer holds no complete frame yet and the
    /// caller should wait for more bytes. `Some(Err(Malformed))` is a
    /// frame that was present but undecodable; it has been discarded
    /// and the caller may keep reading.
    pub fn next_frame(&mut self) -> Option<Result<Frame, PacketError>> {
        // Resync: drop noise ahead of the next start byte.
        match self.buf.iter().position(|&b| b == START_BYTE) {
            Some(0) => {}
            Some(pos) => self.consume(pos),
            None => {
                self.buf.clear();
                return None;
            }
        }

        let end = match terminator_end(&self.buf) {
            Some(end) => end,
            None if self.buf.is_full() => {
                // No terminator can ever arrive for this frame.
                self.buf.clear();
                return Some(Err(PacketError::Malformed));
            }
            None => return None,
        };

        let result = decode(&self.buf).map(|(frame, _)| frame);
        self.consume(end);
        Some(result)
    }

    fn consume(&mut self, n: usize) {
        let len = self.buf.len();
        self.buf.copy_within(n..len, 0);
        self.buf.truncate(len - n);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.buf.len()
    }
}
