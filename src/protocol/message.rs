//! Control message model and fixed-frame codec.
//!
//! Wire format (one classic bus frame per message):
//! ```text
//! ┌──────────────┬──────────┬────────────────────┬────────────────────┐
//! │ id           │ len (1B) │ paramA (4B)        │ paramB (4B)        │
//! │ kind tag     │ always 8 │ LE i32             │ LE i32             │
//! └──────────────┴──────────┴────────────────────┴────────────────────┘
//! ```
//!
//! Kind tags: 1 = Enabled, 2 = ThresholdSet, 3 = TemperatureReport,
//! 4 = Disabled.  No checksum, address or version field; `len` is a
//! framing hint, not an integrity check.

use crate::error::ProtocolError;

/// Byte count of the two parameter fields.
pub const PAYLOAD_LEN: u8 = 8;

/// Serialised size of a [`Frame`] for byte-oriented transports.
pub const FRAME_BYTES: usize = 4 + 1 + PAYLOAD_LEN as usize;

/// The four message kinds carried on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    Enabled = 1,
    ThresholdSet = 2,
    TemperatureReport = 3,
    Disabled = 4,
}

impl MessageKind {
    /// Wire tag for this kind.
    pub const fn tag(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for MessageKind {
    type Error = ProtocolError;

    fn try_from(tag: u32) -> Result<Self, ProtocolError> {
        match tag {
            1 => Ok(Self::Enabled),
            2 => Ok(Self::ThresholdSet),
            3 => Ok(Self::TemperatureReport),
            4 => Ok(Self::Disabled),
            other => Err(ProtocolError::UnknownKind(other)),
        }
    }
}

/// One control message.  Immutable once built; equality is by content.
///
/// `kind` decides which parameters mean anything: `ThresholdSet` uses
/// both, `TemperatureReport` only `param_a`, `Enabled`/`Disabled`
/// neither.  Unused parameters are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlMessage {
    kind: MessageKind,
    param_a: i32,
    param_b: i32,
}

impl ControlMessage {
    pub const fn enabled() -> Self {
        Self { kind: MessageKind::Enabled, param_a: 0, param_b: 0 }
    }

    pub const fn disabled() -> Self {
        Self { kind: MessageKind::Disabled, param_a: 0, param_b: 0 }
    }

    pub const fn threshold_set(setpoint: i32, threshold: i32) -> Self {
        Self { kind: MessageKind::ThresholdSet, param_a: setpoint, param_b: threshold }
    }

    pub const fn temperature_report(temp: i32) -> Self {
        Self { kind: MessageKind::TemperatureReport, param_a: temp, param_b: 0 }
    }

    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    pub const fn param_a(&self) -> i32 {
        self.param_a
    }

    pub const fn param_b(&self) -> i32 {
        self.param_b
    }

    /// Byte count of both parameter fields, as carried in the frame.
    pub const fn length(&self) -> u8 {
        PAYLOAD_LEN
    }

    /// Encode into a bus frame.
    pub fn to_frame(&self) -> Frame {
        let mut data = [0u8; PAYLOAD_LEN as usize];
        data[..4].copy_from_slice(&self.param_a.to_le_bytes());
        data[4..].copy_from_slice(&self.param_b.to_le_bytes());
        Frame { id: self.kind.tag(), len: self.length(), data }
    }
}

impl TryFrom<&Frame> for ControlMessage {
    type Error = ProtocolError;

    fn try_from(frame: &Frame) -> Result<Self, ProtocolError> {
        let kind = MessageKind::try_from(frame.id)?;
        if frame.len != PAYLOAD_LEN {
            return Err(ProtocolError::BadLength(frame.len));
        }
        let a = i32::from_le_bytes([frame.data[0], frame.data[1], frame.data[2], frame.data[3]]);
        let b = i32::from_le_bytes([frame.data[4], frame.data[5], frame.data[6], frame.data[7]]);

        // Normalise the fields the kind does not use.
        Ok(match kind {
            MessageKind::Enabled => Self::enabled(),
            MessageKind::Disabled => Self::disabled(),
            MessageKind::ThresholdSet => Self::threshold_set(a, b),
            MessageKind::TemperatureReport => Self::temperature_report(a),
        })
    }
}

/// Raw bus frame as exchanged with the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Message kind tag.
    pub id: u32,
    /// Data length code.
    pub len: u8,
    /// `paramA` then `paramB`, little-endian.
    pub data: [u8; PAYLOAD_LEN as usize],
}

impl Frame {
    /// Serialise for a byte-oriented link: `[id LE u32][len][data]`.
    pub fn to_bytes(&self) -> [u8; FRAME_BYTES] {
        let mut out = [0u8; FRAME_BYTES];
        out[..4].copy_from_slice(&self.id.to_le_bytes());
        out[4] = self.len;
        out[5..].copy_from_slice(&self.data);
        out
    }

    /// Inverse of [`Frame::to_bytes`].  Trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < FRAME_BYTES {
            return Err(ProtocolError::Truncated(bytes.len()));
        }
        let mut data = [0u8; PAYLOAD_LEN as usize];
        data.copy_from_slice(&bytes[5..FRAME_BYTES]);
        Ok(Self {
            id: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            len: bytes[4],
            data,
        })
    }
}
