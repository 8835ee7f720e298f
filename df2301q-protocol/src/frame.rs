//! Frame layout and encoding for the DF2301Q UART protocol.
//!
//! Frame format:
//! - HEAD (2 bytes): 0xF4 0xF5
//! - LENGTH (2 bytes, little-endian): number of DATA bytes (0-8)
//! - TYPE (1 byte): message type
//! - CMD (1 byte): message command
//! - SEQ (1 byte): sequence number
//! - DATA (0-8 bytes): payload, the first byte carries the command id
//! - CHECKSUM (2 bytes, little-endian): wrapping sum of TYPE, CMD, SEQ and DATA
//! - TAIL (1 byte): 0xFB

use heapless::Vec;

/// First head byte
pub const HEAD_LOW: u8 = 0xF4;

/// Second head byte
pub const HEAD_HIGH: u8 = 0xF5;

/// Frame terminator
pub const TAIL: u8 = 0xFB;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD: usize = 8;

/// Bytes surrounding the payload (HEAD + LENGTH + TYPE + CMD + SEQ + CHECKSUM + TAIL)
const OVERHEAD: usize = 2 + 2 + 1 + 1 + 1 + 2 + 1;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = OVERHEAD + MAX_PAYLOAD;

/// Message type the module uses for command results
pub const MSG_TYPE_NOTIFY: u8 = 0x02;

/// Command field of a recognition result
pub const CMD_RESULT: u8 = 0x05;

/// Errors that can occur while building or encoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Compute the frame checksum over the header fields and payload
pub(crate) fn checksum(msg_type: u8, cmd: u8, seq: u8, payload: &[u8]) -> u16 {
    payload.iter().fold(
        u16::from(msg_type)
            .wrapping_add(u16::from(cmd))
            .wrapping_add(u16::from(seq)),
        |sum, &byte| sum.wrapping_add(u16::from(byte)),
    )
}

/// An outgoing frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Message type
    pub msg_type: u8,
    /// Message command
    pub cmd: u8,
    /// Sequence number
    pub seq: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD>,
}

impl Frame {
    /// Create a new frame with the given header fields and payload
    pub fn new(msg_type: u8, cmd: u8, seq: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            msg_type,
            cmd,
            seq,
            payload,
        })
    }

    /// Create the frame the module emits when it recognises command `id`
    pub fn command(id: u8, seq: u8) -> Self {
        let mut payload = Vec::new();
        // Capacity is MAX_PAYLOAD, one byte always fits
        let _ = payload.push(id);

        Self {
            msg_type: MSG_TYPE_NOTIFY,
            cmd: CMD_RESULT,
            seq,
            payload,
        }
    }

    /// Checksum this frame carries on the wire
    pub fn checksum(&self) -> u16 {
        checksum(self.msg_type, self.cmd, self.seq, &self.payload)
    }

    /// Number of bytes this frame occupies once encoded
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let [len_lo, len_hi] = (self.payload.len() as u16).to_le_bytes();
        let [ck_lo, ck_hi] = self.checksum().to_le_bytes();
        let data_end = 7 + self.payload.len();

        buffer[..7].copy_from_slice(&[
            HEAD_LOW,
            HEAD_HIGH,
            len_lo,
            len_hi,
            self.msg_type,
            self.cmd,
            self.seq,
        ]);
        buffer[7..data_end].copy_from_slice(&self.payload);
        buffer[data_end..frame_len].copy_from_slice(&[ck_lo, ck_hi, TAIL]);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}
