//! Position key encoding and reserved key namespace
//!
//! Data records are keyed by their position as an 8-byte big-endian integer,
//! so byte-wise key order matches numeric order and a range scan walks the
//! backlog front to back. Cursor metadata lives under reserved keys that start
//! with [`RESERVED_PREFIX`] and are never 8 bytes long, so no position can
//! encode to a reserved key.

/// Length of every data key
pub const POSITION_KEY_LEN: usize = 8;

/// First byte of every reserved (non-data) key
pub const RESERVED_PREFIX: u8 = 0xFF;

/// Reserved key holding the next position to read
pub const READ_CURSOR_KEY: &[u8] = b"\xFFcursor/read";

/// Reserved key holding the next position to write
pub const WRITE_CURSOR_KEY: &[u8] = b"\xFFcursor/write";

/// The two persisted cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Read,
    Write,
}

impl Cursor {
    pub fn key(self) -> &'static [u8] {
        match self {
            Cursor::Read => READ_CURSOR_KEY,
            Cursor::Write => WRITE_CURSOR_KEY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cursor::Read => "read",
            Cursor::Write => "write",
        }
    }
}

pub fn encode_position(position: u64) -> [u8; POSITION_KEY_LEN] {
    position.to_be_bytes()
}

/// Decode an 8-byte big-endian position; any other length is rejected
pub fn decode_position(bytes: &[u8]) -> Option<u64> {
    let array: [u8; POSITION_KEY_LEN] = bytes.try_into().ok()?;
    Some(u64::from_be_bytes(array))
}
