//! Network-order field packing shared by the parser and the builder.

use byteorder::{BigEndian, ByteOrder};

use super::Error;

/// Longest label allowed by the single-byte length prefix
pub const MAX_LABEL_LEN: usize = 63;

pub fn write_u16(buf: &mut Vec<u8>, value: u16) {
    let mut bytes = [0u8; 2];
    BigEndian::write_u16(&mut bytes, value);
    buf.extend_from_slice(&bytes);
}

pub fn write_u32(buf: &mut Vec<u8>, value: u32) {
    let mut bytes = [0u8; 4];
    BigEndian::write_u32(&mut bytes, value);
    buf.extend_from_slice(&bytes);
}

/// Appends `name` as a sequence of length-prefixed labels and a zero byte.
///
/// The empty name is the root and encodes as the terminator alone. Every
/// other label must be 1 to 63 bytes long. Nothing is appended on error.
pub fn write_name(buf: &mut Vec<u8>, name: &str) -> Result<(), Error> {
    if !name.is_empty() {
        if let Some(label) = name
            .split('.')
            .find(|label| label.is_empty() || label.len() > MAX_LABEL_LEN)
        {
            return Err(Error::ProtocolViolation(format!(
                "label {:?} of {:?} must be 1 to {} bytes",
                label, name, MAX_LABEL_LEN
            )));
        }
        for label in name.split('.') {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
    }
    buf.push(0);
    Ok(())
}

pub fn read_u16(data: &[u8], pos: usize) -> Result<u16, Error> {
    pos.checked_add(2)
        .and_then(|end| data.get(pos..end))
        .map(BigEndian::read_u16)
        .ok_or(Error::TruncatedMessage(pos))
}
