use byteorder::{BigEndian, ByteOrder};

use super::Error;

/// Size of the fixed message header
pub const HEADER_SIZE: usize = 12;

/// Represents a parsed header of DNS packet
///
/// `flags` is kept as the raw 16-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

impl Header {
    /// Reads the header from the first twelve bytes of `data`
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::TruncatedMessage(data.len()));
        }
        Ok(Header {
            id: BigEndian::read_u16(&data[..2]),
            flags: BigEndian::read_u16(&data[2..4]),
            questions: BigEndian::read_u16(&data[4..6]),
            answers: BigEndian::read_u16(&data[6..8]),
            nameservers: BigEndian::read_u16(&data[8..10]),
            additional: BigEndian::read_u16(&data[10..12]),
        })
    }

    /// Write a header to a buffer slice
    ///
    /// # Panics
    ///
    /// When buffer size is not exactly 12 bytes
    pub fn write(&self, data: &mut [u8]) {
        if data.len() != HEADER_SIZE {
            panic!("Header size is exactly 12 bytes");
        }
        BigEndian::write_u16(&mut data[..2], self.id);
        BigEndian::write_u16(&mut data[2..4], self.flags);
        BigEndian::write_u16(&mut data[4..6], self.questions);
        BigEndian::write_u16(&mut data[6..8], self.answers);
        BigEndian::write_u16(&mut data[8..10], self.nameservers);
        BigEndian::write_u16(&mut data[10..12], self.additional);
    }

    pub fn inc_questions(data: &mut [u8]) -> Result<u16, Error> {
        Header::inc_count(&mut data[4..6], "questions")
    }

    pub fn inc_answers(data: &mut [u8]) -> Result<u16, Error> {
        Header::inc_count(&mut data[6..8], "answers")
    }

    fn inc_count(field: &mut [u8], section: &str) -> Result<u16, Error> {
        let count = BigEndian::read_u16(field)
            .checked_add(1)
            .ok_or_else(|| Error::ProtocolViolation(format!("too many {}", section)))?;
        BigEndian::write_u16(field, count);
        Ok(count)
    }
}
