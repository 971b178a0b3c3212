use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder};

use super::header::HEADER_SIZE;
use super::{wire, Error, Header, Name, Question, ResourceRecord};

pub enum Questions {}
pub enum Answers {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}

impl MoveTo<Answers> for Questions {}

/// Allows to build a DNS response
///
/// The section counts in the header are bumped as each question or answer is
/// written, so they always match the body. A failed `add_*` consumes the
/// builder and the half-written buffer with it.
pub struct Builder<S> {
    buf: Vec<u8>,
    _state: PhantomData<S>,
}

impl Builder<Questions> {
    /// Starts a response to `request`
    ///
    /// The transaction id and the authority/additional counts are echoed from
    /// the request; `flags` is written as given.
    pub fn new_response(request: &Header, flags: u16) -> Builder<Questions> {
        let mut buf = Vec::with_capacity(512);
        let head = Header {
            id: request.id,
            flags,
            questions: 0,
            answers: 0,
            nameservers: request.nameservers,
            additional: request.additional,
        };
        buf.extend([0u8; HEADER_SIZE].iter());
        head.write(&mut buf[..HEADER_SIZE]);
        Builder {
            buf,
            _state: PhantomData,
        }
    }
}

impl<T> Builder<T> {
    fn write_rr(&mut self, rr: &ResourceRecord) -> Result<(), Error> {
        rr.name.write_to(&mut self.buf)?;
        wire::write_u16(&mut self.buf, rr.data.typ().code());
        wire::write_u16(&mut self.buf, rr.cls.code());
        wire::write_u32(&mut self.buf, rr.ttl);

        let size_offset = self.buf.len();
        wire::write_u16(&mut self.buf, 0);

        let data_offset = self.buf.len();
        rr.data.write_to(&mut self.buf)?;
        let data_size = self.buf.len() - data_offset;
        if data_size > usize::from(u16::MAX) {
            return Err(Error::ProtocolViolation(format!(
                "{} bytes of RDATA for {} do not fit RDLENGTH",
                data_size, rr.name
            )));
        }

        BigEndian::write_u16(
            &mut self.buf[size_offset..size_offset + 2],
            data_size as u16,
        );
        Ok(())
    }

    /// Returns the final packet
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            _state: PhantomData,
        }
    }
}

impl<T: MoveTo<Questions>> Builder<T> {
    /// Adds a question to the packet
    pub fn add_question(
        self,
        qname: &Name,
        qtype: u16,
        qclass: u16,
    ) -> Result<Builder<Questions>, Error> {
        let mut builder = self.move_to::<Questions>();

        qname.write_to(&mut builder.buf)?;
        wire::write_u16(&mut builder.buf, qtype);
        wire::write_u16(&mut builder.buf, qclass);
        Header::inc_questions(&mut builder.buf)?;
        Ok(builder)
    }
}

impl<T: MoveTo<Answers>> Builder<T> {
    pub fn add_answer(self, rr: &ResourceRecord) -> Result<Builder<Answers>, Error> {
        let mut builder = self.move_to::<Answers>();

        builder.write_rr(rr)?;
        Header::inc_answers(&mut builder.buf)?;

        Ok(builder)
    }
}

/// Serializes a complete response: header, the echoed `questions` in order,
/// then `answers` in order.
pub fn create_response(
    flags: u16,
    answers: &[ResourceRecord],
    questions: &[Question],
    request: &Header,
) -> Result<Vec<u8>, Error> {
    let mut builder = Builder::new_response(request, flags);
    for question in questions {
        builder = builder.add_question(&question.qname, question.qtype, question.qclass)?;
    }
    let mut builder = builder.move_to::<Answers>();
    for answer in answers {
        builder = builder.add_answer(answer)?;
    }
    Ok(builder.build())
}
