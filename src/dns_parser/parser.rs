use super::header::HEADER_SIZE;
use super::{wire, Error, Header, Name, Packet, Question};

impl Packet {
    /// Decodes a request datagram
    ///
    /// Input shorter than the header gives an all-zero header and no
    /// questions. Otherwise questions are read one after another from offset
    /// 12 until `header.questions` have been read or a fault stops the scan.
    pub fn parse(data: &[u8]) -> Packet {
        let header = match Header::parse(data) {
            Ok(header) => header,
            Err(fault) => {
                return Packet {
                    fault: Some(fault),
                    ..Packet::default()
                }
            }
        };

        let mut packet = Packet {
            header,
            questions: Vec::with_capacity(usize::from(header.questions).min(16)),
            fault: None,
        };
        let mut offset = HEADER_SIZE;
        for _ in 0..header.questions {
            match Packet::parse_question(data, offset) {
                Ok((question, next)) => {
                    packet.questions.push(question);
                    offset = next;
                }
                Err(fault) => {
                    packet.fault = Some(fault);
                    break;
                }
            }
        }
        packet
    }

    fn parse_question(data: &[u8], offset: usize) -> Result<(Question, usize), Error> {
        let (qname, offset) = Name::scan(data, offset)?;
        let qtype = wire::read_u16(data, offset)?;
        let qclass = wire::read_u16(data, offset + 2)?;
        Ok((
            Question {
                qname,
                qtype,
                qclass,
            },
            offset + 4,
        ))
    }
}
