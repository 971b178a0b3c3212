use super::{Class, Error, Header, Name, RRData, Type};

/// Parsed DNS request
///
/// Decoding never fails outright. When the input is cut short or uses an
/// encoding the parser does not follow, `fault` is set and `questions` holds
/// whatever was read before that point. A request with a fault must not be
/// answered.
#[derive(Debug, Default)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
    pub fault: Option<Error>,
}

impl Packet {
    pub fn is_complete(&self) -> bool {
        self.fault.is_none()
    }
}

/// A parsed chunk of data in the Query section of the packet
///
/// Type and class stay raw codes so they can be echoed back unchanged even
/// when this server does not know them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: Name<'static>,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn query_type(&self) -> Option<Type> {
        Type::from_code(self.qtype)
    }

    pub fn query_class(&self) -> Option<Class> {
        Class::from_code(self.qclass)
    }
}

/// A single DNS record to be written in the answer section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord<'a> {
    pub name: Name<'a>,
    pub cls: Class,
    pub ttl: u32,
    pub data: RRData<'a>,
}
