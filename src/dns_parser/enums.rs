/// The TYPE value of a resource record or question
///
/// Only the types this server knows how to store are listed; any other code
/// stays a raw `u16` inside the question it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// IPv4 host address
    A = 1,
    /// Authoritative name server
    NS = 2,
    /// Canonical name for an alias
    CNAME = 5,
    /// Start of a zone of authority
    SOA = 6,
    /// Domain name pointer
    PTR = 12,
    /// Mail exchange
    MX = 15,
    /// Text strings
    TXT = 16,
    /// IPv6 host address
    AAAA = 28,
    /// Service locator
    SRV = 33,
    /// Naming authority pointer
    NAPTR = 35,
    /// Certificate
    CERT = 37,
    /// Delegation name
    DNAME = 39,
    /// Request for all records
    ANY = 255,
}

impl Type {
    pub fn from_code(code: u16) -> Option<Type> {
        use self::Type::*;
        match code {
            1 => Some(A),
            2 => Some(NS),
            5 => Some(CNAME),
            6 => Some(SOA),
            12 => Some(PTR),
            15 => Some(MX),
            16 => Some(TXT),
            28 => Some(AAAA),
            33 => Some(SRV),
            35 => Some(NAPTR),
            37 => Some(CERT),
            39 => Some(DNAME),
            255 => Some(ANY),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }
}

/// The CLASS value of a resource record or question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// the Internet
    IN = 1,
    /// the CSNET class (Obsolete)
    CS = 2,
    /// the CHAOS class
    CH = 3,
    /// Hesiod [Dyer 87]
    HS = 4,
    NONE = 254,
    ANY = 255,
}

impl Class {
    pub fn from_code(code: u16) -> Option<Class> {
        use self::Class::*;
        match code {
            1 => Some(IN),
            2 => Some(CS),
            3 => Some(CH),
            4 => Some(HS),
            254 => Some(NONE),
            255 => Some(ANY),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Whole-word values for the header flags field.
///
/// The flags are never taken apart; a response simply carries one of these.
pub mod flags {
    pub const QUERY: u16 = 0x0100;
    pub const RESPONSE: u16 = 0x8180;
    pub const RECURSION_DESIRED: u16 = 0x0100;
    pub const RECURSION_AVAILABLE: u16 = 0x0080;
    pub const TRUNCATED: u16 = 0x0200;
    pub const AUTHENTICATED_DATA: u16 = 0x0020;
    pub const CHECKING_DISABLED: u16 = 0x0010;
    pub const RESPONSE_NO_ERROR: u16 = 0x8180;
    pub const RESPONSE_FORMAT_ERROR: u16 = 0x8181;
    pub const RESPONSE_SERVER_FAILURE: u16 = 0x8182;
    pub const RESPONSE_NAME_ERROR: u16 = 0x8183;
    pub const RESPONSE_NOT_IMPLEMENTED: u16 = 0x8184;
    pub const RESPONSE_REFUSED: u16 = 0x8185;
}
