use std::net::{Ipv4Addr, Ipv6Addr};

use super::{wire, Error, Name, Type};

/// The enumeration that represents known types of DNS resource records data
///
/// Every variant carries its payload already parsed, so encoding can only fail
/// on a bad target name. Stored types that the server cannot encode yet are
/// answered with an empty RDATA through `Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRData<'a> {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(Name<'a>),
    NS(Name<'a>),
    PTR(Name<'a>),
    MX { preference: u16, exchange: Name<'a> },
    Empty(Type),
}

impl<'a> RRData<'a> {
    pub fn typ(&self) -> Type {
        match *self {
            RRData::A(..) => Type::A,
            RRData::AAAA(..) => Type::AAAA,
            RRData::CNAME(..) => Type::CNAME,
            RRData::NS(..) => Type::NS,
            RRData::PTR(..) => Type::PTR,
            RRData::MX { .. } => Type::MX,
            RRData::Empty(typ) => typ,
        }
    }

    /// Builds record data from the textual value kept in a record store
    ///
    /// `preference` is only used for MX records.
    pub fn from_text(typ: Type, value: &'a str, preference: u16) -> Result<RRData<'a>, Error> {
        Ok(match typ {
            Type::A => RRData::A(parse_ipv4(value)?),
            Type::AAAA => RRData::AAAA(parse_ipv6(value)?),
            Type::CNAME => RRData::CNAME(Name::from_str(value)),
            Type::NS => RRData::NS(Name::from_str(value)),
            Type::PTR => RRData::PTR(Name::from_str(value)),
            Type::MX => RRData::MX {
                preference,
                exchange: Name::from_str(value),
            },
            typ => RRData::Empty(typ),
        })
    }

    /// Appends the RDATA bytes, without the RDLENGTH prefix
    pub fn write_to(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        match *self {
            RRData::A(ip) => buf.extend_from_slice(&ip.octets()),
            RRData::AAAA(ip) => {
                for segment in ip.segments().iter() {
                    wire::write_u16(buf, *segment);
                }
            }
            RRData::CNAME(ref name) | RRData::NS(ref name) | RRData::PTR(ref name) => {
                name.write_to(buf)?
            }
            RRData::MX {
                preference,
                ref exchange,
            } => {
                wire::write_u16(buf, preference);
                exchange.write_to(buf)?
            }
            RRData::Empty(..) => (),
        }
        Ok(())
    }
}

/// Parses dotted-decimal text: exactly four integers in `0..=255`
pub fn parse_ipv4(text: &str) -> Result<Ipv4Addr, Error> {
    let malformed = || Error::MalformedAddress(text.to_owned());
    let mut octets = [0u8; 4];
    let mut count = 0;
    for segment in text.split('.') {
        let octet = octets.get_mut(count).ok_or_else(malformed)?;
        *octet = segment.parse::<u8>().map_err(|_| malformed())?;
        count += 1;
    }
    if count != octets.len() {
        return Err(malformed());
    }
    Ok(Ipv4Addr::from(octets))
}

/// Parses exactly eight colon-separated groups of one to four hex digits
///
/// The `::` shorthand is not accepted.
pub fn parse_ipv6(text: &str) -> Result<Ipv6Addr, Error> {
    let malformed = || Error::MalformedAddress(text.to_owned());
    let mut groups = [0u16; 8];
    let mut count = 0;
    for group in text.split(':') {
        let slot = groups.get_mut(count).ok_or_else(malformed)?;
        if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        *slot = u16::from_str_radix(group, 16).map_err(|_| malformed())?;
        count += 1;
    }
    if count != groups.len() {
        return Err(malformed());
    }
    Ok(Ipv6Addr::from(groups))
}
