//! DNS message codec: request decoding and response encoding.

mod builder;
mod enums;
mod error;
mod header;
mod name;
mod parser;
mod rrdata;
mod structs;
pub mod wire;

pub use self::builder::{create_response, Answers, Builder, Questions};
pub use self::enums::{flags, Class, Type};
pub use self::error::Error;
pub use self::header::{Header, HEADER_SIZE};
pub use self::name::Name;
pub use self::rrdata::{parse_ipv4, parse_ipv6, RRData};
pub use self::structs::{Packet, Question, ResourceRecord};
