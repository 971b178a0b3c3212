use std::fmt::Debug;
use std::io;

use crate::dns_parser::{Error, RRData, Type};

/// Value of `StoreEntry::name` for records that belong to the apex itself
pub const APEX_NAME: &str = "@";

/// One row of a zone as kept by a record store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreEntry {
    /// `@` for the apex, otherwise the labels in front of it (`www`, `a.b`)
    pub name: String,
    pub typ: Type,
    /// Address or target name in text form
    pub value: String,
    /// MX preference, ignored for every other type
    pub priority: u16,
    /// Archived rows stay in the store but are never served
    pub excluded: bool,
}

impl StoreEntry {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, typ: Type, value: V) -> StoreEntry {
        StoreEntry {
            name: name.into(),
            typ,
            value: value.into(),
            priority: 0,
            excluded: false,
        }
    }

    pub fn mx<N: Into<String>, V: Into<String>>(name: N, priority: u16, exchange: V) -> StoreEntry {
        StoreEntry {
            priority,
            ..StoreEntry::new(name, Type::MX, exchange)
        }
    }

    /// Whether this entry answers for `subdomain`, where the empty subdomain
    /// stands for the apex
    pub fn matches(&self, subdomain: &str) -> bool {
        if subdomain.is_empty() {
            self.name == APEX_NAME
        } else {
            self.name.eq_ignore_ascii_case(subdomain)
        }
    }

    pub fn rdata(&self) -> Result<RRData<'_>, Error> {
        RRData::from_text(self.typ, &self.value, self.priority)
    }
}

/// Source of the records the responder serves
pub trait RecordStore: Debug + Send + Sync {
    /// Returns every served entry of the zone whose apex is `apex`
    fn lookup(&self, apex: &str) -> io::Result<Vec<StoreEntry>>;
}
