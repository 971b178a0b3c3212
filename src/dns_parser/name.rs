use std::borrow::Cow;
use std::fmt;

use super::{wire, Error};

/// A domain name in dotted text form, without the trailing dot
///
/// Names read from a packet are owned; names built by the server usually
/// borrow from the record store. Label lengths are only checked when the name
/// is written out, see [`wire::write_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name<'a>(Cow<'a, str>);

impl<'a> Name<'a> {
    /// Reads the uncompressed name starting at `pos` of `data`
    ///
    /// Returns the name together with the offset just past its terminating
    /// zero byte.
    pub fn scan(data: &[u8], mut pos: usize) -> Result<(Name<'static>, usize), Error> {
        let mut name = String::new();
        loop {
            let byte = *data.get(pos).ok_or(Error::TruncatedMessage(pos))?;
            match byte & 0b1100_0000 {
                0 => (),
                0b1100_0000 => return Err(Error::UnsupportedCompression(pos)),
                _ => return Err(Error::UnknownLabelFormat(pos)),
            }
            if byte == 0 {
                return Ok((Name(Cow::Owned(name)), pos + 1));
            }

            let start = pos + 1;
            let end = start + byte as usize;
            let label = data.get(start..end).ok_or(Error::TruncatedMessage(start))?;
            if !label.is_ascii() {
                return Err(Error::LabelIsNotAscii(start));
            }
            if label.contains(&b'.') {
                return Err(Error::LabelContainsDot(start));
            }
            if !name.is_empty() {
                name.push('.');
            }
            name.extend(label.iter().map(|&b| b as char));
            pos = end;
        }
    }

    pub fn from_str<T: Into<Cow<'a, str>>>(name: T) -> Name<'a> {
        Name(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_owned(self) -> Name<'static> {
        Name(Cow::Owned(self.0.into_owned()))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        wire::write_name(buf, &self.0)
    }
}

impl<'a> fmt::Display for Name<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::{Error, Name};

    #[test]
    fn scan_simple() {
        let data = b"\x07example\x03com\x00\x00\x01";
        let (name, end) = Name::scan(data, 0).unwrap();
        assert_eq!(name.as_str(), "example.com");
        assert_eq!(end, 13);
    }

    #[test]
    fn scan_root() {
        let (name, end) = Name::scan(b"\x00", 0).unwrap();
        assert_eq!(name.as_str(), "");
        assert_eq!(end, 1);
    }

    #[test]
    fn scan_from_offset() {
        let data = b"junk\x03www\x00";
        let (name, end) = Name::scan(data, 4).unwrap();
        assert_eq!(name.to_string(), "www");
        assert_eq!(end, data.len());
    }

    #[test]
    fn scan_truncated() {
        // missing terminator
        assert_eq!(
            Name::scan(b"\x03com", 0),
            Err(Error::TruncatedMessage(4))
        );
        // label body runs past the end
        assert_eq!(
            Name::scan(b"\x07exam", 0),
            Err(Error::TruncatedMessage(1))
        );
        assert_eq!(Name::scan(b"", 0), Err(Error::TruncatedMessage(0)));
    }

    #[test]
    fn scan_rejects_pointers_and_reserved_formats() {
        assert_eq!(
            Name::scan(b"\x03www\xc0\x0c", 0),
            Err(Error::UnsupportedCompression(4))
        );
        assert_eq!(
            Name::scan(b"\x40abc", 0),
            Err(Error::UnknownLabelFormat(0))
        );
        assert_eq!(
            Name::scan(b"\x80abc", 0),
            Err(Error::UnknownLabelFormat(0))
        );
    }

    #[test]
    fn scan_rejects_non_ascii() {
        assert_eq!(
            Name::scan(b"\x02\xc3\xa9\x00", 0),
            Err(Error::LabelIsNotAscii(1))
        );
    }

    #[test]
    fn scan_rejects_dotted_labels() {
        assert_eq!(
            Name::scan(b"\x03a.b\x00", 0),
            Err(Error::LabelContainsDot(1))
        );
        assert_eq!(
            Name::scan(b"\x03www\x01.\x00", 0),
            Err(Error::LabelContainsDot(5))
        );
    }

    #[test]
    fn round_trip() {
        let names = [
            "example.com",
            "a.b.c.d.e.f",
            "_xmpp-server._tcp.gmail.com",
            "x",
        ];
        for text in names.iter() {
            let mut buf = Vec::new();
            Name::from_str(*text).write_to(&mut buf).unwrap();
            let (name, end) = Name::scan(&buf, 0).unwrap();
            assert_eq!(name.as_str(), *text);
            assert_eq!(end, buf.len());
        }

        let long = format!("{}.{}", "a".repeat(63), "b".repeat(63));
        let mut buf = Vec::new();
        Name::from_str(long.as_str()).write_to(&mut buf).unwrap();
        assert_eq!(Name::scan(&buf, 0).unwrap().0.as_str(), long);
    }
}
