use thiserror::Error;

/// Error decoding or encoding a DNS message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("message ended before the field at offset {0}")]
    TruncatedMessage(usize),
    #[error("compressed name pointer at offset {0} is not supported")]
    UnsupportedCompression(usize),
    #[error("label at offset {0} has unknown label format")]
    UnknownLabelFormat(usize),
    #[error("invalid characters encountered while reading label at offset {0}")]
    LabelIsNotAscii(usize),
    #[error("label at offset {0} contains a dot")]
    LabelContainsDot(usize),
    #[error("{0:?} is not a valid address")]
    MalformedAddress(String),
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
}
