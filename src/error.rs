use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Header errors
    #[error("Malformed header: expected 257 code length bytes, got {found}")]
    MalformedHeader { found: usize },

    #[error("Code length table has {found} entries, expected {expected}")]
    LengthTableSize { expected: usize, found: usize },

    // Code construction errors
    #[error("Invalid code lengths: table does not describe a complete prefix code")]
    InvalidCodeLengths,

    #[error("Code length for symbol {symbol} is {length} bits (max 255)")]
    CodeLengthOverflow { symbol: u16, length: usize },

    #[error("Code for symbol {symbol} is {length} bits, too long to encode (max 64)")]
    CodeTooLong { symbol: u16, length: u8 },

    // Payload errors
    #[error("Symbol {0} has no code in the table")]
    MissingCode(u16),

    #[error("Unexpected end of stream before end-of-stream symbol")]
    UnexpectedEndOfStream,

    #[error("Bit sequence does not map to any symbol")]
    UnmappedCode,
}

pub type Result<T> = std::result::Result<T, Error>;
