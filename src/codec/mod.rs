pub mod decoder;
pub mod encoder;

pub use decoder::{DecodeState, Decoder, SymbolReader};
pub use encoder::Encoder;
