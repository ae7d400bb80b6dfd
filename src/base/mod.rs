mod align;
mod bytes;
mod encoding;

pub(crate) use self::align::Align;
pub(crate) use self::bytes::Bytes;
pub use self::encoding::AsciiCompatibleEncoding;
