/// Structural role of a single input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteClass {
    TagOpen,
    TagClose,
    // NOTE: `/` is both the end tag marker (`</p>`) and the self-closing
    // marker (`<br/>`), the state decides which one it is.
    Slash,
    Equals,
    Quote,
    Whitespace,
    Question,
    Bang,
    Dash,
    Other,
}

static BYTE_CLASSES: [ByteClass; 256] = build_table();

const fn build_table() -> [ByteClass; 256] {
    let mut table = [ByteClass::Other; 256];

    table[b'<' as usize] = ByteClass::TagOpen;
    table[b'>' as usize] = ByteClass::TagClose;
    table[b'/' as usize] = ByteClass::Slash;
    table[b'=' as usize] = ByteClass::Equals;
    table[b'"' as usize] = ByteClass::Quote;
    table[b'?' as usize] = ByteClass::Question;
    table[b'!' as usize] = ByteClass::Bang;
    table[b'-' as usize] = ByteClass::Dash;

    table[b' ' as usize] = ByteClass::Whitespace;
    table[b'\t' as usize] = ByteClass::Whitespace;
    table[b'\n' as usize] = ByteClass::Whitespace;
    table[b'\r' as usize] = ByteClass::Whitespace;
    table[0x0C] = ByteClass::Whitespace;

    table
}

#[inline]
pub(crate) fn classify(byte: u8) -> ByteClass {
    BYTE_CLASSES[byte as usize]
}

#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    classify(byte) == ByteClass::Whitespace
}
