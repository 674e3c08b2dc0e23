enum Utf8ByteType {
    SingleByte,
    StartTwoByte,
    StartThreeByte,
    StartFourByte,
    Continuation,
    Invalid,
}

fn utf8_byte_type(byte: u8) -> Utf8ByteType {
    if byte & 0b1000_0000 == 0 {
        Utf8ByteType::SingleByte
    } else if byte & 0b1100_0000 == 0b1000_0000 {
        Utf8ByteType::Continuation
    } else if byte & 0b1110_0000 == 0b1100_0000 {
        Utf8ByteType::StartTwoByte
    } else if byte & 0b1111_0000 == 0b1110_0000 {
        Utf8ByteType::StartThreeByte
    } else if byte & 0b1111_1000 == 0b1111_0000 {
        Utf8ByteType::StartFourByte
    } else {
        Utf8ByteType::Invalid
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) enum Utf8DecoderStatus {
    Continuation,
    Done(char),
    Error,
}

/// Incremental decoder for a single code point.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) struct Utf8Decoder {
    codepoint: u32,
    len: u8,
    remaining: u8,
}

impl Utf8Decoder {
    pub(crate) fn new() -> Self {
        Self {
            codepoint: 0,
            len: 0,
            remaining: 0,
        }
    }

    fn start(&mut self, bits: u32, continuation_bytes: u8) -> Utf8DecoderStatus {
        self.codepoint = bits;
        self.len = continuation_bytes + 1;
        self.remaining = continuation_bytes;
        Utf8DecoderStatus::Continuation
    }

    pub(crate) fn advance(&mut self, byte: u8) -> Utf8DecoderStatus {
        if self.remaining == 0 {
            return match utf8_byte_type(byte) {
                Utf8ByteType::SingleByte => Utf8DecoderStatus::Done(byte as char),
                Utf8ByteType::StartTwoByte => self.start((byte & 0x1f) as u32, 1),
                Utf8ByteType::StartThreeByte => self.start((byte & 0x0f) as u32, 2),
                Utf8ByteType::StartFourByte => self.start((byte & 0x07) as u32, 3),
                Utf8ByteType::Continuation | Utf8ByteType::Invalid => Utf8DecoderStatus::Error,
            };
        }

        if !matches!(utf8_byte_type(byte), Utf8ByteType::Continuation) {
            self.remaining = 0;
            return Utf8DecoderStatus::Error;
        }

        self.codepoint = (self.codepoint << 6) | (byte & 0x3f) as u32;
        self.remaining -= 1;

        if self.remaining > 0 {
            return Utf8DecoderStatus::Continuation;
        }

        // Overlong encodings and surrogates are rejected here
        match char::from_u32(self.codepoint) {
            Some(c) if c.len_utf8() == self.len as usize => Utf8DecoderStatus::Done(c),
            _ => Utf8DecoderStatus::Error,
        }
    }
}
