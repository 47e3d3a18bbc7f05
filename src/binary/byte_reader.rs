pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pub offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.offset).copied()?;
        self.offset += 1;

        Some(byte)
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    pub fn read_bytes(&mut self, size: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(size)?;
        let result = self.bytes.get(self.offset..end)?;
        self.offset = end;

        Some(result)
    }

    pub fn number_of_bytes_left(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Consumes exactly one whitespace byte, if one is next.
    pub fn skip_single_whitespace(&mut self) -> bool {
        match self.peek_byte() {
            Some(byte) if Self::is_whitespace(byte) => {
                self.offset += 1;
                true
            }
            _ => false,
        }
    }

    fn skip_line(&mut self) {
        while let Some(byte) = self.read_byte() {
            if Self::is_newline(byte) {
                break;
            }
        }
    }

    fn read_until_whitespace(&mut self) -> Option<&'a [u8]> {
        while Self::is_whitespace(self.peek_byte()?) {
            self.offset += 1;
        }

        let start_index = self.offset;
        while self.peek_byte().is_some_and(|byte| !Self::is_whitespace(byte)) {
            self.offset += 1;
        }

        Some(&self.bytes[start_index..self.offset])
    }

    /// Next whitespace separated header token, skipping `#` comments.
    pub fn read_ppm_symbol(&mut self) -> Option<&'a [u8]> {
        loop {
            let symbol = self.read_until_whitespace()?;

            if symbol.first() != Some(&PPM_COMMENT_START_BYTE) {
                return Some(symbol);
            }

            self.skip_line();
        }
    }

    fn is_whitespace(byte: u8) -> bool {
        WHITESPACE_SYMBOLS.contains(&byte)
    }

    fn is_newline(byte: u8) -> bool {
        NEWLINE_SYMBOLS.contains(&byte)
    }
}

const WHITESPACE_SYMBOLS: [u8; 6] = [10, 32, 13, 9, 11, 12];
const NEWLINE_SYMBOLS: [u8; 2] = [13, 10];
const PPM_COMMENT_START_BYTE: u8 = b'#';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_symbols_and_skips_comments() {
        let mut reader = ByteReader::new(b"P6 # a comment\n  16\t8\n255\n");

        assert_eq!(reader.read_ppm_symbol(), Some(&b"P6"[..]));
        assert_eq!(reader.read_ppm_symbol(), Some(&b"16"[..]));
        assert_eq!(reader.read_ppm_symbol(), Some(&b"8"[..]));
        assert_eq!(reader.read_ppm_symbol(), Some(&b"255"[..]));
        assert!(reader.skip_single_whitespace());
        assert_eq!(reader.number_of_bytes_left(), 0);
        assert_eq!(reader.read_ppm_symbol(), None);
    }

    #[test]
    fn read_bytes_stops_at_the_end() {
        let mut reader = ByteReader::new(&[1, 2, 3]);

        assert_eq!(reader.read_bytes(2), Some(&[1, 2][..]));
        assert_eq!(reader.read_bytes(2), None);
        assert_eq!(reader.read_byte(), Some(3));
        assert_eq!(reader.read_byte(), None);
    }

    #[test]
    fn oversized_reads_do_not_overflow_the_offset() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.read_byte();

        assert_eq!(reader.read_bytes(usize::MAX), None);
        assert_eq!(reader.offset, 1);
        assert_eq!(reader.read_bytes(2), Some(&[2, 3][..]));
    }
}
