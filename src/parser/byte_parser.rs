//! Cursor over the bytes of a Newick string or a forest of Newick strings.
//!
//! [ByteParser] knows about the lexical layer only: whitespace, `[...]`
//! comments, quoted and unquoted labels. Tree structure is left to the
//! [NewickParser](crate::newick::NewickParser).

use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================$=
/// A cursor over borrowed input bytes.
///
/// All delimiters of the Newick grammar are ASCII, so the cursor only ever
/// stops on character boundaries; labels are decoded as UTF-8.
///
/// # Example
/// ```
/// use labelgtc::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [comment] (a_A,b_B);");
/// parser.skip_trivia().unwrap();
/// assert!(parser.eat(b'('));
/// assert_eq!(parser.parse_label(b",);").unwrap(), "a_A");
/// assert_eq!(parser.peek(), Some(b','));
/// ```
#[derive(Debug, Clone)]
pub struct ByteParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ByteParser<'a> {
    /// Creates a cursor at the start of `input`.
    pub fn for_str(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    /// Returns the byte under the cursor, `None` at the end of input.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Returns the byte under the cursor and moves past it.
    #[inline]
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Moves past `byte` if it is under the cursor.
    pub fn eat(&mut self, byte: u8) -> bool {
        let found = self.peek() == Some(byte);
        if found {
            self.pos += 1;
        }
        found
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Up to `k` bytes from the cursor on, decoded lossily.
    pub fn context(&self, k: usize) -> String {
        let rest = self.rest();
        String::from_utf8_lossy(&rest[..k.min(rest.len())]).into_owned()
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.pos.min(self.input.len())..]
    }

    /// Skips whitespace and `[...]` comments in any order.
    ///
    /// # Errors
    /// [UnclosedComment](crate::parser::ParsingErrorType::UnclosedComment)
    /// if a `[` has no matching `]`; the cursor is then at the end of input.
    pub fn skip_trivia(&mut self) -> Result<(), ParsingError> {
        loop {
            self.take_while(|b| b.is_ascii_whitespace());
            if self.peek() != Some(b'[') {
                return Ok(());
            }
            match self.rest().iter().position(|&b| b == b']') {
                Some(offset) => self.pos += offset + 1,
                None => {
                    self.pos = self.input.len();
                    return Err(ParsingError::unclosed_comment(self));
                }
            }
        }
    }

    /// Moves past the longest run of bytes matching `accept` and returns it.
    pub fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a [u8] {
        let rest = self.rest();
        let len = rest.iter().take_while(|&&b| accept(b)).count();
        self.pos += len;
        &rest[..len]
    }

    /// Reads a label after skipping trivia.
    ///
    /// A label starting with `'` runs to the next unpaired quote, `''` stands
    /// for a literal quote. Any other label runs up to the first byte in
    /// `delimiters` (or the end of input) and may be empty.
    ///
    /// # Errors
    /// [UnexpectedEOF](crate::parser::ParsingErrorType::UnexpectedEOF) for an
    /// unterminated quoted label.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_trivia()?;
        if !self.eat(b'\'') {
            let raw = self.take_while(|b| !delimiters.contains(&b));
            return Ok(String::from_utf8_lossy(raw).into_owned());
        }

        let mut label = String::new();
        loop {
            let segment = self.take_while(|b| b != b'\'');
            label.push_str(&String::from_utf8_lossy(segment));
            if !self.eat(b'\'') {
                return Err(ParsingError::unexpected_eof(self));
            }
            if !self.eat(b'\'') {
                return Ok(label);
            }
            label.push('\'');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsingErrorType;

    #[test]
    fn test_skip_trivia() {
        let mut parser = ByteParser::for_str(" \n[first] [second]\t(");
        parser.skip_trivia().unwrap();
        assert_eq!(parser.peek(), Some(b'('));
        assert_eq!(parser.position(), 19);
    }

    #[test]
    fn test_unclosed_comment() {
        let mut parser = ByteParser::for_str("[never closed");
        let err = parser.skip_trivia().unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
        assert!(parser.is_eof());
    }

    #[test]
    fn test_quoted_label_with_escaped_quote() {
        let mut parser = ByteParser::for_str("'Baillon''s Crake',");
        assert_eq!(parser.parse_label(b",").unwrap(), "Baillon's Crake");
        assert_eq!(parser.peek(), Some(b','));
    }

    #[test]
    fn test_unterminated_quoted_label() {
        let mut parser = ByteParser::for_str("'Takahe");
        let err = parser.parse_label(b",").unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
    }

    #[test]
    fn test_unquoted_label_keeps_utf8() {
        let mut parser = ByteParser::for_str("Kākāpō_B:1");
        assert_eq!(parser.parse_label(b":").unwrap(), "Kākāpō_B");
        assert!(parser.eat(b':'));
        assert_eq!(parser.take_while(|b| b.is_ascii_digit()), b"1");
        assert!(parser.is_eof());
        assert_eq!(parser.bump(), None);
    }

    #[test]
    fn test_context_is_bounded() {
        let mut parser = ByteParser::for_str("(a_A,b_B);");
        parser.bump();
        assert_eq!(parser.context(3), "a_A");
        assert_eq!(parser.context(100), "a_A,b_B);");
    }
}
