use std::fmt;

/// Sentinel for a container token whose closing bracket has not been seen.
const OPEN: usize = usize::MAX;

/// The kind of a JSON token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// `{` .. `}`.
    Object,
    /// `[` .. `]`.
    Array,
    /// A quoted string; the span excludes the quotes.
    String,
    /// An unquoted literal: a number, `true`, `false`, or `null`.
    Primitive,
}

/// A typed span of the source document.
///
/// Tokens are laid out in depth-first order: the `size` children of a
/// container occupy the slots that follow it. An object's `size` counts its
/// member keys; a key string has `size == 1` and its value follows it.
#[derive(Clone, Copy, Debug)]
pub struct Token {
    /// Token kind.
    pub kind: Kind,
    /// Byte offset of the first byte of the span.
    pub start: usize,
    /// Byte offset one past the last byte of the span.
    pub end: usize,
    /// Number of immediate children.
    pub size: usize,
    /// Slot index of the enclosing token.
    pub parent: Option<usize>,
}

/// Represents a tokenisation error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A byte that cannot appear at this point in a JSON document.
    Invalid {
        /// Byte offset of the offending input byte.
        offset: usize,
    },
    /// The document ended inside an unterminated value.
    Truncated,
    /// The fixed token capacity was exhausted before the document ended.
    TooManyTokens,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Invalid { offset } => write!(f, "invalid JSON at byte {}", offset),
            Error::Truncated => write!(f, "truncated JSON document"),
            Error::TooManyTokens => write!(f, "JSON token capacity exhausted"),
        }
    }
}

impl std::error::Error for Error {}

/// Counts the tokens of `src` without materialising them.
pub fn count(src: &[u8]) -> Result<usize, Error> {
    Lexer::new(src, usize::MAX).run(None)
}

/// Tokenises `src` into a flat array.
///
/// When `capacity` is `None` a counting pre-pass sizes the array exactly, so
/// no reallocation happens during the fill pass. A pinned `capacity` skips
/// the pre-pass and fails with [`Error::TooManyTokens`] when exceeded.
pub fn tokenize(src: &[u8], capacity: Option<usize>) -> Result<Vec<Token>, Error> {
    let capacity = match capacity {
        Some(n) => n,
        None => count(src)?,
    };
    let mut tokens = Vec::with_capacity(capacity);
    Lexer::new(src, capacity).run(Some(&mut tokens))?;
    Ok(tokens)
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    /// Slot of the token that owns whatever comes next.
    parent: Option<usize>,
    capacity: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a [u8], capacity: usize) -> Self {
        Lexer {
            src,
            pos: 0,
            parent: None,
            capacity,
        }
    }

    /// Runs one pass. With `tokens` absent only the token count is produced;
    /// structural bookkeeping (parent links, child counts, bracket matching)
    /// happens in the fill pass.
    fn run(&mut self, mut tokens: Option<&mut Vec<Token>>) -> Result<usize, Error> {
        let mut total = 0usize;
        while self.pos < self.src.len() {
            let c = self.src[self.pos];
            match c {
                b'{' | b'[' => {
                    total += 1;
                    if let Some(tokens) = tokens.as_mut() {
                        let kind = if c == b'{' { Kind::Object } else { Kind::Array };
                        let slot = self.push(
                            tokens,
                            Token {
                                kind,
                                start: self.pos,
                                end: OPEN,
                                size: 0,
                                parent: self.parent,
                            },
                        )?;
                        if let Some(parent) = self.parent {
                            tokens[parent].size += 1;
                        }
                        self.parent = Some(slot);
                    }
                }
                b'}' | b']' => {
                    if let Some(tokens) = tokens.as_mut() {
                        let kind = if c == b'}' { Kind::Object } else { Kind::Array };
                        self.close(tokens, kind)?;
                    }
                }
                b'"' => {
                    let (start, end) = self.string()?;
                    total += 1;
                    if let Some(tokens) = tokens.as_mut() {
                        self.push(
                            tokens,
                            Token {
                                kind: Kind::String,
                                start,
                                end,
                                size: 0,
                                parent: self.parent,
                            },
                        )?;
                        if let Some(parent) = self.parent {
                            tokens[parent].size += 1;
                        }
                    }
                }
                b' ' | b'\t' | b'\r' | b'\n' => {}
                b':' => {
                    if let Some(tokens) = tokens.as_mut() {
                        // The most recently completed token (the key) owns
                        // the value that follows.
                        self.parent = tokens.len().checked_sub(1);
                    }
                }
                b',' => {
                    if let Some(tokens) = tokens.as_mut() {
                        if let Some(parent) = self.parent {
                            if tokens[parent].kind != Kind::Array
                                && tokens[parent].kind != Kind::Object
                            {
                                self.parent = tokens[parent].parent;
                            }
                        }
                    }
                }
                _ => {
                    let (start, end) = self.primitive()?;
                    total += 1;
                    if let Some(tokens) = tokens.as_mut() {
                        self.push(
                            tokens,
                            Token {
                                kind: Kind::Primitive,
                                start,
                                end,
                                size: 0,
                                parent: self.parent,
                            },
                        )?;
                        if let Some(parent) = self.parent {
                            tokens[parent].size += 1;
                        }
                    }
                }
            }
            self.pos += 1;
        }

        if let Some(tokens) = tokens {
            for token in tokens.iter() {
                if token.end == OPEN {
                    return Err(Error::Truncated);
                }
            }
        }
        Ok(total)
    }

    fn push(&mut self, tokens: &mut Vec<Token>, token: Token) -> Result<usize, Error> {
        if tokens.len() >= self.capacity {
            return Err(Error::TooManyTokens);
        }
        tokens.push(token);
        Ok(tokens.len() - 1)
    }

    /// Walks the parent chain to the innermost still-open container and
    /// closes it, verifying the bracket kind matches its opener.
    fn close(&mut self, tokens: &mut [Token], kind: Kind) -> Result<(), Error> {
        if tokens.is_empty() {
            return Err(Error::Invalid { offset: self.pos });
        }
        let mut slot = tokens.len() - 1;
        loop {
            let token = tokens[slot];
            if token.end == OPEN {
                if token.kind != kind {
                    return Err(Error::Invalid { offset: self.pos });
                }
                tokens[slot].end = self.pos + 1;
                self.parent = token.parent;
                return Ok(());
            }
            match token.parent {
                Some(parent) => slot = parent,
                None => {
                    if token.kind != kind || self.parent.is_none() {
                        return Err(Error::Invalid { offset: self.pos });
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Consumes a quoted string, validating escapes. Returns the span of the
    /// contents, quotes excluded. `self.pos` is left on the closing quote.
    fn string(&mut self) -> Result<(usize, usize), Error> {
        let start = self.pos + 1;
        self.pos += 1;
        while self.pos < self.src.len() {
            let c = self.src[self.pos];
            if c == b'"' {
                return Ok((start, self.pos));
            }
            if c == b'\\' && self.pos + 1 < self.src.len() {
                self.pos += 1;
                match self.src[self.pos] {
                    b'"' | b'/' | b'\\' | b'b' | b'f' | b'r' | b'n' | b't' => {}
                    b'u' => {
                        for _ in 0..4 {
                            self.pos += 1;
                            if self.pos >= self.src.len()
                                || !self.src[self.pos].is_ascii_hexdigit()
                            {
                                return Err(Error::Invalid { offset: self.pos });
                            }
                        }
                    }
                    _ => return Err(Error::Invalid { offset: self.pos }),
                }
            }
            self.pos += 1;
        }
        Err(Error::Truncated)
    }

    /// Consumes an unquoted literal up to (not including) its terminator.
    fn primitive(&mut self) -> Result<(usize, usize), Error> {
        let start = self.pos;
        while self.pos < self.src.len() {
            match self.src[self.pos] {
                b':' | b'\t' | b'\r' | b'\n' | b' ' | b',' | b']' | b'}' => break,
                c if c < 0x20 || c >= 0x7F => {
                    return Err(Error::Invalid { offset: self.pos });
                }
                _ => self.pos += 1,
            }
        }
        let end = self.pos;
        // Leave the terminator for the main loop.
        self.pos -= 1;
        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_pass_matches_fill_pass() {
        let src = br#"{"asset":{"version":"2.0"},"nodes":[{"mesh":0},{"children":[0]}]}"#;
        let counted = count(src).unwrap();
        let tokens = tokenize(src, None).unwrap();
        assert_eq!(counted, tokens.len());
    }

    #[test]
    fn object_members_follow_their_parent() {
        let src = br#"{"a":1,"b":[2,3]}"#;
        let tokens = tokenize(src, None).unwrap();
        assert_eq!(tokens[0].kind, Kind::Object);
        assert_eq!(tokens[0].size, 2);
        // Key "a".
        assert_eq!(tokens[1].kind, Kind::String);
        assert_eq!(tokens[1].size, 1);
        assert_eq!(tokens[1].parent, Some(0));
        // Value 1.
        assert_eq!(tokens[2].kind, Kind::Primitive);
        assert_eq!(tokens[2].parent, Some(1));
        // Array [2,3] hangs off key "b".
        assert_eq!(tokens[4].kind, Kind::Array);
        assert_eq!(tokens[4].size, 2);
        assert_eq!(tokens[5].parent, Some(4));
        assert_eq!(tokens[6].parent, Some(4));
    }

    #[test]
    fn string_spans_exclude_quotes() {
        let src = br#"{"name":"box"}"#;
        let tokens = tokenize(src, None).unwrap();
        let value = tokens[2];
        assert_eq!(&src[value.start..value.end], b"box");
    }

    #[test]
    fn mismatched_brackets_rejected() {
        assert!(matches!(
            tokenize(br#"{"a":[1}"#, None),
            Err(Error::Invalid { .. })
        ));
    }

    #[test]
    fn unterminated_containers_rejected() {
        assert!(matches!(
            tokenize(br#"{"a":[1,2]"#, None),
            Err(Error::Truncated)
        ));
    }

    #[test]
    fn unterminated_string_rejected() {
        assert!(matches!(tokenize(br#"{"a":"oops"#, None), Err(Error::Truncated)));
    }

    #[test]
    fn bad_escape_rejected() {
        assert!(matches!(
            tokenize(br#"{"a":"\q"}"#, None),
            Err(Error::Invalid { .. })
        ));
        assert!(matches!(
            tokenize(br#"{"a":"\u12g4"}"#, None),
            Err(Error::Invalid { .. })
        ));
    }

    #[test]
    fn escapes_accepted() {
        let tokens = tokenize(br#"{"a":"A\n\t\""}"#, None).unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn pinned_capacity_enforced() {
        let src = br#"{"a":1,"b":2}"#;
        assert!(matches!(tokenize(src, Some(3)), Err(Error::TooManyTokens)));
        assert!(tokenize(src, Some(5)).is_ok());
    }

    #[test]
    fn primitive_at_end_of_input() {
        let tokens = tokenize(b"true", None).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, Kind::Primitive);
        assert_eq!(tokens[0].end, 4);
    }

    #[test]
    fn control_byte_in_primitive_rejected() {
        assert!(matches!(
            tokenize(b"{\"a\":1\x01}", None),
            Err(Error::Invalid { .. })
        ));
    }
}
