use menudef_diagnostics::Span;

/// Comment leader: everything from here to the end of the line is dropped.
const COMMENT: char = '#';

/// A whitespace-delimited token that borrows its text from the source.
///
/// Tokens carry no type; the parser interprets the text by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Borrowed slice of the source input.
    pub text: &'a str,
    /// Byte span of `text` in the source.
    pub span: Span,
    /// 1-based line number.
    pub line: usize,
}

/// Line-oriented tokenizer.
///
/// Reads one line at a time, strips `#` comments, skips blank lines, and
/// splits the rest on runs of whitespace. No token spans two lines.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread line.
    cursor: usize,
    /// Number of lines read so far (1-based line of the current line).
    line: usize,
    /// Remaining tokens of the current line, in reverse order.
    pending: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over the full source text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            line: 0,
            pending: Vec::new(),
        }
    }

    /// Line number of the most recently read line, for end-of-input errors.
    pub fn line(&self) -> usize {
        self.line.max(1)
    }

    /// Return the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        while self.pending.is_empty() {
            if !self.read_line() {
                return None;
            }
        }
        self.pending.pop()
    }

    /// Load the tokens of the next non-blank line into `pending`.
    /// Returns `false` at end of input.
    fn read_line(&mut self) -> bool {
        if self.cursor >= self.input.len() {
            return false;
        }
        let input = self.input;
        let start = self.cursor;
        let rest = &input[start..];
        let (raw, advance) = match rest.find('\n') {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };
        self.cursor += advance;
        self.line += 1;

        let code = match raw.find(COMMENT) {
            Some(i) => &raw[..i],
            None => raw,
        };

        let line = self.line;
        let mut tokens: Vec<Token<'a>> = Vec::new();
        let mut word_start: Option<usize> = None;
        for (i, ch) in code.char_indices() {
            if ch.is_whitespace() {
                if let Some(ws) = word_start.take() {
                    tokens.push(self.make_token(start + ws, start + i, line));
                }
            } else if word_start.is_none() {
                word_start = Some(i);
            }
        }
        if let Some(ws) = word_start {
            tokens.push(self.make_token(start + ws, start + code.len(), line));
        }

        tokens.reverse();
        self.pending = tokens;
        true
    }

    fn make_token(&self, start: usize, end: usize, line: usize) -> Token<'a> {
        Token {
            text: &self.input[start..end],
            span: Span::new(start, end),
            line,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.next_token()
    }
}

/// Tokenize the whole input.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(
            texts("MenuItem   Plus\tmPlus"),
            vec!["MenuItem", "Plus", "mPlus"]
        );
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let input = "# header\n\n  MenuRow [ # trailing\n   \n]\n";
        assert_eq!(texts(input), vec!["MenuRow", "[", "]"]);
    }

    #[test]
    fn comment_glued_to_token_truncates_it() {
        assert_eq!(texts("mPlus#comment"), vec!["mPlus"]);
    }

    #[test]
    fn tracks_one_based_lines() {
        let toks = tokenize("a\n\n# c\n  b c\n");
        let lines: Vec<usize> = toks.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 4, 4]);
    }

    #[test]
    fn spans_point_into_source() {
        let input = "x\r\n  yy  zzz";
        for tok in tokenize(input) {
            assert_eq!(&input[tok.span.start..tok.span.end], tok.text);
        }
        assert_eq!(texts(input), vec!["x", "yy", "zzz"]);
    }

    #[test]
    fn empty_input_has_no_tokens() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().is_none());
        assert_eq!(lexer.line(), 1);
    }

    #[test]
    fn line_reports_last_line_at_eof() {
        let mut lexer = Lexer::new("a\nb\n\n");
        while lexer.next_token().is_some() {}
        assert_eq!(lexer.line(), 3);
    }
}
