use yaml_rust2::scanner::{Scanner, Token as ScannerToken, TokenType};

use crate::error::ParseError;

/// Kind of a YAML token.
///
/// Rules only ever branch on the stream and document delimiters and on
/// directives. Every other kind is carried through so that the window a rule
/// sees is the real token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StreamStart,
    StreamEnd,
    /// A `%YAML` or `%TAG` line.
    Directive,
    /// `---`
    DocumentStart,
    /// `...`
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    Alias,
    Anchor,
    Tag,
    Scalar,
}

/// A token and the position where it starts. Both `line` and `column` are
/// 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// Map a scanner token onto its kind. `None` for placeholder tokens that never
/// reach the stream.
fn token_kind(token_type: &TokenType) -> Option<TokenKind> {
    let kind = match token_type {
        TokenType::StreamStart(..) => TokenKind::StreamStart,
        TokenType::StreamEnd => TokenKind::StreamEnd,
        TokenType::VersionDirective(..) | TokenType::TagDirective(..) => TokenKind::Directive,
        TokenType::DocumentStart => TokenKind::DocumentStart,
        TokenType::DocumentEnd => TokenKind::DocumentEnd,
        TokenType::BlockSequenceStart => TokenKind::BlockSequenceStart,
        TokenType::BlockMappingStart => TokenKind::BlockMappingStart,
        TokenType::BlockEnd => TokenKind::BlockEnd,
        TokenType::FlowSequenceStart => TokenKind::FlowSequenceStart,
        TokenType::FlowSequenceEnd => TokenKind::FlowSequenceEnd,
        TokenType::FlowMappingStart => TokenKind::FlowMappingStart,
        TokenType::FlowMappingEnd => TokenKind::FlowMappingEnd,
        TokenType::BlockEntry => TokenKind::BlockEntry,
        TokenType::FlowEntry => TokenKind::FlowEntry,
        TokenType::Key => TokenKind::Key,
        TokenType::Value => TokenKind::Value,
        TokenType::Alias(..) => TokenKind::Alias,
        TokenType::Anchor(..) => TokenKind::Anchor,
        TokenType::Tag(..) => TokenKind::Tag,
        TokenType::Scalar(..) => TokenKind::Scalar,
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    Some(kind)
}

/// Character offsets of the line starts of a text, to turn an offset back
/// into a 0-indexed `(line, column)`.
struct LineIndex {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(contents: &str) -> Self {
        let chars: Vec<char> = contents.chars().collect();
        let mut line_starts = vec![0];
        line_starts.extend(
            chars
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { chars, line_starts }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        (line, offset - self.line_starts[line])
    }

    /// Where the text ends, after any trailing line break.
    fn end(&self) -> (usize, usize) {
        self.position(self.chars.len())
    }

    /// The `-` of a block entry whose scanner mark lies past the indicator
    /// and the blanks after it.
    fn block_entry(&self, mark: usize) -> Option<(usize, usize)> {
        let mut offset = mark.min(self.chars.len());
        while offset > 0 {
            offset -= 1;
            match self.chars[offset] {
                '-' => return Some(self.position(offset)),
                c if c.is_whitespace() => continue,
                _ => return None,
            }
        }
        None
    }
}

/// Scan `contents` into the full token stream, from `StreamStart` to
/// `StreamEnd`.
///
/// Positions are 0-indexed and follow where each token starts in the text:
/// a block mapping starts at its first key, a block entry at its `-`, and the
/// stream ends right after the last character.
pub fn tokenize(contents: &str) -> Result<Vec<Token>, ParseError> {
    let index = LineIndex::new(contents);
    let mut scanner = Scanner::new(contents.chars());
    let mut tokens: Vec<Token> = Vec::new();

    for ScannerToken(marker, token_type) in scanner.by_ref() {
        let Some(kind) = token_kind(&token_type) else {
            continue;
        };

        // The scanner counts lines from 1 and columns from 0.
        let scanned = (marker.line().saturating_sub(1), marker.col());
        let (line, column) = match kind {
            TokenKind::StreamEnd => index.end(),
            TokenKind::BlockEntry => index.block_entry(marker.index()).unwrap_or(scanned),
            _ => scanned,
        };

        if kind == TokenKind::Key
            && let Some(previous) = tokens.last_mut()
            && previous.is(TokenKind::BlockMappingStart)
        {
            previous.line = line;
            previous.column = column;
        }

        tokens.push(Token::new(kind, line, column));
    }

    if let Some(err) = scanner.get_error() {
        return Err(ParseError::from(err));
    }

    Ok(tokens)
}

/// The tokens surrounding the one being checked.
///
/// Every token rule is called with the same window so that adding a rule never
/// requires touching the dispatcher, even when a rule only looks at `prev` and
/// `token`.
#[derive(Debug, Clone, Copy)]
pub struct TokenWindow<'a> {
    pub prev: Option<&'a Token>,
    pub token: &'a Token,
    pub next: Option<&'a Token>,
    pub nextnext: Option<&'a Token>,
}

impl<'a> TokenWindow<'a> {
    pub fn new(
        prev: Option<&'a Token>,
        token: &'a Token,
        next: Option<&'a Token>,
        nextnext: Option<&'a Token>,
    ) -> Self {
        Self { prev, token, next, nextnext }
    }

    /// Kind of the previous token, if any.
    pub fn prev_kind(&self) -> Option<TokenKind> {
        self.prev.map(|prev| prev.kind)
    }
}

/// One window per token, in stream order.
pub fn windows(tokens: &[Token]) -> impl Iterator<Item = TokenWindow<'_>> {
    tokens.iter().enumerate().map(|(i, token)| {
        TokenWindow::new(
            i.checked_sub(1).map(|j| &tokens[j]),
            token,
            tokens.get(i + 1),
            tokens.get(i + 2),
        )
    })
}
