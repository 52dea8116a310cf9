use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Builds a token from a pattern match starting at `pos`, or returns `None`
/// when the match should be skipped.
pub type RegexHandler = fn(&Lexer, usize, &str) -> Option<Token>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: two character operators come before their one
    // character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^ +").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\n").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NewLine, "\n") },
        RegexPattern { regex: Regex::new("^(@|[a-zA-Z])[a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]*)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^::").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DoubleColon, "::") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightArrow, "->") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equality, "==") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Multiply, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Divide, "/") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightParen, ")") },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightBracket, "]") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftBrace, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightBrace, "}") },
    ];
}

/// Saved lexer cursor.
///
/// Obtained from [`Lexer::snapshot`] and handed back to [`Lexer::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    cursor: usize,
}

/// Pull based scanner over an immutable source buffer.
///
/// Every call to [`Lexer::next`] produces exactly one token; the end of the
/// buffer keeps producing [`TokenKind::End`].
#[derive(Clone)]
pub struct Lexer {
    source: String,
    cursor: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: impl Into<String>, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: source.into(),
            cursor: 0,
            file: file_name,
        }
    }

    /// Consumes and returns the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        let (token, cursor) = self.scan(self.cursor);
        self.cursor = cursor;
        trace!("lexed {:?} {:?}", token.kind, token.value);
        token
    }

    /// Returns the next token without moving the cursor.
    pub fn peek(&self) -> Token {
        self.scan(self.cursor).0
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursor: self.cursor,
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.cursor = snapshot.cursor;
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    /// Byte offsets past `u32::MAX` saturate instead of wrapping.
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span {
            start: Position(offset(start), Rc::clone(&self.file)),
            end: Position(offset(end), Rc::clone(&self.file)),
        }
    }

    pub fn at_end(&self) -> bool {
        self.at_end_from(self.cursor)
    }

    fn at_end_from(&self, pos: usize) -> bool {
        match self.source[pos..].chars().next() {
            None | Some('\0') => true,
            Some(_) => false,
        }
    }

    /// Scans one token starting at `pos` and returns it with the cursor
    /// position just after it. Never mutates the lexer.
    fn scan(&self, mut pos: usize) -> (Token, usize) {
        'scan: loop {
            if self.at_end_from(pos) {
                return (
                    MK_TOKEN!(TokenKind::End, String::from("<end>"), self.span(pos, pos)),
                    pos,
                );
            }

            let remainder = &self.source[pos..];
            for pattern in PATTERNS.iter() {
                if let Some(matched) = pattern.regex.find(remainder) {
                    let end = pos + matched.end();
                    match (pattern.handler)(self, pos, matched.as_str()) {
                        Some(token) => return (token, end),
                        None => {
                            pos = end;
                            continue 'scan;
                        }
                    }
                }
            }

            // Nothing matched, hand the character to the parser as is.
            let unknown = remainder.chars().next().map(String::from).unwrap_or_default();
            let end = pos + unknown.len();
            return (
                MK_TOKEN!(TokenKind::Unknown, unknown, self.span(pos, end)),
                end,
            );
        }
    }
}

fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

fn skip_handler(_lexer: &Lexer, _pos: usize, _matched: &str) -> Option<Token> {
    None
}

fn number_handler(lexer: &Lexer, pos: usize, matched: &str) -> Option<Token> {
    Some(MK_TOKEN!(
        TokenKind::Number,
        String::from(matched),
        lexer.span(pos, pos + matched.len())
    ))
}

fn symbol_handler(lexer: &Lexer, pos: usize, matched: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Some(MK_TOKEN!(
        kind,
        String::from(matched),
        lexer.span(pos, pos + matched.len())
    ))
}

/// Scans a whole buffer. The result always ends with a single
/// [`TokenKind::End`] token.
pub fn tokenize(source: impl Into<String>, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next();
        let done = token.kind == TokenKind::End;
        tokens.push(token);

        if done {
            break;
        }
    }

    tokens
}
