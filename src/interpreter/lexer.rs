use logos::Logos;
use tracing::trace;

use crate::{
    error::ParseError,
    interpreter::{parser::core::ParseResult, registry::Registry},
};

/// Raw lexical classes recognised by the scanner.
///
/// Runs of symbol characters are kept together here and split into
/// registered operators afterwards, so the operator set stays owned by the
/// registry rather than by this enum.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    /// Numeric literals such as `42`, `3.14`, `.5`, `2.` or `1.5e-3`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,
    /// Identifiers such as `x`, `sin` or `rate_2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// A run of characters that can only belong to operators.
    #[regex(r"[^ \t\r\n\fa-zA-Z0-9_(),.]+")]
    Symbols,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

/// Classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal.
    Number,
    /// A name; resolved to a constant, function or variable by the parser.
    Identifier,
    /// A registered operator symbol.
    Operator,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Separator,
    /// End of input; always the last token.
    End,
}

/// A lexical token: its class, its source text and its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The token class.
    pub kind:     TokenKind,
    /// The exact source slice; empty for [`TokenKind::End`].
    pub text:     &'src str,
    /// Byte offset of the first character.
    pub position: usize,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::End => write!(f, "end of input"),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Converts `source` into tokens, ending with a [`TokenKind::End`] token.
///
/// Whitespace is skipped. Symbol characters are split by longest match
/// against the operator symbols of `registry`, so `2**3` yields `**` while
/// `2*-3` yields `*` and `-`. Deterministic: the same source and registry
/// always produce the same tokens.
///
/// # Errors
/// Returns [`ParseError::InvalidCharacter`] with the offending character and
/// its byte offset when no token class matches.
///
/// # Example
/// ```
/// use calculate::{
///     Engine,
///     interpreter::lexer::{TokenKind, tokenize},
/// };
///
/// let engine = Engine::default();
/// let tokens = tokenize("max(x, 1.5e-3)", engine.registry()).unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::LeftParen,
///             TokenKind::Identifier,
///             TokenKind::Separator,
///             TokenKind::Number,
///             TokenKind::RightParen,
///             TokenKind::End]);
/// assert_eq!(tokens[4].text, "1.5e-3");
/// assert_eq!(tokens[4].position, 7);
/// ```
pub fn tokenize<'src>(source: &'src str, registry: &Registry) -> ParseResult<Vec<Token<'src>>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();

        let kind = match raw {
            Ok(RawToken::Number) => TokenKind::Number,
            Ok(RawToken::Identifier) => TokenKind::Identifier,
            Ok(RawToken::LParen) => TokenKind::LeftParen,
            Ok(RawToken::RParen) => TokenKind::RightParen,
            Ok(RawToken::Comma) => TokenKind::Separator,
            Ok(RawToken::Symbols) => {
                split_operators(source, span, registry, &mut tokens)?;
                continue;
            },
            Err(()) => return Err(invalid_character(source, span.start)),
        };

        tokens.push(Token { kind,
                            text,
                            position: span.start });
    }

    tokens.push(Token { kind:     TokenKind::End,
                        text:     "",
                        position: source.len(), });

    trace!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Splits the run of symbol characters at `span` into registered operators,
/// longest match first.
fn split_operators<'src>(source: &'src str,
                         span: std::ops::Range<usize>,
                         registry: &Registry,
                         tokens: &mut Vec<Token<'src>>)
                         -> ParseResult<()> {
    let mut position = span.start;
    while position < span.end {
        let rest = &source[position..span.end];
        let symbol = registry.longest_operator(rest)
                             .ok_or_else(|| invalid_character(source, position))?;
        tokens.push(Token { kind: TokenKind::Operator,
                            text: &rest[..symbol.len()],
                            position });
        position += symbol.len();
    }
    Ok(())
}

fn invalid_character(source: &str, position: usize) -> ParseError {
    let character = source[position..].chars().next().unwrap_or('\u{fffd}');
    ParseError::InvalidCharacter { character,
                                   position }
}
