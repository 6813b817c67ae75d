use thiserror::Error;

use crate::interpreter::registry::OperatorArity;

/// Coarse classification of a [`ParseError`].
///
/// Host bindings map these onto their own exception hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No token class matched a character.
    Lex,
    /// The token sequence violates the grammar.
    Syntax,
    /// A function was called with the wrong number of arguments.
    Arity,
    /// An operator symbol is not registered for the arity it was used with.
    UnknownOperator,
    /// The expression exceeds the configured depth bound.
    TooComplex,
    /// A declared variable name is invalid, duplicated or unknown.
    Name,
}

/// Represents all errors that can occur during lexing or parsing.
///
/// Positions are byte offsets into the source string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that starts no valid token.
    #[error("Error at position {position}: Invalid character '{character}'.")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position:  usize,
    },
    /// A numeric literal that could not be converted to a number.
    #[error("Error at position {position}: Invalid number literal '{literal}'.")]
    InvalidNumber {
        /// The literal text.
        literal:  String,
        /// Byte offset of the literal.
        position: usize,
    },
    /// The source contained no tokens at all.
    #[error("Error at position 0: Empty expression.")]
    EmptyExpression,
    /// Found an unexpected token while parsing.
    #[error("Error at position {position}: Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Reached the end of input while an operand was still expected.
    #[error("Error at position {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Byte offset of the end of input.
        position: usize,
    },
    /// A `(` was never closed.
    #[error("Error at position {position}: Expected closing parenthesis ')' for '(' opened at {opened_at}.")]
    ExpectedClosingParen {
        /// Byte offset where the `)` was expected.
        position:  usize,
        /// Byte offset of the matching `(`.
        opened_at: usize,
    },
    /// A `,` outside of a function argument list.
    #[error("Error at position {position}: Misplaced separator ','.")]
    MisplacedSeparator {
        /// Byte offset of the separator.
        position: usize,
    },
    /// Extra tokens after a complete expression.
    #[error("Error at position {position}: Extra tokens after expression: '{token}'.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Byte offset of the extra token.
        position: usize,
    },
    /// An identifier followed by `(` that names no registered function.
    #[error("Error at position {position}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The identifier.
        name:     String,
        /// Byte offset of the identifier.
        position: usize,
    },
    /// A function call with the wrong number of arguments.
    #[error("Error at position {position}: Function '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// Registered arity.
        expected: usize,
        /// Number of arguments in the call.
        found:    usize,
        /// Byte offset of the function name.
        position: usize,
    },
    /// An operator symbol without a registration for the required arity.
    #[error("Error at position {position}: Operator '{symbol}' is not defined as a {arity} operator.")]
    UnknownOperator {
        /// The operator symbol.
        symbol:   String,
        /// The arity it was used with.
        arity:    OperatorArity,
        /// Byte offset of the symbol.
        position: usize,
    },
    /// The expression nests deeper than the configured bound.
    #[error("Error at position {position}: Expression is too complex (maximum depth is {limit}).")]
    TooComplex {
        /// The configured maximum depth.
        limit:    usize,
        /// Byte offset where the bound was exceeded.
        position: usize,
    },
    /// A declared variable name that is not a plain identifier or shadows a
    /// builtin.
    #[error("Invalid variable name '{name}': {reason}.")]
    BadName {
        /// The rejected name.
        name:   String,
        /// Why the name was rejected.
        reason: &'static str,
    },
    /// A declared variable name that appears more than once.
    #[error("Variable '{name}' is declared more than once.")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },
    /// An identifier that is neither a builtin nor a declared variable.
    #[error("Error at position {position}: Undefined symbol '{name}'.")]
    UndefinedSymbol {
        /// The identifier.
        name:     String,
        /// Byte offset of the identifier.
        position: usize,
    },
}

impl ParseError {
    /// Returns the coarse category of the error.
    ///
    /// ```
    /// use calculate::{Engine, ParseErrorKind};
    ///
    /// let engine = Engine::default();
    /// let err = engine.parse("(2+3").unwrap_err();
    /// assert_eq!(err.kind(), ParseErrorKind::Syntax);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::InvalidCharacter { .. } | Self::InvalidNumber { .. } => ParseErrorKind::Lex,
            Self::EmptyExpression
            | Self::UnexpectedToken { .. }
            | Self::UnexpectedEndOfInput { .. }
            | Self::ExpectedClosingParen { .. }
            | Self::MisplacedSeparator { .. }
            | Self::UnexpectedTrailingTokens { .. }
            | Self::UnknownFunction { .. } => ParseErrorKind::Syntax,
            Self::ArgumentCountMismatch { .. } => ParseErrorKind::Arity,
            Self::UnknownOperator { .. } => ParseErrorKind::UnknownOperator,
            Self::TooComplex { .. } => ParseErrorKind::TooComplex,
            Self::BadName { .. } | Self::DuplicateName { .. } | Self::UndefinedSymbol { .. } => {
                ParseErrorKind::Name
            },
        }
    }

    /// Returns the byte offset the error points at, if it has one.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::InvalidNumber { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position, .. }
            | Self::MisplacedSeparator { position }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::UnknownFunction { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::UnknownOperator { position, .. }
            | Self::TooComplex { position, .. }
            | Self::UndefinedSymbol { position, .. } => Some(*position),
            Self::EmptyExpression => Some(0),
            Self::BadName { .. } | Self::DuplicateName { .. } => None,
        }
    }
}
