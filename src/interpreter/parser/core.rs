use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        config::EngineConfig,
        lexer::{Token, TokenKind},
        registry::{Function, Operator, Registry},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The outcome of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTree {
    /// Root of the expression tree.
    pub root:      Expr,
    /// Free variables referenced by the tree, each with the byte offset of
    /// its first occurrence.
    pub variables: BTreeMap<String, usize>,
}

/// An expression under construction together with its height.
#[derive(Debug)]
pub(crate) struct Subtree {
    pub(crate) expr:   Expr,
    pub(crate) height: usize,
}

impl Subtree {
    pub(crate) const fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

/// Recursive descent parser over a token sequence.
///
/// The parser is a pure function of its tokens and the registry: it reads no
/// other state and always produces the same tree for the same input.
pub struct Parser<'src, 'a> {
    pub(crate) tokens:    Vec<Token<'src>>,
    pub(crate) cursor:    usize,
    pub(crate) registry:  &'a Registry,
    pub(crate) declared:  Option<&'a [String]>,
    pub(crate) variables: BTreeMap<String, usize>,
    nesting:              usize,
}

/// Parses a token sequence into an expression tree.
///
/// When `declared` is given, only those names may appear as variables; any
/// other identifier fails with [`ParseError::UndefinedSymbol`].
///
/// # Errors
/// Returns a [`ParseError`] for grammar violations, arity mismatches, unknown
/// operators, and expressions deeper than the configured maximum depth.
///
/// # Example
/// ```
/// use calculate::{
///     Engine,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let engine = Engine::default();
/// let tokens = tokenize("x * (y + 1)", engine.registry()).unwrap();
/// let tree = parse(tokens, engine.registry(), None).unwrap();
///
/// assert_eq!(tree.variables.into_iter().collect::<Vec<_>>(), [("x".to_string(), 0),
///                                                           ("y".to_string(), 5)]);
/// ```
pub fn parse(tokens: Vec<Token<'_>>,
             registry: &Registry,
             declared: Option<&[String]>)
             -> ParseResult<ParsedTree> {
    let mut parser = Parser { tokens,
                              cursor: 0,
                              registry,
                              declared,
                              variables: BTreeMap::new(),
                              nesting: 0 };

    if parser.peek().kind == TokenKind::End {
        return Err(ParseError::EmptyExpression);
    }

    let root = parser.parse_expression()?;
    parser.expect_end()?;

    Ok(ParsedTree { root:      root.expr,
                    variables: parser.variables, })
}

impl<'src> Parser<'src, '_> {
    /// Parses a full expression, starting at the lowest precedence.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Subtree> {
        self.parse_binary(0)
    }

    /// The configuration of the registry being parsed against.
    pub(crate) const fn config(&self) -> &EngineConfig {
        self.registry.config()
    }

    /// Returns the current token without consuming it.
    pub(crate) fn peek(&self) -> Token<'src> {
        self.tokens[self.cursor]
    }

    /// Returns the token after the current one.
    pub(crate) fn peek_next(&self) -> Token<'src> {
        self.tokens[(self.cursor + 1).min(self.tokens.len() - 1)]
    }

    /// Consumes the current token. The end token is never consumed.
    pub(crate) fn advance(&mut self) {
        if self.tokens[self.cursor].kind != TokenKind::End {
            self.cursor += 1;
        }
    }

    /// Runs `parse` one nesting level deeper, failing once the configured
    /// maximum depth is reached.
    pub(crate) fn nested<T>(&mut self,
                            position: usize,
                            parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                            -> ParseResult<T> {
        let limit = self.config().max_depth;
        if self.nesting >= limit {
            return Err(ParseError::TooComplex { limit, position });
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    /// Fails unless every token has been consumed.
    fn expect_end(&self) -> ParseResult<()> {
        let token = self.peek();
        match token.kind {
            TokenKind::End => Ok(()),
            TokenKind::Separator => {
                Err(ParseError::MisplacedSeparator { position: token.position })
            },
            TokenKind::RightParen => {
                Err(ParseError::UnexpectedToken { token:    token.text.to_string(),
                                                  position: token.position, })
            },
            _ => Err(ParseError::UnexpectedTrailingTokens { token:    token.text.to_string(),
                                                            position: token.position, }),
        }
    }

    /// Builds a prefix node, folding it when its operand is a literal.
    pub(crate) fn unary_node(&self,
                             op: Operator,
                             operand: Subtree,
                             position: usize)
                             -> ParseResult<Subtree> {
        let height = self.check_height(1 + operand.height, position)?;
        if let Some(value) = self.fold(&[&operand.expr], |args| op.apply(args, self.config())) {
            return Ok(Subtree::leaf(Expr::Literal { value, position }));
        }
        Ok(Subtree { expr: Expr::UnaryOp { op,
                                           operand: Box::new(operand.expr),
                                           position },
                     height })
    }

    /// Builds an infix node, folding it when both operands are literals.
    pub(crate) fn binary_node(&self,
                              op: Operator,
                              left: Subtree,
                              right: Subtree,
                              position: usize)
                              -> ParseResult<Subtree> {
        let height = self.check_height(1 + left.height.max(right.height), position)?;
        if let Some(value) =
            self.fold(&[&left.expr, &right.expr], |args| op.apply(args, self.config()))
        {
            return Ok(Subtree::leaf(Expr::Literal { value, position }));
        }
        Ok(Subtree { expr: Expr::BinaryOp { left: Box::new(left.expr),
                                            op,
                                            right: Box::new(right.expr),
                                            position },
                     height })
    }

    /// Builds a call node, folding it when every argument is a literal.
    pub(crate) fn call_node(&self,
                            function: Function,
                            arguments: Vec<Subtree>,
                            position: usize)
                            -> ParseResult<Subtree> {
        let tallest = arguments.iter().map(|a| a.height).max().unwrap_or(0);
        let height = self.check_height(1 + tallest, position)?;
        let arguments: Vec<Expr> = arguments.into_iter().map(|a| a.expr).collect();
        let refs: Vec<&Expr> = arguments.iter().collect();
        if let Some(value) = self.fold(&refs, |args| function.apply(args, self.config())) {
            return Ok(Subtree::leaf(Expr::Literal { value, position }));
        }
        Ok(Subtree { expr: Expr::Call { function,
                                        arguments,
                                        position },
                     height })
    }

    fn check_height(&self, height: usize, position: usize) -> ParseResult<usize> {
        let limit = self.config().max_depth;
        if height > limit {
            return Err(ParseError::TooComplex { limit, position });
        }
        Ok(height)
    }

    /// Evaluates `apply` over literal operands when folding is enabled.
    ///
    /// Returns `None` when folding is off, an operand is not a literal, or the
    /// operation fails; a failing subtree is kept so the error surfaces at
    /// evaluation time.
    fn fold(&self,
            operands: &[&Expr],
            apply: impl FnOnce(&[f64]) -> Result<f64, &'static str>)
            -> Option<f64> {
        if !self.config().optimize {
            return None;
        }
        let values = operands.iter()
                             .map(|e| e.literal_value())
                             .collect::<Option<Vec<f64>>>()?;
        let value = apply(&values).ok()?;
        trace!(?values, value, "folded constant subtree");
        Some(value)
    }
}

/// Validates a list of declared variable names.
///
/// Names must be identifiers, must not collide with a registered constant or
/// function, and must be unique.
///
/// # Errors
/// Returns [`ParseError::BadName`] or [`ParseError::DuplicateName`].
///
/// # Example
/// ```
/// use calculate::{Engine, ParseError, interpreter::parser::core::validate_names};
///
/// let engine = Engine::default();
/// let names = ["x".to_string(), "y2".to_string()];
///
/// assert!(validate_names(&names, engine.registry()).is_ok());
/// assert!(matches!(validate_names(&["2x".to_string()], engine.registry()),
///                  Err(ParseError::BadName { .. })));
/// assert!(matches!(validate_names(&["x".to_string(), "x".to_string()], engine.registry()),
///                  Err(ParseError::DuplicateName { .. })));
/// ```
pub fn validate_names(names: &[String], registry: &Registry) -> ParseResult<()> {
    let mut seen = BTreeSet::new();
    for name in names {
        let bad = |reason| ParseError::BadName { name: name.clone(),
                                                  reason };
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
            Some(_) => return Err(bad("must start with a letter or underscore")),
            None => return Err(bad("must not be empty")),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(bad("must contain only letters, digits and underscores"));
        }
        if registry.constant(name).is_some() {
            return Err(bad("collides with a builtin constant"));
        }
        if registry.function(name).is_some() {
            return Err(bad("collides with a builtin function"));
        }
        if !seen.insert(name.as_str()) {
            return Err(ParseError::DuplicateName { name: name.clone() });
        }
    }
    Ok(())
}
