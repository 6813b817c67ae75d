use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser, Subtree},
        registry::OperatorArity,
    },
};

impl Parser<'_, '_> {
    /// Parses a prefix operation or a primary expression.
    ///
    /// A prefix operator parses its operand at its own precedence. Every
    /// builtin prefix operator binds tighter than any infix operator, so `-2^2`
    /// is `(-2)^2`, and prefix chains such as `--x` nest to the right.
    ///
    /// Grammar:
    /// ```text
    ///     unary := operator unary
    ///            | primary
    /// ```
    pub(crate) fn parse_unary(&mut self) -> ParseResult<Subtree> {
        let token = self.peek();
        if token.kind != TokenKind::Operator {
            return self.parse_primary();
        }

        let Some(op) = self.registry.operator(token.text, OperatorArity::Unary).copied() else {
            return Err(ParseError::UnknownOperator { symbol:   token.text.to_string(),
                                                     arity:    OperatorArity::Unary,
                                                     position: token.position, });
        };
        self.advance();

        let operand = self.nested(token.position, |p| p.parse_binary(op.precedence))?;
        self.unary_node(op, operand, token.position)
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Grammar (simplified):
    /// ```text
    ///     primary := number
    ///              | constant
    ///              | function "(" arguments ")"
    ///              | variable
    ///              | "(" expression ")"
    /// ```
    ///
    /// # Errors
    /// - `UnexpectedEndOfInput` when the input stops where an operand is
    ///   expected.
    /// - `UnexpectedToken` for a stray `)`.
    /// - `MisplacedSeparator` for a `,` where an operand is expected.
    pub(crate) fn parse_primary(&mut self) -> ParseResult<Subtree> {
        let token = self.peek();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                parse_number(token)
            },
            TokenKind::Identifier => self.parse_identifier(token),
            TokenKind::LeftParen => self.parse_grouping(token),
            TokenKind::Separator => {
                Err(ParseError::MisplacedSeparator { position: token.position })
            },
            TokenKind::End => {
                Err(ParseError::UnexpectedEndOfInput { position: token.position })
            },
            TokenKind::RightParen | TokenKind::Operator => {
                Err(ParseError::UnexpectedToken { token:    token.text.to_string(),
                                                  position: token.position, })
            },
        }
    }

    /// Resolves an identifier.
    ///
    /// Resolution order: a known constant becomes a literal; a known function
    /// followed by `(` becomes a call; anything else is a free variable. A name
    /// that is not a function but is followed by `(` is rejected.
    fn parse_identifier(&mut self, token: Token<'_>) -> ParseResult<Subtree> {
        let name = token.text;
        let called = self.peek_next().kind == TokenKind::LeftParen;

        if let Some(constant) = self.registry.constant(name) {
            self.advance();
            return Ok(Subtree::leaf(Expr::Literal { value:    constant.value,
                                                    position: token.position, }));
        }

        if called {
            let Some(function) = self.registry.function(name).copied() else {
                return Err(ParseError::UnknownFunction { name:     name.to_string(),
                                                         position: token.position, });
            };
            self.advance();
            return self.parse_call(function, token.position);
        }

        if let Some(declared) = self.declared
           && !declared.iter().any(|d| d == name)
        {
            return Err(ParseError::UndefinedSymbol { name:     name.to_string(),
                                                     position: token.position, });
        }

        self.advance();
        self.variables
            .entry(name.to_string())
            .or_insert(token.position);
        Ok(Subtree::leaf(Expr::Variable { name:     name.to_string(),
                                          position: token.position, }))
    }

    /// Parses a parenthesized expression; precedence restarts inside.
    fn parse_grouping(&mut self, open: Token<'_>) -> ParseResult<Subtree> {
        self.advance();
        let inner = self.nested(open.position, |p| p.parse_expression())?;

        let close = self.peek();
        match close.kind {
            TokenKind::RightParen => {
                self.advance();
                Ok(inner)
            },
            TokenKind::End => Err(ParseError::ExpectedClosingParen { position:  close.position,
                                                                     opened_at: open.position, }),
            TokenKind::Separator => {
                Err(ParseError::MisplacedSeparator { position: close.position })
            },
            _ => Err(ParseError::UnexpectedToken { token:    close.text.to_string(),
                                                   position: close.position, }),
        }
    }
}

/// Converts a number token into a literal.
fn parse_number(token: Token<'_>) -> ParseResult<Subtree> {
    let value = token.text
                     .parse::<f64>()
                     .map_err(|_| ParseError::InvalidNumber { literal:  token.text.to_string(),
                                                              position: token.position, })?;
    Ok(Subtree::leaf(Expr::Literal { value,
                                     position: token.position }))
}
