use crate::{
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser, Subtree},
        registry::Function,
    },
};

impl Parser<'_, '_> {
    /// Parses the parenthesized argument list of a call and checks its arity.
    ///
    /// The current token must be the `(` following the function name.
    /// Arguments are separated by `,`; `()` is an empty list.
    ///
    /// Grammar (simplified): `arguments := "(" (expression ("," expression)*)? ")"`
    ///
    /// # Errors
    /// Returns a `ParseError` if:
    /// - an argument fails to parse,
    /// - an unexpected token appears between arguments,
    /// - the input ends before the closing `)`,
    /// - the argument count differs from the function's arity.
    pub(crate) fn parse_call(&mut self,
                             function: Function,
                             position: usize)
                             -> ParseResult<Subtree> {
        let open = self.peek();
        self.advance();

        let arguments = self.nested(position, |p| p.parse_comma_separated(open.position))?;

        if arguments.len() != function.arity {
            return Err(ParseError::ArgumentCountMismatch { name: function.name.to_string(),
                                                           expected: function.arity,
                                                           found: arguments.len(),
                                                           position });
        }

        self.call_node(function, arguments, position)
    }

    /// Parses `item ("," item)* ")"` or an immediate `)`.
    fn parse_comma_separated(&mut self, opened_at: usize) -> ParseResult<Vec<Subtree>> {
        let mut items = Vec::new();
        if self.peek().kind == TokenKind::RightParen {
            self.advance();
            return Ok(items);
        }

        loop {
            items.push(self.parse_expression()?);
            let token = self.peek();
            match token.kind {
                TokenKind::Separator => self.advance(),
                TokenKind::RightParen => {
                    self.advance();
                    break;
                },
                TokenKind::End => {
                    return Err(ParseError::ExpectedClosingParen { position: token.position,
                                                                  opened_at });
                },
                _ => {
                    return Err(ParseError::UnexpectedToken { token:    token.text.to_string(),
                                                             position: token.position, });
                },
            }
        }
        Ok(items)
    }
}
