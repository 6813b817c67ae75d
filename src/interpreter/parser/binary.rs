use crate::{
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser, Subtree},
        registry::{Associativity, Operator, OperatorArity},
    },
};

impl Parser<'_, '_> {
    /// Parses infix operations whose precedence is at least `min_precedence`.
    ///
    /// Precedence climbing: an operator of precedence `p` parses its right
    /// operand at `p + 1` when left-associative and at `p` when
    /// right-associative, so `a - b - c` groups as `(a - b) - c` and
    /// `a ^ b ^ c` as `a ^ (b ^ c)`.
    ///
    /// The rule is: `binary := unary (operator binary)*`
    ///
    /// # Parameters
    /// - `min_precedence`: Operators binding more loosely end the loop.
    ///
    /// # Returns
    /// The operand tree, possibly folded into a literal.
    pub(crate) fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<Subtree> {
        let mut left = self.parse_unary()?;

        loop {
            let token = self.peek();
            if token.kind != TokenKind::Operator {
                break;
            }

            let op = self.infix_operator(token.text, token.position)?;
            if op.precedence < min_precedence {
                break;
            }
            self.advance();

            let next_min = match op.associativity {
                Associativity::Left => op.precedence.saturating_add(1),
                Associativity::Right => op.precedence,
            };
            let right = self.nested(token.position, |p| p.parse_binary(next_min))?;
            left = self.binary_node(op, left, right, token.position)?;
        }

        Ok(left)
    }

    /// Resolves an operator symbol found after an operand.
    fn infix_operator(&self, symbol: &str, position: usize) -> ParseResult<Operator> {
        self.registry
            .operator(symbol, OperatorArity::Binary)
            .copied()
            .ok_or_else(|| ParseError::UnknownOperator { symbol: symbol.to_string(),
                                                          arity: OperatorArity::Binary,
                                                          position })
    }
}
