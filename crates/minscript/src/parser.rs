//! Recursive-descent parser over the scanner's token array.
//!
//! The grammar is a standard precedence cascade (assignment at the bottom,
//! calls and primaries at the top). The cursor never moves backward, and
//! semicolons are always optional. Malformed input never aborts the run: a
//! construct that cannot be completed is abandoned at the next logical
//! boundary and the parser returns what it has. The only hard failures are
//! arena exhaustion and the parse-time table bounds (parameters, arguments,
//! statements per block).

use crate::arena::{Arena, NodeId, StrId};
use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::limits::{Limits, ResourceError, RunResult};
use crate::token::{Token, TokenKind};

/// Parses `tokens` into an AST rooted at a `Program` node.
pub fn parse(tokens: &[Token], arena: &mut Arena, limits: &Limits) -> RunResult<NodeId> {
    if tokens.is_empty() {
        return arena.alloc_node(Node::Program(Vec::new()));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        arena,
        limits,
    };

    let mut statements = Vec::new();
    while parser.current().kind != TokenKind::Eof {
        let before = parser.pos;
        if let Some(stmt) = parser.statement()? {
            if statements.len() == limits.max_block_statements {
                return Err(ResourceError::Statements(limits.max_block_statements));
            }
            statements.push(stmt);
        } else if parser.pos == before {
            // A statement position that consumed nothing cannot make
            // progress; drop one token.
            if parser.at_end() {
                break;
            }
            parser.advance();
        }
    }

    parser.arena.alloc_node(Node::Program(statements))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    arena: &'a mut Arena,
    limits: &'a Limits,
}

/// A parse outcome: `Ok(None)` means the construct was abandoned without a
/// diagnostic, hard failures are resource errors only.
type ParseResult = RunResult<Option<NodeId>>;

impl Parser<'_> {
    /// Current token; past-the-end positions resolve to the final token.
    fn current(&self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => *token,
            None => self.tokens[self.tokens.len() - 1],
        }
    }

    /// Advances the cursor, clamping at the final token.
    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos + 1 >= self.tokens.len()
    }

    /// Consumes the current token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn statement(&mut self) -> ParseResult {
        match self.current().kind {
            TokenKind::Var => self.var_declaration(),
            TokenKind::Function => self.function_declaration(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::LBrace => self.block(),
            _ => {
                let expr = self.expression()?;
                self.eat(TokenKind::Semicolon);
                Ok(expr)
            }
        }
    }

    fn block(&mut self) -> ParseResult {
        if !self.eat(TokenKind::LBrace) {
            return Ok(None);
        }

        let mut statements = Vec::new();
        while !matches!(self.current().kind, TokenKind::RBrace | TokenKind::Eof) {
            let before = self.pos;
            if let Some(stmt) = self.statement()? {
                if statements.len() == self.limits.max_block_statements {
                    return Err(ResourceError::Statements(self.limits.max_block_statements));
                }
                statements.push(stmt);
            } else if self.pos == before {
                if self.at_end() {
                    break;
                }
                self.advance();
            }
        }
        self.eat(TokenKind::RBrace);

        Ok(Some(self.arena.alloc_node(Node::Block(statements))?))
    }

    fn var_declaration(&mut self) -> ParseResult {
        self.advance(); // var
        let Some(name) = self.identifier_text() else {
            return Ok(None);
        };
        self.advance();

        let init = if self.eat(TokenKind::Assign) {
            self.expression()?
        } else {
            None
        };
        self.eat(TokenKind::Semicolon);

        Ok(Some(self.arena.alloc_node(Node::VarDecl { name, init })?))
    }

    fn function_declaration(&mut self) -> ParseResult {
        self.advance(); // function
        let Some(name) = self.identifier_text() else {
            return Ok(None);
        };
        self.advance();

        if !self.eat(TokenKind::LParen) {
            return Ok(None);
        }

        let mut params = Vec::new();
        while !matches!(self.current().kind, TokenKind::RParen | TokenKind::Eof) {
            let Some(param) = self.identifier_text() else {
                break;
            };
            if params.len() == self.limits.max_params {
                return Err(ResourceError::Params(self.limits.max_params));
            }
            params.push(param);
            self.advance();
            if self.current().kind == TokenKind::Comma {
                self.advance();
            }
        }
        self.eat(TokenKind::RParen);

        let Some(body) = self.block()? else {
            return Ok(None);
        };
        Ok(Some(self.arena.alloc_node(Node::FuncDecl { name, params, body })?))
    }

    fn if_statement(&mut self) -> ParseResult {
        self.advance(); // if
        if !self.eat(TokenKind::LParen) {
            return Ok(None);
        }
        let Some(condition) = self.expression()? else {
            return Ok(None);
        };
        if !self.eat(TokenKind::RParen) {
            return Ok(None);
        }

        let Some(then_branch) = self.statement()? else {
            return Ok(None);
        };
        let else_branch = if self.current().kind == TokenKind::Else {
            self.advance();
            self.statement()?
        } else {
            None
        };

        Ok(Some(self.arena.alloc_node(Node::If {
            condition,
            then_branch,
            else_branch,
        })?))
    }

    fn while_statement(&mut self) -> ParseResult {
        self.advance(); // while
        if !self.eat(TokenKind::LParen) {
            return Ok(None);
        }
        let Some(condition) = self.expression()? else {
            return Ok(None);
        };
        if !self.eat(TokenKind::RParen) {
            return Ok(None);
        }

        let Some(body) = self.statement()? else {
            return Ok(None);
        };
        Ok(Some(self.arena.alloc_node(Node::While { condition, body })?))
    }

    fn return_statement(&mut self) -> ParseResult {
        self.advance(); // return
        let value = if self.current().kind == TokenKind::Semicolon {
            None
        } else {
            self.expression()?
        };
        self.eat(TokenKind::Semicolon);

        Ok(Some(self.arena.alloc_node(Node::Return(value))?))
    }

    fn expression(&mut self) -> ParseResult {
        self.assignment()
    }

    /// `assignment := logical_or ('=' assignment)?` - right-associative. A
    /// dangling `=` keeps the left-hand side.
    fn assignment(&mut self) -> ParseResult {
        let Some(target) = self.logical_or()? else {
            return Ok(None);
        };

        if self.current().kind == TokenKind::Assign {
            self.advance();
            if let Some(value) = self.assignment()? {
                return Ok(Some(self.arena.alloc_node(Node::Assign { target, value })?));
            }
        }
        Ok(Some(target))
    }

    fn logical_or(&mut self) -> ParseResult {
        let Some(mut expr) = self.logical_and()? else {
            return Ok(None);
        };
        while self.current().kind == TokenKind::OrOr {
            self.advance();
            let Some(right) = self.logical_and()? else {
                break;
            };
            expr = self.arena.alloc_node(Node::Binary {
                op: BinaryOp::Or,
                left: expr,
                right,
            })?;
        }
        Ok(Some(expr))
    }

    fn logical_and(&mut self) -> ParseResult {
        let Some(mut expr) = self.equality()? else {
            return Ok(None);
        };
        while self.current().kind == TokenKind::AndAnd {
            self.advance();
            let Some(right) = self.equality()? else {
                break;
            };
            expr = self.arena.alloc_node(Node::Binary {
                op: BinaryOp::And,
                left: expr,
                right,
            })?;
        }
        Ok(Some(expr))
    }

    fn equality(&mut self) -> ParseResult {
        let Some(mut expr) = self.relational()? else {
            return Ok(None);
        };
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                _ => break,
            };
            self.advance();
            let Some(right) = self.relational()? else {
                break;
            };
            expr = self.arena.alloc_node(Node::Binary { op, left: expr, right })?;
        }
        Ok(Some(expr))
    }

    fn relational(&mut self) -> ParseResult {
        let Some(mut expr) = self.additive()? else {
            return Ok(None);
        };
        loop {
            let op = match self.current().kind {
                TokenKind::Less => BinaryOp::Lt,
                TokenKind::Greater => BinaryOp::Gt,
                TokenKind::LessEq => BinaryOp::Le,
                TokenKind::GreaterEq => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            let Some(right) = self.additive()? else {
                break;
            };
            expr = self.arena.alloc_node(Node::Binary { op, left: expr, right })?;
        }
        Ok(Some(expr))
    }

    fn additive(&mut self) -> ParseResult {
        let Some(mut expr) = self.multiplicative()? else {
            return Ok(None);
        };
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let Some(right) = self.multiplicative()? else {
                break;
            };
            expr = self.arena.alloc_node(Node::Binary { op, left: expr, right })?;
        }
        Ok(Some(expr))
    }

    fn multiplicative(&mut self) -> ParseResult {
        let Some(mut expr) = self.unary()? else {
            return Ok(None);
        };
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let Some(right) = self.unary()? else {
                break;
            };
            expr = self.arena.alloc_node(Node::Binary { op, left: expr, right })?;
        }
        Ok(Some(expr))
    }

    fn unary(&mut self) -> ParseResult {
        let op = match self.current().kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let Some(operand) = self.unary()? else {
                return Ok(None);
            };
            return Ok(Some(self.arena.alloc_node(Node::Unary { op, operand })?));
        }
        self.call()
    }

    /// `call := primary ('(' arg_list? ')')*` - calls chain on the result of
    /// the previous call.
    fn call(&mut self) -> ParseResult {
        let Some(mut expr) = self.primary()? else {
            return Ok(None);
        };

        while self.current().kind == TokenKind::LParen {
            self.advance();
            let mut args = Vec::new();
            while !matches!(self.current().kind, TokenKind::RParen | TokenKind::Eof) {
                let before = self.pos;
                match self.expression()? {
                    Some(arg) => {
                        if args.len() == self.limits.max_args {
                            return Err(ResourceError::Args(self.limits.max_args));
                        }
                        args.push(arg);
                    }
                    None if self.pos == before => break,
                    None => {}
                }
                if self.current().kind == TokenKind::Comma {
                    self.advance();
                }
            }
            self.eat(TokenKind::RParen);
            expr = self.arena.alloc_node(Node::Call { callee: expr, args })?;
        }

        Ok(Some(expr))
    }

    fn primary(&mut self) -> ParseResult {
        let token = self.current();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                let node = Node::Number(token.number.unwrap_or(0.0));
                Ok(Some(self.arena.alloc_node(node)?))
            }
            TokenKind::Str => match token.text {
                Some(text) => {
                    self.advance();
                    Ok(Some(self.arena.alloc_node(Node::Str(text))?))
                }
                None => Ok(None),
            },
            TokenKind::Identifier => match token.text {
                Some(text) => {
                    self.advance();
                    Ok(Some(self.arena.alloc_node(Node::Identifier(text))?))
                }
                None => Ok(None),
            },
            TokenKind::LParen => {
                self.advance();
                let expr = self.expression()?;
                self.eat(TokenKind::RParen);
                Ok(expr)
            }
            _ => Ok(None),
        }
    }

    /// Text of the current token if it is an identifier; does not advance.
    fn identifier_text(&self) -> Option<StrId> {
        let token = self.current();
        if token.kind == TokenKind::Identifier {
            token.text
        } else {
            None
        }
    }
}
