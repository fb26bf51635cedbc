//! Grammar productions.
//!
//! One method per production, top-down. Statement-level productions return
//! `Option<Stmt>`: a failed declaration is reported, synchronized past, and
//! dropped, so the parser always consumes the whole stream and reports every
//! recoverable error in one pass.

use std::rc::Rc;

use tracing::debug;

use rill_diagnostic::DiagnosticQueue;
use rill_ir::{Expr, FunctionDecl, Literal, Stmt, Token, TokenKind};

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::recovery::synchronize;

/// Parse a token stream into statements, reporting errors to `queue`.
///
/// Always returns the statements that parsed cleanly; callers must check
/// `queue.has_errors()` before treating the result as a complete program.
pub fn parse(tokens: &[Token], queue: &mut DiagnosticQueue) -> Vec<Stmt> {
    let mut parser = Parser::new(tokens, queue);
    let statements = parser.program();
    debug!(
        statements = statements.len(),
        errors = parser.queue.error_count(),
        "parse finished"
    );
    statements
}

/// Recursive-descent parser over a [`Cursor`].
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    queue: &'a mut DiagnosticQueue,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], queue: &'a mut DiagnosticQueue) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            queue,
        }
    }

    /// program -> declaration* EOF
    pub fn program(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    /// declaration -> fun_declaration | var_declaration | statement
    ///
    /// The error boundary: any parse error below here is reported and
    /// recovered from by synchronizing to the next statement.
    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.cursor.eat(TokenKind::Fun) {
            self.fun_declaration()
        } else if self.cursor.eat(TokenKind::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.queue.emit(err.to_diagnostic());
                synchronize(&mut self.cursor);
                None
            }
        }
    }

    /// fun_declaration -> "fun" IDENT "(" parameters? ")" block
    fn fun_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.cursor.expect(TokenKind::Ident, "Expect function name.")?;
        self.cursor
            .expect(TokenKind::LParen, "Expect '(' after function name.")?;

        let mut params = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                params.push(self.cursor.expect(TokenKind::Ident, "Expect parameter name.")?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor
            .expect(TokenKind::RParen, "Expect ')' after parameters.")?;

        self.cursor
            .expect(TokenKind::LBrace, "Expect '{' before function body.")?;
        let body = self.block_statements()?;

        Ok(Stmt::Function(Rc::new(FunctionDecl { name, params, body })))
    }

    /// var_declaration -> "var" IDENT ( "=" expression )? ";"
    fn var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.cursor.expect(TokenKind::Ident, "Expect variable name.")?;

        let initializer = if self.cursor.eat(TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };

        self.cursor
            .expect(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    /// statement -> print | block | if | while | for | return | expression
    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.cursor.eat(TokenKind::Print) {
            return self.print_statement();
        }
        if self.cursor.eat(TokenKind::LBrace) {
            return Ok(Stmt::Block(self.block_statements()?));
        }
        if self.cursor.eat(TokenKind::If) {
            return self.if_statement();
        }
        if self.cursor.eat(TokenKind::While) {
            return self.while_statement();
        }
        if self.cursor.eat(TokenKind::For) {
            return self.for_statement();
        }
        if self.cursor.eat(TokenKind::Return) {
            return self.return_statement();
        }
        self.expression_statement()
    }

    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = self.expression()?;
        self.cursor
            .expect(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    /// Statements up to the closing `}`. The opening `{` is already consumed.
    fn block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        self.cursor.expect(TokenKind::RBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.expect(TokenKind::LParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.cursor
            .expect(TokenKind::RParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        // Dangling else binds to the nearest `if`.
        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.cursor
            .expect(TokenKind::LParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.cursor
            .expect(TokenKind::RParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    /// for_statement -> "for" "(" (var_decl | expr_stmt | ";")
    ///                   expression? ";" expression? ")" statement
    ///
    /// Desugars to a block: `{ init; while (cond) { body; incr; } }`. There
    /// is no `For` statement node; the evaluator only ever sees `While`.
    fn for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.expect(TokenKind::LParen, "Expect '(' after 'for'.")?;

        let initializer = if self.cursor.eat(TokenKind::Semicolon) {
            None
        } else if self.cursor.eat(TokenKind::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.cursor.check(TokenKind::Semicolon) {
            // An omitted condition loops forever.
            Expr::Literal(Literal::Bool(true))
        } else {
            self.expression()?
        };
        self.cursor
            .expect(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.cursor.check(TokenKind::RParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .expect(TokenKind::RParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };
        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.cursor.previous().clone();
        let value = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .expect(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.cursor
            .expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    /// expression -> assignment
    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.assignment()
    }

    /// assignment -> IDENT "=" assignment | logic_or
    ///
    /// Parses the left side as an expression first, then checks whether it
    /// is a valid assignment target. An invalid target is reported but not
    /// fatal: the right side has already been consumed, so no
    /// synchronization is needed.
    fn assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.or()?;

        if self.cursor.eat(TokenKind::Eq) {
            let equals = self.cursor.previous().clone();
            let value = self.assignment()?;

            if let Expr::Variable { name } = expr {
                return Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                });
            }

            self.queue
                .emit(ParseError::at(&equals, "Invalid assignment target.").to_diagnostic());
        }

        Ok(expr)
    }

    /// logic_or -> logic_and ( "or" logic_and )*
    fn or(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.and()?;
        while self.cursor.eat(TokenKind::Or) {
            let operator = self.cursor.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    /// logic_and -> equality ( "and" equality )*
    fn and(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.equality()?;
        while self.cursor.eat(TokenKind::And) {
            let operator = self.cursor.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    /// equality -> comparison ( ( "!=" | "==" ) comparison )*
    fn equality(&mut self) -> Result<Expr, ParseError> {
        self.binary_left(&[TokenKind::NotEq, TokenKind::EqEq], Self::comparison)
    }

    /// comparison -> term ( ( ">" | ">=" | "<" | "<=" ) term )*
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        self.binary_left(
            &[TokenKind::Gt, TokenKind::GtEq, TokenKind::Lt, TokenKind::LtEq],
            Self::term,
        )
    }

    /// term -> factor ( ( "-" | "+" ) factor )*
    fn term(&mut self) -> Result<Expr, ParseError> {
        self.binary_left(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    /// factor -> unary ( ( "/" | "*" ) unary )*
    fn factor(&mut self) -> Result<Expr, ParseError> {
        self.binary_left(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// Left-associative binary fold shared by the four binary tiers.
    fn binary_left(
        &mut self,
        operators: &[TokenKind],
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut expr = next(self)?;
        while self.cursor.eat_any(operators) {
            let operator = self.cursor.previous().clone();
            let right = next(self)?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    /// unary -> ( "!" | "-" ) unary | call
    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.eat_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.cursor.previous().clone();
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                operand: Box::new(operand),
            });
        }
        self.call()
    }

    /// call -> primary ( "(" arguments? ")" )*
    ///
    /// Iterative so chained calls `f()()` nest left to right.
    fn call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        while self.cursor.eat(TokenKind::LParen) {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let mut arguments = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let paren = self
            .cursor
            .expect(TokenKind::RParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    /// primary -> literal | IDENT | "(" expression ")"
    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.eat(TokenKind::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if self.cursor.eat(TokenKind::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if self.cursor.eat(TokenKind::Nil) {
            return Ok(Expr::Literal(Literal::Nil));
        }
        if self.cursor.eat(TokenKind::Number) {
            let token = self.cursor.previous();
            let value = token.number().unwrap_or(0.0);
            return Ok(Expr::Literal(Literal::Number(value)));
        }
        if self.cursor.eat(TokenKind::Str) {
            let token = self.cursor.previous();
            let value = token.string().unwrap_or_default().to_owned();
            return Ok(Expr::Literal(Literal::Str(value)));
        }
        if self.cursor.eat(TokenKind::Ident) {
            return Ok(Expr::Variable {
                name: self.cursor.previous().clone(),
            });
        }
        if self.cursor.eat(TokenKind::LParen) {
            let expr = self.expression()?;
            self.cursor
                .expect(TokenKind::RParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(ParseError::at(self.cursor.current(), "Expect expression."))
    }
}
