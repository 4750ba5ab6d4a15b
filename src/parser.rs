//! Recursive-descent parser: turns a token stream into an AST.
//!
//! One token of lookahead throughout. `expect_lexeme`/`expect_kind` advance
//! past the current token when it matches, or fail with a syntax error.

use crate::ast::*;
use crate::error::AxionError;
use crate::token::{Token, TokenKind};

pub fn parse_program(tokens: Vec<Token>) -> Result<Program, AxionError> {
    let mut parser = Parser::new(tokens);
    let mut body = Vec::new();
    while !parser.at_end() {
        body.push(parser.parse_statement()?);
    }
    Ok(Program { body })
}

/// Parses a single expression out of a token stream, used for string
/// interpolation fragments (see `eval.rs`).
pub fn parse_expression(tokens: Vec<Token>) -> Result<Expr, AxionError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_lexeme(&self) -> &str {
        self.current().map(|t| t.lexeme.as_str()).unwrap_or("")
    }

    fn peek_lexeme(&self, offset: usize) -> &str {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.lexeme.as_str())
            .unwrap_or("")
    }

    /// Advances past the current token if its lexeme matches `expected`.
    fn expect_lexeme(&mut self, expected: &str) -> Result<Token, AxionError> {
        match self.current() {
            Some(tok) if tok.lexeme == expected => {
                let tok = tok.clone();
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(AxionError::Syntax(format!(
                "expected '{}', got '{}'",
                expected, tok.lexeme
            ))),
            None => Err(AxionError::Syntax(format!(
                "expected '{}', got end of input",
                expected
            ))),
        }
    }

    /// Advances past the current token if its kind matches `expected`.
    fn expect_kind(&mut self, expected: TokenKind) -> Result<Token, AxionError> {
        match self.current() {
            Some(tok) if tok.kind == expected => {
                let tok = tok.clone();
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(AxionError::Syntax(format!(
                "expected {:?}, got '{}'",
                expected, tok.lexeme
            ))),
            None => Err(AxionError::Syntax(format!(
                "expected {:?}, got end of input",
                expected
            ))),
        }
    }

    // ---- statements ----

    fn parse_statement(&mut self) -> Result<Stmt, AxionError> {
        match self.current_lexeme() {
            "set" => self.parse_var_decl(),
            "const" => self.parse_const_decl(),
            "func" => self.parse_func_decl(),
            "if" => self.parse_if(),
            "loop" => self.parse_loop(),
            "while" => self.parse_while(),
            "repeat" => self.parse_do_while(),
            "match" => self.parse_match(),
            "return" => self.parse_return(),
            "log" | "logln" | "input" => self.parse_io(),
            "break" => self.parse_break(),
            "skip" => self.parse_skip(),
            "include" => self.parse_include(),
            _ => {
                let expr = self.parse_expression()?;
                self.expect_lexeme(";")?;
                Ok(Stmt::Expression(expr))
            }
        }
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, AxionError> {
        self.expect_lexeme("{")?;
        let mut statements = Vec::new();
        while self.current_lexeme() != "}" {
            statements.push(self.parse_statement()?);
        }
        self.expect_lexeme("}")?;
        Ok(statements)
    }

    fn parse_var_decl(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("set")?;
        let name = self.expect_kind(TokenKind::Identifier)?.lexeme;
        let init = if self.current_lexeme() == "=" {
            self.expect_lexeme("=")?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_lexeme(";")?;
        Ok(Stmt::VarDecl { name, init })
    }

    fn parse_const_decl(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("const")?;
        let name = self.expect_kind(TokenKind::Identifier)?.lexeme;
        let init = if self.current_lexeme() == "=" {
            self.expect_lexeme("=")?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_lexeme(";")?;
        Ok(Stmt::ConstDecl { name, init })
    }

    fn parse_func_decl(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("func")?;
        let name = self.expect_kind(TokenKind::Identifier)?.lexeme;
        self.expect_lexeme("(")?;
        let params = self.parse_params()?;
        self.expect_lexeme(")")?;
        let body = self.parse_block()?;
        Ok(Stmt::FuncDecl(FuncDecl { name, params, body }))
    }

    fn parse_params(&mut self) -> Result<Vec<String>, AxionError> {
        let mut params = Vec::new();
        if self.current().map(|t| t.kind) == Some(TokenKind::Identifier) {
            params.push(self.expect_kind(TokenKind::Identifier)?.lexeme);
            while self.current_lexeme() == "," {
                self.expect_lexeme(",")?;
                params.push(self.expect_kind(TokenKind::Identifier)?.lexeme);
            }
        }
        Ok(params)
    }

    fn parse_if(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("if")?;
        self.expect_lexeme("(")?;
        let condition = self.parse_expression()?;
        self.expect_lexeme(")")?;
        self.expect_lexeme("then")?;
        let body = self.parse_body_or_single_stmt()?;

        let mut elseifs = Vec::new();
        while self.current_lexeme() == "else" && self.peek_lexeme(1) == "if" {
            self.expect_lexeme("else")?;
            self.expect_lexeme("if")?;
            self.expect_lexeme("(")?;
            let cond = self.parse_expression()?;
            self.expect_lexeme(")")?;
            self.expect_lexeme("then")?;
            let blk = self.parse_body_or_single_stmt()?;
            elseifs.push(IfArm { condition: cond, body: blk });
        }

        let else_body = if self.current_lexeme() == "else" {
            self.expect_lexeme("else")?;
            Some(self.parse_body_or_single_stmt()?)
        } else {
            None
        };

        Ok(Stmt::If { condition, body, elseifs, else_body })
    }

    fn parse_body_or_single_stmt(&mut self) -> Result<Vec<Stmt>, AxionError> {
        if self.current_lexeme() == "{" {
            self.parse_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    fn parse_loop(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("loop")?;
        self.expect_lexeme("(")?;
        let var = self.expect_kind(TokenKind::Identifier)?.lexeme;
        self.expect_lexeme("from")?;
        let start = self.parse_expression()?;
        self.expect_lexeme("to")?;
        let end = self.parse_expression()?;
        self.expect_lexeme("step")?;
        let step = self.parse_expression()?;
        self.expect_lexeme(")")?;
        let body = self.parse_block()?;
        Ok(Stmt::ForLoop { var, start, end, step, body })
    }

    fn parse_while(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("while")?;
        self.expect_lexeme("(")?;
        let condition = self.parse_expression()?;
        self.expect_lexeme(")")?;
        let body = self.parse_block()?;
        Ok(Stmt::WhileLoop { condition, body })
    }

    fn parse_do_while(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("repeat")?;
        let body = self.parse_block()?;
        self.expect_lexeme("while")?;
        self.expect_lexeme("(")?;
        let condition = self.parse_expression()?;
        self.expect_lexeme(")")?;
        self.expect_lexeme(";")?;
        Ok(Stmt::DoWhileLoop { body, condition })
    }

    fn parse_match(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("match")?;
        self.expect_lexeme("(")?;
        let scrutinee = self.parse_expression()?;
        self.expect_lexeme(")")?;
        self.expect_lexeme("{")?;

        let mut cases = Vec::new();
        let mut else_body = None;
        while self.current_lexeme() != "}" {
            if self.current_lexeme() == "else" {
                self.expect_lexeme("else")?;
                self.expect_lexeme("->")?;
                else_body = Some(Box::new(self.parse_statement()?));
            } else {
                let value = self.parse_expression()?;
                self.expect_lexeme("->")?;
                let body = Box::new(self.parse_statement()?);
                cases.push(MatchCase { value, body });
            }
        }
        self.expect_lexeme("}")?;

        Ok(Stmt::Match { scrutinee, cases, else_body })
    }

    fn parse_return(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("return")?;
        let expr = self.parse_expression()?;
        self.expect_lexeme(";")?;
        Ok(Stmt::Return(expr))
    }

    fn parse_break(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("break")?;
        self.expect_lexeme(";")?;
        Ok(Stmt::Break)
    }

    fn parse_skip(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("skip")?;
        self.expect_lexeme(";")?;
        Ok(Stmt::Skip)
    }

    fn parse_include(&mut self) -> Result<Stmt, AxionError> {
        self.expect_lexeme("include")?;
        let path_tok = self.expect_kind(TokenKind::String)?;
        self.expect_lexeme(";")?;
        Ok(Stmt::Include { path: strip_quotes(&path_tok.lexeme) })
    }

    fn parse_io(&mut self) -> Result<Stmt, AxionError> {
        match self.current_lexeme() {
            "log" => {
                self.expect_lexeme("log")?;
                self.expect_lexeme("(")?;
                let expr = self.parse_expression()?;
                self.expect_lexeme(")")?;
                self.expect_lexeme(";")?;
                Ok(Stmt::Log { expr })
            }
            "logln" => {
                self.expect_lexeme("logln")?;
                self.expect_lexeme("(")?;
                let expr = self.parse_expression()?;
                self.expect_lexeme(")")?;
                self.expect_lexeme(";")?;
                Ok(Stmt::Logln { expr })
            }
            "input" => {
                self.expect_lexeme("input")?;
                self.expect_lexeme("(")?;
                let target = self.parse_expression()?;
                let message = if self.current_lexeme() == "," {
                    self.expect_lexeme(",")?;
                    let tok = self.expect_kind(TokenKind::String)?;
                    Some(Expr::Str(strip_quotes(&tok.lexeme)))
                } else {
                    None
                };
                self.expect_lexeme(")")?;
                self.expect_lexeme(";")?;
                Ok(Stmt::Input { target, message })
            }
            other => Err(AxionError::Syntax(format!(
                "unexpected I/O statement at '{}'",
                other
            ))),
        }
    }

    // ---- expressions (precedence ladder, lowest to highest) ----

    fn parse_expression(&mut self) -> Result<Expr, AxionError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, AxionError> {
        let expr = self.parse_logical()?;
        let op = match self.current_lexeme() {
            "=" => Some(AssignOperator::Assign),
            "+=" => Some(AssignOperator::AddAssign),
            "-=" => Some(AssignOperator::SubAssign),
            "*=" => Some(AssignOperator::MulAssign),
            "/=" => Some(AssignOperator::DivAssign),
            "%=" => Some(AssignOperator::ModAssign),
            _ => None,
        };
        if let Some(op) = op {
            self.pos += 1;
            let value = self.parse_expression()?;
            return Ok(Expr::Assignment {
                target: Box::new(expr),
                op,
                value: Box::new(value),
            });
        }
        Ok(expr)
    }

    fn parse_logical(&mut self) -> Result<Expr, AxionError> {
        let mut expr = self.parse_equality()?;
        loop {
            let op = match self.current_lexeme() {
                "both" => BinaryOperator::Both,
                "any" => BinaryOperator::Any,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_equality()?;
            expr = Expr::BinaryOp { op, left: Box::new(expr), right: Box::new(right) };
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expr, AxionError> {
        let mut expr = self.parse_comparison()?;
        loop {
            let op = match self.current_lexeme() {
                "==" => BinaryOperator::Eq,
                "!=" => BinaryOperator::NotEq,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_comparison()?;
            expr = Expr::BinaryOp { op, left: Box::new(expr), right: Box::new(right) };
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expr, AxionError> {
        // The bitwise tier is reached before the additive/shift tiers, so a
        // `<<`/`>>` token is consumed there and the shift tier below is
        // effectively unreachable. Kept anyway to mirror the grammar's full
        // precedence chain as originally laid out.
        let mut expr = self.parse_bitwise()?;
        loop {
            let op = match self.current_lexeme() {
                "<" => BinaryOperator::Lt,
                "<=" => BinaryOperator::LtEq,
                ">" => BinaryOperator::Gt,
                ">=" => BinaryOperator::GtEq,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_additive()?;
            expr = Expr::BinaryOp { op, left: Box::new(expr), right: Box::new(right) };
        }
        Ok(expr)
    }

    fn parse_bitwise(&mut self) -> Result<Expr, AxionError> {
        let mut expr = self.parse_additive()?;
        loop {
            let op = match self.current_lexeme() {
                "&" => BinaryOperator::BitAnd,
                "|" => BinaryOperator::BitOr,
                "^" => BinaryOperator::BitXor,
                "<<" => BinaryOperator::Shl,
                ">>" => BinaryOperator::Shr,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_additive()?;
            expr = Expr::BinaryOp { op, left: Box::new(expr), right: Box::new(right) };
        }
        Ok(expr)
    }

    fn parse_shift(&mut self) -> Result<Expr, AxionError> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let op = match self.current_lexeme() {
                "<<" => BinaryOperator::Shl,
                ">>" => BinaryOperator::Shr,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            expr = Expr::BinaryOp { op, left: Box::new(expr), right: Box::new(right) };
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<Expr, AxionError> {
        let mut expr = self.parse_shift()?;
        loop {
            let op = match self.current_lexeme() {
                "+" => BinaryOperator::Add,
                "-" => BinaryOperator::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            expr = Expr::BinaryOp { op, left: Box::new(expr), right: Box::new(right) };
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, AxionError> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.current_lexeme() {
                "*" => BinaryOperator::Mul,
                "/" => BinaryOperator::Div,
                "%" => BinaryOperator::Mod,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            expr = Expr::BinaryOp { op, left: Box::new(expr), right: Box::new(right) };
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, AxionError> {
        let op = match self.current_lexeme() {
            "invert" => Some(UnaryOperator::Invert),
            "~" => Some(UnaryOperator::BitNot),
            "-" => Some(UnaryOperator::Neg),
            _ => None,
        };
        if let Some(op) = op {
            self.pos += 1;
            let operand = self.parse_unary()?;
            return Ok(Expr::UnaryOp { op, operand: Box::new(operand) });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, AxionError> {
        let Some(tok) = self.current().cloned() else {
            return Err(AxionError::Syntax("unexpected end of input in expression".into()));
        };

        match tok.kind {
            TokenKind::Number => {
                self.pos += 1;
                Ok(Expr::Number(tok.lexeme))
            }
            TokenKind::String => {
                self.pos += 1;
                Ok(Expr::Str(strip_quotes(&tok.lexeme)))
            }
            TokenKind::Identifier => {
                self.pos += 1;
                let mut node = Expr::Identifier(tok.lexeme);
                loop {
                    match self.current_lexeme() {
                        "[" => {
                            self.expect_lexeme("[")?;
                            let index = self.parse_expression()?;
                            self.expect_lexeme("]")?;
                            node = Expr::Index { target: Box::new(node), index: Box::new(index) };
                        }
                        "." => {
                            self.expect_lexeme(".")?;
                            let prop = self.expect_kind(TokenKind::Identifier)?.lexeme;
                            node = Expr::MemberAccess { object: Box::new(node), property: prop };
                        }
                        "(" => {
                            self.expect_lexeme("(")?;
                            let args = if self.current_lexeme() != ")" {
                                self.parse_elements()?
                            } else {
                                Vec::new()
                            };
                            self.expect_lexeme(")")?;
                            node = Expr::Call { callee: Box::new(node), args };
                        }
                        _ => break,
                    }
                }
                Ok(node)
            }
            _ if tok.lexeme == "(" => {
                self.expect_lexeme("(")?;
                let expr = self.parse_expression()?;
                self.expect_lexeme(")")?;
                Ok(expr)
            }
            _ if tok.lexeme == "[" => self.parse_array(),
            _ => Err(AxionError::Syntax(format!(
                "unexpected token in expression: '{}'",
                tok.lexeme
            ))),
        }
    }

    fn parse_array(&mut self) -> Result<Expr, AxionError> {
        self.expect_lexeme("[")?;
        let elements = if self.current_lexeme() != "]" {
            self.parse_elements()?
        } else {
            Vec::new()
        };
        self.expect_lexeme("]")?;
        Ok(Expr::ArrayLiteral(elements))
    }

    fn parse_elements(&mut self) -> Result<Vec<Expr>, AxionError> {
        let mut elements = vec![self.parse_expression()?];
        while self.current_lexeme() == "," {
            self.expect_lexeme(",")?;
            elements.push(self.parse_expression()?);
        }
        Ok(elements)
    }
}

/// Strips one layer of matching surrounding quotes (the lexer preserves them).
fn strip_quotes(lexeme: &str) -> String {
    let bytes = lexeme.as_bytes();
    if bytes.len() >= 2 && (bytes[0] == b'"' || bytes[0] == b'\'') && bytes[bytes.len() - 1] == bytes[0] {
        lexeme[1..lexeme.len() - 1].to_string()
    } else {
        lexeme.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> Program {
        parse_program(tokenize(source).unwrap()).unwrap()
    }

    #[test]
    fn parses_var_decl_with_initializer() {
        let program = parse("set x = 5;");
        assert!(matches!(program.body[0], Stmt::VarDecl { .. }));
    }

    #[test]
    fn precedence_multiplication_binds_tighter_than_addition() {
        let program = parse("set x = 1 + 2 * 3;");
        let Stmt::VarDecl { init: Some(Expr::BinaryOp { op, left, right }), .. } = &program.body[0] else {
            panic!("expected var decl with binary op init");
        };
        assert_eq!(*op, BinaryOperator::Add);
        assert!(matches!(**left, Expr::Number(_)));
        assert!(matches!(**right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
    }

    #[test]
    fn parses_if_with_elseif_and_else() {
        let program = parse("if (x) then { log(1); } else if (y) then { log(2); } else { log(3); }");
        let Stmt::If { elseifs, else_body, .. } = &program.body[0] else {
            panic!("expected if statement");
        };
        assert_eq!(elseifs.len(), 1);
        assert!(else_body.is_some());
    }

    #[test]
    fn parses_postfix_chain() {
        let program = parse("set x = a[0].b(1, 2);");
        let Stmt::VarDecl { init: Some(expr), .. } = &program.body[0] else {
            panic!("expected var decl");
        };
        assert!(matches!(expr, Expr::Call { .. }));
    }

    #[test]
    fn parses_func_decl() {
        let program = parse("func add(a, b) { return a + b; }");
        let Stmt::FuncDecl(decl) = &program.body[0] else {
            panic!("expected func decl");
        };
        assert_eq!(decl.name, "add");
        assert_eq!(decl.params, vec!["a", "b"]);
    }

    #[test]
    fn parses_loop_statement() {
        let program = parse("loop (i from 1 to 3 step 1) { log(i); }");
        assert!(matches!(program.body[0], Stmt::ForLoop { .. }));
    }

    #[test]
    fn parses_match_statement_with_else() {
        let program = parse("match (x) { 1 -> log(1); else -> log(0); }");
        let Stmt::Match { cases, else_body, .. } = &program.body[0] else {
            panic!("expected match");
        };
        assert_eq!(cases.len(), 1);
        assert!(else_body.is_some());
    }

    #[test]
    fn missing_semicolon_is_syntax_error() {
        assert!(parse_program(tokenize("set x = 1").unwrap()).is_err());
    }

    #[test]
    fn strips_quotes_from_string_literal() {
        let program = parse(r#"set x = "hello";"#);
        let Stmt::VarDecl { init: Some(Expr::Str(s)), .. } = &program.body[0] else {
            panic!("expected string literal");
        };
        assert_eq!(s, "hello");
    }
}
