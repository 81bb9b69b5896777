use super::lexer::{tokenize, Spanned, Token};

use onyx_core::stmt::{Predicate, QueryExpr, TerminalKind, Value, ValueRef};

type ParseResult<T> = Result<T, String>;

/// Parses a resolver expression into a query pipeline.
///
/// The parser only enforces the shape of the chain. Whether the named
/// entities, attributes and resolvers exist is checked afterwards against
/// the schema.
pub(crate) fn parse(src: &str) -> ParseResult<QueryExpr> {
    let mut parser = Parser {
        tokens: tokenize(src)?,
        pos: 0,
    };

    let expr = parser.query()?;
    parser.expect(Token::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn query(&mut self) -> ParseResult<QueryExpr> {
        self.keyword("db")?;
        self.expect(Token::Dot)?;
        self.keyword("from")?;
        self.expect(Token::LParen)?;
        let entity = self.string()?;
        self.expect(Token::RParen)?;

        let mut expr = QueryExpr::from_entity(entity);

        while self.peek() == &Token::Dot {
            self.advance();
            let offset = self.offset();
            let name = self.ident()?;

            expr = match name.as_str() {
                "where" => {
                    if expr.is_terminal() || expr.is_project() {
                        return Err(format!(
                            "`.where(...)` after the pipeline was terminated at offset {offset}"
                        ));
                    }

                    self.expect(Token::LParen)?;
                    let predicate = self.predicate()?;
                    self.expect(Token::RParen)?;
                    expr.filter(predicate)
                }
                "list" | "firstOrNull" => {
                    if expr.is_terminal() || expr.is_project() {
                        return Err(format!(
                            "`.{name}()` on an already terminated pipeline at offset {offset}"
                        ));
                    }

                    self.expect(Token::LParen)?;
                    self.expect(Token::RParen)?;

                    if name == "list" {
                        expr.list()
                    } else {
                        expr.first_or_null()
                    }
                }
                "values" => {
                    match expr.as_terminal() {
                        Some(terminal) if terminal.kind == TerminalKind::List => {}
                        _ => {
                            return Err(format!(
                                "`.values(...)` must directly follow `.list()` at offset {offset}"
                            ))
                        }
                    }

                    self.expect(Token::LParen)?;
                    let field = self.string()?;
                    self.expect(Token::RParen)?;
                    expr.values(field)
                }
                _ => {
                    return Err(format!(
                        "unsupported combinator `.{name}` at offset {offset}"
                    ))
                }
            };
        }

        Ok(expr)
    }

    fn predicate(&mut self) -> ParseResult<Predicate> {
        let offset = self.offset();
        let name = self.ident()?;

        let ctor: fn(String, ValueRef) -> Predicate = match name.as_str() {
            "eq" => Predicate::eq,
            "inOp" => Predicate::in_op,
            _ => {
                return Err(format!(
                    "unsupported predicate `{name}` at offset {offset}"
                ))
            }
        };

        self.expect(Token::LParen)?;
        let field = self.string()?;
        self.expect(Token::Comma)?;
        let operand = self.operand()?;
        self.expect(Token::RParen)?;

        Ok(ctor(field, operand))
    }

    fn operand(&mut self) -> ParseResult<ValueRef> {
        match self.peek() {
            Token::Ident(ident) if ident == "this" => {
                self.advance();
                self.expect(Token::Dot)?;
                Ok(ValueRef::this(self.ident()?))
            }
            Token::Ident(ident) if ident == "db" => Ok(ValueRef::Query(Box::new(self.query()?))),
            _ => Ok(ValueRef::Literal(self.literal()?)),
        }
    }

    fn literal(&mut self) -> ParseResult<Value> {
        let offset = self.offset();

        let value = match self.advance() {
            Token::Str(value) => Value::String(value),
            Token::Int(value) => Value::I64(value),
            Token::Float(value) => Value::F64(value),
            Token::Ident(ident) if ident == "true" => Value::Bool(true),
            Token::Ident(ident) if ident == "false" => Value::Bool(false),
            Token::Ident(ident) if ident == "null" => Value::Null,
            Token::LBracket => {
                let mut items = vec![];

                if self.peek() != &Token::RBracket {
                    loop {
                        items.push(self.literal()?);

                        if self.peek() == &Token::Comma {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }

                self.expect(Token::RBracket)?;
                Value::List(items)
            }
            token => return Err(format!("expected a value, found {token} at offset {offset}")),
        };

        Ok(value)
    }

    fn keyword(&mut self, keyword: &str) -> ParseResult<()> {
        let offset = self.offset();

        match self.advance() {
            Token::Ident(ident) if ident == keyword => Ok(()),
            token => Err(format!(
                "expected `{keyword}`, found {token} at offset {offset}"
            )),
        }
    }

    fn ident(&mut self) -> ParseResult<String> {
        let offset = self.offset();

        match self.advance() {
            Token::Ident(ident) => Ok(ident),
            token => Err(format!(
                "expected an identifier, found {token} at offset {offset}"
            )),
        }
    }

    fn string(&mut self) -> ParseResult<String> {
        let offset = self.offset();

        match self.advance() {
            Token::Str(value) => Ok(value),
            token => Err(format!("expected a string, found {token} at offset {offset}")),
        }
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let offset = self.offset();
        let token = self.advance();

        if token == expected {
            Ok(())
        } else {
            Err(format!("expected {expected}, found {token} at offset {offset}"))
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].token
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)].offset
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }
}
