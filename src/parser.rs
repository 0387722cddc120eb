use crate::command::{ColumnSpec, Command, Predicate};
use crate::error::{DbError, Result};
use crate::tokenizer::{Token, Tokenizer};
use crate::value::Value;

/// Tokenizes and parses one command line.
///
/// This is the whole front door of the engine: raw text in, typed [Command]
/// out. Parsing validates surface syntax only and never touches the session.
pub fn parse(input: &str) -> Result<Command> {
    let tokens = Tokenizer::new(input).tokenize()?;
    Parser::new(tokens).parse()
}

/// A recursive-descent parser over a token vector.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses exactly one command and requires the input to end there.
    pub fn parse(&mut self) -> Result<Command> {
        let command = match self.current_token() {
            Token::CreateTable => self.parse_create_table(),
            Token::ListTables => {
                self.advance();
                Ok(Command::ListTables)
            }
            Token::DropTable => self.parse_drop_table(),
            Token::Insert => self.parse_insert(),
            Token::Select => self.parse_select(),
            Token::Update => self.parse_update(),
            Token::Delete => self.parse_delete(),
            Token::Help => {
                self.advance();
                Ok(Command::Help)
            }
            Token::Exit | Token::Quit => {
                self.advance();
                Ok(Command::Exit)
            }
            Token::Eof => Err(DbError::Syntax("empty command".into())),
            other => Err(DbError::Syntax(format!(
                "unknown command starting with {:?}",
                other
            ))),
        }?;

        // The whole line must be one command
        if !self.is_at_end() {
            return Err(DbError::Syntax(format!(
                "unexpected token after command: {:?}",
                self.current_token()
            )));
        }

        Ok(command)
    }

    // --- Helpers ---

    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    fn consume(&mut self, expected: Token) -> Result<()> {
        if *self.current_token() == expected {
            self.advance();
            Ok(())
        } else {
            Err(DbError::Syntax(format!(
                "expected {:?}, found {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    fn consume_ident(&mut self) -> Result<String> {
        match self.current_token() {
            Token::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(DbError::Syntax(format!(
                "expected identifier, found {:?}",
                other
            ))),
        }
    }

    /// Consumes one literal value.
    ///
    /// A bare identifier in value position is taken as a string literal, so
    /// `values (Ann, 30)` means the same as `values ('Ann', 30)`.
    fn consume_value(&mut self) -> Result<Value> {
        let value = match self.current_token() {
            Token::Int(i) => Value::Int(*i),
            Token::Bool(b) => Value::Bool(*b),
            Token::Str(s) => Value::Str(s.as_str().into()),
            Token::Ident(s) => Value::Str(s.as_str().into()),
            other => {
                return Err(DbError::Syntax(format!(
                    "expected a value, found {:?}",
                    other
                )));
            }
        };
        self.advance();
        Ok(value)
    }

    /// Parses `where <column> = <value>`.
    fn parse_predicate(&mut self) -> Result<Predicate> {
        self.consume(Token::Where)?;
        let column = self.consume_ident()?;
        self.consume(Token::Equal)?;
        let value = self.consume_value()?;
        Ok(Predicate { column, value })
    }

    // --- Command shapes ---

    /// `create_table <table> <col:type> [<col:type> ...]`
    fn parse_create_table(&mut self) -> Result<Command> {
        self.consume(Token::CreateTable)?;
        let name = self.consume_ident()?;

        let mut columns = vec![self.parse_column_spec()?];
        while !self.is_at_end() {
            columns.push(self.parse_column_spec()?);
        }

        Ok(Command::CreateTable { name, columns })
    }

    /// One `name:type` pair. The type stays a raw token; the catalog decides
    /// whether it is a supported type.
    fn parse_column_spec(&mut self) -> Result<ColumnSpec> {
        let name = self.consume_ident()?;
        self.consume(Token::Colon)?;
        let type_name = self.consume_ident()?;
        Ok(ColumnSpec { name, type_name })
    }

    /// `drop_table <table>`
    fn parse_drop_table(&mut self) -> Result<Command> {
        self.consume(Token::DropTable)?;
        let name = self.consume_ident()?;
        Ok(Command::DropTable { name })
    }

    /// `insert into <table> values (<v1>, <v2>, ...)`
    fn parse_insert(&mut self) -> Result<Command> {
        self.consume(Token::Insert)?;
        self.consume(Token::Into)?;
        let table = self.consume_ident()?;
        self.consume(Token::Values)?;
        self.consume(Token::LeftParen)?;

        let mut values = vec![self.consume_value()?];
        loop {
            match self.current_token() {
                Token::RightParen => {
                    self.advance();
                    break;
                }
                Token::Comma => {
                    self.advance();
                    values.push(self.consume_value()?);
                }
                other => {
                    return Err(DbError::Syntax(format!(
                        "expected ',' or ')', found {:?}",
                        other
                    )));
                }
            }
        }

        Ok(Command::Insert { table, values })
    }

    /// `select from <table> [where <col> = <value>]`
    fn parse_select(&mut self) -> Result<Command> {
        self.consume(Token::Select)?;
        self.consume(Token::From)?;
        let table = self.consume_ident()?;

        let predicate = if matches!(self.current_token(), Token::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(Command::Select { table, predicate })
    }

    /// `update <table> set <col> = <value> where <col> = <value>`
    fn parse_update(&mut self) -> Result<Command> {
        self.consume(Token::Update)?;
        let table = self.consume_ident()?;
        self.consume(Token::Set)?;
        let column = self.consume_ident()?;
        self.consume(Token::Equal)?;
        let value = self.consume_value()?;
        let predicate = self.parse_predicate()?;

        Ok(Command::Update {
            table,
            column,
            value,
            predicate,
        })
    }

    /// `delete from <table> where <col> = <value>`
    fn parse_delete(&mut self) -> Result<Command> {
        self.consume(Token::Delete)?;
        self.consume(Token::From)?;
        let table = self.consume_ident()?;
        let predicate = self.parse_predicate()?;
        Ok(Command::Delete { table, predicate })
    }
}
