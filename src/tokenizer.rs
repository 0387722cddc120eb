use crate::error::{DbError, Result};

/// Represents the smallest meaningful units of the command language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- Command keywords (lowercase, case-sensitive) ---
    CreateTable,
    ListTables,
    DropTable,
    Insert,
    Into,
    Values,
    Select,
    From,
    Where,
    Update,
    Set,
    Delete,
    Help,
    Exit,
    Quit,

    // --- Identifiers & literals ---
    /// A name representing a table or a column (e.g., `users`, `age`).
    Ident(String),
    /// A 64-bit integer literal (e.g., `42`, `-7`).
    Int(i64),
    /// A string literal, enclosed in single or double quotes.
    Str(String),
    /// A boolean literal, `true` or `false` in any case.
    Bool(bool),

    // --- Symbols ---
    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Comma `,`
    Comma,
    /// Colon `:` separating a column name from its type
    Colon,
    /// Equal sign `=`
    Equal,

    // --- Special ---
    /// Represents the end of the input line.
    Eof,
}

/// A lexical scanner that converts one raw command line into [Token]s.
///
/// Tokenization splits on whitespace outside of quoted segments; quoted
/// segments (single or double quotes) are captured verbatim as string
/// literals.
pub struct Tokenizer {
    /// The input stored as a vector of characters for easy cursor movement.
    input: Vec<char>,
    /// The current position in the character vector.
    position: usize,
}

impl Tokenizer {
    /// Creates a new Tokenizer for the given input line.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Processes the entire input and returns a vector of tokens.
    ///
    /// # Errors
    /// Returns a [DbError::Syntax] if an unsupported character is found or a
    /// literal is malformed (unterminated quote, integer out of range).
    ///
    /// # Example
    /// ```
    /// # use minirel::tokenizer::{Tokenizer, Token};
    /// let tokens = Tokenizer::new("drop_table users").tokenize().unwrap();
    /// assert_eq!(tokens[0], Token::DropTable);
    /// ```
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        tokens.push(Token::Eof);
        Ok(tokens)
    }

    /// Identifies the next token based on the character at the cursor.
    fn next_token(&mut self) -> Result<Token> {
        let ch = self.current_char();

        match ch {
            '(' => {
                self.advance();
                Ok(Token::LeftParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RightParen)
            }
            ',' => {
                self.advance();
                Ok(Token::Comma)
            }
            ':' => {
                self.advance();
                Ok(Token::Colon)
            }
            '=' => {
                self.advance();
                Ok(Token::Equal)
            }
            '\'' | '"' => self.read_string(ch),
            '-' => self.read_word(),
            c if c.is_alphanumeric() || c == '_' => self.read_word(),
            _ => Err(DbError::Syntax(format!(
                "character {:?} is not supported",
                ch
            ))),
        }
    }

    // --- Navigation helpers ---

    /// Returns the character at the current position.
    fn current_char(&self) -> char {
        self.input[self.position]
    }

    /// Moves the cursor forward by one character.
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Checks if the cursor has reached the end of the input.
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes any whitespace characters.
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    // --- Extraction logic ---

    /// Reads one unquoted word and classifies it.
    ///
    /// All-digit words (with an optional leading `-`) become integer
    /// literals, `true`/`false` in any case become boolean literals, exact
    /// lowercase command keywords become keyword tokens, and everything else
    /// is a bare identifier.
    fn read_word(&mut self) -> Result<Token> {
        let mut word = String::new();

        if self.current_char() == '-' {
            word.push('-');
            self.advance();
        }

        while !self.is_at_end()
            && (self.current_char().is_alphanumeric() || self.current_char() == '_')
        {
            word.push(self.current_char());
            self.advance();
        }

        let digits = word.strip_prefix('-').unwrap_or(&word);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return word
                .parse::<i64>()
                .map(Token::Int)
                .map_err(|_| DbError::Syntax(format!("integer {:?} is out of range", word)));
        }

        if word == "-" || word.starts_with('-') {
            return Err(DbError::Syntax(format!("unexpected token {:?}", word)));
        }

        if word.eq_ignore_ascii_case("true") {
            return Ok(Token::Bool(true));
        }
        if word.eq_ignore_ascii_case("false") {
            return Ok(Token::Bool(false));
        }

        Ok(match word.as_str() {
            "create_table" => Token::CreateTable,
            "list_tables" => Token::ListTables,
            "drop_table" => Token::DropTable,
            "insert" => Token::Insert,
            "into" => Token::Into,
            "values" => Token::Values,
            "select" => Token::Select,
            "from" => Token::From,
            "where" => Token::Where,
            "update" => Token::Update,
            "set" => Token::Set,
            "delete" => Token::Delete,
            "help" => Token::Help,
            "exit" => Token::Exit,
            "quit" => Token::Quit,
            _ => Token::Ident(word),
        })
    }

    /// Reads a string literal enclosed in the given quote character.
    /// The content between the quotes is captured verbatim.
    fn read_string(&mut self, quote: char) -> Result<Token> {
        self.advance(); // skip the opening quote

        let mut string = String::new();
        while !self.is_at_end() && self.current_char() != quote {
            string.push(self.current_char());
            self.advance();
        }

        if self.is_at_end() {
            return Err(DbError::Syntax(format!(
                "unterminated string literal {:?}",
                string
            )));
        }

        // Skip the closing quote
        self.advance();

        Ok(Token::Str(string))
    }
}
