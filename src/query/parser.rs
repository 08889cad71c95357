//! Query string parser.
//!
//! Grammar (recursive descent, one token of lookahead):
//!
//! ```text
//! query    := orExpr
//! orExpr   := andExpr ("OR" andExpr)*
//! andExpr  := notExpr (("AND")? notExpr)*      // juxtaposition is AND
//! notExpr  := ["NOT"] primary
//! primary  := term | phrase | field ":" term | "(" query ")"
//! phrase   := '"' term (WS term)* '"'
//! ```
//!
//! Operators are the uppercase literals; lowercase `and` is an ordinary
//! term. Empty input parses to `MatchAll`. Every failure carries the byte
//! offset of the offending character.

use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};
use crate::core::error::{Error, Result};
use crate::core::types::FieldKind;
use crate::query::ast::Query;

#[derive(Debug, Clone, PartialEq)]
enum QueryToken {
    Word(String),
    Quoted(String),
    Colon,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone)]
struct Lexeme {
    token: QueryToken,
    offset: usize,
}

fn lex(input: &str) -> Result<Vec<Lexeme>> {
    let mut lexemes = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            ':' => QueryToken::Colon,
            '(' => QueryToken::LeftParen,
            ')' => QueryToken::RightParen,
            '"' => {
                let mut text = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    text.push(c);
                }
                if !closed {
                    return Err(Error::syntax(offset, "unterminated phrase quote"));
                }
                QueryToken::Quoted(text)
            }
            _ => {
                let mut word = String::new();
                word.push(ch);
                while let Some((_, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '"' | '(' | ')' | ':') {
                        break;
                    }
                    word.push(*c);
                    chars.next();
                }
                QueryToken::Word(word)
            }
        };
        lexemes.push(Lexeme { token, offset });
    }

    Ok(lexemes)
}

pub struct QueryParser {
    tokenizer: Box<dyn Tokenizer>,
}

impl Default for QueryParser {
    fn default() -> Self {
        QueryParser::new()
    }
}

impl QueryParser {
    pub fn new() -> Self {
        QueryParser {
            tokenizer: Box::new(StandardTokenizer::default()),
        }
    }

    pub fn parse(&self, input: &str) -> Result<Query> {
        if input.trim().is_empty() {
            return Ok(Query::MatchAll);
        }

        let lexemes = lex(input)?;
        let mut state = ParseState {
            lexemes,
            pos: 0,
            end: input.len(),
            tokenizer: self.tokenizer.as_ref(),
        };

        let query = state.parse_or()?;
        if let Some(lexeme) = state.current() {
            return Err(Error::syntax(lexeme.offset, "unexpected trailing input"));
        }
        Ok(query)
    }
}

struct ParseState<'a> {
    lexemes: Vec<Lexeme>,
    pos: usize,
    end: usize,
    tokenizer: &'a dyn Tokenizer,
}

impl ParseState<'_> {
    fn current(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn current_is_keyword(&self, keyword: &str) -> bool {
        matches!(self.current(),
            Some(Lexeme { token: QueryToken::Word(w), .. }) if w == keyword)
    }

    /// Whether the current token can begin a notExpr.
    fn at_operand(&self) -> bool {
        match self.current() {
            Some(Lexeme {
                token: QueryToken::Word(w),
                ..
            }) => w != "AND" && w != "OR",
            Some(Lexeme {
                token: QueryToken::Quoted(_) | QueryToken::LeftParen,
                ..
            }) => true,
            _ => false,
        }
    }

    /// Whether the current token can begin a primary (no leading NOT).
    fn at_primary(&self) -> bool {
        self.at_operand() && !self.current_is_keyword("NOT")
    }

    fn parse_or(&mut self) -> Result<Query> {
        let mut clauses = vec![self.parse_and()?];

        while self.current_is_keyword("OR") {
            let offset = self.current().map(|l| l.offset).unwrap_or(self.end);
            self.advance();
            if !self.at_operand() {
                return Err(Error::syntax(offset, "dangling OR operator"));
            }
            clauses.push(self.parse_and()?);
        }

        Ok(if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Query::Or(clauses)
        })
    }

    fn parse_and(&mut self) -> Result<Query> {
        let mut clauses = vec![self.parse_not()?];

        loop {
            if self.current_is_keyword("AND") {
                let offset = self.current().map(|l| l.offset).unwrap_or(self.end);
                self.advance();
                if !self.at_operand() {
                    return Err(Error::syntax(offset, "dangling AND operator"));
                }
                clauses.push(self.parse_not()?);
            } else if self.at_operand() {
                // Juxtaposed operands combine as AND.
                clauses.push(self.parse_not()?);
            } else {
                break;
            }
        }

        Ok(if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Query::And(clauses)
        })
    }

    fn parse_not(&mut self) -> Result<Query> {
        if self.current_is_keyword("NOT") {
            let offset = self.current().map(|l| l.offset).unwrap_or(self.end);
            self.advance();
            if !self.at_primary() {
                return Err(Error::syntax(offset, "dangling NOT operator"));
            }
            return Ok(Query::Not(Box::new(self.parse_primary()?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Query> {
        let Some(lexeme) = self.advance() else {
            return Err(Error::syntax(self.end, "unexpected end of query"));
        };

        match lexeme.token {
            QueryToken::LeftParen => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Lexeme {
                        token: QueryToken::RightParen,
                        ..
                    }) => Ok(inner),
                    _ => Err(Error::syntax(lexeme.offset, "unclosed group")),
                }
            }
            QueryToken::Quoted(text) => self.phrase_query(&text, lexeme.offset),
            QueryToken::Word(word) => {
                if matches!(
                    self.current(),
                    Some(Lexeme {
                        token: QueryToken::Colon,
                        ..
                    })
                ) {
                    self.advance();
                    self.field_query(&word, lexeme.offset)
                } else {
                    self.term_query(&word, lexeme.offset)
                }
            }
            QueryToken::Colon | QueryToken::RightParen => {
                Err(Error::syntax(lexeme.offset, "expected a term, phrase or group"))
            }
        }
    }

    /// A free-text term goes through the analyzer. One token is a Term,
    /// several become a Phrase, none is an error.
    fn term_query(&self, word: &str, offset: usize) -> Result<Query> {
        let mut tokens = self.tokenizer.tokenize(word);
        match tokens.len() {
            0 => Err(Error::syntax(offset, "term contains no indexable text")),
            1 => Ok(Query::Term(tokens.remove(0).text)),
            _ => Ok(Query::Phrase(
                tokens.into_iter().map(|t| t.text).collect(),
            )),
        }
    }

    fn phrase_query(&self, text: &str, offset: usize) -> Result<Query> {
        let mut tokens = self.tokenizer.tokenize(text);
        match tokens.len() {
            0 => Err(Error::syntax(offset, "phrase contains no indexable text")),
            1 => Ok(Query::Term(tokens.remove(0).text)),
            _ => Ok(Query::Phrase(
                tokens.into_iter().map(|t| t.text).collect(),
            )),
        }
    }

    fn field_query(&mut self, name: &str, offset: usize) -> Result<Query> {
        let Some(field) = FieldKind::from_name(name) else {
            return Err(Error::syntax(
                offset,
                format!("unknown field '{}' in filter", name),
            ));
        };

        match self.advance() {
            Some(Lexeme {
                token: QueryToken::Word(value),
                ..
            }) => Ok(Query::FieldMatch { field, value }),
            Some(lexeme) => Err(Error::syntax(lexeme.offset, "expected field value")),
            None => Err(Error::syntax(self.end, "expected field value")),
        }
    }
}
