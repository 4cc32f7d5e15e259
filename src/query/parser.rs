//! Recursive-descent parser for the query dialect
//!
//! Grammar (keywords case-insensitive):
//!
//! ```text
//! Query      := SELECT FieldList FROM Ident [WhereClause] [OrderClause] [LimitClause]
//! FieldList  := Ident ("," Ident)*
//! WhereClause:= WHERE OrExpr
//! OrExpr     := AndExpr (OR AndExpr)*
//! AndExpr    := Term (AND Term)*
//! Term       := "(" OrExpr ")" | Ident Operator (Literal | null)
//! OrderClause:= ORDER BY Ident [ASC|DESC] ("," Ident [ASC|DESC])*
//! LimitClause:= LIMIT Integer
//! ```
//!
//! AND binds tighter than OR, so `A OR B AND C` parses as `A OR (B AND C)`.

use super::ast::{CmpOp, FilterExpr, Literal, OrderKey, SoqlQuery, SortDirection};
use super::errors::{QueryError, QueryResult};
use super::lexer::{tokenize, SpannedToken, Token};

/// Parses query text into an AST.
pub fn parse(input: &str) -> QueryResult<SoqlQuery> {
    Parser::new(input)?.parse_query()
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    input_len: usize,
}

impl Parser {
    fn new(input: &str) -> QueryResult<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            input_len: input.len(),
        })
    }

    fn parse_query(&mut self) -> QueryResult<SoqlQuery> {
        self.expect_keyword("SELECT")?;
        let fields = self.parse_field_list()?;
        self.expect_keyword("FROM")?;
        let object_type = self.parse_object_type()?;

        let filter = if self.at_keyword("WHERE") {
            self.advance();
            Some(self.parse_or_expr()?)
        } else {
            None
        };

        let order_by = if self.at_keyword("ORDER") {
            self.advance();
            self.expect_keyword("BY")?;
            self.parse_order_keys()?
        } else {
            Vec::new()
        };

        let limit = if self.at_keyword("LIMIT") {
            self.advance();
            Some(self.parse_limit()?)
        } else {
            None
        };

        if let Some(spanned) = self.peek() {
            return Err(QueryError::syntax(
                spanned.position,
                spanned.token.fragment(),
                "unexpected trailing input",
            ));
        }

        Ok(SoqlQuery {
            fields,
            object_type,
            filter,
            order_by,
            limit,
        })
    }

    fn parse_field_list(&mut self) -> QueryResult<Vec<String>> {
        let mut fields = vec![self.take_ident("a field name")?];
        while self.at_token(&Token::Comma) {
            self.advance();
            let position = self.position();
            let field = self.take_ident("a field name")?;
            if fields.contains(&field) {
                return Err(QueryError::syntax(
                    position,
                    field,
                    "duplicate field in selection",
                ));
            }
            fields.push(field);
        }
        Ok(fields)
    }

    fn parse_object_type(&mut self) -> QueryResult<String> {
        let position = self.position();
        let name = self.take_ident("an object type after FROM")?;
        if ["WHERE", "ORDER", "LIMIT"]
            .iter()
            .any(|kw| name.eq_ignore_ascii_case(kw))
        {
            return Err(QueryError::syntax(
                position,
                name,
                "expected an object type after FROM",
            ));
        }
        Ok(name)
    }

    fn parse_or_expr(&mut self) -> QueryResult<FilterExpr> {
        let mut left = self.parse_and_expr()?;
        while self.at_keyword("OR") {
            self.advance();
            let right = self.parse_and_expr()?;
            left = FilterExpr::or(left, right);
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> QueryResult<FilterExpr> {
        let mut left = self.parse_term()?;
        while self.at_keyword("AND") {
            self.advance();
            let right = self.parse_term()?;
            left = FilterExpr::and(left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> QueryResult<FilterExpr> {
        if self.at_token(&Token::LParen) {
            let open_position = self.position();
            self.advance();
            let inner = self.parse_or_expr()?;
            if !self.at_token(&Token::RParen) {
                return Err(QueryError::syntax(
                    open_position,
                    "(",
                    "unbalanced parentheses",
                ));
            }
            self.advance();
            return Ok(FilterExpr::group(inner));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> QueryResult<FilterExpr> {
        let field = self.take_ident("a field name in condition")?;
        let op = self.take_operator()?;
        let value = self.take_literal()?;
        Ok(FilterExpr::comparison(field, op, value))
    }

    fn parse_order_keys(&mut self) -> QueryResult<Vec<OrderKey>> {
        let mut keys = vec![self.parse_order_key()?];
        while self.at_token(&Token::Comma) {
            self.advance();
            keys.push(self.parse_order_key()?);
        }
        Ok(keys)
    }

    fn parse_order_key(&mut self) -> QueryResult<OrderKey> {
        let field = self.take_ident("a field name in ORDER BY")?;
        let direction = if self.at_keyword("ASC") {
            self.advance();
            SortDirection::Asc
        } else if self.at_keyword("DESC") {
            self.advance();
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Ok(OrderKey { field, direction })
    }

    fn parse_limit(&mut self) -> QueryResult<usize> {
        let position = self.position();
        match self.next() {
            Some(Token::Number(n)) if n >= 0.0 && n.fract() == 0.0 => Ok(n as usize),
            Some(token) => Err(QueryError::syntax(
                position,
                token.fragment(),
                "LIMIT must be a non-negative integer",
            )),
            None => Err(QueryError::unexpected_end(
                self.input_len,
                "LIMIT must be a non-negative integer",
            )),
        }
    }

    // --- token helpers ---

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.input_len, |t| t.position)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|t| t.token.clone());
        self.pos += 1;
        token
    }

    fn at_token(&self, token: &Token) -> bool {
        self.peek().map_or(false, |t| &t.token == token)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(
            self.peek(),
            Some(SpannedToken {
                token: Token::Ident(word),
                ..
            }) if word.eq_ignore_ascii_case(keyword)
        )
    }

    fn expect_keyword(&mut self, keyword: &str) -> QueryResult<()> {
        if self.at_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(format!("expected {} clause keyword", keyword)))
        }
    }

    fn take_ident(&mut self, what: &str) -> QueryResult<String> {
        match self.peek() {
            Some(SpannedToken {
                token: Token::Ident(word),
                ..
            }) => {
                let word = word.clone();
                self.advance();
                Ok(word)
            }
            _ => Err(self.error_here(format!("expected {}", what))),
        }
    }

    fn take_operator(&mut self) -> QueryResult<CmpOp> {
        let op = match self.peek().map(|t| &t.token) {
            Some(Token::Eq) => CmpOp::Eq,
            Some(Token::Ne) => CmpOp::Ne,
            Some(Token::Lt) => CmpOp::Lt,
            Some(Token::Le) => CmpOp::Le,
            Some(Token::Gt) => CmpOp::Gt,
            Some(Token::Ge) => CmpOp::Ge,
            _ => return Err(self.error_here("expected a comparison operator")),
        };
        self.advance();
        Ok(op)
    }

    fn take_literal(&mut self) -> QueryResult<Literal> {
        let literal = match self.peek().map(|t| &t.token) {
            Some(Token::Text(s)) => Literal::Text(s.clone()),
            Some(Token::Number(n)) => Literal::Number(*n),
            Some(Token::Ident(word)) if word.eq_ignore_ascii_case("null") => Literal::Null,
            Some(Token::Ident(word)) if word.eq_ignore_ascii_case("true") => {
                Literal::Boolean(true)
            }
            Some(Token::Ident(word)) if word.eq_ignore_ascii_case("false") => {
                Literal::Boolean(false)
            }
            _ => return Err(self.error_here("expected a literal or null")),
        };
        self.advance();
        Ok(literal)
    }

    fn error_here(&self, message: impl Into<String>) -> QueryError {
        match self.peek() {
            Some(spanned) => {
                QueryError::syntax(spanned.position, spanned.token.fragment(), message)
            }
            None => QueryError::unexpected_end(self.input_len, message),
        }
    }
}
