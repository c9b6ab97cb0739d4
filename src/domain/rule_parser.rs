//! Rule text parser.
//!
//! Recursive descent parser for the rule grammar used in strategy config
//! files. Converts text to AST with error messages that carry the character
//! offset and the expected/found tokens.
//!
//! ```text
//! rule    := UNDER(op, op) | OVER(op, op) | CROSS_UP(op, op) | CROSS_DOWN(op, op)
//!          | AND(rule, rule, ...) | OR(rule, rule, ...) | NOT(rule)
//! op      := open | high | low | close | volume | number | SMA(n) | EMA(n)
//! ```

use crate::domain::error::ParseError;
use crate::domain::indicator::IndicatorType;
use crate::domain::rule::{Operand, Rule};

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            position: self.pos,
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn peek_word(&self) -> String {
        let word: String = self
            .remaining()
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if word.is_empty() {
            self.peek()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "end of input".to_string())
        } else {
            word
        }
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut has_dot = false;
        let mut digits = 0;

        if self.peek() == Some('-') {
            self.advance();
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        if digits == 0 {
            return Err(ParseError {
                message: "expected number".to_string(),
                position: start,
            });
        }

        let num_str = &self.input[start..self.pos];
        num_str.parse::<f64>().map_err(|_| ParseError {
            message: format!("invalid number: {}", num_str),
            position: start,
        })
    }

    fn parse_period(&mut self) -> Result<usize, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let num_str = &self.input[start..self.pos];
        let period = num_str.parse::<usize>().map_err(|_| ParseError {
            message: "expected integer".to_string(),
            position: start,
        })?;
        if period == 0 {
            return Err(ParseError {
                message: "period must be at least 1".to_string(),
                position: start,
            });
        }
        Ok(period)
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        self.skip_whitespace();

        if self
            .peek()
            .is_some_and(|ch| ch.is_ascii_digit() || ch == '-' || ch == '.')
        {
            return Ok(Operand::Constant(self.parse_number()?));
        }

        let word = self.peek_word();
        let operand = match word.as_str() {
            "open" => Operand::Open,
            "high" => Operand::High,
            "low" => Operand::Low,
            "close" => Operand::Close,
            "volume" => Operand::Volume,
            "SMA" | "EMA" => {
                self.pos += word.len();
                self.expect_char('(')?;
                let period = self.parse_period()?;
                self.expect_char(')')?;
                let indicator_type = if word == "SMA" {
                    IndicatorType::Sma(period)
                } else {
                    IndicatorType::Ema(period)
                };
                return Ok(Operand::Indicator(indicator_type));
            }
            _ => {
                return Err(self.error(format!(
                    "expected operand (open, high, low, close, volume, number, SMA(n), EMA(n)), found '{}'",
                    word
                )));
            }
        };
        self.pos += word.len();
        Ok(operand)
    }

    fn parse_operand_pair(&mut self) -> Result<(Operand, Operand), ParseError> {
        self.expect_char('(')?;
        let left = self.parse_operand()?;
        self.expect_char(',')?;
        let right = self.parse_operand()?;
        self.expect_char(')')?;
        Ok((left, right))
    }

    fn parse_rule_list(&mut self, keyword: &str) -> Result<Vec<Rule>, ParseError> {
        self.expect_char('(')?;

        let mut rules = vec![self.parse_rule()?];
        loop {
            self.skip_whitespace();
            if self.peek() == Some(')') {
                self.advance();
                break;
            }
            self.expect_char(',')?;
            rules.push(self.parse_rule()?);
        }

        if rules.len() < 2 {
            return Err(self.error(format!("{} requires at least 2 rules", keyword)));
        }
        Ok(rules)
    }

    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        self.skip_whitespace();
        let keyword = self.peek_word();

        let rule = match keyword.as_str() {
            "UNDER" | "OVER" | "CROSS_UP" | "CROSS_DOWN" => {
                self.pos += keyword.len();
                let (left, right) = self.parse_operand_pair()?;
                match keyword.as_str() {
                    "UNDER" => Rule::Under { left, right },
                    "OVER" => Rule::Over { left, right },
                    "CROSS_UP" => Rule::CrossedUp { left, right },
                    _ => Rule::CrossedDown { left, right },
                }
            }
            "AND" => {
                self.pos += keyword.len();
                Rule::And(self.parse_rule_list("AND")?)
            }
            "OR" => {
                self.pos += keyword.len();
                Rule::Or(self.parse_rule_list("OR")?)
            }
            "NOT" => {
                self.pos += keyword.len();
                self.expect_char('(')?;
                let rule = self.parse_rule()?;
                self.expect_char(')')?;
                Rule::Not(Box::new(rule))
            }
            _ => return Err(self.error(format!("expected rule, found '{}'", keyword))),
        };
        Ok(rule)
    }

    fn parse(&mut self) -> Result<Rule, ParseError> {
        let rule = self.parse_rule()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error(format!(
                "unexpected input after rule: '{}'",
                self.remaining()
            )));
        }
        Ok(rule)
    }
}

pub fn parse(input: &str) -> Result<Rule, ParseError> {
    Parser::new(input).parse()
}
