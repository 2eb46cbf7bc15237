//! Stylesheet model and parser
//!
//! Rules are kept flat: a rule nested in `@media` or `@keyframes` carries
//! the chain of enclosing at-rules. Rendering regroups consecutive rules that
//! share the same chain.

use crate::error::{ParseError, ParseResult};
use crate::lexer::CssToken;
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// At-rules whose block holds rules rather than declarations
const NESTING_AT_RULES: &[&str] = &[
    "@media",
    "@supports",
    "@container",
    "@layer",
    "@document",
    "@keyframes",
    "@-webkit-keyframes",
    "@-moz-keyframes",
];

/// A single `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// One style rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssRule {
    /// Selector list; empty for at-rules such as `@font-face` or `@import`
    pub selectors: String,

    pub declarations: Vec<Declaration>,

    /// Enclosing at-rule preludes, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub at_rules: Vec<String>,

    /// Ended by `;` rather than a block, as in `@import url(a.css);`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub statement: bool,
}

impl CssRule {
    pub fn new(selectors: impl Into<String>) -> Self {
        Self {
            selectors: selectors.into(),
            declarations: Vec::new(),
            at_rules: Vec::new(),
            statement: false,
        }
    }

    /// Blockless at-rule such as `@charset "utf-8"`
    pub fn statement(prelude: impl Into<String>) -> Self {
        Self {
            statement: true,
            ..Self::new(prelude)
        }
    }

    pub fn with_declaration(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property: property.into(),
            value: value.into(),
        });
        self
    }

    pub fn within(mut self, at_rule: impl Into<String>) -> Self {
        self.at_rules.push(at_rule.into());
        self
    }

    /// Value of the last declaration for `property`
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// Statement at-rule such as `@import url(a.css)`, which has no block
    pub fn is_statement(&self) -> bool {
        self.statement
    }

    fn write_body(&self, out: &mut String) {
        if self.is_statement() {
            out.push_str(&self.selectors);
            out.push(';');
            return;
        }
        out.push_str(&self.selectors);
        out.push('{');
        for declaration in &self.declarations {
            out.push_str(&declaration.property);
            out.push(':');
            out.push_str(&declaration.value);
            out.push(';');
        }
        out.push('}');
    }
}

/// Ordered list of rules. New rules are always appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `css` and append its rules, returning how many were added
    pub fn add_rules(&mut self, css: &str) -> ParseResult<usize> {
        let rules = parse_css(css)?;
        let added = rules.len();
        self.rules.extend(rules);
        Ok(added)
    }

    pub fn push(&mut self, rule: CssRule) {
        self.rules.push(rule);
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CssRule> {
        self.rules.iter()
    }

    /// Rules whose selector list is exactly `selectors`
    pub fn find(&self, selectors: &str) -> Vec<&CssRule> {
        self.rules.iter().filter(|r| r.selectors == selectors).collect()
    }

    pub fn to_css(&self) -> String {
        let mut out = String::new();
        let mut index = 0;

        while index < self.rules.len() {
            let chain = &self.rules[index].at_rules;
            let run_end = self.rules[index..]
                .iter()
                .position(|r| &r.at_rules != chain)
                .map(|offset| index + offset)
                .unwrap_or(self.rules.len());

            for at_rule in chain {
                out.push_str(at_rule);
                out.push('{');
            }
            for rule in &self.rules[index..run_end] {
                rule.write_body(&mut out);
            }
            for _ in chain {
                out.push('}');
            }

            index = run_end;
        }

        out
    }
}

/// Parse stylesheet text into rules
pub fn parse_css(source: &str) -> ParseResult<Vec<CssRule>> {
    let mut tokens = Vec::new();
    let mut lexer = CssToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token @ CssToken::Comment(_)) => {
                if !token.is_terminated_comment() {
                    return Err(ParseError::UnterminatedComment { offset: span.start });
                }
            }
            Ok(token) => tokens.push((token, span)),
            // Unterminated strings and other stray input are kept as text
            Err(_) => tokens.push((CssToken::Chunk(lexer.slice()), span)),
        }
    }

    let mut parser = CssParser { tokens, pos: 0 };
    parser.parse_rule_list(&[], None)
}

struct CssParser<'src> {
    tokens: Vec<(CssToken<'src>, Range<usize>)>,
    pos: usize,
}

impl<'src> CssParser<'src> {
    fn next(&mut self) -> Option<(CssToken<'src>, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    /// Parse rules until end of input, or until the `}` closing `open`
    fn parse_rule_list(&mut self, chain: &[String], open: Option<usize>) -> ParseResult<Vec<CssRule>> {
        let mut rules = Vec::new();
        let mut prelude = String::new();

        loop {
            let Some((token, span)) = self.next() else {
                return match open {
                    Some(offset) => Err(ParseError::UnclosedBlock { offset }),
                    None => Ok(rules),
                };
            };

            match token {
                CssToken::RBrace => match open {
                    Some(_) => return Ok(rules),
                    None => return Err(ParseError::UnexpectedClose { offset: span.start }),
                },

                CssToken::Semi => {
                    let statement = normalize(&prelude);
                    if statement.starts_with('@') {
                        let mut rule = CssRule::statement(statement);
                        rule.at_rules = chain.to_vec();
                        rules.push(rule);
                    }
                    prelude.clear();
                }

                CssToken::LBrace => {
                    let head = normalize(&prelude);
                    prelude.clear();
                    if head.is_empty() {
                        return Err(ParseError::MissingSelector { offset: span.start });
                    }

                    if is_nesting_at_rule(&head) {
                        let mut inner_chain = chain.to_vec();
                        inner_chain.push(head);
                        let inner = self.parse_rule_list(&inner_chain, Some(span.start))?;
                        rules.extend(inner);
                    } else {
                        let declarations = self.parse_declarations(span.start)?;
                        rules.push(CssRule {
                            selectors: head,
                            declarations,
                            at_rules: chain.to_vec(),
                            statement: false,
                        });
                    }
                }

                CssToken::Chunk(text)
                | CssToken::String(text)
                | CssToken::SingleQuoteString(text) => prelude.push_str(text),
                CssToken::Slash => prelude.push('/'),
                CssToken::Comment(_) => {}
            }
        }
    }

    /// Parse declarations up to the `}` closing the block opened at `open`
    fn parse_declarations(&mut self, open: usize) -> ParseResult<Vec<Declaration>> {
        let mut declarations = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        loop {
            let Some((token, _)) = self.next() else {
                return Err(ParseError::UnclosedBlock { offset: open });
            };

            match token {
                CssToken::RBrace if depth == 0 => {
                    push_declaration(&mut declarations, &current);
                    return Ok(declarations);
                }
                CssToken::RBrace => {
                    depth -= 1;
                    current.push('}');
                }
                CssToken::LBrace => {
                    depth += 1;
                    current.push('{');
                }
                CssToken::Semi if depth == 0 => {
                    push_declaration(&mut declarations, &current);
                    current.clear();
                }
                CssToken::Semi => current.push(';'),
                CssToken::Chunk(text)
                | CssToken::String(text)
                | CssToken::SingleQuoteString(text) => current.push_str(text),
                CssToken::Slash => current.push('/'),
                CssToken::Comment(_) => {}
            }
        }
    }
}

fn push_declaration(declarations: &mut Vec<Declaration>, raw: &str) {
    let Some((property, value)) = raw.split_once(':') else {
        return;
    };
    let property = property.trim();
    if property.is_empty() {
        return;
    }
    declarations.push(Declaration {
        property: property.to_string(),
        value: value.trim().to_string(),
    });
}

fn is_nesting_at_rule(head: &str) -> bool {
    let keyword = head.split_whitespace().next().unwrap_or_default();
    NESTING_AT_RULES
        .iter()
        .any(|at| keyword.eq_ignore_ascii_case(at))
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
