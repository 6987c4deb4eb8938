//! Single left-to-right scan with one recursive call per parenthesized
//! sub-expression.
//!
//! All recursive calls of one evaluation share a single [`Cursor`], passed
//! down by mutable reference: nesting adds call depth, never a second scan
//! position. When a nested call returns, the cursor already sits behind the
//! matching ')'.

use bigdecimal::BigDecimal;
use decimex_lexer::{Token, TokenType};

use crate::bindings::Bindings;
use crate::config::EvaluatorConfig;
use crate::error::{EvalError, EvalResult};
use crate::node_list::{NodeList, OccurrenceIndex};
use crate::operator::Operator;
use crate::reducer;
use crate::resolver::TermResolver;
use crate::trace::{TraceEvent, Tracer};

/// Position in the token stream of one evaluation.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// The token under the cursor
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    /// The token right after the one under the cursor
    pub fn peek_next(&self) -> Option<&'t Token> {
        self.tokens.get(self.position + 1)
    }

    pub fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

/// Nodes, operator occurrences and the unfinished term of one nesting level.
#[derive(Default)]
struct Level {
    nodes: NodeList,
    index: OccurrenceIndex,
    pending: Option<String>,
}

impl Level {
    fn push_node(&mut self, value: BigDecimal, op: Option<Operator>) {
        let id = self.nodes.push(value, op);
        if let Some(op) = op {
            self.index.register(op, id);
        }
    }

    /// Start a new term, first joining it to a preceding closed
    /// sub-expression with an implicit '*'
    fn begin_term(&mut self) {
        self.implicit_multiply();
        self.pending = Some(String::new());
    }

    /// A value node left without an operator is multiplied with whatever
    /// comes next, as in `(5-2)(5+2)` or `(5-2)2`
    fn implicit_multiply(&mut self) {
        if let Some(last) = self.nodes.last() {
            let node = self.nodes.get_mut(last);
            if node.op.is_none() {
                node.op = Some(Operator::Multiply);
                self.index.register(Operator::Multiply, last);
            }
        }
    }

    /// An operator that directly follows a finished node (or nothing)
    fn attach_operator(&mut self, op: Operator, column: usize) -> EvalResult<()> {
        let last = self
            .nodes
            .last()
            .ok_or(EvalError::LeadingOperator { op, column })?;
        let node = self.nodes.get_mut(last);
        if node.op.is_some() {
            return Err(EvalError::DuplicateOperator { op, column });
        }
        node.op = Some(op);
        self.index.register(op, last);
        Ok(())
    }
}

/// Scans and evaluates token streams for one evaluation.
pub struct Scanner<'a> {
    resolver: TermResolver<'a>,
    config: &'a EvaluatorConfig,
    tracer: &'a mut dyn Tracer,
}

impl<'a> Scanner<'a> {
    pub fn new(
        bindings: &'a Bindings,
        config: &'a EvaluatorConfig,
        tracer: &'a mut dyn Tracer,
    ) -> Self {
        Self {
            resolver: TermResolver::new(bindings),
            config,
            tracer,
        }
    }

    /// Evaluate the whole token stream under the cursor
    pub fn scan(&mut self, cursor: &mut Cursor<'_>) -> EvalResult<BigDecimal> {
        self.scan_level(cursor, 0, None)
    }

    /// Scan one nesting level up to its ')' (or the end of input at the top
    /// level) and reduce it. `opened_at` is the column of the '(' that opened
    /// this level.
    fn scan_level(
        &mut self,
        cursor: &mut Cursor<'_>,
        depth: usize,
        opened_at: Option<usize>,
    ) -> EvalResult<BigDecimal> {
        if depth > self.config.max_depth {
            return Err(EvalError::NestingTooDeep {
                limit: self.config.max_depth,
            });
        }

        let mut level = Level::default();
        while let Some(token) = cursor.peek() {
            let column = token.location.column;
            match token.token_type {
                // a stray character stays inside its term and fails to resolve
                TokenType::Number
                | TokenType::Dot
                | TokenType::Identifier
                | TokenType::Error(_) => {
                    if level.pending.is_none() {
                        level.begin_term();
                    }
                    if let Some(term) = level.pending.as_mut() {
                        term.push_str(&token.lexeme);
                    }
                    cursor.advance();
                }
                TokenType::Plus => self.operator(&mut level, cursor, Operator::Add, column)?,
                TokenType::Minus => self.operator(&mut level, cursor, Operator::Subtract, column)?,
                TokenType::Star => self.operator(&mut level, cursor, Operator::Multiply, column)?,
                TokenType::Slash => self.operator(&mut level, cursor, Operator::Divide, column)?,
                TokenType::Caret => self.operator(&mut level, cursor, Operator::Pow, column)?,
                TokenType::LeftParen => {
                    if cursor
                        .peek_next()
                        .is_some_and(|next| next.token_type == TokenType::RightParen)
                    {
                        return Err(EvalError::EmptySubexpression { column });
                    }
                    match level.pending.take() {
                        Some(term) => {
                            self.finish_term(&mut level, &term, Some(Operator::Multiply))?
                        }
                        None => level.implicit_multiply(),
                    }
                    cursor.advance();
                    let value = self.scan_level(cursor, depth + 1, Some(column))?;
                    level.push_node(value, None);
                }
                TokenType::RightParen => {
                    if opened_at.is_none() {
                        return Err(EvalError::MisplacedParenthesis { column });
                    }
                    cursor.advance();
                    return self.close_level(level, depth);
                }
            }
        }

        if let Some(column) = opened_at {
            return Err(EvalError::MisplacedParenthesis { column });
        }
        self.close_level(level, depth)
    }

    fn operator(
        &mut self,
        level: &mut Level,
        cursor: &mut Cursor<'_>,
        op: Operator,
        column: usize,
    ) -> EvalResult<()> {
        // '-' at the start of a term followed by digits is a sign
        if op == Operator::Subtract
            && level.pending.is_none()
            && cursor
                .peek_next()
                .is_some_and(|next| next.token_type.is_numeric())
        {
            level.begin_term();
            if let Some(term) = level.pending.as_mut() {
                term.push('-');
            }
            cursor.advance();
            return Ok(());
        }

        cursor.advance();
        match level.pending.take() {
            Some(term) => self.finish_term(level, &term, Some(op)),
            None => level.attach_operator(op, column),
        }
    }

    fn finish_term(
        &mut self,
        level: &mut Level,
        term: &str,
        op: Option<Operator>,
    ) -> EvalResult<()> {
        let value = self.resolver.resolve(term)?;
        level.push_node(value, op);
        Ok(())
    }

    fn close_level(&mut self, mut level: Level, depth: usize) -> EvalResult<BigDecimal> {
        if let Some(term) = level.pending.take() {
            self.finish_term(&mut level, &term, None)?;
        }
        if self.tracer.enabled() {
            self.tracer.trace(&TraceEvent::LevelScanned {
                depth,
                terms: level
                    .nodes
                    .iter()
                    .map(|node| (node.value.clone(), node.op))
                    .collect(),
            });
        }
        let value = reducer::reduce(
            &mut level.nodes,
            &level.index,
            self.config,
            depth,
            &mut *self.tracer,
        )?;
        if self.tracer.enabled() {
            self.tracer.trace(&TraceEvent::LevelReduced {
                depth,
                value: value.clone(),
            });
        }
        Ok(value)
    }
}
