//! Formula evaluation for the reference engine.
//!
//! Cell references are resolved in Rust (depth-first, with cycle detection)
//! and bound as scope variables; the remaining arithmetic is handed to Rhai
//! as a plain expression.

use rhai::{Engine, EvalAltResult, Scope};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::{CellRef, TokenKind};

/// Token lists keyed by the cell that owns them.
pub type Formulas = HashMap<CellRef, Vec<String>>;

/// Why a cell has no numeric value. Displays as the sheet error code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("#CYCLE!")]
    Cycle,

    #[error("#DIV/0!")]
    DivideByZero,

    /// A result too large to represent.
    #[error("#INF!")]
    Overflow,

    #[error("#ERR")]
    Syntax(String),
}

/// The computed value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Error(EvalError),
}

/// Evaluates token formulas with a Rhai engine restricted to expressions.
pub struct Evaluator {
    engine: Engine,
}

impl Evaluator {
    pub fn new() -> Self {
        let mut engine = Engine::new();
        engine.set_max_expr_depths(64, 32);
        Evaluator { engine }
    }

    /// Evaluate a single cell.
    pub fn evaluate(&self, cell: CellRef, formulas: &Formulas) -> CellValue {
        let mut memo = HashMap::new();
        self.evaluate_cell(cell, formulas, &mut memo)
    }

    /// Evaluate many cells, sharing intermediate results.
    pub fn evaluate_all(
        &self,
        cells: impl IntoIterator<Item = CellRef>,
        formulas: &Formulas,
    ) -> HashMap<CellRef, CellValue> {
        let mut memo = HashMap::new();
        for cell in cells {
            self.evaluate_cell(cell, formulas, &mut memo);
        }
        memo
    }

    /// Depth-first over references with an explicit stack, so chain length
    /// is bounded by the sheet, not the thread stack.
    ///
    /// A cell is finished only after every reference it makes is in `memo`.
    /// A reference still missing at that point is an ancestor on the current
    /// path, which makes it a cycle.
    fn evaluate_cell(
        &self,
        cell: CellRef,
        formulas: &Formulas,
        memo: &mut HashMap<CellRef, CellValue>,
    ) -> CellValue {
        let mut visiting: HashSet<CellRef> = HashSet::new();
        let mut stack = vec![Visit::Enter(cell)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(current) => {
                    if memo.contains_key(&current) || visiting.contains(&current) {
                        continue;
                    }
                    let Some(tokens) = formulas.get(&current).filter(|t| !t.is_empty()) else {
                        memo.insert(current, CellValue::Empty);
                        continue;
                    };
                    visiting.insert(current);
                    stack.push(Visit::Finish(current));
                    for token in tokens {
                        if let TokenKind::Cell(target) = TokenKind::classify(token) {
                            if !memo.contains_key(&target) && !visiting.contains(&target) {
                                stack.push(Visit::Enter(target));
                            }
                        }
                    }
                }
                Visit::Finish(current) => {
                    visiting.remove(&current);
                    let tokens = formulas.get(&current).map(Vec::as_slice).unwrap_or(&[]);
                    let value = match self.evaluate_tokens(tokens, memo) {
                        Ok(n) => CellValue::Number(n),
                        Err(e) => CellValue::Error(e),
                    };
                    memo.insert(current, value);
                }
            }
        }

        memo.get(&cell).cloned().unwrap_or(CellValue::Empty)
    }

    /// Evaluate one formula whose references are all resolved in `memo`.
    fn evaluate_tokens(
        &self,
        tokens: &[String],
        memo: &HashMap<CellRef, CellValue>,
    ) -> Result<f64, EvalError> {
        let mut expr = String::new();
        let mut scope = Scope::new();
        let mut number = String::new();
        let mut divides = false;

        for token in tokens {
            let kind = TokenKind::classify(token);
            if kind == TokenKind::Number {
                number.push_str(token);
                continue;
            }
            flush_number(&mut number, &mut expr)?;
            match kind {
                TokenKind::Operator | TokenKind::LeftParen | TokenKind::RightParen => {
                    divides |= token == "/";
                    expr.push_str(token);
                }
                TokenKind::Cell(target) => {
                    let n = match memo.get(&target) {
                        Some(CellValue::Empty) => 0.0,
                        Some(CellValue::Number(n)) => *n,
                        Some(CellValue::Error(e)) => return Err(e.clone()),
                        None => return Err(EvalError::Cycle),
                    };
                    let name = format!("c{}", scope.len());
                    expr.push_str(&name);
                    scope.push(name, n);
                }
                TokenKind::Number | TokenKind::Other => {
                    return Err(EvalError::Syntax(format!("unexpected token '{}'", token)));
                }
            }
            expr.push(' ');
        }
        flush_number(&mut number, &mut expr)?;

        let not_finite = if divides {
            EvalError::DivideByZero
        } else {
            EvalError::Overflow
        };
        match self
            .engine
            .eval_expression_with_scope::<f64>(&mut scope, &expr)
        {
            Ok(n) if n.is_finite() => Ok(n),
            Ok(_) => Err(not_finite),
            Err(err) => match *err {
                EvalAltResult::ErrorArithmetic(..) => Err(not_finite),
                other => Err(EvalError::Syntax(other.to_string())),
            },
        }
    }
}

enum Visit {
    Enter(CellRef),
    Finish(CellRef),
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the pending number fragment to `expr` as a float literal.
fn flush_number(number: &mut String, expr: &mut String) -> Result<(), EvalError> {
    if number.is_empty() {
        return Ok(());
    }
    let literal = number_literal(number)
        .ok_or_else(|| EvalError::Syntax(format!("malformed number '{}'", number)))?;
    expr.push_str(&literal);
    expr.push(' ');
    number.clear();
    Ok(())
}

/// Normalize digit/point fragments into a literal Rhai parses as a float.
fn number_literal(fragment: &str) -> Option<String> {
    let (int, frac) = fragment.split_once('.').unwrap_or((fragment, ""));
    if frac.contains('.') {
        return None;
    }
    let int = int.trim_start_matches('0');
    let int = if int.is_empty() { "0" } else { int };
    let frac = if frac.is_empty() { "0" } else { frac };
    Some(format!("{}.{}", int, frac))
}
