//! Formulas for dependent parameters
//!
//! A dependent parameter may be described by a text formula instead of a
//! closure. Arguments are referred to by position: `p0` is the first parameter
//! in the dependent parameter's argument list, `p1` the second, and so on.
//!
//! ```
//! use sourcefit_config::parameters::expression::{ArgumentValues, Expression};
//!
//! let expr = Expression::parse("p0 * 10 ^ (-0.4 * p1)").unwrap();
//! let value = expr.evaluate(&ArgumentValues(&[2.0, 0.0])).unwrap();
//! assert_eq!(value, 2.0);
//! ```

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::recognize,
    error::{Error as NomError, ErrorKind},
    multi::{many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair},
    IResult, Parser,
};
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during expression parsing or evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Failed to parse expression: {message}")]
    ParseError { message: String },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },
}

type ExprResult<T> = Result<T, ExpressionError>;

/// Expression AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Variable(String),
    Neg(Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Function(String, Vec<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> ExprResult<f64> {
        match self {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Sub => Ok(lhs - rhs),
            BinaryOp::Mul => Ok(lhs * rhs),
            BinaryOp::Div if rhs == 0.0 => Err(ExpressionError::DivisionByZero),
            BinaryOp::Div => Ok(lhs / rhs),
            BinaryOp::Pow => Ok(lhs.powf(rhs)),
        }
    }
}

/// Source of variable values during evaluation
pub trait EvaluationContext {
    fn get_variable(&self, name: &str) -> ExprResult<f64>;
}

/// Positional argument values of a dependent parameter (`p0`, `p1`, ...)
#[derive(Debug, Clone, Copy)]
pub struct ArgumentValues<'a>(pub &'a [f64]);

impl EvaluationContext for ArgumentValues<'_> {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        argument_index(name)
            .and_then(|i| self.0.get(i).copied())
            .or_else(|| named_constant(name))
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
    }
}

impl EvaluationContext for HashMap<String, f64> {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        self.get(name)
            .copied()
            .or_else(|| named_constant(name))
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
    }
}

/// Position of an argument reference such as `p3`
pub fn argument_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix('p')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn named_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        _ => None,
    }
}

fn call_function(name: &str, args: &[f64]) -> ExprResult<f64> {
    let unary: Option<fn(f64) -> f64> = match name {
        "sin" => Some(f64::sin),
        "cos" => Some(f64::cos),
        "tan" => Some(f64::tan),
        "exp" => Some(f64::exp),
        "ln" | "log" => Some(f64::ln),
        "log10" => Some(f64::log10),
        "sqrt" => Some(f64::sqrt),
        "abs" => Some(f64::abs),
        _ => None,
    };

    if let Some(f) = unary {
        if args.len() != 1 {
            return Err(ExpressionError::InvalidOperation {
                message: format!("{}() requires 1 argument, got {}", name, args.len()),
            });
        }
        return Ok(f(args[0]));
    }

    match name {
        "min" | "max" if args.len() < 2 => Err(ExpressionError::InvalidOperation {
            message: format!("{}() requires at least 2 arguments, got {}", name, args.len()),
        }),
        "min" => Ok(args.iter().copied().fold(f64::INFINITY, f64::min)),
        "max" => Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        _ => Err(ExpressionError::UndefinedFunction {
            name: name.to_string(),
        }),
    }
}

impl Expression {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> ExprResult<Self> {
        check_nesting(input)?;
        match expr_parser(input) {
            Ok((remainder, expr)) if remainder.trim().is_empty() => Ok(expr),
            Ok((remainder, _)) => Err(ExpressionError::ParseError {
                message: format!("Unexpected trailing characters: '{}'", remainder.trim()),
            }),
            Err(e) => Err(ExpressionError::ParseError {
                message: format!("{:?}", e),
            }),
        }
    }

    /// Evaluate the expression with the given context
    pub fn evaluate<C: EvaluationContext>(&self, context: &C) -> ExprResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Variable(name) => context.get_variable(name),
            Self::Neg(inner) => Ok(-inner.evaluate(context)?),
            Self::Binary(op, left, right) => {
                op.apply(left.evaluate(context)?, right.evaluate(context)?)
            }
            Self::Function(name, args) => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(context))
                    .collect::<ExprResult<Vec<f64>>>()?;
                call_function(name, &values)
            }
        }
    }

    /// All variable names used in the expression, sorted and deduplicated
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Self::Number(_) => {}
            Self::Variable(name) => vars.push(name.clone()),
            Self::Neg(inner) => inner.collect_variables(vars),
            Self::Binary(_, left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }
            Self::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Check that every variable is either a known constant or an argument
    /// reference below `arity`.
    pub fn check_arguments(&self, arity: usize) -> ExprResult<()> {
        for name in self.variables() {
            let known = match argument_index(&name) {
                Some(i) => i < arity,
                None => named_constant(&name).is_some(),
            };
            if !known {
                return Err(ExpressionError::UndefinedVariable { name });
            }
        }
        Ok(())
    }
}

/// Deepest parenthesis nesting accepted by the parser
const MAX_PAREN_DEPTH: usize = 64;

/// Most unary minus and `^` operators accepted; each one recurses in the parser
const MAX_OPERATOR_CHAIN: usize = 256;

/// Reject formulas deep enough to exhaust the stack of the recursive parser
fn check_nesting(input: &str) -> ExprResult<()> {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut chained = 0usize;
    let mut prev = None;

    for c in input.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            '^' => chained += 1,
            '-' if matches!(prev, None | Some('(' | ',' | '+' | '-' | '*' | '/' | '^')) => {
                chained += 1
            }
            _ => {}
        }
        prev = Some(c);
    }

    if deepest > MAX_PAREN_DEPTH {
        return Err(ExpressionError::ParseError {
            message: format!("Parentheses nested deeper than {} levels", MAX_PAREN_DEPTH),
        });
    }
    if chained > MAX_OPERATOR_CHAIN {
        return Err(ExpressionError::ParseError {
            message: format!(
                "More than {} unary minus or power operators",
                MAX_OPERATOR_CHAIN
            ),
        });
    }
    Ok(())
}

// Parser functions using nom

/// A single character surrounded by optional whitespace
fn symbol<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    move |input: &'a str| delimited(multispace0, char(c), multispace0).parse(input)
}

fn identifier(input: &str) -> IResult<&str, String> {
    let parsed: IResult<&str, &str> = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input);
    let (input, matched) = parsed?;
    Ok((input, matched.to_string()))
}

/// Numbers must start with a digit or a dot, so that names such as `inf`
/// are read as identifiers.
fn number(input: &str) -> IResult<&str, Expression> {
    if !input.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Float)));
    }
    let (input, value) = double::<_, NomError<&str>>(input)?;
    Ok((input, Expression::Number(value)))
}

/// A function call or a bare variable
fn name_or_call(input: &str) -> IResult<&str, Expression> {
    let (input, name) = identifier(input)?;
    match symbol('(')(input) {
        Ok((input, _)) => {
            let (input, args) = separated_list0(symbol(','), expr_parser).parse(input)?;
            let (input, _) = symbol(')')(input)?;
            Ok((input, Expression::Function(name, args)))
        }
        Err(nom::Err::Error(_)) => Ok((input, Expression::Variable(name))),
        Err(e) => Err(e),
    }
}

fn parens(input: &str) -> IResult<&str, Expression> {
    delimited(symbol('('), expr_parser, symbol(')')).parse(input)
}

fn primary(input: &str) -> IResult<&str, Expression> {
    let (input, _) = multispace0::<_, NomError<&str>>(input)?;
    alt((number, name_or_call, parens)).parse(input)
}

/// `primary ('^' unary)?`, right associative
fn power(input: &str) -> IResult<&str, Expression> {
    let (input, base) = primary(input)?;
    match symbol('^')(input) {
        Ok((input, _)) => {
            let (input, exponent) = unary(input)?;
            Ok((
                input,
                Expression::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)),
            ))
        }
        Err(nom::Err::Error(_)) => Ok((input, base)),
        Err(e) => Err(e),
    }
}

fn unary(input: &str) -> IResult<&str, Expression> {
    match symbol('-')(input) {
        Ok((input, _)) => {
            let (input, inner) = unary(input)?;
            Ok((input, Expression::Neg(Box::new(inner))))
        }
        Err(nom::Err::Error(_)) => power(input),
        Err(e) => Err(e),
    }
}

/// Left-associative chain of `operand (op operand)*`
fn left_assoc<'a>(
    input: &'a str,
    operand: fn(&'a str) -> IResult<&'a str, Expression>,
    ops: [(char, BinaryOp); 2],
) -> IResult<&'a str, Expression> {
    let (mut input, mut acc) = operand(input)?;
    loop {
        let matched = ops
            .iter()
            .find_map(|&(c, op)| symbol(c)(input).ok().map(|(rest, _)| (rest, op)));
        match matched {
            Some((rest, op)) => {
                let (rest, rhs) = operand(rest)?;
                acc = Expression::Binary(op, Box::new(acc), Box::new(rhs));
                input = rest;
            }
            None => return Ok((input, acc)),
        }
    }
}

fn term(input: &str) -> IResult<&str, Expression> {
    left_assoc(input, unary, [('*', BinaryOp::Mul), ('/', BinaryOp::Div)])
}

fn expr_parser(input: &str) -> IResult<&str, Expression> {
    left_assoc(input, term, [('+', BinaryOp::Add), ('-', BinaryOp::Sub)])
}
