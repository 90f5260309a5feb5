use serde_json::{Value, json};

use crate::error::Error;
use crate::scanner::Token;

/// Expression tree produced by the parser. Binary variants store the
/// operator token; evaluation dispatches on its spelling, so a spelling
/// without an evaluation rule (the bare '=' token) is an Eval error.
#[derive(Debug, Clone)]
pub enum Expr {
    Grouping {
        expr: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Relation {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Term {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Factor {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Literal {
        value: i64,
    },
}

impl Expr {
    /// Evaluates the tree post-order. Evaluation is pure: the same tree can
    /// be evaluated any number of times and yields the same result.
    pub fn evaluate(&self) -> Result<i64, Error> {
        match self {
            Expr::Literal { value } => Ok(*value),

            Expr::Grouping { expr } => expr.evaluate(),

            Expr::Logical { left, operator, right } => {
                let r1 = left.evaluate()?;
                let r2 = right.evaluate()?;
                // case insensitive comparison, truthiness is "> 0"
                let op = operator.lexeme.as_str();
                if op.eq_ignore_ascii_case("and") {
                    Ok(((r1 > 0) && (r2 > 0)) as i64)
                } else if op.eq_ignore_ascii_case("or") {
                    Ok(((r1 > 0) || (r2 > 0)) as i64)
                } else if op.eq_ignore_ascii_case("xor") {
                    Ok(((r1 != 0) ^ (r2 != 0)) as i64)
                } else {
                    Err(Error::unsupported_operator(operator))
                }
            }

            Expr::Relation { left, operator, right } => {
                let r1 = left.evaluate()?;
                let r2 = right.evaluate()?;
                match operator.lexeme.as_str() {
                    "<" => Ok((r1 < r2) as i64),
                    "<=" => Ok((r1 <= r2) as i64),
                    ">" => Ok((r1 > r2) as i64),
                    ">=" => Ok((r1 >= r2) as i64),
                    "==" => Ok((r1 == r2) as i64),
                    "!=" | "/=" => Ok((r1 != r2) as i64),
                    // bare '=' tokenizes and parses but has no rule here
                    _ => Err(Error::unsupported_operator(operator)),
                }
            }

            Expr::Term { left, operator, right } => {
                let r1 = left.evaluate()?;
                let r2 = right.evaluate()?;
                match operator.lexeme.as_str() {
                    "+" => Ok(r1.wrapping_add(r2)),
                    "-" => Ok(r1.wrapping_sub(r2)),
                    _ => Err(Error::unsupported_operator(operator)),
                }
            }

            Expr::Factor { left, operator, right } => {
                let r1 = left.evaluate()?;
                let r2 = right.evaluate()?;
                match operator.lexeme.as_str() {
                    "*" => Ok(r1.wrapping_mul(r2)),
                    "/" => {
                        if r2 == 0 {
                            Err(Error::Arithmetic {
                                message: "Division by zero".to_string(),
                                span: operator.span.clone(),
                            })
                        } else {
                            Ok(r1.wrapping_div(r2))
                        }
                    }
                    _ => Err(Error::unsupported_operator(operator)),
                }
            }
        }
    }

    /// Renders the tree as JSON, one object per node.
    pub fn to_json(&self) -> Value {
        match self {
            Expr::Literal { value } => json!({ "type": "Literal", "value": value }),
            Expr::Grouping { expr } => json!({ "type": "Grouping", "expr": expr.to_json() }),
            Expr::Logical { left, operator, right } => {
                Self::binary_json("Logical", left, operator, right)
            }
            Expr::Relation { left, operator, right } => {
                Self::binary_json("Relation", left, operator, right)
            }
            Expr::Term { left, operator, right } => {
                Self::binary_json("Term", left, operator, right)
            }
            Expr::Factor { left, operator, right } => {
                Self::binary_json("Factor", left, operator, right)
            }
        }
    }

    fn binary_json(name: &str, left: &Expr, operator: &Token, right: &Expr) -> Value {
        json!({
            "type": name,
            "op": operator.lexeme,
            "left": left.to_json(),
            "right": right.to_json(),
        })
    }
}
