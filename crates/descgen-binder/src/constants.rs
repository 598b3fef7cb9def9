//! Constant evaluation of attribute arguments.

use std::fmt;

use descgen_parser::{BinaryOperator, Expression, UnaryOperator};

/// Value of an attribute argument after constant folding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstantValue {
    String(String),
    Char(String),
    /// Numeric literal text, sign included.
    Number(String),
    Boolean(bool),
    Null,
    /// `typeof(T)` argument, with the type text.
    Type(String),
    /// Not a constant the binder can evaluate; carries a short description.
    Unresolved(String),
}

impl ConstantValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the value's kind for messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Char(_) => "char",
            Self::Number(_) => "number",
            Self::Boolean(_) => "bool",
            Self::Null => "null",
            Self::Type(_) => "type",
            Self::Unresolved(_) => "non-constant expression",
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write!(f, "{value:?}"),
            Self::Char(value) => write!(f, "'{value}'"),
            Self::Number(text) => f.write_str(text),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
            Self::Type(text) => write!(f, "typeof({text})"),
            Self::Unresolved(text) => f.write_str(text),
        }
    }
}

/// Fold `expression` into a constant.
///
/// Supports the string-producing forms an attribute argument can take:
/// literals, `+` concatenation of strings and `null`, `nameof`,
/// parentheses and casts to `string`. Everything else is `Unresolved`.
#[must_use]
pub fn evaluate_constant(expression: &Expression) -> ConstantValue {
    match expression {
        Expression::String { value, .. } => ConstantValue::String(value.clone()),
        Expression::Character(value) => ConstantValue::Char(value.clone()),
        Expression::Number(text) => ConstantValue::Number(text.clone()),
        Expression::Boolean(value) => ConstantValue::Boolean(*value),
        Expression::Null => ConstantValue::Null,
        Expression::TypeOf(text) => ConstantValue::Type(text.clone()),
        Expression::Parenthesized(inner) => evaluate_constant(inner),
        Expression::NameOf(operand) => evaluate_nameof(operand),
        Expression::Cast { target, operand } => evaluate_cast(target, operand),
        Expression::Unary { operator, operand } => evaluate_unary(*operator, operand),
        Expression::Binary {
            left,
            operator: BinaryOperator::Add,
            right,
        } => evaluate_concatenation(&evaluate_constant(left), &evaluate_constant(right)),
        Expression::Binary { .. } => ConstantValue::Unresolved("arithmetic expression".into()),
        Expression::InterpolatedString(text) => ConstantValue::Unresolved(text.clone()),
        Expression::Default => ConstantValue::Unresolved("default".into()),
        Expression::Name(name) => ConstantValue::Unresolved(name.text.clone()),
        Expression::Other(text) => ConstantValue::Unresolved(text.clone()),
    }
}

fn evaluate_nameof(operand: &Expression) -> ConstantValue {
    match operand {
        Expression::Name(name) => match name.last() {
            Some(segment) => ConstantValue::String(segment.text.clone()),
            None => ConstantValue::Unresolved(name.text.clone()),
        },
        _ => ConstantValue::Unresolved("nameof operand".into()),
    }
}

fn evaluate_cast(target: &str, operand: &Expression) -> ConstantValue {
    let value = evaluate_constant(operand);
    let is_string_type = matches!(
        target,
        "string" | "String" | "System.String" | "global::System.String"
    );
    match value {
        ConstantValue::String(_) | ConstantValue::Null if is_string_type => value,
        _ => ConstantValue::Unresolved(format!("({target}) cast")),
    }
}

fn evaluate_unary(operator: UnaryOperator, operand: &Expression) -> ConstantValue {
    match (operator, evaluate_constant(operand)) {
        (UnaryOperator::Plus, ConstantValue::Number(text)) => ConstantValue::Number(text),
        (UnaryOperator::Minus, ConstantValue::Number(text)) => match text.strip_prefix('-') {
            Some(positive) => ConstantValue::Number(positive.to_string()),
            None => ConstantValue::Number(format!("-{text}")),
        },
        (UnaryOperator::Not, ConstantValue::Boolean(value)) => ConstantValue::Boolean(!value),
        _ => ConstantValue::Unresolved("unary expression".into()),
    }
}

/// `+` is a constant string concatenation when one side is a string and
/// the other a string or `null`.
fn evaluate_concatenation(left: &ConstantValue, right: &ConstantValue) -> ConstantValue {
    let is_string = |value: &ConstantValue| matches!(value, ConstantValue::String(_));
    if !is_string(left) && !is_string(right) {
        return ConstantValue::Unresolved("arithmetic expression".into());
    }
    let piece = |value: &ConstantValue| -> Option<String> {
        match value {
            ConstantValue::String(text) => Some(text.clone()),
            ConstantValue::Null => Some(String::new()),
            _ => None,
        }
    };
    match (piece(left), piece(right)) {
        (Some(mut joined), Some(tail)) => {
            joined.push_str(&tail);
            ConstantValue::String(joined)
        }
        _ => ConstantValue::Unresolved("string concatenation".into()),
    }
}
