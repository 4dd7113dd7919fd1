use std::{
    fmt::{Display, Formatter},
    hash::Hash,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conversion between a mutable value and its immutable, hashable form.
///
/// Field values are frozen before they take part in a diff, so that two
/// values compare equal exactly when their frozen forms do, and thawed again
/// when a document is restored from its tokens. `thaw(freeze(v))` must give
/// back `v` unchanged.
pub trait Freeze {
    type Frozen: Eq + Hash + Clone;

    fn freeze(&self) -> Self::Frozen;

    fn thaw(frozen: &Self::Frozen) -> Self;
}

/// An attribute value as stored in a `Document`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

/// The frozen form of a `Value`. Lists become fixed-length tuples and floats
/// are compared by their bit pattern.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrozenValue {
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(Box<str>),
    Tuple(Box<[FrozenValue]>),
}

impl<T> Freeze for Vec<T>
where
    T: Freeze,
{
    type Frozen = Box<[T::Frozen]>;

    fn freeze(&self) -> Self::Frozen { self.iter().map(Freeze::freeze).collect() }

    fn thaw(frozen: &Self::Frozen) -> Self { frozen.iter().map(T::thaw).collect() }
}

impl Freeze for Value {
    type Frozen = FrozenValue;

    fn freeze(&self) -> FrozenValue {
        match self {
            Value::Bool(value) => FrozenValue::Bool(*value),
            Value::Int(value) => FrozenValue::Int(*value),
            Value::Float(value) => FrozenValue::Float(value.to_bits()),
            Value::Text(text) => FrozenValue::Text(text.as_str().into()),
            Value::List(items) => FrozenValue::Tuple(items.freeze()),
        }
    }

    fn thaw(frozen: &FrozenValue) -> Self {
        match frozen {
            FrozenValue::Bool(value) => Value::Bool(*value),
            FrozenValue::Int(value) => Value::Int(*value),
            FrozenValue::Float(bits) => Value::Float(f64::from_bits(*bits)),
            FrozenValue::Text(text) => Value::Text(text.to_string()),
            FrozenValue::Tuple(items) => Value::List(Vec::thaw(items)),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(text) => write!(f, "{text:?}"),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Value::Bool(value) }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self { Value::Int(value) }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self { Value::Float(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::Text(value.to_owned()) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Value::Text(value) }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self { Value::List(items.into_iter().map(Into::into).collect()) }
}
