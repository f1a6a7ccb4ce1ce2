//! Runtime value representation.

use std::fmt;
use std::rc::Rc;

use ahash::RandomState;
use hashbrown::HashMap;

use super::heap::ObjRef;

/// Interned-by-construction identifier or string payload.
pub type Name = Rc<str>;

pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

#[inline]
pub fn fast_map_new<K, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(RandomState::new())
}

#[derive(Clone, Debug)]
pub enum Value {
    Undefined,
    Int(i64),
    Str(Name),
    Object(ObjRef),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_obj(&self) -> Option<&ObjRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// `+` operator. Strings concatenate with the display form of the other
    /// side; the `Err` message becomes a thrown value.
    pub fn add(&self, rhs: &Value) -> Result<Value, String> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(*b)
                .map(Value::Int)
                .ok_or_else(|| "RangeError: integer overflow".to_string()),
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Ok(Value::Str(Rc::from(format!("{self}{rhs}"))))
            }
            _ => Err(format!(
                "TypeError: cannot add {} and {}",
                self.type_name(),
                rhs.type_name()
            )),
        }
    }
}

/// Objects compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Int(i) => f.write_str(itoa::Buffer::new().format(*i)),
            Value::Str(s) => f.write_str(s),
            Value::Object(o) => write!(f, "[object {}#{}]", o.tag(), o.id().0),
        }
    }
}
