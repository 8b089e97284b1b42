//! Option declarations, typed destinations and value accumulation.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

// ============================================================================
// Kind / Arity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    NegatableBoolean,
    String,
    Integer,
    StringList,
    StringMap,
}

impl Kind {
    fn expected(self) -> &'static str {
        match self {
            Kind::Boolean | Kind::NegatableBoolean => "bool",
            Kind::String => "String",
            Kind::Integer => "i64",
            Kind::StringList => "Vec<String>",
            Kind::StringMap => "BTreeMap<String, String>",
        }
    }
}

/// How many values an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Required,
    /// Takes a value if one is available, otherwise falls back to the default.
    Optional,
}

// ============================================================================
// Value — typed result of one option
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Map(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

/// Conversion from a stored `Value` into a plain Rust type.
pub trait FromValue: Sized {
    const EXPECTED: &'static str;

    fn from_value(v: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "String";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "i64";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for Vec<String> {
    const EXPECTED: &'static str = "Vec<String>";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl FromValue for BTreeMap<String, String> {
    const EXPECTED: &'static str = "BTreeMap<String, String>";

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Map(map) => Some(map.clone()),
            _ => None,
        }
    }
}

// ============================================================================
// Slot — owned or caller-bound destination
// ============================================================================

/// Where an option writes its value.
///
/// `Bound` holds the caller's exclusive reference for as long as the parser
/// lives, so the accumulator is the only writer.
#[derive(Debug)]
pub(crate) enum Slot<'a, T> {
    Owned(T),
    Bound(&'a mut T),
}

impl<T> Slot<'_, T> {
    fn get(&self) -> &T {
        match self {
            Slot::Owned(v) => v,
            Slot::Bound(r) => &**r,
        }
    }

    fn get_mut(&mut self) -> &mut T {
        match self {
            Slot::Owned(v) => v,
            Slot::Bound(r) => &mut **r,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Storage<'a> {
    Bool(Slot<'a, bool>),
    Str(Slot<'a, String>),
    Int(Slot<'a, i64>),
    List(Slot<'a, Vec<String>>),
    Map(Slot<'a, BTreeMap<String, String>>),
}

/// Bind `dest` after writing the initial value into it.
fn bind<T>(dest: &mut T, initial: T) -> Slot<'_, T> {
    *dest = initial;
    Slot::Bound(dest)
}

// ============================================================================
// Opt — option declaration builder
// ============================================================================

/// Declaration of one option.
///
/// The `*_var` constructors bind a caller-owned variable; the variable is set
/// to the default right away and receives every parsed value.
#[derive(Debug)]
pub struct Opt<'a> {
    name: String,
    aliases: Vec<String>,
    kind: Kind,
    arity: Arity,
    default: Value,
    storage: Storage<'a>,
}

impl<'a> Opt<'a> {
    fn with(name: &str, kind: Kind, arity: Arity, default: Value, storage: Storage<'a>) -> Self {
        Opt {
            name: name.to_string(),
            aliases: Vec::new(),
            kind,
            arity,
            default,
            storage,
        }
    }

    pub fn bool(name: &str, default: bool) -> Self {
        let storage = Storage::Bool(Slot::Owned(default));
        Self::with(name, Kind::Boolean, Arity::None, Value::Bool(default), storage)
    }

    pub fn bool_var(dest: &'a mut bool, name: &str, default: bool) -> Self {
        let storage = Storage::Bool(bind(dest, default));
        Self::with(name, Kind::Boolean, Arity::None, Value::Bool(default), storage)
    }

    /// Boolean that also answers to `--no-<name>`, which sets it to false.
    pub fn negatable(name: &str, default: bool) -> Self {
        let storage = Storage::Bool(Slot::Owned(default));
        Self::with(name, Kind::NegatableBoolean, Arity::None, Value::Bool(default), storage)
    }

    pub fn negatable_var(dest: &'a mut bool, name: &str, default: bool) -> Self {
        let storage = Storage::Bool(bind(dest, default));
        Self::with(name, Kind::NegatableBoolean, Arity::None, Value::Bool(default), storage)
    }

    pub fn string(name: &str, default: &str) -> Self {
        let storage = Storage::Str(Slot::Owned(default.to_string()));
        Self::with(name, Kind::String, Arity::Required, Value::Str(default.to_string()), storage)
    }

    pub fn string_var(dest: &'a mut String, name: &str, default: &str) -> Self {
        let storage = Storage::Str(bind(dest, default.to_string()));
        Self::with(name, Kind::String, Arity::Required, Value::Str(default.to_string()), storage)
    }

    pub fn string_optional(name: &str, default: &str) -> Self {
        Self::string(name, default).optional()
    }

    pub fn string_var_optional(dest: &'a mut String, name: &str, default: &str) -> Self {
        Self::string_var(dest, name, default).optional()
    }

    pub fn int(name: &str, default: i64) -> Self {
        let storage = Storage::Int(Slot::Owned(default));
        Self::with(name, Kind::Integer, Arity::Required, Value::Int(default), storage)
    }

    pub fn int_var(dest: &'a mut i64, name: &str, default: i64) -> Self {
        let storage = Storage::Int(bind(dest, default));
        Self::with(name, Kind::Integer, Arity::Required, Value::Int(default), storage)
    }

    pub fn int_optional(name: &str, default: i64) -> Self {
        Self::int(name, default).optional()
    }

    pub fn int_var_optional(dest: &'a mut i64, name: &str, default: i64) -> Self {
        Self::int_var(dest, name, default).optional()
    }

    /// Repeatable option collecting every value in input order.
    pub fn string_list(name: &str) -> Self {
        let storage = Storage::List(Slot::Owned(Vec::new()));
        Self::with(name, Kind::StringList, Arity::Required, Value::List(Vec::new()), storage)
    }

    pub fn string_list_var(dest: &'a mut Vec<String>, name: &str) -> Self {
        let storage = Storage::List(bind(dest, Vec::new()));
        Self::with(name, Kind::StringList, Arity::Required, Value::List(Vec::new()), storage)
    }

    /// Repeatable `key=value` option; a later key overwrites an earlier one.
    pub fn string_map(name: &str) -> Self {
        let storage = Storage::Map(Slot::Owned(BTreeMap::new()));
        Self::with(name, Kind::StringMap, Arity::Required, Value::Map(BTreeMap::new()), storage)
    }

    pub fn string_map_var(dest: &'a mut BTreeMap<String, String>, name: &str) -> Self {
        let storage = Storage::Map(bind(dest, BTreeMap::new()));
        Self::with(name, Kind::StringMap, Arity::Required, Value::Map(BTreeMap::new()), storage)
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    fn optional(mut self) -> Self {
        self.arity = Arity::Optional;
        self
    }

    pub(crate) fn into_def(self) -> OptionDef<'a> {
        OptionDef {
            name: self.name,
            aliases: self.aliases,
            kind: self.kind,
            arity: self.arity,
            default: self.default,
            storage: self.storage,
        }
    }
}

// ============================================================================
// OptionDef — registered option
// ============================================================================

/// A value handed from the consumer to the accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Flag,
    Text(String),
    Int(i64),
}

#[derive(Debug)]
pub(crate) struct OptionDef<'a> {
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) kind: Kind,
    pub(crate) arity: Arity,
    pub(crate) default: Value,
    storage: Storage<'a>,
}

impl OptionDef<'_> {
    pub(crate) fn takes_value(&self) -> bool {
        self.arity != Arity::None
    }

    /// Current content of the destination.
    pub(crate) fn value(&self) -> Value {
        match &self.storage {
            Storage::Bool(slot) => Value::Bool(*slot.get()),
            Storage::Str(slot) => Value::Str(slot.get().clone()),
            Storage::Int(slot) => Value::Int(*slot.get()),
            Storage::List(slot) => Value::List(slot.get().clone()),
            Storage::Map(slot) => Value::Map(slot.get().clone()),
        }
    }

    /// Put the declared default back into the destination, owned or bound.
    pub(crate) fn reset(&mut self) {
        match (&mut self.storage, &self.default) {
            (Storage::Bool(slot), Value::Bool(b)) => *slot.get_mut() = *b,
            (Storage::Str(slot), Value::Str(s)) => slot.get_mut().clone_from(s),
            (Storage::Int(slot), Value::Int(n)) => *slot.get_mut() = *n,
            (Storage::List(slot), Value::List(l)) => slot.get_mut().clone_from(l),
            (Storage::Map(slot), Value::Map(m)) => slot.get_mut().clone_from(m),
            _ => {}
        }
    }

    /// Merge one occurrence into the destination.
    pub(crate) fn accumulate(&mut self, negated: bool, input: Input) -> Result<()> {
        match (&mut self.storage, input) {
            (Storage::Bool(slot), Input::Flag) => *slot.get_mut() = !negated,
            (Storage::Str(slot), Input::Text(s)) => *slot.get_mut() = s,
            (Storage::Int(slot), Input::Int(n)) => *slot.get_mut() = n,
            (Storage::List(slot), Input::Text(s)) => slot.get_mut().push(s),
            (Storage::Map(slot), Input::Text(s)) => {
                let (key, value) = s.split_once('=').ok_or_else(|| Error::MalformedMapEntry {
                    name: self.name.clone(),
                    literal: s.clone(),
                })?;
                slot.get_mut().insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(Error::TypeMismatch {
                    name: self.name.clone(),
                    expected: self.kind.expected(),
                })
            }
        }
        Ok(())
    }
}
