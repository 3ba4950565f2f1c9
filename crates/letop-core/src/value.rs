//! Runtime values of the script interpreter.
//!
//! Scalars (`Number`, `Float`, `String`) are owned by the slot that holds
//! them. Lists and dicts are handles over shared, interior-mutable storage:
//! cloning a [`Value::List`] aliases the same sequence, and a mutation made
//! through one handle is observed through every other.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer
    Number(i64),
    /// A double-precision float
    Float(f64),
    /// An owned string
    String(String),
    /// A shared list; `None` is the null list
    List(Option<List>),
    /// A shared dictionary; `None` is the null dict
    Dict(Option<Dict>),
    /// A function reference or partial application
    Func(FuncRef),
    /// `v:false`, `v:true` or `v:null`
    Special(Special),
    /// Sentinel of a slot that has never been assigned
    Unknown,
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Some(List::from_vec(items)))
    }

    pub fn null_list() -> Self {
        Value::List(None)
    }

    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let d = Dict::new();
        for (k, v) in entries {
            d.insert(k, v);
        }
        Value::Dict(Some(d))
    }

    pub fn null_dict() -> Self {
        Value::Dict(None)
    }

    pub fn func(name: impl Into<String>) -> Self {
        Value::Func(FuncRef::named(name))
    }

    /// Lowercase variant name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Func(_) => "func",
            Value::Special(_) => "special",
            Value::Unknown => "unknown",
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Special> for Value {
    fn from(s: Special) -> Self {
        Value::Special(s)
    }
}

/// Tri-state marker values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    False,
    True,
    Null,
}

impl Special {
    pub fn name(self) -> &'static str {
        match self {
            Special::False => "v:false",
            Special::True => "v:true",
            Special::Null => "v:null",
        }
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a shared, mutable sequence of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        List(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn push(&self, v: Value) {
        self.0.borrow_mut().push(v);
    }

    pub fn get(&self, idx: usize) -> Option<Value> {
        self.0.borrow().get(idx).cloned()
    }

    /// Shallow copy of the elements; nested containers stay shared.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// True when both handles alias the same sequence.
    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Appends a handle-preserving copy of every element of `other`.
    ///
    /// Extending a list with itself appends its original elements once.
    pub fn extend_from(&self, other: &List) {
        if self.ptr_eq(other) {
            let snapshot = self.to_vec();
            self.0.borrow_mut().extend(snapshot);
        } else {
            let src = other.0.borrow();
            self.0.borrow_mut().extend(src.iter().cloned());
        }
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

/// Handle to a shared, mutable key-ordered mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dict(Rc<RefCell<BTreeMap<String, Value>>>);

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, v: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), v)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn entries(&self) -> Ref<'_, BTreeMap<String, Value>> {
        self.0.borrow()
    }

    pub fn ptr_eq(&self, other: &Dict) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

/// Reference to a callable, optionally with bound arguments and `self` dict.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncRef {
    name: String,
    args: Vec<Value>,
    dict: Option<Dict>,
}

impl FuncRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: Vec::new(), dict: None }
    }

    pub fn partial(name: impl Into<String>, args: Vec<Value>, dict: Option<Dict>) -> Self {
        Self { name: name.into(), args, dict }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn dict(&self) -> Option<&Dict> {
        self.dict.as_ref()
    }

    pub fn is_partial(&self) -> bool {
        !self.args.is_empty() || self.dict.is_some()
    }
}

/// Formats a float so that it always reads back as a float.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    let s = format!("{}", f);
    if s.contains('.') || s.contains('e') {
        s
    } else {
        format!("{}.0", s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            other => Printer::default().write(f, other),
        }
    }
}

/// Container printer that cuts reference cycles short with `[...]`/`{...}`.
#[derive(Default)]
struct Printer {
    open: Vec<*const ()>,
}

impl Printer {
    fn write(&mut self, f: &mut fmt::Formatter<'_>, v: &Value) -> fmt::Result {
        match v {
            Value::Number(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::List(None) => f.write_str("[]"),
            Value::List(Some(l)) => {
                if self.open.contains(&l.addr()) {
                    return f.write_str("[...]");
                }
                self.open.push(l.addr());
                f.write_str("[")?;
                for (i, it) in l.items().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    self.write(f, it)?;
                }
                self.open.pop();
                f.write_str("]")
            }
            Value::Dict(None) => f.write_str("{}"),
            Value::Dict(Some(d)) => {
                if self.open.contains(&d.addr()) {
                    return f.write_str("{...}");
                }
                self.open.push(d.addr());
                f.write_str("{")?;
                for (i, (k, it)) in d.entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{}': ", k.replace('\'', "''"))?;
                    self.write(f, it)?;
                }
                self.open.pop();
                f.write_str("}")
            }
            Value::Func(func) => {
                write!(f, "function('{}'", func.name())?;
                if !func.args().is_empty() {
                    f.write_str(", [")?;
                    for (i, a) in func.args().iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        self.write(f, a)?;
                    }
                    f.write_str("]")?;
                }
                if let Some(d) = func.dict() {
                    f.write_str(", ")?;
                    self.write(f, &Value::Dict(Some(d.clone())))?;
                }
                f.write_str(")")
            }
            Value::Special(s) => write!(f, "{}", s),
            Value::Unknown => f.write_str("<unknown>"),
        }
    }
}
