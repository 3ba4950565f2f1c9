//! JSON literals for values.
//!
//! Integers become numbers, other JSON numbers become floats, arrays become
//! lists and objects become dicts. `true`, `false` and `null` map to the
//! special values. An object with a `"$func"` key describes a function
//! reference, optionally with bound `"$args"` and a `"$self"` dict.

use letop_core::value::format_float;
use letop_core::{Dict, FuncRef, List, Special, Value};
use serde_json::{Map, Value as Json};
use thiserror::Error;

const FUNC_KEY: &str = "$func";
const ARGS_KEY: &str = "$args";
const SELF_KEY: &str = "$self";

// Nesting beyond this is printed as a cycle marker.
const MAX_DEPTH: usize = 64;

#[derive(Error, Debug)]
pub enum LiteralError {
    #[error("{0}")]
    Syntax(#[from] serde_json::Error),
    #[error("integer {0} does not fit in 64 bits")]
    OutOfRange(String),
    #[error("malformed function literal: {0}")]
    Func(&'static str),
}

pub fn parse_literal(src: &str) -> Result<Value, LiteralError> {
    let json: Json = serde_json::from_str(src)?;
    from_json(&json)
}

pub fn from_json(json: &Json) -> Result<Value, LiteralError> {
    Ok(match json {
        Json::Null => Value::Special(Special::Null),
        Json::Bool(true) => Value::Special(Special::True),
        Json::Bool(false) => Value::Special(Special::False),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i)
            } else if n.is_u64() {
                return Err(LiteralError::OutOfRange(n.to_string()));
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => {
            let items = items.iter().map(from_json).collect::<Result<Vec<_>, _>>()?;
            Value::List(Some(List::from_vec(items)))
        }
        Json::Object(map) if map.contains_key(FUNC_KEY) => Value::Func(func_from_json(map)?),
        Json::Object(map) => Value::Dict(Some(dict_from_json(map)?)),
    })
}

fn dict_from_json(map: &Map<String, Json>) -> Result<Dict, LiteralError> {
    let d = Dict::new();
    for (k, v) in map {
        d.insert(k.clone(), from_json(v)?);
    }
    Ok(d)
}

fn func_from_json(map: &Map<String, Json>) -> Result<FuncRef, LiteralError> {
    if map.keys().any(|k| k != FUNC_KEY && k != ARGS_KEY && k != SELF_KEY) {
        return Err(LiteralError::Func("only $func, $args and $self are allowed"));
    }
    let name = match map.get(FUNC_KEY) {
        Some(Json::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(LiteralError::Func("$func must be a non-empty string")),
    };
    let args = match map.get(ARGS_KEY) {
        None => Vec::new(),
        Some(Json::Array(items)) => items.iter().map(from_json).collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(LiteralError::Func("$args must be an array")),
    };
    let dict = match map.get(SELF_KEY) {
        None => None,
        Some(Json::Object(m)) => Some(dict_from_json(m)?),
        Some(_) => return Err(LiteralError::Func("$self must be an object")),
    };
    Ok(FuncRef::partial(name, args, dict))
}

pub fn to_json(v: &Value) -> Json {
    to_json_at(v, 0)
}

fn to_json_at(v: &Value, depth: usize) -> Json {
    if depth > MAX_DEPTH {
        return Json::String("[...]".to_string());
    }
    match v {
        Value::Number(n) => Json::from(*n),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or_else(|| Json::String(format_float(*f))),
        Value::String(s) => Json::String(s.clone()),
        Value::List(None) => Json::Array(Vec::new()),
        Value::List(Some(l)) => Json::Array(l.items().iter().map(|it| to_json_at(it, depth + 1)).collect()),
        Value::Dict(None) => Json::Object(Map::new()),
        Value::Dict(Some(d)) => Json::Object(dict_to_json(d, depth)),
        Value::Func(func) => {
            let mut map = Map::new();
            map.insert(FUNC_KEY.to_string(), Json::String(func.name().to_string()));
            if !func.args().is_empty() {
                let args = func.args().iter().map(|a| to_json_at(a, depth + 1)).collect();
                map.insert(ARGS_KEY.to_string(), Json::Array(args));
            }
            if let Some(d) = func.dict() {
                map.insert(SELF_KEY.to_string(), Json::Object(dict_to_json(d, depth)));
            }
            Json::Object(map)
        }
        Value::Special(Special::True) => Json::Bool(true),
        Value::Special(Special::False) => Json::Bool(false),
        Value::Special(Special::Null) | Value::Unknown => Json::Null,
    }
}

fn dict_to_json(d: &Dict, depth: usize) -> Map<String, Json> {
    d.entries()
        .iter()
        .map(|(k, it)| (k.clone(), to_json_at(it, depth + 1)))
        .collect()
}
