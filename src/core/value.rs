use crate::core::{Collect, Collection, Gc, InternalSlot, JSObjectDataPtr, MutationContext, object_get_key_value, slot_get};
use crate::unicode::{utf8_to_utf16, utf16_to_utf8};
use crate::{JSError, raise_type_error};

/// Engine-defined symbols with special meaning in coercion and iteration
/// protocols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Collect)]
#[collect(require_static)]
pub enum WellKnown {
    Iterator,
    ToPrimitive,
    ToStringTag,
}

/// The backing allocation of a symbol value. Identity is the `Gc`
/// allocation itself: two `SymbolData` are the same symbol iff
/// `Gc::ptr_eq` holds, never by comparing descriptions.
#[derive(Clone, Debug, Collect)]
#[collect(require_static)]
pub struct SymbolData {
    /// `None` is "no description", distinct from `Some("")` even though
    /// both render as `Symbol()`.
    pub description: Option<String>,
    pub well_known: Option<WellKnown>,
}

impl SymbolData {
    pub fn new(description: Option<String>) -> Self {
        SymbolData {
            description,
            well_known: None,
        }
    }

    pub fn well_known(tag: WellKnown, description: &str) -> Self {
        SymbolData {
            description: Some(description.to_string()),
            well_known: Some(tag),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The internal `"Symbol(<description>)"` rendering. This is the
    /// non-overridable formatting path used by `String()` and diagnostics;
    /// it never dispatches through `Symbol.prototype`.
    pub fn descriptive_string(&self) -> String {
        match &self.description {
            Some(desc) => format!("Symbol({desc})"),
            None => "Symbol()".to_string(),
        }
    }
}

#[derive(Clone)]
pub enum Value<'gc> {
    Number(f64),
    String(Vec<u16>),
    Boolean(bool),
    Undefined,
    Null,
    Object(JSObjectDataPtr<'gc>),
    /// Built-in function, dispatched by name (see `core::invoke`).
    Function(String),
    Symbol(Gc<'gc, SymbolData>),
}

unsafe impl<'gc> Collect for Value<'gc> {
    fn trace(&self, cc: &Collection) {
        match self {
            Value::Object(obj) => obj.trace(cc),
            Value::Symbol(sym) => sym.trace(cc),
            _ => {}
        }
    }
}

impl Value<'_> {
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_))
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value<'_> {
    fn from(s: &str) -> Self {
        Value::String(utf8_to_utf16(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(utf8_to_utf16(&s))
    }
}

impl<'gc> std::fmt::Debug for Value<'gc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", utf16_to_utf8(s)),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Object(_) => write!(f, "Object"),
            Value::Function(s) => write!(f, "Function({})", s),
            Value::Symbol(sym) => write!(f, "{}", sym.descriptive_string()),
        }
    }
}

/// `typeof` classification. A wrapped symbol is an object.
pub fn type_of(val: &Value<'_>) -> &'static str {
    match val {
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Boolean(_) => "boolean",
        Value::Undefined => "undefined",
        Value::Null => "object",
        Value::Object(_) => "object",
        Value::Function(_) => "function",
        Value::Symbol(_) => "symbol",
    }
}

/// Strict (`===`) equality. Symbols compare by allocation identity only; a
/// primitive is never strictly equal to an object, wrapper or not.
pub fn strict_equals<'gc>(v1: &Value<'gc>, v2: &Value<'gc>) -> bool {
    match (v1, v2) {
        (Value::Number(n1), Value::Number(n2)) => n1 == n2,
        (Value::String(s1), Value::String(s2)) => s1 == s2,
        (Value::Boolean(b1), Value::Boolean(b2)) => b1 == b2,
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Object(o1), Value::Object(o2)) => Gc::ptr_eq(*o1, *o2),
        (Value::Function(f1), Value::Function(f2)) => f1 == f2,
        (Value::Symbol(s1), Value::Symbol(s2)) => Gc::ptr_eq(*s1, *s2),
        _ => false,
    }
}

/// Non-strict (`==`) equality. The interesting case for this engine core:
/// a wrapped symbol object compares equal to its underlying plain symbol,
/// because ToPrimitive of the wrapper yields the plain symbol back. Two
/// distinct symbols never compare equal under either operator.
pub fn loose_equals<'gc>(
    mc: &MutationContext<'gc>,
    v1: &Value<'gc>,
    v2: &Value<'gc>,
    env: &JSObjectDataPtr<'gc>,
) -> Result<bool, JSError> {
    match (v1, v2) {
        (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => Ok(true),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => Ok(*n == string_to_number(s)),
        (Value::Boolean(b), other) | (other, Value::Boolean(b)) if !matches!(other, Value::Boolean(_)) => {
            let n = if *b { 1.0 } else { 0.0 };
            loose_equals(mc, &Value::Number(n), other, env)
        }
        (Value::Object(obj), other) | (other, Value::Object(obj)) if other.is_primitive() && !other.is_null_or_undefined() => {
            let prim = to_primitive(mc, &Value::Object(*obj), "default", env)?;
            loose_equals(mc, &prim, other, env)
        }
        _ => Ok(strict_equals(v1, v2)),
    }
}

/// ToBoolean. Never throws; every symbol is truthy, including ones with no
/// description or an empty description.
pub fn to_boolean(val: &Value<'_>) -> bool {
    match val {
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Boolean(b) => *b,
        Value::Undefined | Value::Null => false,
        Value::Object(_) | Value::Function(_) | Value::Symbol(_) => true,
    }
}

/// ToNumber. Symbols throw unconditionally, as do wrapped symbols (their
/// ToPrimitive yields the plain symbol, which lands here again).
pub fn to_number<'gc>(mc: &MutationContext<'gc>, val: &Value<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<f64, JSError> {
    match val {
        Value::Number(n) => Ok(*n),
        Value::String(s) => Ok(string_to_number(s)),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Undefined => Ok(f64::NAN),
        Value::Null => Ok(0.0),
        Value::Symbol(_) => Err(raise_type_error!("Cannot convert a Symbol value to a number")),
        Value::Function(_) => Ok(f64::NAN),
        Value::Object(_) => {
            let prim = to_primitive(mc, val, "number", env)?;
            if matches!(prim, Value::Object(_)) {
                return Err(raise_type_error!("Cannot convert object to primitive value"));
            }
            to_number(mc, &prim, env)
        }
    }
}

/// The implicit ToString operation, as used by concatenation, template
/// interpolation and automatic stringification. This is the path that
/// rejects symbols; `String()`'s special plain-symbol formatting lives in
/// `js_string::handle_string_call` instead.
pub fn to_string_value<'gc>(mc: &MutationContext<'gc>, val: &Value<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<Vec<u16>, JSError> {
    match val {
        Value::Number(n) => Ok(utf8_to_utf16(&format_js_number(*n))),
        Value::String(s) => Ok(s.clone()),
        Value::Boolean(b) => Ok(utf8_to_utf16(&b.to_string())),
        Value::Undefined => Ok(utf8_to_utf16("undefined")),
        Value::Null => Ok(utf8_to_utf16("null")),
        Value::Function(name) => Ok(utf8_to_utf16(&format!("function {}", name))),
        Value::Symbol(_) => Err(raise_type_error!("Cannot convert a Symbol value to a string")),
        Value::Object(_) => {
            let prim = to_primitive(mc, val, "string", env)?;
            if matches!(prim, Value::Object(_)) {
                return Err(raise_type_error!("Cannot convert object to primitive value"));
            }
            to_string_value(mc, &prim, env)
        }
    }
}

/// ToPrimitive with a hint of `"string"`, `"number"` or `"default"`.
///
/// A plain symbol is already primitive and returns itself with no side
/// effects. An object first consults its `@@toPrimitive` property (which
/// `Symbol.prototype` provides, returning the wrapped plain symbol), then
/// falls back to the `valueOf` / `toString` protocol ordered by hint. The
/// methods are looked up through the normal property chain, so replacing
/// them on a prototype is observable here.
pub fn to_primitive<'gc>(
    mc: &MutationContext<'gc>,
    val: &Value<'gc>,
    hint: &str,
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let obj = match val {
        Value::Object(obj) => obj,
        _ => return Ok(val.clone()),
    };

    if let Some(tp_sym) = crate::js_symbol::get_well_known_symbol(env, "toPrimitive")
        && let Some(func_rc) = object_get_key_value(obj, crate::core::PropertyKey::Symbol(tp_sym))
    {
        let func_val = func_rc.borrow().clone();
        if !func_val.is_null_or_undefined() {
            log::debug!("to_primitive: dispatching @@toPrimitive with hint={hint}");
            let hint_arg = Value::String(utf8_to_utf16(hint));
            let res = crate::core::call_function(mc, &func_val, Some(val), std::slice::from_ref(&hint_arg), env)?;
            if res.is_primitive() {
                return Ok(res);
            }
            return Err(raise_type_error!("@@toPrimitive must return a primitive value"));
        }
    }

    let order: [&str; 2] = if hint == "string" {
        ["toString", "valueOf"]
    } else {
        ["valueOf", "toString"]
    };
    for method in order {
        if let Some(method_rc) = object_get_key_value(obj, method) {
            let method_val = method_rc.borrow().clone();
            if method_val.is_null_or_undefined() {
                continue;
            }
            log::debug!("to_primitive: trying {method} for obj={:p}", Gc::as_ptr(*obj));
            let res = crate::core::call_function(mc, &method_val, Some(val), &[], env)?;
            if res.is_primitive() {
                return Ok(res);
            }
        }
    }

    Err(raise_type_error!("Cannot convert object to primitive value"))
}

/// Internal, infallible value rendering used by diagnostics and by
/// `String()`'s plain-symbol special case. Not a coercion: never consults
/// user-visible (and therefore replaceable) prototype methods.
pub fn value_to_string<'gc>(val: &Value<'gc>) -> String {
    match val {
        Value::Number(n) => format_js_number(*n),
        Value::String(s) => utf16_to_utf8(s),
        Value::Boolean(b) => b.to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Object(obj) => {
            if let Some(wrapped) = slot_get(obj, InternalSlot::PrimitiveValue) {
                return value_to_string(&wrapped.borrow());
            }
            "[object Object]".to_string()
        }
        Value::Function(name) => format!("function {}", name),
        Value::Symbol(sym) => sym.descriptive_string(),
    }
}

pub fn format_js_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n.is_sign_negative() { "-Infinity" } else { "Infinity" }.to_string();
    }
    // ECMAScript ToString(-0) is "0"
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    // Exponential form for very large or very small magnitudes
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{:e}", n);
        if let Some((mant, exp)) = s.split_once('e') {
            let mant = mant.trim_end_matches('0').trim_end_matches('.');
            if let Ok(exp_int) = exp.parse::<i32>() {
                return format!("{}e{:+}", mant, exp_int);
            }
        }
        return s;
    }
    let mut s = format!("{}", n);
    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    s
}

fn string_to_number(s: &[u16]) -> f64 {
    let text = utf16_to_utf8(s);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(format_js_number(0.0), "0");
        assert_eq!(format_js_number(-0.0), "0");
        assert_eq!(format_js_number(123.0), "123");
        assert_eq!(format_js_number(1.5), "1.5");
        assert_eq!(format_js_number(f64::NAN), "NaN");
        assert_eq!(format_js_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn descriptive_string_rendering() {
        assert_eq!(SymbolData::new(None).descriptive_string(), "Symbol()");
        assert_eq!(SymbolData::new(Some(String::new())).descriptive_string(), "Symbol()");
        assert_eq!(SymbolData::new(Some("foo".into())).descriptive_string(), "Symbol(foo)");
    }

    #[test]
    fn no_description_is_distinct_from_empty() {
        let anon = SymbolData::new(None);
        let empty = SymbolData::new(Some(String::new()));
        assert_ne!(anon.description(), empty.description());
        // ...but the rendering is identical, so the difference is not
        // observable through any public operation.
        assert_eq!(anon.descriptive_string(), empty.descriptive_string());
    }
}
