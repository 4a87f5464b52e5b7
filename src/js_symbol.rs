use crate::core::{
    Gc, InternalSlot, JSObjectDataPtr, MutationContext, PropertyKey, SymbolData, Value, WellKnown, env_set, get_own_property,
    new_js_object_data, object_get_key_value, object_set_key_value, slot_get, slot_set, to_string_value,
};
use crate::error::JSError;
use crate::unicode::{utf16_to_utf8, utf8_to_utf16};

pub fn initialize_symbol<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<(), JSError> {
    let symbol_ctor = new_js_object_data(mc);

    slot_set(mc, &symbol_ctor, InternalSlot::IsConstructor, Value::Boolean(true));
    slot_set(mc, &symbol_ctor, InternalSlot::NativeCtor, Value::String(utf8_to_utf16("Symbol")));

    // Symbol.prototype, chained below Object.prototype
    let symbol_proto = new_js_object_data(mc);
    if let Some(obj_proto) = crate::js_object::object_prototype(env) {
        symbol_proto.borrow_mut(mc).prototype = Some(obj_proto);
    }

    object_set_key_value(mc, &symbol_ctor, "prototype", Value::Object(symbol_proto))?;
    symbol_ctor.borrow_mut(mc).set_non_enumerable("prototype".into());
    object_set_key_value(mc, &symbol_proto, "constructor", Value::Object(symbol_ctor))?;
    symbol_proto.borrow_mut(mc).set_non_enumerable("constructor".into());

    // Well-known symbols live on the constructor, non-enumerable and
    // non-writable like every other engine-created binding here.
    let well_knowns = [
        ("iterator", WellKnown::Iterator, "Symbol.iterator"),
        ("toPrimitive", WellKnown::ToPrimitive, "Symbol.toPrimitive"),
        ("toStringTag", WellKnown::ToStringTag, "Symbol.toStringTag"),
    ];
    for (prop, tag, description) in well_knowns {
        let sym = Gc::new(mc, SymbolData::well_known(tag, description));
        object_set_key_value(mc, &symbol_ctor, prop, Value::Symbol(sym))?;
        let mut ctor_data = symbol_ctor.borrow_mut(mc);
        ctor_data.set_non_enumerable(prop.into());
        ctor_data.set_non_writable(prop.into());
        ctor_data.set_non_configurable(prop.into());
    }

    // Prototype methods: the public, replaceable dispatch surface.
    let proto_methods = ["toString", "valueOf"];
    for method in proto_methods {
        let val = Value::Function(format!("Symbol.prototype.{method}"));
        object_set_key_value(mc, &symbol_proto, method, val)?;
        symbol_proto.borrow_mut(mc).set_non_enumerable(method.into());
    }

    // Symbol.prototype[@@toPrimitive] returns the wrapped plain symbol, so
    // ToPrimitive of a wrapper object yields the symbol back (and a later
    // ToNumber/ToString of that symbol throws where it should).
    if let Some(tp_sym) = get_own_symbol(&symbol_ctor, "toPrimitive") {
        let key = PropertyKey::Symbol(tp_sym);
        let val = Value::Function("Symbol.prototype[Symbol.toPrimitive]".to_string());
        object_set_key_value(mc, &symbol_proto, key.clone(), val)?;
        symbol_proto.borrow_mut(mc).set_non_enumerable(key);
    }

    // Symbol.for / Symbol.keyFor statics
    for static_fn in ["for", "keyFor"] {
        let val = Value::Function(format!("Symbol.{static_fn}"));
        object_set_key_value(mc, &symbol_ctor, static_fn, val)?;
        symbol_ctor.borrow_mut(mc).set_non_enumerable(static_fn.into());
    }

    // Realm-wide registry used by Symbol.for / Symbol.keyFor, reachable
    // only through a hidden slot on the global environment.
    let registry_obj = new_js_object_data(mc);
    slot_set(mc, env, InternalSlot::SymbolRegistry, Value::Object(registry_obj));

    env_set(mc, env, "Symbol", Value::Object(symbol_ctor))?;
    env.borrow_mut(mc).set_non_enumerable("Symbol".into());

    Ok(())
}

/// `Symbol(description?)`: a fresh, never-canonicalized symbol. A missing
/// or undefined argument means "no description"; a symbol argument dies on
/// the implicit ToString path (`Symbol(Symbol('foo'))` is a TypeError,
/// `Symbol(Symbol('foo').toString())` is not).
pub fn handle_symbol_call<'gc>(
    mc: &MutationContext<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let description = match args.first() {
        None | Some(Value::Undefined) => None,
        Some(Value::String(s)) => Some(utf16_to_utf8(s)),
        Some(other) => Some(utf16_to_utf8(&to_string_value(mc, other, env)?)),
    };

    let sym = Gc::new(mc, SymbolData::new(description));
    Ok(Value::Symbol(sym))
}

/// `Symbol.for(key?)`: the canonicalizing registry entry point. Unlike the
/// plain constructor, a missing or undefined argument coerces to the
/// literal string "undefined".
pub fn handle_symbol_for<'gc>(
    mc: &MutationContext<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let key = match args.first() {
        None | Some(Value::Undefined) => "undefined".to_string(),
        Some(Value::String(s)) => utf16_to_utf8(s),
        Some(other) => utf16_to_utf8(&to_string_value(mc, other, env)?),
    };

    let registry_obj = symbol_registry(mc, env);

    if let Some(val) = get_own_property(&registry_obj, &PropertyKey::from(&key))
        && let Value::Symbol(s) = &*val.borrow()
    {
        log::debug!("Symbol.for: registry hit for {key:?}");
        return Ok(Value::Symbol(*s));
    }

    log::debug!("Symbol.for: registry insert for {key:?}");
    let sym = Gc::new(mc, SymbolData::new(Some(key.clone())));
    object_set_key_value(mc, &registry_obj, key, Value::Symbol(sym))?;
    Ok(Value::Symbol(sym))
}

/// `Symbol.keyFor(sym)`: reverse registry lookup. Local and well-known
/// symbols (and non-symbol arguments) yield undefined, not an error.
pub fn handle_symbol_keyfor<'gc>(
    mc: &MutationContext<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let Some(Value::Symbol(sym)) = args.first() else {
        return Ok(Value::Undefined);
    };
    let registry_obj = symbol_registry(mc, env);
    for (k, v) in &registry_obj.borrow().properties {
        if let Value::Symbol(s2) = &*v.borrow()
            && Gc::ptr_eq(*sym, *s2)
            && let PropertyKey::String(key) = k
        {
            return Ok(Value::String(utf8_to_utf16(key)));
        }
    }
    Ok(Value::Undefined)
}

pub fn handle_symbol_tostring<'gc>(_mc: &MutationContext<'gc>, this_value: Value<'gc>) -> Result<Value<'gc>, JSError> {
    let sym = this_symbol_value(&this_value, "Symbol.prototype.toString")?;
    Ok(Value::String(utf8_to_utf16(&sym.descriptive_string())))
}

pub fn handle_symbol_valueof<'gc>(_mc: &MutationContext<'gc>, this_value: Value<'gc>) -> Result<Value<'gc>, JSError> {
    let sym = this_symbol_value(&this_value, "Symbol.prototype.valueOf")?;
    Ok(Value::Symbol(sym))
}

/// `@@toPrimitive`: the hint argument is ignored, the wrapped plain symbol
/// is returned for every hint.
pub fn handle_symbol_to_primitive<'gc>(
    _mc: &MutationContext<'gc>,
    this_value: Value<'gc>,
    _args: &[Value<'gc>],
) -> Result<Value<'gc>, JSError> {
    let sym = this_symbol_value(&this_value, "Symbol.prototype[Symbol.toPrimitive]")?;
    Ok(Value::Symbol(sym))
}

/// Resolve the symbol behind a method receiver: a plain symbol, or a
/// wrapper object whose internal value slot holds one. Anything else is an
/// incompatible receiver.
fn this_symbol_value<'gc>(this_value: &Value<'gc>, method: &str) -> Result<Gc<'gc, SymbolData>, JSError> {
    match this_value {
        Value::Symbol(s) => Ok(*s),
        Value::Object(obj) => {
            if let Some(val) = slot_get(obj, InternalSlot::PrimitiveValue)
                && let Value::Symbol(s) = &*val.borrow()
            {
                return Ok(*s);
            }
            Err(crate::raise_type_error!(format!("{method} called on incompatible receiver")))
        }
        _ => Err(crate::raise_type_error!(format!("{method} called on incompatible receiver"))),
    }
}

/// Fetch a well-known symbol (`"iterator"`, `"toPrimitive"`,
/// `"toStringTag"`) from the Symbol constructor in this realm.
pub fn get_well_known_symbol<'gc>(env: &JSObjectDataPtr<'gc>, name: &str) -> Option<Gc<'gc, SymbolData>> {
    let ctor_rc = object_get_key_value(env, "Symbol")?;
    let ctor_obj = match &*ctor_rc.borrow() {
        Value::Object(obj) => *obj,
        _ => return None,
    };
    get_own_symbol(&ctor_obj, name)
}

fn get_own_symbol<'gc>(obj: &JSObjectDataPtr<'gc>, name: &str) -> Option<Gc<'gc, SymbolData>> {
    let val = get_own_property(obj, &name.into())?;
    match &*val.borrow() {
        Value::Symbol(s) => Some(*s),
        _ => None,
    }
}

/// The registry object for this realm, creating it if an embedder wiped
/// the slot.
fn symbol_registry<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> JSObjectDataPtr<'gc> {
    if let Some(val) = slot_get(env, InternalSlot::SymbolRegistry)
        && let Value::Object(obj) = &*val.borrow()
    {
        return *obj;
    }
    let obj = new_js_object_data(mc);
    slot_set(mc, env, InternalSlot::SymbolRegistry, Value::Object(obj));
    obj
}
