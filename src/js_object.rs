use crate::core::{
    Gc, InternalSlot, JSObjectDataPtr, MutationContext, PropertyDescriptor, PropertyKey, Value, define_property_internal, env_set,
    get_own_property, new_js_object_data, object_get_key_value, object_set_key_value, property_key_from_value,
    set_internal_prototype_from_constructor, slot_get, slot_set,
};
use crate::error::JSError;
use crate::unicode::{utf8_to_utf16, utf16_len, utf16_to_utf8};
use crate::raise_type_error;

pub fn initialize_object_module<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<(), JSError> {
    let object_ctor = new_js_object_data(mc);
    slot_set(mc, &object_ctor, InternalSlot::IsConstructor, Value::Boolean(true));
    slot_set(mc, &object_ctor, InternalSlot::NativeCtor, Value::String(utf8_to_utf16("Object")));

    let object_proto = new_js_object_data(mc);
    object_set_key_value(mc, &object_ctor, "prototype", Value::Object(object_proto))?;
    object_ctor.borrow_mut(mc).set_non_enumerable("prototype".into());
    object_set_key_value(mc, &object_proto, "constructor", Value::Object(object_ctor))?;
    object_proto.borrow_mut(mc).set_non_enumerable("constructor".into());

    for method in ["toString", "valueOf", "hasOwnProperty", "propertyIsEnumerable"] {
        let val = Value::Function(format!("Object.prototype.{method}"));
        object_set_key_value(mc, &object_proto, method, val)?;
        object_proto.borrow_mut(mc).set_non_enumerable(method.into());
    }

    for static_fn in ["defineProperty", "getPrototypeOf", "setPrototypeOf"] {
        let val = Value::Function(format!("Object.{static_fn}"));
        object_set_key_value(mc, &object_ctor, static_fn, val)?;
        object_ctor.borrow_mut(mc).set_non_enumerable(static_fn.into());
    }

    env_set(mc, env, "Object", Value::Object(object_ctor))?;
    env.borrow_mut(mc).set_non_enumerable("Object".into());
    Ok(())
}

/// `Object.prototype` for this realm, if the realm is initialized.
pub fn object_prototype<'gc>(env: &JSObjectDataPtr<'gc>) -> Option<JSObjectDataPtr<'gc>> {
    let ctor_rc = object_get_key_value(env, "Object")?;
    let ctor_obj = match &*ctor_rc.borrow() {
        Value::Object(obj) => *obj,
        _ => return None,
    };
    let proto_rc = object_get_key_value(&ctor_obj, "prototype")?;
    match &*proto_rc.borrow() {
        Value::Object(proto) => Some(*proto),
        _ => None,
    }
}

/// A fresh ordinary object chained below `Object.prototype`.
pub fn new_plain_object<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> JSObjectDataPtr<'gc> {
    let obj = new_js_object_data(mc);
    obj.borrow_mut(mc).prototype = object_prototype(env);
    obj
}

/// `Object(value)`: the ToObject entry point. Objects pass through
/// unchanged (wrapping is idempotent); null/undefined/missing make a fresh
/// plain object; primitives are boxed.
pub fn handle_object_call<'gc>(
    mc: &MutationContext<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    match args.first() {
        None | Some(Value::Undefined) | Some(Value::Null) => Ok(Value::Object(new_plain_object(mc, env))),
        Some(Value::Object(obj)) => Ok(Value::Object(*obj)),
        Some(primitive) => Ok(Value::Object(to_object(mc, primitive, env)?)),
    }
}

/// Box a primitive into its wrapper object. The wrapper holds the
/// primitive in an internal value slot and inherits the matching
/// prototype. A symbol wrapper gets no `length` and no index properties;
/// symbols are not strings, however their descriptions read.
pub fn to_object<'gc>(mc: &MutationContext<'gc>, val: &Value<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<JSObjectDataPtr<'gc>, JSError> {
    match val {
        Value::Object(obj) => Ok(*obj),
        Value::Undefined => Err(raise_type_error!("Cannot convert undefined to object")),
        Value::Null => Err(raise_type_error!("Cannot convert null to object")),
        Value::Symbol(sym) => {
            let obj = new_js_object_data(mc);
            slot_set(mc, &obj, InternalSlot::PrimitiveValue, Value::Symbol(*sym));
            set_internal_prototype_from_constructor(mc, &obj, env, "Symbol")?;
            Ok(obj)
        }
        Value::Number(n) => {
            let obj = new_js_object_data(mc);
            slot_set(mc, &obj, InternalSlot::PrimitiveValue, Value::Number(*n));
            set_internal_prototype_from_constructor(mc, &obj, env, "Number")?;
            Ok(obj)
        }
        Value::Boolean(b) => {
            let obj = new_js_object_data(mc);
            slot_set(mc, &obj, InternalSlot::PrimitiveValue, Value::Boolean(*b));
            set_internal_prototype_from_constructor(mc, &obj, env, "Boolean")?;
            Ok(obj)
        }
        Value::String(s) => {
            let obj = new_js_object_data(mc);
            slot_set(mc, &obj, InternalSlot::PrimitiveValue, Value::String(s.clone()));
            object_set_key_value(mc, &obj, "length", Value::Number(utf16_len(s) as f64))?;
            obj.borrow_mut(mc).set_non_enumerable("length".into());
            set_internal_prototype_from_constructor(mc, &obj, env, "String")?;
            Ok(obj)
        }
        Value::Function(_) => Ok(new_plain_object(mc, env)),
    }
}

/// `Object.prototype.toString.call(x)`: the `"[object Class]"` brand.
/// Plain and wrapped symbols both report `"[object Symbol]"`; ordinary
/// objects honor a string-valued `@@toStringTag` property.
pub fn handle_object_to_string<'gc>(
    _mc: &MutationContext<'gc>,
    this: Option<&Value<'gc>>,
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let tag = match this {
        None | Some(Value::Undefined) => "Undefined".to_string(),
        Some(Value::Null) => "Null".to_string(),
        Some(Value::Number(_)) => "Number".to_string(),
        Some(Value::String(_)) => "String".to_string(),
        Some(Value::Boolean(_)) => "Boolean".to_string(),
        Some(Value::Symbol(_)) => "Symbol".to_string(),
        Some(Value::Function(_)) => "Function".to_string(),
        Some(Value::Object(obj)) => classify_object(obj, env),
    };
    Ok(Value::String(utf8_to_utf16(&format!("[object {tag}]"))))
}

fn classify_object<'gc>(obj: &JSObjectDataPtr<'gc>, env: &JSObjectDataPtr<'gc>) -> String {
    if let Some(wrapped) = slot_get(obj, InternalSlot::PrimitiveValue) {
        let brand = match &*wrapped.borrow() {
            Value::Symbol(_) => Some("Symbol"),
            Value::Number(_) => Some("Number"),
            Value::String(_) => Some("String"),
            Value::Boolean(_) => Some("Boolean"),
            _ => None,
        };
        if let Some(brand) = brand {
            return brand.to_string();
        }
    }
    if slot_get(obj, InternalSlot::IsConstructor).is_some() {
        return "Function".to_string();
    }
    if let Some(tag_sym) = crate::js_symbol::get_well_known_symbol(env, "toStringTag")
        && let Some(tag_rc) = object_get_key_value(obj, PropertyKey::Symbol(tag_sym))
        && let Value::String(s) = &*tag_rc.borrow()
    {
        return utf16_to_utf8(s);
    }
    "Object".to_string()
}

/// `Object.defineProperty(target, key, descriptor)`. The key may be a
/// string, a plain symbol, or a wrapped symbol object; plain and wrapped
/// forms resolve to the identical slot.
pub fn handle_define_property<'gc>(
    mc: &MutationContext<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    if args.len() < 3 {
        return Err(raise_type_error!("Object.defineProperty requires three arguments"));
    }
    let Value::Object(target) = &args[0] else {
        return Err(raise_type_error!("Object.defineProperty called on non-object"));
    };
    let key = property_key_from_value(mc, &args[1], env)?;
    let Value::Object(desc_obj) = &args[2] else {
        return Err(raise_type_error!("Property description must be an object"));
    };
    let desc = PropertyDescriptor::from_object(desc_obj);
    define_property_internal(mc, target, key, &desc)?;
    Ok(args[0].clone())
}

pub fn handle_has_own_property<'gc>(
    mc: &MutationContext<'gc>,
    this: Option<&Value<'gc>>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let Some(Value::Object(obj)) = this else {
        return Err(raise_type_error!("Object.prototype.hasOwnProperty called on non-object"));
    };
    let key = property_key_from_value(mc, args.first().unwrap_or(&Value::Undefined), env)?;
    if key.is_hidden() {
        return Ok(Value::Boolean(false));
    }
    Ok(Value::Boolean(get_own_property(obj, &key).is_some()))
}

pub fn handle_property_is_enumerable<'gc>(
    mc: &MutationContext<'gc>,
    this: Option<&Value<'gc>>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let Some(Value::Object(obj)) = this else {
        return Err(raise_type_error!("Object.prototype.propertyIsEnumerable called on non-object"));
    };
    let key = property_key_from_value(mc, args.first().unwrap_or(&Value::Undefined), env)?;
    if key.is_hidden() {
        return Ok(Value::Boolean(false));
    }
    let present = get_own_property(obj, &key).is_some();
    Ok(Value::Boolean(present && obj.borrow().is_enumerable(&key)))
}

/// `Object.setPrototypeOf(obj, proto)`.
pub fn handle_set_prototype_of<'gc>(mc: &MutationContext<'gc>, args: &[Value<'gc>]) -> Result<Value<'gc>, JSError> {
    let Some(Value::Object(obj)) = args.first() else {
        return Err(raise_type_error!("Object.setPrototypeOf called on non-object"));
    };
    match args.get(1) {
        Some(Value::Object(proto)) => {
            // Reject prototype cycles before linking.
            let mut current = Some(*proto);
            while let Some(cur) = current {
                if Gc::ptr_eq(cur, *obj) {
                    return Err(raise_type_error!("Cyclic __proto__ value"));
                }
                current = cur.borrow().prototype;
            }
            obj.borrow_mut(mc).prototype = Some(*proto);
        }
        Some(Value::Null) => obj.borrow_mut(mc).prototype = None,
        _ => return Err(raise_type_error!("Object prototype may only be an Object or null")),
    }
    Ok(args[0].clone())
}

pub fn handle_get_prototype_of<'gc>(_mc: &MutationContext<'gc>, args: &[Value<'gc>]) -> Result<Value<'gc>, JSError> {
    let Some(Value::Object(obj)) = args.first() else {
        return Err(raise_type_error!("Object.getPrototypeOf called on non-object"));
    };
    Ok(match obj.borrow().prototype {
        Some(proto) => Value::Object(proto),
        None => Value::Null,
    })
}
