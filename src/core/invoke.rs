use crate::core::{InternalSlot, JSObjectDataPtr, MutationContext, Value, env_get, object_get_key_value, slot_get};
use crate::unicode::utf16_to_utf8;
use crate::{JSError, raise_type_error};

/// Call a function value. Built-ins are `Value::Function(name)` dispatched
/// by name; constructor objects (`Symbol`, `Object`, ...) carry a native
/// brand in an internal slot and are callable too.
pub fn call_function<'gc>(
    mc: &MutationContext<'gc>,
    func: &Value<'gc>,
    this: Option<&Value<'gc>>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    match func {
        Value::Function(name) => dispatch_native(mc, name, this, args, env),
        Value::Object(obj) => {
            if let Some(brand_rc) = slot_get(obj, InternalSlot::NativeCtor)
                && let Value::String(brand) = &*brand_rc.borrow()
            {
                return dispatch_native(mc, &utf16_to_utf8(brand), this, args, env);
            }
            Err(raise_type_error!("Value is not a function"))
        }
        other => Err(raise_type_error!(format!("{:?} is not a function", other))),
    }
}

/// Construct-mode invocation (`new Ctor(...)`). Symbol has no construct
/// mode at all; requesting one is a TypeError before any argument is
/// looked at.
pub fn construct<'gc>(
    mc: &MutationContext<'gc>,
    ctor: &Value<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let Value::Object(ctor_obj) = ctor else {
        return Err(raise_type_error!(format!("{:?} is not a constructor", ctor)));
    };
    if slot_get(ctor_obj, InternalSlot::IsConstructor).is_none() {
        return Err(raise_type_error!("Value is not a constructor"));
    }
    let brand = match slot_get(ctor_obj, InternalSlot::NativeCtor) {
        Some(brand_rc) => match &*brand_rc.borrow() {
            Value::String(s) => utf16_to_utf8(s),
            _ => return Err(raise_type_error!("Value is not a constructor")),
        },
        None => return Err(raise_type_error!("Value is not a constructor")),
    };
    match brand.as_str() {
        "Symbol" => Err(raise_type_error!("Symbol is not a constructor")),
        "Object" => crate::js_object::handle_object_call(mc, args, env),
        other => Err(raise_type_error!(format!("{other} cannot be constructed by this engine core"))),
    }
}

/// Method call through the public, monkey-patchable dispatch: the method is
/// resolved as an ordinary property (own or inherited) on the receiver, so
/// a replaced prototype slot is what actually runs. Plain symbols resolve
/// their methods through `Symbol.prototype`.
pub fn call_method<'gc>(
    mc: &MutationContext<'gc>,
    receiver: &Value<'gc>,
    name: &str,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let method = match receiver {
        Value::Object(obj) => object_get_key_value(obj, name),
        Value::Symbol(_) => prototype_of_builtin(env, "Symbol").and_then(|proto| object_get_key_value(&proto, name)),
        Value::Number(_) => prototype_of_builtin(env, "Number").and_then(|proto| object_get_key_value(&proto, name)),
        Value::Boolean(_) => prototype_of_builtin(env, "Boolean").and_then(|proto| object_get_key_value(&proto, name)),
        Value::String(_) => prototype_of_builtin(env, "String").and_then(|proto| object_get_key_value(&proto, name)),
        Value::Undefined | Value::Null => {
            return Err(raise_type_error!(format!(
                "Cannot read properties of {} (reading '{name}')",
                crate::core::value_to_string(receiver)
            )));
        }
        Value::Function(_) => None,
    };
    let Some(method_rc) = method else {
        return Err(raise_type_error!(format!("{name} is not a function")));
    };
    let method_val = method_rc.borrow().clone();
    call_function(mc, &method_val, Some(receiver), args, env)
}

fn prototype_of_builtin<'gc>(env: &JSObjectDataPtr<'gc>, ctor_name: &str) -> Option<JSObjectDataPtr<'gc>> {
    let ctor_rc = env_get(env, ctor_name)?;
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

fn dispatch_native<'gc>(
    mc: &MutationContext<'gc>,
    name: &str,
    this: Option<&Value<'gc>>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    log::debug!("dispatch_native: {name} ({} args)", args.len());
    match name {
        "Symbol" => crate::js_symbol::handle_symbol_call(mc, args, env),
        "Symbol.for" => crate::js_symbol::handle_symbol_for(mc, args, env),
        "Symbol.keyFor" => crate::js_symbol::handle_symbol_keyfor(mc, args, env),
        "Symbol.prototype.toString" => crate::js_symbol::handle_symbol_tostring(mc, this.cloned().unwrap_or(Value::Undefined)),
        "Symbol.prototype.valueOf" => crate::js_symbol::handle_symbol_valueof(mc, this.cloned().unwrap_or(Value::Undefined)),
        "Symbol.prototype[Symbol.toPrimitive]" => {
            crate::js_symbol::handle_symbol_to_primitive(mc, this.cloned().unwrap_or(Value::Undefined), args)
        }
        "Object" => crate::js_object::handle_object_call(mc, args, env),
        "Object.defineProperty" => crate::js_object::handle_define_property(mc, args, env),
        "Object.getPrototypeOf" => crate::js_object::handle_get_prototype_of(mc, args),
        "Object.setPrototypeOf" => crate::js_object::handle_set_prototype_of(mc, args),
        "Object.prototype.toString" => crate::js_object::handle_object_to_string(mc, this, env),
        "Object.prototype.valueOf" => Ok(this.cloned().unwrap_or(Value::Undefined)),
        "Object.prototype.hasOwnProperty" => crate::js_object::handle_has_own_property(mc, this, args, env),
        "Object.prototype.propertyIsEnumerable" => crate::js_object::handle_property_is_enumerable(mc, this, args, env),
        "Boolean" => crate::js_boolean::handle_boolean_call(mc, args),
        "Number" => crate::js_number::handle_number_call(mc, args, env),
        "String" => crate::js_string::handle_string_call(mc, args, env),
        _ => Err(raise_type_error!(format!("{name} is not a function"))),
    }
}
