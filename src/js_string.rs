use crate::core::{
    InternalSlot, JSObjectDataPtr, MutationContext, Value, env_set, new_js_object_data, object_set_key_value, slot_set, to_string_value,
    value_to_string,
};
use crate::error::JSError;
use crate::unicode::utf8_to_utf16;

pub fn initialize_string<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<(), JSError> {
    let string_ctor = new_js_object_data(mc);
    slot_set(mc, &string_ctor, InternalSlot::IsConstructor, Value::Boolean(true));
    slot_set(mc, &string_ctor, InternalSlot::NativeCtor, Value::String(utf8_to_utf16("String")));

    let string_proto = new_js_object_data(mc);
    if let Some(obj_proto) = crate::js_object::object_prototype(env) {
        string_proto.borrow_mut(mc).prototype = Some(obj_proto);
    }
    object_set_key_value(mc, &string_ctor, "prototype", Value::Object(string_proto))?;
    string_ctor.borrow_mut(mc).set_non_enumerable("prototype".into());
    object_set_key_value(mc, &string_proto, "constructor", Value::Object(string_ctor))?;
    string_proto.borrow_mut(mc).set_non_enumerable("constructor".into());

    env_set(mc, env, "String", Value::Object(string_ctor))?;
    env.borrow_mut(mc).set_non_enumerable("String".into());
    Ok(())
}

/// `String(value)`: not a plain call into the internal ToString algorithm.
/// A plain symbol is special-cased to the internal `"Symbol(desc)"`
/// formatter, bypassing `Symbol.prototype.toString` entirely — replacing
/// that method must not be observable here. Every other value, including a
/// wrapped symbol object, takes the implicit ToString path (where the
/// wrapper unwraps to a plain symbol and throws).
pub fn handle_string_call<'gc>(
    mc: &MutationContext<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    match args.first() {
        None => Ok(Value::String(Vec::new())),
        Some(sym_val @ Value::Symbol(_)) => Ok(Value::String(utf8_to_utf16(&value_to_string(sym_val)))),
        Some(other) => Ok(Value::String(to_string_value(mc, other, env)?)),
    }
}
