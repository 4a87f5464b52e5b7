use crate::core::{InternalSlot, JSObjectDataPtr, MutationContext, Value, env_set, new_js_object_data, object_set_key_value, slot_set, to_boolean};
use crate::error::JSError;
use crate::unicode::utf8_to_utf16;

pub fn initialize_boolean<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<(), JSError> {
    let boolean_ctor = new_js_object_data(mc);
    slot_set(mc, &boolean_ctor, InternalSlot::IsConstructor, Value::Boolean(true));
    slot_set(mc, &boolean_ctor, InternalSlot::NativeCtor, Value::String(utf8_to_utf16("Boolean")));

    let boolean_proto = new_js_object_data(mc);
    if let Some(obj_proto) = crate::js_object::object_prototype(env) {
        boolean_proto.borrow_mut(mc).prototype = Some(obj_proto);
    }
    object_set_key_value(mc, &boolean_ctor, "prototype", Value::Object(boolean_proto))?;
    boolean_ctor.borrow_mut(mc).set_non_enumerable("prototype".into());
    object_set_key_value(mc, &boolean_proto, "constructor", Value::Object(boolean_ctor))?;
    boolean_proto.borrow_mut(mc).set_non_enumerable("constructor".into());

    env_set(mc, env, "Boolean", Value::Object(boolean_ctor))?;
    env.borrow_mut(mc).set_non_enumerable("Boolean".into());
    Ok(())
}

/// `Boolean(value)`: ToBoolean, never throws. Symbols are always truthy,
/// including ones with no description.
pub fn handle_boolean_call<'gc>(_mc: &MutationContext<'gc>, args: &[Value<'gc>]) -> Result<Value<'gc>, JSError> {
    let arg = args.first().unwrap_or(&Value::Undefined);
    Ok(Value::Boolean(to_boolean(arg)))
}
