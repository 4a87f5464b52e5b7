use crate::core::{InternalSlot, JSObjectDataPtr, MutationContext, Value, env_set, new_js_object_data, object_set_key_value, slot_set, to_number};
use crate::error::JSError;
use crate::unicode::utf8_to_utf16;

pub fn initialize_number_module<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<(), JSError> {
    let number_ctor = new_js_object_data(mc);
    slot_set(mc, &number_ctor, InternalSlot::IsConstructor, Value::Boolean(true));
    slot_set(mc, &number_ctor, InternalSlot::NativeCtor, Value::String(utf8_to_utf16("Number")));

    let number_proto = new_js_object_data(mc);
    if let Some(obj_proto) = crate::js_object::object_prototype(env) {
        number_proto.borrow_mut(mc).prototype = Some(obj_proto);
    }
    object_set_key_value(mc, &number_ctor, "prototype", Value::Object(number_proto))?;
    number_ctor.borrow_mut(mc).set_non_enumerable("prototype".into());
    object_set_key_value(mc, &number_proto, "constructor", Value::Object(number_ctor))?;
    number_proto.borrow_mut(mc).set_non_enumerable("constructor".into());

    env_set(mc, env, "Number", Value::Object(number_ctor))?;
    env.borrow_mut(mc).set_non_enumerable("Number".into());
    Ok(())
}

/// `Number(value)`: ToNumber. Throws for symbols, plain or wrapped — the
/// wrapped case goes through ToPrimitive first, which surrenders the plain
/// symbol and lands in the same rejection.
pub fn handle_number_call<'gc>(
    mc: &MutationContext<'gc>,
    args: &[Value<'gc>],
    env: &JSObjectDataPtr<'gc>,
) -> Result<Value<'gc>, JSError> {
    let arg = args.first().unwrap_or(&Value::Undefined);
    if args.is_empty() {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(to_number(mc, arg, env)?))
}
