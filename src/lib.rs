pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod js_boolean;
pub(crate) mod js_number;
pub(crate) mod js_object;
pub(crate) mod js_string;
pub(crate) mod js_symbol;
pub(crate) mod unicode;

pub use core::{
    EngineArena, EngineRoot, Gc, InternalSlot, JSObjectData, JSObjectDataPtr, MutationContext, PropertyDescriptor, PropertyKey, SymbolData,
    Value, WellKnown, call_function, call_method, construct, define_property_internal, env_get, env_get_value, env_set, for_in_keys,
    format_js_number, get_own_property, get_own_property_names, get_own_property_symbols, loose_equals, new_engine_arena,
    new_js_object_data, object_delete_key, object_get_key_value, object_keys, object_set_key_value, ordinary_own_property_keys,
    property_key_from_value, slot_get, slot_set, strict_equals, to_boolean, to_number, to_primitive, to_string_value, type_of,
    value_to_string,
};
pub use error::JSError;
pub use js_boolean::handle_boolean_call;
pub use js_number::handle_number_call;
pub use js_object::{
    handle_define_property, handle_get_prototype_of, handle_has_own_property, handle_object_call, handle_object_to_string,
    handle_property_is_enumerable, handle_set_prototype_of, new_plain_object, object_prototype, to_object,
};
pub use js_string::handle_string_call;
pub use js_symbol::{
    get_well_known_symbol, handle_symbol_call, handle_symbol_for, handle_symbol_keyfor, handle_symbol_to_primitive,
    handle_symbol_tostring, handle_symbol_valueof,
};
pub use unicode::{utf8_to_utf16, utf16_to_utf8};
