use crate::core::{
    Collect, Collection, Gc, GcCell, GcPtr, MutationContext, PropertyKey, SymbolData, Value, new_gc_cell_ptr, strict_equals,
    to_string_value, value_to_string,
};
use crate::unicode::utf16_to_utf8;
use crate::{JSError, raise_reference_error, raise_type_error};

pub type JSObjectDataPtr<'gc> = GcPtr<'gc, JSObjectData<'gc>>;

#[inline]
pub fn new_js_object_data<'gc>(mc: &MutationContext<'gc>) -> JSObjectDataPtr<'gc> {
    Gc::new(mc, GcCell::new(JSObjectData::new()))
}

/// Engine-internal bookkeeping slots, stored as string properties in the
/// reserved hidden-key namespace. Never reachable from any public
/// enumeration or introspection operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InternalSlot {
    /// The boxed primitive of a wrapper object (`Object(Symbol(..))` etc).
    PrimitiveValue,
    /// The realm-wide `Symbol.for` registry object, hung off the global env.
    SymbolRegistry,
    /// Brand string naming the native constructor an object represents.
    NativeCtor,
    /// Marks an object as constructible.
    IsConstructor,
}

impl InternalSlot {
    fn key<'gc>(self) -> PropertyKey<'gc> {
        PropertyKey::hidden(match self {
            InternalSlot::PrimitiveValue => "value",
            InternalSlot::SymbolRegistry => "symbol_registry",
            InternalSlot::NativeCtor => "native_ctor",
            InternalSlot::IsConstructor => "is_constructor",
        })
    }
}

pub fn slot_set<'gc>(mc: &MutationContext<'gc>, obj: &JSObjectDataPtr<'gc>, slot: InternalSlot, val: Value<'gc>) {
    let val_ptr = new_gc_cell_ptr(mc, val);
    obj.borrow_mut(mc).insert(slot.key(), val_ptr);
}

/// Own-property slot read; internal slots are never inherited.
pub fn slot_get<'gc>(obj: &JSObjectDataPtr<'gc>, slot: InternalSlot) -> Option<GcPtr<'gc, Value<'gc>>> {
    obj.borrow().properties.get(&slot.key()).copied()
}

#[derive(Clone, Default)]
pub struct JSObjectData<'gc> {
    pub properties: indexmap::IndexMap<PropertyKey<'gc>, GcPtr<'gc, Value<'gc>>>,
    pub non_enumerable: std::collections::HashSet<PropertyKey<'gc>>,
    pub non_writable: std::collections::HashSet<PropertyKey<'gc>>,
    pub non_configurable: std::collections::HashSet<PropertyKey<'gc>>,
    pub prototype: Option<JSObjectDataPtr<'gc>>,
    // Whether new own properties can be added to this object. Default true.
    pub extensible: bool,
}

unsafe impl<'gc> Collect for JSObjectData<'gc> {
    fn trace(&self, cc: &Collection) {
        for (k, v) in &self.properties {
            k.trace(cc);
            v.trace(cc);
        }
        for k in &self.non_enumerable {
            k.trace(cc);
        }
        for k in &self.non_writable {
            k.trace(cc);
        }
        for k in &self.non_configurable {
            k.trace(cc);
        }
        if let Some(p) = &self.prototype {
            p.trace(cc);
        }
    }
}

impl<'gc> JSObjectData<'gc> {
    pub fn new() -> Self {
        // JSObjectData::default() would initialize `extensible` to false
        JSObjectData {
            extensible: true,
            ..JSObjectData::default()
        }
    }

    pub fn insert(&mut self, key: PropertyKey<'gc>, val: GcPtr<'gc, Value<'gc>>) {
        self.properties.insert(key, val);
    }

    pub fn set_property(&mut self, mc: &MutationContext<'gc>, key: impl Into<PropertyKey<'gc>>, val: Value<'gc>) {
        let val_ptr = new_gc_cell_ptr(mc, val);
        self.insert(key.into(), val_ptr);
    }

    pub fn set_non_enumerable(&mut self, key: PropertyKey<'gc>) {
        log::debug!("set_non_enumerable: obj_ptr={:p} key={}", self as *const _, key);
        self.non_enumerable.insert(key);
    }

    pub fn set_enumerable(&mut self, key: PropertyKey<'gc>) {
        self.non_enumerable.remove(&key);
    }

    pub fn is_enumerable(&self, key: &PropertyKey<'gc>) -> bool {
        !self.non_enumerable.contains(key)
    }

    pub fn set_non_writable(&mut self, key: PropertyKey<'gc>) {
        self.non_writable.insert(key);
    }

    pub fn is_writable(&self, key: &PropertyKey<'gc>) -> bool {
        !self.non_writable.contains(key)
    }

    pub fn set_non_configurable(&mut self, key: PropertyKey<'gc>) {
        self.non_configurable.insert(key);
    }

    pub fn is_configurable(&self, key: &PropertyKey<'gc>) -> bool {
        !self.non_configurable.contains(key)
    }

    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    pub fn prevent_extensions(&mut self) {
        self.extensible = false;
    }
}

/// Property read through the prototype chain. Symbol keys walk the chain
/// exactly as string keys do.
pub fn object_get_key_value<'gc>(obj: &JSObjectDataPtr<'gc>, key: impl Into<PropertyKey<'gc>>) -> Option<GcPtr<'gc, Value<'gc>>> {
    let key = key.into();
    let mut current = Some(*obj);
    while let Some(cur) = current {
        if let Some(val) = cur.borrow().properties.get(&key) {
            return Some(*val);
        }
        current = cur.borrow().prototype;
    }
    None
}

pub fn get_own_property<'gc>(obj: &JSObjectDataPtr<'gc>, key: &PropertyKey<'gc>) -> Option<GcPtr<'gc, Value<'gc>>> {
    obj.borrow().properties.get(key).copied()
}

/// Plain assignment: creates or overwrites an own property with default
/// attributes (enumerable, writable, configurable).
pub fn object_set_key_value<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    val: Value<'gc>,
) -> Result<(), JSError> {
    let key = key.into();
    let exists = obj.borrow().properties.contains_key(&key);
    if !exists && !obj.borrow().is_extensible() {
        return Err(raise_type_error!("Cannot add property to non-extensible object"));
    }
    if exists && !obj.borrow().is_writable(&key) {
        return Err(raise_type_error!(format!("Cannot assign to read only property '{key}'")));
    }
    log::debug!("object_set_key_value: obj={:p} key={} key_exists={}", Gc::as_ptr(*obj), key, exists);
    let val_ptr = new_gc_cell_ptr(mc, val);
    obj.borrow_mut(mc).insert(key, val_ptr);
    Ok(())
}

pub fn object_delete_key<'gc>(mc: &MutationContext<'gc>, obj: &JSObjectDataPtr<'gc>, key: &PropertyKey<'gc>) -> bool {
    if !obj.borrow().is_configurable(key) && obj.borrow().properties.contains_key(key) {
        return false;
    }
    let mut data = obj.borrow_mut(mc);
    // shift_remove preserves insertion order for the surviving keys
    let removed = data.properties.shift_remove(key).is_some();
    data.non_enumerable.remove(key);
    data.non_writable.remove(key);
    data.non_configurable.remove(key);
    removed
}

/// Own property keys in 'ordinary own property keys' order per ECMAScript:
/// 1) canonical array index keys sorted numerically,
/// 2) other string keys in insertion order,
/// 3) symbol keys in insertion order.
/// Keys in the hidden namespace are not own properties as far as any
/// caller of this function is concerned.
pub fn ordinary_own_property_keys<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<PropertyKey<'gc>> {
    let mut indices: Vec<(u32, PropertyKey<'gc>)> = Vec::new();
    let mut string_keys: Vec<PropertyKey<'gc>> = Vec::new();
    let mut symbol_keys: Vec<PropertyKey<'gc>> = Vec::new();

    for k in obj.borrow().properties.keys() {
        if k.is_hidden() {
            continue;
        }
        match k {
            PropertyKey::String(_) => {
                if let Some(idx) = k.array_index() {
                    indices.push((idx, k.clone()));
                } else {
                    string_keys.push(k.clone());
                }
            }
            PropertyKey::Symbol(_) => symbol_keys.push(k.clone()),
        }
    }

    indices.sort_by_key(|(num, _k)| *num);
    let mut out: Vec<PropertyKey<'gc>> = indices.into_iter().map(|(_n, k)| k).collect();
    out.extend(string_keys);
    out.extend(symbol_keys);
    out
}

/// `for-in` key collection: own and inherited enumerable string keys, each
/// name visited once. Symbol keys never appear, whatever their enumerable
/// flag; neither do hidden keys. A shadowing own key suppresses the
/// inherited one even when the shadow is non-enumerable.
pub fn for_in_keys<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut visited: std::collections::HashSet<String> = std::collections::HashSet::new();

    let mut current = Some(*obj);
    while let Some(cur) = current {
        for key in ordinary_own_property_keys(&cur) {
            let PropertyKey::String(name) = &key else {
                continue;
            };
            if visited.contains(name) {
                continue;
            }
            visited.insert(name.clone());
            if cur.borrow().is_enumerable(&key) {
                out.push(name.clone());
            }
        }
        current = cur.borrow().prototype;
    }
    out
}

/// `Object.keys`: own enumerable string keys.
pub fn object_keys<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<String> {
    ordinary_own_property_keys(obj)
        .into_iter()
        .filter(|k| obj.borrow().is_enumerable(k))
        .filter_map(|k| match k {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        })
        .collect()
}

/// `Object.getOwnPropertyNames`: own string keys, enumerable or not.
pub fn get_own_property_names<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<String> {
    ordinary_own_property_keys(obj)
        .into_iter()
        .filter_map(|k| match k {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        })
        .collect()
}

/// `Object.getOwnPropertySymbols`: own symbol keys in insertion order,
/// enumerable and non-enumerable alike (callers can filter with
/// `is_enumerable`). Never inherited keys, never hidden string keys.
pub fn get_own_property_symbols<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<Gc<'gc, SymbolData>> {
    ordinary_own_property_keys(obj)
        .into_iter()
        .filter_map(|k| match k {
            PropertyKey::Symbol(sym) => Some(sym),
            PropertyKey::String(_) => None,
        })
        .collect()
}

/// Convert a runtime value into a property key. This is where plain and
/// wrapped symbols converge on the same slot: a wrapper object is unwrapped
/// to its underlying symbol before lookup or storage. Everything else takes
/// the implicit ToString path (which cannot see a symbol anymore).
pub fn property_key_from_value<'gc>(
    mc: &MutationContext<'gc>,
    key_val: &Value<'gc>,
    env: &JSObjectDataPtr<'gc>,
) -> Result<PropertyKey<'gc>, JSError> {
    match key_val {
        Value::String(s) => Ok(PropertyKey::String(utf16_to_utf8(s))),
        Value::Symbol(sym) => Ok(PropertyKey::Symbol(*sym)),
        Value::Object(obj) => {
            if let Some(wrapped) = slot_get(obj, InternalSlot::PrimitiveValue)
                && let Value::Symbol(sym) = &*wrapped.borrow()
            {
                return Ok(PropertyKey::Symbol(*sym));
            }
            Ok(PropertyKey::String(utf16_to_utf8(&to_string_value(mc, key_val, env)?)))
        }
        Value::Number(_) | Value::Boolean(_) | Value::Undefined | Value::Null => Ok(PropertyKey::String(value_to_string(key_val))),
        Value::Function(_) => Ok(PropertyKey::String(utf16_to_utf8(&to_string_value(mc, key_val, env)?))),
    }
}

/// A property descriptor as accepted by DefineProperty. Data descriptors
/// only; this engine core has no accessor properties.
#[derive(Clone, Debug, Default)]
pub struct PropertyDescriptor<'gc> {
    pub value: Option<Value<'gc>>,
    pub writable: Option<bool>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl<'gc> PropertyDescriptor<'gc> {
    pub fn new_data(value: &Value<'gc>, writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor {
            value: Some(value.clone()),
            writable: Some(writable),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    /// Parse a descriptor object (`{ value: .., enumerable: .. }`).
    /// Missing fields stay `None`.
    pub fn from_object(obj: &JSObjectDataPtr<'gc>) -> Self {
        let value = get_own_property(obj, &"value".into()).map(|vptr| vptr.borrow().clone());
        let writable = get_own_property(obj, &"writable".into()).map(|wptr| crate::core::to_boolean(&wptr.borrow()));
        let enumerable = get_own_property(obj, &"enumerable".into()).map(|eptr| crate::core::to_boolean(&eptr.borrow()));
        let configurable = get_own_property(obj, &"configurable".into()).map(|cptr| crate::core::to_boolean(&cptr.borrow()));
        PropertyDescriptor {
            value,
            writable,
            enumerable,
            configurable,
        }
    }
}

/// DefineProperty over an already-resolved key. New properties default
/// every absent flag to false, per the DefineProperty semantics (unlike
/// plain assignment).
pub fn define_property_internal<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    desc: &PropertyDescriptor<'gc>,
) -> Result<(), JSError> {
    let key = key.into();
    let exists = obj.borrow().properties.contains_key(&key);
    if !exists && !obj.borrow().is_extensible() {
        return Err(raise_type_error!("Cannot define property on non-extensible object"));
    }
    if exists && !obj.borrow().is_configurable(&key) {
        // A redefinition that changes nothing is permitted; absent
        // descriptor fields mean "leave unchanged" here.
        let data = obj.borrow();
        let value_same = match (&desc.value, data.properties.get(&key)) {
            (Some(v), Some(current)) => strict_equals(v, &current.borrow()),
            (Some(_), None) => false,
            (None, _) => true,
        };
        let no_op = value_same
            && desc.enumerable.is_none_or(|e| e == data.is_enumerable(&key))
            && desc.writable.is_none_or(|w| w == data.is_writable(&key))
            && desc.configurable.is_none_or(|c| c == data.is_configurable(&key));
        if no_op {
            return Ok(());
        }
        return Err(raise_type_error!(format!("Cannot redefine property '{key}'")));
    }

    let value = desc.value.clone().unwrap_or(Value::Undefined);
    let val_ptr = new_gc_cell_ptr(mc, value);
    let mut data = obj.borrow_mut(mc);
    data.insert(key.clone(), val_ptr);
    if desc.enumerable.unwrap_or(false) {
        data.set_enumerable(key.clone());
    } else {
        data.set_non_enumerable(key.clone());
    }
    if desc.writable.unwrap_or(false) {
        data.non_writable.remove(&key);
    } else {
        data.set_non_writable(key.clone());
    }
    if desc.configurable.unwrap_or(false) {
        data.non_configurable.remove(&key);
    } else {
        data.set_non_configurable(key);
    }
    Ok(())
}

/// Environment lookup: the global env is an ordinary object, so scope
/// resolution is a prototype-chain walk.
pub fn env_get<'gc>(env: &JSObjectDataPtr<'gc>, key: &str) -> Option<GcPtr<'gc, Value<'gc>>> {
    object_get_key_value(env, key)
}

pub fn env_get_value<'gc>(env: &JSObjectDataPtr<'gc>, key: &str) -> Result<Value<'gc>, JSError> {
    env_get(env, key)
        .map(|rc| rc.borrow().clone())
        .ok_or_else(|| raise_reference_error!(format!("{key} is not defined")))
}

pub fn env_set<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>, key: &str, val: Value<'gc>) -> Result<(), JSError> {
    object_set_key_value(mc, env, key, val)
}

/// Link a freshly boxed primitive to `<ctor>.prototype` so wrapper objects
/// inherit the prototype methods.
pub fn set_internal_prototype_from_constructor<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    env: &JSObjectDataPtr<'gc>,
    ctor_name: &str,
) -> Result<(), JSError> {
    if let Some(ctor_rc) = env_get(env, ctor_name)
        && let Value::Object(ctor_obj) = &*ctor_rc.borrow()
        && let Some(proto_rc) = object_get_key_value(ctor_obj, "prototype")
        && let Value::Object(proto) = &*proto_rc.borrow()
    {
        obj.borrow_mut(mc).prototype = Some(*proto);
    }
    Ok(())
}
