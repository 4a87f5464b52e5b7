use crate::JSError;

pub use gc_arena::Mutation as MutationContext;
pub use gc_arena::lock::RefLock as GcCell;
pub use gc_arena::{Collect, Collection, Gc};
pub type GcPtr<'gc, T> = Gc<'gc, GcCell<T>>;

#[inline]
pub fn new_gc_cell_ptr<'gc, T: 'gc + Collect>(mc: &MutationContext<'gc>, value: T) -> GcPtr<'gc, T> {
    Gc::new(mc, GcCell::new(value))
}

mod value;
pub use value::*;

mod object;
pub use object::*;

mod property_key;
pub use property_key::*;

mod invoke;
pub use invoke::*;

/// Arena root: the global environment object. The symbol registry and the
/// well-known symbols hang off it through internal slots, so everything the
/// collector must see is reachable from here.
#[derive(Collect)]
#[collect(no_drop)]
pub struct EngineRoot<'gc> {
    pub global_env: JSObjectDataPtr<'gc>,
}

pub type EngineArena = gc_arena::Arena<gc_arena::Rootable!['gc => EngineRoot<'gc>]>;

/// Create an arena with a fully initialized realm (global constructors,
/// prototypes, well-known symbols, empty symbol registry).
pub fn new_engine_arena() -> Result<EngineArena, JSError> {
    let arena = EngineArena::new(|mc| {
        let global_env = new_js_object_data(mc);
        EngineRoot { global_env }
    });

    arena.mutate(|mc, root| -> Result<(), JSError> {
        initialize_global_constructors(mc, &root.global_env)?;
        env_set(mc, &root.global_env, "globalThis", Value::Object(root.global_env))?;
        root.global_env.borrow_mut(mc).set_non_enumerable("globalThis".into());
        Ok(())
    })?;

    Ok(arena)
}

/// Populate a global environment with the built-in constructors this engine
/// core provides. Order matters: Object first (its prototype is the root of
/// every chain), then Symbol (later modules consult well-known symbols).
pub fn initialize_global_constructors<'gc>(mc: &MutationContext<'gc>, env: &JSObjectDataPtr<'gc>) -> Result<(), JSError> {
    crate::js_object::initialize_object_module(mc, env)?;

    // Global object's [[Prototype]] is Object.prototype, so inherited
    // lookups through `globalThis` behave like any other object.
    if let Some(proto) = crate::js_object::object_prototype(env) {
        env.borrow_mut(mc).prototype = Some(proto);
    }

    crate::js_symbol::initialize_symbol(mc, env)?;
    crate::js_boolean::initialize_boolean(mc, env)?;
    crate::js_number::initialize_number_module(mc, env)?;
    crate::js_string::initialize_string(mc, env)?;

    Ok(())
}
