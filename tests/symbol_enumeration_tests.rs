use symbol_engine::{
    Gc, PropertyKey, Value, call_method, for_in_keys, get_own_property_names, get_own_property_symbols, handle_symbol_call,
    new_engine_arena, new_plain_object, object_keys, object_set_key_value, ordinary_own_property_keys, to_object,
};

// Initialize logger for this integration test binary so `RUST_LOG` is honored.
// Using `ctor` ensures initialization runs before tests start.
#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

#[cfg(test)]
mod symbol_enumeration_tests {
    use super::*;

    #[test]
    fn test_for_in_yields_enumerable_string_keys_only() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let obj = new_plain_object(mc, env);
            object_set_key_value(mc, &obj, "visible", Value::Number(1.0)).unwrap();
            object_set_key_value(mc, &obj, "hidden", Value::Number(2.0)).unwrap();
            obj.borrow_mut(mc).set_non_enumerable("hidden".into());

            let Value::Symbol(sym) = handle_symbol_call(mc, &[Value::from("sym")], env).unwrap() else {
                panic!("Expected symbol");
            };
            object_set_key_value(mc, &obj, PropertyKey::Symbol(sym), Value::Number(3.0)).unwrap();

            assert_eq!(for_in_keys(&obj), vec!["visible".to_string()]);
        });
    }

    #[test]
    fn test_enumerable_symbol_keys_still_skip_for_in() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let obj = new_plain_object(mc, env);
            let Value::Symbol(sym) = handle_symbol_call(mc, &[Value::from("enumerable")], env).unwrap() else {
                panic!("Expected symbol");
            };
            // Plain assignment leaves the key enumerable, and it still never
            // shows up: for-in filters by key kind, not by attribute.
            object_set_key_value(mc, &obj, PropertyKey::Symbol(sym), Value::Number(1.0)).unwrap();
            assert!(obj.borrow().is_enumerable(&PropertyKey::Symbol(sym)));
            assert!(for_in_keys(&obj).is_empty());
            assert!(object_keys(&obj).is_empty());
        });
    }

    #[test]
    fn test_for_in_walks_the_prototype_chain() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let parent = new_plain_object(mc, env);
            let child = new_plain_object(mc, env);
            child.borrow_mut(mc).prototype = Some(parent);

            object_set_key_value(mc, &parent, "inherited", Value::Number(1.0)).unwrap();
            object_set_key_value(mc, &child, "own", Value::Number(2.0)).unwrap();

            let keys = for_in_keys(&child);
            assert_eq!(keys, vec!["own".to_string(), "inherited".to_string()]);
        });
    }

    #[test]
    fn test_non_enumerable_shadow_suppresses_inherited_key() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let parent = new_plain_object(mc, env);
            let child = new_plain_object(mc, env);
            child.borrow_mut(mc).prototype = Some(parent);

            object_set_key_value(mc, &parent, "name", Value::Number(1.0)).unwrap();
            object_set_key_value(mc, &child, "name", Value::Number(2.0)).unwrap();
            child.borrow_mut(mc).set_non_enumerable("name".into());

            // The own non-enumerable "name" hides the enumerable inherited one.
            assert!(for_in_keys(&child).is_empty());
        });
    }

    #[test]
    fn test_object_keys_ignores_inherited_properties() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let parent = new_plain_object(mc, env);
            let child = new_plain_object(mc, env);
            child.borrow_mut(mc).prototype = Some(parent);

            object_set_key_value(mc, &parent, "inherited", Value::Number(1.0)).unwrap();
            object_set_key_value(mc, &child, "own", Value::Number(2.0)).unwrap();

            assert_eq!(object_keys(&child), vec!["own".to_string()]);
        });
    }

    #[test]
    fn test_get_own_property_names_includes_non_enumerable_strings() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let obj = new_plain_object(mc, env);
            object_set_key_value(mc, &obj, "a", Value::Number(1.0)).unwrap();
            object_set_key_value(mc, &obj, "b", Value::Number(2.0)).unwrap();
            obj.borrow_mut(mc).set_non_enumerable("b".into());

            let Value::Symbol(sym) = handle_symbol_call(mc, &[], env).unwrap() else {
                panic!("Expected symbol");
            };
            object_set_key_value(mc, &obj, PropertyKey::Symbol(sym), Value::Number(3.0)).unwrap();

            assert_eq!(get_own_property_names(&obj), vec!["a".to_string(), "b".to_string()]);
        });
    }

    #[test]
    fn test_get_own_property_symbols_in_insertion_order() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let obj = new_plain_object(mc, env);
            let Value::Symbol(s1) = handle_symbol_call(mc, &[Value::from("first")], env).unwrap() else {
                panic!("Expected symbol");
            };
            let Value::Symbol(s2) = handle_symbol_call(mc, &[Value::from("second")], env).unwrap() else {
                panic!("Expected symbol");
            };
            object_set_key_value(mc, &obj, PropertyKey::Symbol(s1), Value::Number(1.0)).unwrap();
            object_set_key_value(mc, &obj, "between", Value::Number(0.0)).unwrap();
            object_set_key_value(mc, &obj, PropertyKey::Symbol(s2), Value::Number(2.0)).unwrap();
            obj.borrow_mut(mc).set_non_enumerable(PropertyKey::Symbol(s2));

            let symbols = get_own_property_symbols(&obj);
            assert_eq!(symbols.len(), 2);
            assert!(Gc::ptr_eq(symbols[0], s1));
            // Non-enumerable symbol keys are still own symbol keys.
            assert!(Gc::ptr_eq(symbols[1], s2));
        });
    }

    #[test]
    fn test_ordinary_own_property_key_order() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let obj = new_plain_object(mc, env);
            let Value::Symbol(sym) = handle_symbol_call(mc, &[Value::from("last")], env).unwrap() else {
                panic!("Expected symbol");
            };
            object_set_key_value(mc, &obj, "b", Value::Number(0.0)).unwrap();
            object_set_key_value(mc, &obj, "2", Value::Number(0.0)).unwrap();
            object_set_key_value(mc, &obj, PropertyKey::Symbol(sym), Value::Number(0.0)).unwrap();
            object_set_key_value(mc, &obj, "a", Value::Number(0.0)).unwrap();
            object_set_key_value(mc, &obj, "0", Value::Number(0.0)).unwrap();

            let keys = ordinary_own_property_keys(&obj);
            let rendered: Vec<String> = keys
                .iter()
                .map(|k| match k {
                    PropertyKey::String(s) => s.clone(),
                    PropertyKey::Symbol(_) => "<symbol>".to_string(),
                })
                .collect();
            // Indices numerically first, then strings in insertion order,
            // then symbol keys.
            assert_eq!(rendered, vec!["0", "2", "b", "a", "<symbol>"]);
        });
    }

    #[test]
    fn test_wrapper_internal_slot_is_invisible() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let sym_val = handle_symbol_call(mc, &[Value::from("boxed")], env).unwrap();
            let wrapper = to_object(mc, &sym_val, env).unwrap();

            // The boxed primitive lives in a reserved slot; none of the
            // introspection surfaces can see it.
            assert!(get_own_property_names(&wrapper).is_empty());
            assert!(get_own_property_symbols(&wrapper).is_empty());
            assert!(for_in_keys(&wrapper).is_empty());
            assert!(ordinary_own_property_keys(&wrapper).is_empty());
        });
    }

    #[test]
    fn test_reserved_namespace_probes_report_absent() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let sym_val = handle_symbol_call(mc, &[Value::from("boxed")], env).unwrap();
            let wrapper = Value::Object(to_object(mc, &sym_val, env).unwrap());

            // Probing with a key spelled into the reserved namespace answers
            // false rather than exposing the slot.
            let probe = Value::from("\u{ffff}value");
            let owned = call_method(mc, &wrapper, "hasOwnProperty", std::slice::from_ref(&probe), env).unwrap();
            assert!(matches!(owned, Value::Boolean(false)));
            let enumerable = call_method(mc, &wrapper, "propertyIsEnumerable", &[probe], env).unwrap();
            assert!(matches!(enumerable, Value::Boolean(false)));
        });
    }

    #[test]
    fn test_global_environment_enumerates_clean() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            symbol_engine::handle_symbol_for(mc, &[Value::from("app")], env).unwrap();
            // All engine bindings and the registry slot stay invisible.
            assert!(for_in_keys(env).is_empty());
            assert!(object_keys(env).is_empty());
            for name in get_own_property_names(env) {
                assert!(!name.starts_with('\u{ffff}'), "reserved key leaked: {name:?}");
            }
        });
    }
}
