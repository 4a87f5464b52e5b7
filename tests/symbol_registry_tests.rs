use symbol_engine::{
    Value, for_in_keys, get_well_known_symbol, handle_symbol_call, handle_symbol_for, handle_symbol_keyfor, new_engine_arena,
    strict_equals, utf16_to_utf8,
};

// Initialize logger for this integration test binary so `RUST_LOG` is honored.
// Using `ctor` ensures initialization runs before tests start.
#[ctor::ctor]
fn __init_test_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default()).is_test(true).try_init();
}

#[cfg(test)]
mod symbol_registry_tests {
    use super::*;

    #[test]
    fn test_for_canonicalizes_by_key() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let s1 = handle_symbol_for(mc, &[Value::from("app.key")], env).unwrap();
            let s2 = handle_symbol_for(mc, &[Value::from("app.key")], env).unwrap();
            assert!(strict_equals(&s1, &s2), "Symbol.for must return the same symbol for the same key");
            let other = handle_symbol_for(mc, &[Value::from("app.other")], env).unwrap();
            assert!(!strict_equals(&s1, &other));
        });
    }

    #[test]
    fn test_registry_symbols_are_distinct_from_local_ones() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let local = handle_symbol_call(mc, &[Value::from("shared")], env).unwrap();
            let registered = handle_symbol_for(mc, &[Value::from("shared")], env).unwrap();
            assert!(!strict_equals(&local, &registered));
            // A later Symbol.for still dodges the local one and hits the registry.
            let again = handle_symbol_for(mc, &[Value::from("shared")], env).unwrap();
            assert!(strict_equals(&registered, &again));
        });
    }

    #[test]
    fn test_for_with_missing_argument_uses_literal_undefined() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let no_arg = handle_symbol_for(mc, &[], env).unwrap();
            let undef_arg = handle_symbol_for(mc, &[Value::Undefined], env).unwrap();
            let explicit = handle_symbol_for(mc, &[Value::from("undefined")], env).unwrap();
            assert!(strict_equals(&no_arg, &undef_arg));
            assert!(strict_equals(&no_arg, &explicit));
            match &no_arg {
                Value::Symbol(sym) => assert_eq!(sym.description(), Some("undefined")),
                other => panic!("Expected symbol, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_for_coerces_non_string_keys() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let by_number = handle_symbol_for(mc, &[Value::Number(123.0)], env).unwrap();
            let by_string = handle_symbol_for(mc, &[Value::from("123")], env).unwrap();
            assert!(strict_equals(&by_number, &by_string));
        });
    }

    #[test]
    fn test_for_with_symbol_key_throws() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let sym = handle_symbol_call(mc, &[Value::from("k")], env).unwrap();
            let err = handle_symbol_for(mc, &[sym], env).unwrap_err();
            assert!(err.is_type_error(), "Symbol.for(sym) must fail key coercion, got {err:?}");
        });
    }

    #[test]
    fn test_keyfor_round_trip() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let registered = handle_symbol_for(mc, &[Value::from("widget")], env).unwrap();
            match handle_symbol_keyfor(mc, &[registered], env).unwrap() {
                Value::String(s) => assert_eq!(utf16_to_utf8(&s), "widget"),
                other => panic!("Expected registry key, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_keyfor_of_local_symbol_is_undefined() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            let local = handle_symbol_call(mc, &[Value::from("widget")], env).unwrap();
            assert!(matches!(handle_symbol_keyfor(mc, &[local], env).unwrap(), Value::Undefined));
        });
    }

    #[test]
    fn test_keyfor_of_well_known_symbol_is_undefined() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            // Well-known symbols are engine-created, never registered.
            for name in ["iterator", "toPrimitive", "toStringTag"] {
                let sym = get_well_known_symbol(env, name).unwrap();
                let result = handle_symbol_keyfor(mc, &[Value::Symbol(sym)], env).unwrap();
                assert!(matches!(result, Value::Undefined), "Symbol.{name} must not resolve to a registry key");
            }
        });
    }

    #[test]
    fn test_keyfor_of_non_symbol_is_undefined() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            for arg in [Value::from("widget"), Value::Number(1.0), Value::Null, Value::Undefined] {
                assert!(matches!(handle_symbol_keyfor(mc, &[arg], env).unwrap(), Value::Undefined));
            }
            assert!(matches!(handle_symbol_keyfor(mc, &[], env).unwrap(), Value::Undefined));
        });
    }

    #[test]
    fn test_registry_is_not_enumerable_from_the_global() {
        let arena = new_engine_arena().unwrap();
        arena.mutate(|mc, root| {
            let env = &root.global_env;
            handle_symbol_for(mc, &[Value::from("secret")], env).unwrap();
            // The registry only exists behind a hidden slot; nothing about it
            // leaks into enumeration of the global environment.
            assert!(for_in_keys(env).is_empty());
        });
    }
}
