//! Unit tests for prefix isolation.

use super::*;

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
fn dropping_a_scope_removes_what_it_set() {
    {
        let mut scope = isolate("HELPERS_SET", [("PORT", "80")]);
        scope.set("HOST", "localhost");
        assert_eq!(scope.prefix(), "HELPERS_SET");
        assert_eq!(env_value("HELPERS_SET_PORT").as_deref(), Some("80"));
        assert_eq!(env_value("HELPERS_SET_HOST").as_deref(), Some("localhost"));
    }
    assert_eq!(env_value("HELPERS_SET_PORT"), None);
    assert_eq!(env_value("HELPERS_SET_HOST"), None);
}

#[test]
fn nested_scope_clears_prefix_and_restores_it() {
    let outer = isolate("HELPERS_NEST", [("PORT", "orig")]);
    let sibling = isolate("HELPERS_NESTED", [("X", "unrelated")]);
    {
        let _inner = isolate("HELPERS_NEST", [("HOST", "h")]);
        assert_eq!(env_value("HELPERS_NEST_PORT"), None);
        assert_eq!(env_value("HELPERS_NEST_HOST").as_deref(), Some("h"));
        assert_eq!(env_value("HELPERS_NESTED_X").as_deref(), Some("unrelated"));
    }
    assert_eq!(env_value("HELPERS_NEST_PORT").as_deref(), Some("orig"));
    assert_eq!(env_value("HELPERS_NEST_HOST"), None);
    drop(sibling);
    drop(outer);
    assert_eq!(env_value("HELPERS_NEST_PORT"), None);
}

#[test]
fn repeated_writes_restore_in_lifo_order() {
    let outer = isolate("HELPERS_LIFO", [("VALUE", "v0")]);
    {
        let mut scope = isolate("HELPERS_LIFO", [("VALUE", "v1")]);
        scope.set("VALUE", "v2");
        scope.remove("VALUE");
        assert_eq!(env_value("HELPERS_LIFO_VALUE"), None);
        scope.set("VALUE", "v3");
        assert_eq!(env_value("HELPERS_LIFO_VALUE").as_deref(), Some("v3"));
    }
    assert_eq!(env_value("HELPERS_LIFO_VALUE").as_deref(), Some("v0"));
    drop(outer);
}
