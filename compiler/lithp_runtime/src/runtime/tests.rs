use super::*;
use crate::errors::ErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn test_default_config() {
    let runtime = Runtime::new();
    assert_eq!(runtime.config(), &RuntimeConfig::default());
    assert_eq!(runtime.config().max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
    assert!(runtime.atoms().is_empty());
}

#[test]
fn test_intern_is_identity_preserving() {
    let mut runtime = Runtime::new();
    let a = runtime.intern("lambda");
    let b = runtime.intern("lambda");
    assert_eq!(a, b);
    assert_eq!(a.id(), b.id());
    assert_eq!(runtime.atoms().len(), 1);
    assert_eq!(runtime.atom(a.id()).unwrap().name(), "lambda");
}

#[test]
fn test_unknown_atom_id() {
    let runtime = Runtime::new();
    let err = runtime.atom(AtomId::new(3)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err, crate::errors::unknown_atom(AtomId::new(3)));
}

#[test]
fn test_preintern_assigns_ids_in_order() {
    let mut runtime = Runtime::builder()
        .preintern(["nil", "true", "false"])
        .build();
    assert_eq!(runtime.atoms().len(), 3);
    assert_eq!(runtime.intern("true").id(), AtomId::new(1));
    assert_eq!(runtime.intern("new").id(), AtomId::new(3));
}

#[test]
fn test_atom_object() {
    let mut runtime = Runtime::new();
    let sym = runtime.atom_object("sym");
    assert_eq!(sym.as_atom().unwrap().name(), "sym");
    assert_eq!(sym, runtime.atom_object("sym"));
}

#[test]
fn test_builder_setters() {
    let config = RuntimeConfig {
        max_nesting_depth: 4,
        preintern: vec!["x".to_string()],
    };
    let runtime = Runtime::builder().config(config.clone()).build();
    assert_eq!(runtime.config(), &config);

    let runtime = Runtime::builder()
        .config(config)
        .max_nesting_depth(9)
        .build();
    assert_eq!(runtime.config().max_nesting_depth, 9);
    assert_eq!(runtime.config().preintern, vec!["x".to_string()]);
}

#[test]
fn test_root_chain_is_fresh() {
    let runtime = Runtime::new();
    let a = runtime.root_chain();
    let b = runtime.root_chain();
    assert!(!a.ptr_eq(&b));
    assert_eq!(a.depth(), 0);
    assert!(a.is_empty());
}

#[test]
fn test_chain_with_ops() {
    let runtime = Runtime::new();
    let chain = runtime.chain_with_ops(vec![Object::int(1)]);
    assert_eq!(chain.len(), 1);
    assert!(chain.parent().is_none());
}

#[test]
fn test_nested_chain_within_limit() {
    let runtime = Runtime::builder().max_nesting_depth(2).build();
    let root = runtime.root_chain();
    let child = runtime.nested_chain(&root).unwrap();
    let grandchild = runtime.nested_chain(&child).unwrap();
    assert_eq!(grandchild.depth(), 2);
    assert!(grandchild
        .closure()
        .root_owner()
        .is_some_and(|o| o.ptr_eq(&root)));
}

#[test]
fn test_nested_chain_past_limit() {
    let runtime = Runtime::builder().max_nesting_depth(1).build();
    let root = runtime.root_chain();
    let child = runtime.nested_chain(&root).unwrap();
    let err = runtime.nested_chain(&child).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingLimit);
    assert_eq!(err, crate::errors::nesting_limit(1));
}

#[test]
fn test_zero_depth_limit_refuses_any_nesting() {
    let runtime = Runtime::builder().max_nesting_depth(0).build();
    let root = runtime.root_chain();
    assert_eq!(
        runtime.nested_chain(&root).unwrap_err().kind(),
        ErrorKind::NestingLimit
    );
}
