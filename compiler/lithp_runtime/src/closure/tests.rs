use super::*;
use crate::errors::ErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn test_root_scope() {
    let root = Closure::root();
    assert!(root.is_root());
    assert_eq!(root.depth(), 0);
    assert!(root.parent().is_none());
    assert!(root.topmost().ptr_eq(&root));
    assert!(root.owner().is_none());
    assert!(root.root_owner().is_none());
}

#[test]
fn test_child_links() {
    let root = Closure::root();
    let child = Closure::with_parent(&root);
    let grandchild = Closure::with_parent(&child);

    assert_eq!(grandchild.depth(), 2);
    assert!(!grandchild.is_root());
    assert!(grandchild.parent().is_some_and(|p| p.ptr_eq(&child)));
    assert!(grandchild.topmost().ptr_eq(&root));
    assert!(child.topmost().ptr_eq(&root));
}

// Lookup

#[test]
fn test_get_delegates_to_parent() {
    let root = Closure::root();
    root.define_local("x", Object::int(1));
    let child = Closure::with_parent(&root);

    assert_eq!(child.get("x").unwrap(), Object::int(1));
    assert!(!child.has_local("x"));
    assert!(root.has_local("x"));
}

#[test]
fn test_get_missing_is_name_error() {
    let root = Closure::root();
    let child = Closure::with_parent(&root);
    let err = child.get("y").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
    assert_eq!(err, crate::errors::undefined_name("y"));
}

#[test]
fn test_inner_binding_shadows_outer() {
    let root = Closure::root();
    root.define_local("x", Object::int(1));
    let child = Closure::with_parent(&root);
    child.define_local("x", Object::int(2));

    assert_eq!(child.get("x").unwrap(), Object::int(2));
    assert_eq!(root.get("x").unwrap(), Object::int(1));
}

#[test]
fn test_get_returns_shared_handle() {
    let root = Closure::root();
    let list = Object::empty_list();
    root.define_local("xs", list.clone());

    let child = Closure::with_parent(&root);
    child.get("xs").unwrap().push(Object::int(9)).unwrap();
    assert_eq!(list.len().unwrap(), 1);
}

// Assignment

#[test]
fn test_assign_overwrites_defining_scope() {
    let root = Closure::root();
    root.define_local("x", Object::int(1));
    let child = Closure::with_parent(&root);

    child.assign("x", Object::int(3));
    assert_eq!(root.get("x").unwrap(), Object::int(3));
    assert!(!child.has_local("x"));
}

#[test]
fn test_assign_creates_in_innermost_scope() {
    let root = Closure::root();
    let child = Closure::with_parent(&root);

    child.assign("y", Object::int(4));
    assert!(child.has_local("y"));
    assert_eq!(root.get("y").unwrap_err().kind(), ErrorKind::Name);
}

#[test]
fn test_assign_targets_nearest_definition() {
    let root = Closure::root();
    root.define_local("x", Object::int(0));
    let mid = Closure::with_parent(&root);
    mid.define_local("x", Object::int(1));
    let leaf = Closure::with_parent(&mid);

    leaf.assign("x", Object::int(2));
    assert_eq!(mid.get("x").unwrap(), Object::int(2));
    assert_eq!(root.get("x").unwrap(), Object::int(0));
}

#[test]
fn test_define_local_bypasses_delegation() {
    let root = Closure::root();
    root.define_local("x", Object::int(1));
    let child = Closure::with_parent(&root);

    child.define_local("x", Object::string("local"));
    assert_eq!(root.get("x").unwrap(), Object::int(1));
    assert_eq!(child.get("x").unwrap(), Object::string("local"));
}

#[test]
fn test_siblings_share_parent_writes() {
    let root = Closure::root();
    root.define_local("n", Object::int(0));
    let a = Closure::with_parent(&root);
    let b = Closure::with_parent(&root);

    a.assign("n", Object::int(5));
    assert_eq!(b.get("n").unwrap(), Object::int(5));
}

// Introspection

#[test]
fn test_local_keys_sorted() {
    let root = Closure::root();
    root.define_local("b", Object::int(1));
    root.define_local("a", Object::int(2));
    root.define_local("c", Object::int(3));
    assert_eq!(root.local_keys(), vec!["a", "b", "c"]);
    assert_eq!(root.local_len(), 3);
}

#[test]
fn test_resolve_depth() {
    let root = Closure::root();
    root.define_local("outer", Object::int(1));
    let child = Closure::with_parent(&root);
    child.define_local("inner", Object::int(2));

    assert_eq!(child.resolve_depth("inner"), Some(1));
    assert_eq!(child.resolve_depth("outer"), Some(0));
    assert_eq!(child.resolve_depth("missing"), None);
}

#[test]
fn test_structural_view() {
    let root = Closure::root();
    root.define_local("k", Object::int(1));
    let obj = Object::from(root);

    assert_eq!(obj.len().unwrap(), 1);
    assert_eq!(obj.key("k").unwrap(), Object::int(1));
    assert_eq!(obj.key("z").unwrap_err().kind(), ErrorKind::Name);
    assert_eq!(
        obj.push(Object::int(2)).unwrap_err().kind(),
        ErrorKind::Capability
    );
    assert_eq!(obj.to_string(), "<closure depth=0 locals=1>");
}

#[test]
fn test_child_outlives_dropped_parent_handle() {
    let child = {
        let root = Closure::root();
        root.define_local("kept", Object::int(7));
        Closure::with_parent(&root)
    };
    assert_eq!(child.get("kept").unwrap(), Object::int(7));
    assert!(child.topmost().is_root());
}
