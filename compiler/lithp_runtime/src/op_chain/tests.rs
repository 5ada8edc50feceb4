use super::*;
use crate::errors::ErrorKind;
use pretty_assertions::assert_eq;

fn chain_of(values: &[i64]) -> OpChain {
    let chain = OpChain::new();
    for &v in values {
        chain.append(Object::int(v));
    }
    chain
}

// Cursor

#[test]
fn test_new_chain_starts_before_first_op() {
    let chain = chain_of(&[1]);
    assert_eq!(chain.cursor(), -1);
    assert_eq!(chain.current(), None);
    assert!(!chain.is_exhausted());
}

#[test]
fn test_iterate_to_end_of_sequence() {
    let chain = chain_of(&[10, 20, 30]);
    assert_eq!(chain.next().unwrap(), Some(Object::int(10)));
    assert_eq!(chain.next().unwrap(), Some(Object::int(20)));
    assert_eq!(chain.current(), Some(Object::int(20)));
    assert_eq!(chain.next().unwrap(), Some(Object::int(30)));
    assert_eq!(chain.next().unwrap(), None);
    assert!(chain.is_exhausted());
    assert_eq!(chain.cursor(), 3);
}

#[test]
fn test_end_of_sequence_keeps_current() {
    let chain = chain_of(&[1, 2]);
    chain.next().unwrap();
    chain.next().unwrap();
    assert_eq!(chain.next().unwrap(), None);
    assert_eq!(chain.current(), Some(Object::int(2)));
}

#[test]
fn test_next_past_end_of_sequence_fails() {
    let chain = chain_of(&[1]);
    chain.next().unwrap();
    chain.next().unwrap();
    let err = chain.next().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyAccess);
    assert_eq!(err, crate::errors::chain_exhausted());
    assert_eq!(chain.cursor(), 1);
}

#[test]
fn test_empty_chain() {
    let chain = OpChain::new();
    assert!(chain.is_empty());
    assert_eq!(chain.next().unwrap(), None);
    assert_eq!(chain.current(), None);
    assert_eq!(chain.next().unwrap_err().kind(), ErrorKind::EmptyAccess);
}

#[test]
fn test_next_advances_exactly_once() {
    let chain = chain_of(&[1, 2, 3, 4]);
    for expected in 1..=4 {
        assert_eq!(chain.next().unwrap(), Some(Object::int(expected)));
        assert_eq!(chain.cursor(), (expected - 1) as isize);
    }
}

#[test]
fn test_rewind_restarts_iteration() {
    let chain = chain_of(&[5, 6]);
    chain.next().unwrap();
    chain.next().unwrap();
    chain.next().unwrap();

    chain.rewind();
    assert_eq!(chain.cursor(), -1);
    assert_eq!(chain.current(), None);
    assert_eq!(chain.next().unwrap(), Some(Object::int(5)));
}

// Append

#[test]
fn test_append_after_exhaustion_is_reachable() {
    let chain = chain_of(&[1]);
    chain.next().unwrap();
    assert_eq!(chain.next().unwrap(), None);

    chain.append(Object::int(2));
    assert!(!chain.is_exhausted());
    assert_eq!(chain.next().unwrap(), Some(Object::int(2)));
    assert_eq!(chain.next().unwrap(), None);
}

#[test]
fn test_append_to_exhausted_empty_chain() {
    let chain = OpChain::new();
    assert_eq!(chain.next().unwrap(), None);
    chain.append(Object::string("op"));
    assert_eq!(chain.next().unwrap(), Some(Object::string("op")));
}

#[test]
fn test_append_during_iteration() {
    let chain = chain_of(&[1]);
    chain.next().unwrap();
    chain.append(Object::int(2));
    assert_eq!(chain.next().unwrap(), Some(Object::int(2)));
}

#[test]
fn test_append_stores_op() {
    let chain = OpChain::new();
    let op = Object::empty_list();
    chain.append(op.clone());
    assert_eq!(chain.len(), 1);
    assert!(chain.get(0).unwrap().same_object(&op));
    assert_eq!(
        chain.get(1).unwrap_err().kind(),
        ErrorKind::IndexOutOfBounds
    );
}

#[test]
fn test_from_ops() {
    let chain = OpChain::from_ops(None, vec![Object::int(1), Object::int(2)]);
    assert_eq!(chain.ops(), vec![Object::int(1), Object::int(2)]);
    assert_eq!(chain.cursor(), -1);
    assert_eq!(chain.next().unwrap(), Some(Object::int(1)));
}

// Nesting and scope

#[test]
fn test_root_chain_scope() {
    let chain = OpChain::new();
    assert_eq!(chain.depth(), 0);
    assert!(chain.parent().is_none());
    assert!(chain.closure().is_root());
    assert!(chain.closure().owner().is_some_and(|o| o.ptr_eq(&chain)));
    assert!(chain.closure().root_owner().is_some_and(|o| o.ptr_eq(&chain)));
}

#[test]
fn test_nested_chain_scope_links() {
    let root = OpChain::new();
    let child = OpChain::with_parent(&root);
    let grandchild = OpChain::with_parent(&child);

    assert_eq!(grandchild.depth(), 2);
    assert!(grandchild.parent().is_some_and(|p| p.ptr_eq(&child)));
    assert!(grandchild
        .closure()
        .parent()
        .is_some_and(|p| p.ptr_eq(child.closure())));
    assert!(grandchild.closure().topmost().ptr_eq(root.closure()));
    assert!(grandchild
        .closure()
        .root_owner()
        .is_some_and(|o| o.ptr_eq(&root)));
}

#[test]
fn test_nested_chain_resolves_through_parent_scope() {
    let root = OpChain::new();
    root.closure().define_local("x", Object::int(1));
    let child = OpChain::with_parent(&root);

    assert_eq!(child.closure().get("x").unwrap(), Object::int(1));
    child.closure().assign("x", Object::int(3));
    assert_eq!(root.closure().get("x").unwrap(), Object::int(3));
}

#[test]
fn test_ops_and_bindings_are_independent() {
    let chain = chain_of(&[1]);
    chain.closure().define_local("x", Object::int(2));
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.closure().local_len(), 1);
}

#[test]
fn test_owner_gone_after_chain_dropped() {
    let chain = OpChain::new();
    let scope = chain.closure().clone();
    drop(chain);
    assert!(scope.owner().is_none());
    assert!(scope.root_owner().is_none());
}

#[test]
fn test_child_chain_keeps_parent_alive() {
    let child = {
        let root = OpChain::new();
        OpChain::with_parent(&root)
    };
    assert!(child.closure().root_owner().is_some());
    assert!(child.parent().is_some());
}

// Structural view

#[test]
fn test_structural_view() {
    let chain = chain_of(&[7]);
    let obj = Object::from(chain.clone());

    assert_eq!(obj.len().unwrap(), 1);
    assert_eq!(obj.index(0).unwrap(), Object::int(7));
    obj.push(Object::int(8)).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(obj.pop().unwrap_err().kind(), ErrorKind::Capability);
    assert_eq!(obj.to_string(), "<op-chain len=2 cursor=-1>");
}
