//! Non-recursive teardown of nested object graphs.
//!
//! Dropping a container drops its children, which may be containers in
//! turn, so a list nested a hundred thousand deep would recurse that many
//! times. Payload destructors instead hand their children to `release`.
//! The outermost call drains a per-thread queue in a loop; calls made while
//! that loop runs only enqueue, so the native stack depth stays constant.

use std::cell::{Cell, RefCell};

use crate::object::Object;

thread_local! {
    /// Set while the outermost `release` drains the queue.
    static DRAINING: Cell<bool> = const { Cell::new(false) };

    /// Containers waiting to be dropped.
    static PENDING: RefCell<Vec<Object>> = const { RefCell::new(Vec::new()) };
}

/// Drop `children` without recursing into nested containers.
///
/// Values are dropped on the spot; they own no objects.
pub(crate) fn release(children: impl IntoIterator<Item = Object>) {
    let queued = PENDING.try_with(|pending| {
        pending
            .borrow_mut()
            .extend(children.into_iter().filter(|obj| matches!(obj, Object::Container(_))));
    });
    // The queue is gone during thread shutdown; `children` was then
    // dropped recursively along with the closure above.
    if queued.is_err() || DRAINING.try_with(Cell::get).unwrap_or(true) {
        return;
    }

    DRAINING.with(|draining| draining.set(true));
    while let Some(next) = PENDING
        .try_with(|pending| pending.borrow_mut().pop())
        .ok()
        .flatten()
    {
        drop(next);
    }
    DRAINING.with(|draining| draining.set(false));
}
