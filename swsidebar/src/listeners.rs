use crate::consts::Counter;
use crate::page::ElementId;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Click,
    MouseDown,
    MouseMove,
    MouseUp,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Element(ElementId),
    Document,
}

/// Controller handler a listener routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SaveToggle,
    ToggleSidebar,
    StartResize,
    DoResize,
    StopResize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy)]
struct Binding {
    target: Target,
    kind: EventKind,
    action: Action,
}

#[derive(Default)]
pub struct ListenerTable {
    counter: Counter,
    bindings: IndexMap<ListenerId, Binding>,
}

impl ListenerTable {
    pub fn add(&mut self, target: Target, kind: EventKind, action: Action) -> ListenerId {
        let id = ListenerId(self.counter.next());
        self.bindings.insert(
            id,
            Binding {
                target,
                kind,
                action,
            },
        );
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.bindings.shift_remove(&id).is_some()
    }

    /// Actions bound to `kind` on `target`, in registration order.
    pub fn matching(&self, target: Target, kind: EventKind) -> Vec<Action> {
        self.bindings
            .values()
            .filter(|b| b.target == target && b.kind == kind)
            .map(|b| b.action)
            .collect()
    }

    pub fn count(&self, target: Target, kind: EventKind) -> usize {
        self.bindings
            .values()
            .filter(|b| b.target == target && b.kind == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Listeners that stay registered for as long as the guard lives.
pub struct ListenerGuard {
    table: Weak<RefCell<ListenerTable>>,
    ids: Vec<ListenerId>,
}

impl ListenerGuard {
    pub fn bind(
        table: &Rc<RefCell<ListenerTable>>,
        bindings: &[(Target, EventKind, Action)],
    ) -> Self {
        let mut listeners = table.borrow_mut();
        let ids = bindings
            .iter()
            .map(|&(target, kind, action)| listeners.add(target, kind, action))
            .collect();
        Self {
            table: Rc::downgrade(table),
            ids,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // the page may already be gone
        if let Some(table) = self.table.upgrade() {
            let mut table = table.borrow_mut();
            for id in self.ids.drain(..) {
                table.remove(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut table = ListenerTable::default();
        let id = table.add(Target::Document, EventKind::MouseMove, Action::DoResize);
        assert_eq!(
            table.matching(Target::Document, EventKind::MouseMove),
            vec![Action::DoResize]
        );
        assert!(table.remove(id));
        assert!(!table.remove(id));
        assert!(table.is_empty());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let table = Rc::new(RefCell::new(ListenerTable::default()));
        {
            let _guard = ListenerGuard::bind(
                &table,
                &[
                    (Target::Document, EventKind::MouseMove, Action::DoResize),
                    (Target::Document, EventKind::MouseUp, Action::StopResize),
                ],
            );
            assert_eq!(table.borrow().len(), 2);
        }
        assert!(table.borrow().is_empty());
    }

    #[test]
    fn test_guard_outliving_table() {
        let table = Rc::new(RefCell::new(ListenerTable::default()));
        let guard = ListenerGuard::bind(
            &table,
            &[(Target::Document, EventKind::MouseUp, Action::StopResize)],
        );
        drop(table);
        drop(guard);
    }
}
