// ============================================================================
// REACTIVITY - Store with dispatch / subscribe / immutable snapshots
// ============================================================================
// Single-threaded: Rc + RefCell, like the rest of the client state.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// State that can live in a [`Store`]: a pure transition per action
pub trait Reducible: Sized {
    type Action;

    fn reduce(&self, action: Self::Action) -> Self;
}

type Listener<S> = Rc<dyn Fn(&Rc<S>)>;

struct StoreInner<S> {
    state: RefCell<Rc<S>>,
    listeners: RefCell<Vec<(u64, Listener<S>)>>,
    next_listener_id: Cell<u64>,
    next_request_id: Cell<u64>,
    dispatching: Cell<bool>,
}

/// State container. Cloning the handle shares the same store.
///
/// Every dispatch produces a fresh `Rc<S>`; snapshots handed out earlier are
/// never touched, so a reader can hold one across any number of dispatches.
pub struct Store<S> {
    inner: Rc<StoreInner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Reducible + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(initial)),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                next_request_id: Cell::new(0),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Current immutable snapshot
    pub fn get_state(&self) -> Rc<S> {
        self.inner.state.borrow().clone()
    }

    /// Read a projection of the current snapshot
    pub fn select<R>(&self, selector: impl FnOnce(&S) -> R) -> R {
        selector(&self.inner.state.borrow())
    }

    /// Apply `action` and commit the new snapshot, then notify listeners.
    ///
    /// Listeners run after the commit and may dispatch again. Re-entering
    /// dispatch from inside a transition is a programming error and panics.
    pub fn dispatch(&self, action: S::Action) {
        if self.inner.dispatching.replace(true) {
            panic!("Store::dispatch called while a transition is being applied");
        }

        let next = {
            let current = self.inner.state.borrow();
            Rc::new(current.reduce(action))
        };
        *self.inner.state.borrow_mut() = next.clone();
        self.inner.dispatching.set(false);

        self.notify(&next);
    }

    /// Register a listener called after every committed change.
    /// The listener stays registered while the returned handle is alive.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<S>
    where
        F: Fn(&Rc<S>) + 'static,
    {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Monotonic id for async units started against this store
    pub fn next_request_id(&self) -> u64 {
        let id = self.inner.next_request_id.get() + 1;
        self.inner.next_request_id.set(id);
        id
    }

    fn notify(&self, snapshot: &Rc<S>) {
        // Copy first: listeners may subscribe/unsubscribe/dispatch
        let listeners: Vec<Listener<S>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        for listener in listeners {
            listener(snapshot);
        }
    }
}

/// Handle returned by [`Store::subscribe`]; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription<S> {
    store: Weak<StoreInner<S>>,
    id: u64,
}

impl<S> Subscription<S> {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
