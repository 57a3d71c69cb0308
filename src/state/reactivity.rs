// ============================================================================
// REACTIVITY - Valor compartido + suscriptores
// ============================================================================
// Los clones comparten valor Y suscriptores. Las notificaciones se lanzan
// con el borrow ya liberado, así un callback puede leer el estado.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

pub struct Observable<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Callback<T>)>>>,
    next_id: Rc<Cell<usize>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Lee sin clonar
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&*self.value.borrow())
    }

    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    fn notify(&self) {
        let snapshot = self.get();
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            subscribers: Rc::clone(&self.subscribers),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_new_value() {
        let state = Observable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.subscribe(move |v| sink.borrow_mut().push(*v));

        state.set(2);
        state.update(|v| *v += 10);
        assert_eq!(*seen.borrow(), vec![2, 12]);
    }

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = Observable::new(String::from("a"));
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        state.subscribe(move |_| c.set(c.get() + 1));

        let other = state.clone();
        other.set("b".into());
        assert_eq!(state.get(), "b");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn callback_can_read_state() {
        let state = Observable::new(vec![1, 2]);
        let reader = state.clone();
        let lens = Rc::new(Cell::new(0));
        let l = Rc::clone(&lens);
        state.subscribe(move |_| l.set(reader.with(|v| v.len())));
        state.update(|v| v.push(3));
        assert_eq!(lens.get(), 3);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let state = Observable::new(0);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = state.subscribe(move |_| c.set(c.get() + 1));

        state.set(1);
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set(2);
        assert_eq!(count.get(), 1);
    }
}
