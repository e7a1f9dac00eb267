use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// Receives decoded results of one kind
pub trait ResultHandler<T> {
    fn handle(&mut self, result: &T);
}

/// Implement handler for simple callbacks / closures
impl<T, F: FnMut(&T)> ResultHandler<T> for F {
    fn handle(&mut self, result: &T) {
        self(result)
    }
}

/// Notification list owned by a decoder. Handlers run in subscription order.
pub struct Subscribers<T> {
    handlers: Vec<Box<dyn ResultHandler<T> + Send>>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn subscribe<H>(&mut self, handler: H)
    where
        H: ResultHandler<T> + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn notify(&mut self, result: &T) {
        for handler in self.handlers.iter_mut() {
            handler.handle(result);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Counter(Arc<Mutex<u32>>);

    impl ResultHandler<u32> for Counter {
        fn handle(&mut self, result: &u32) {
            *self.0.lock().unwrap() += *result;
        }
    }

    #[test]
    fn notifies_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut subscribers = Subscribers::new();
        for id in 0..3 {
            let seen = seen.clone();
            subscribers.subscribe(move |value: &u32| seen.lock().unwrap().push((id, *value)));
        }
        subscribers.notify(&7);
        assert_eq!(*seen.lock().unwrap(), vec![(0, 7), (1, 7), (2, 7)]);
        assert_eq!(subscribers.len(), 3);
    }

    #[test]
    fn struct_handlers_and_clear() {
        let total = Arc::new(Mutex::new(0));
        let mut subscribers = Subscribers::default();
        subscribers.subscribe(Counter(total.clone()));
        subscribers.notify(&2);
        subscribers.notify(&3);
        assert_eq!(*total.lock().unwrap(), 5);

        subscribers.clear();
        assert!(subscribers.is_empty());
        subscribers.notify(&10);
        assert_eq!(*total.lock().unwrap(), 5);
    }
}
