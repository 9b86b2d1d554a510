/// Listener registry: the observer side of state holders.
///
/// State holders call `emit` after every mutation; the render loop and the
/// log forwarder subscribe. Listeners run synchronously, in subscription order.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

pub struct Listeners<E> {
    slots: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Listeners { slots: Vec::new(), next_id: 0 }
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(sid, _)| *sid != id);
        self.slots.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, f) in self.slots.iter_mut() {
            f(event);
        }
    }
}

#[cfg(test)]
impl<E> Listeners<E> {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
