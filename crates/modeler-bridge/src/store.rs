use diagram::{ChangeReason, Document};

pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&Document, ChangeReason) + Send>;

/// Owns the current diagram text and tells subscribers when it changes.
///
/// Plain state container: it does not validate what it is given, and
/// subscribers run synchronously inside `set`, in the order they subscribed.
pub struct DocumentStore {
    current: Document,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: SubscriptionId,
}

impl DocumentStore {
    pub fn new(initial: Document) -> Self {
        Self {
            current: initial,
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn get(&self) -> &Document {
        &self.current
    }

    pub fn revision(&self) -> u64 {
        self.current.revision
    }

    pub fn set(&mut self, doc: Document, reason: ChangeReason) {
        let revision = self.current.revision + 1;
        self.current = doc.stamped(revision);
        log::debug!(
            "Document replaced (revision {}, {} bytes, reason {})",
            revision,
            self.current.byte_len(),
            reason
        );

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.current, reason);
        }
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&Document, ChangeReason) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(Document::default())
    }
}
