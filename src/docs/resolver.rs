use crate::docs::store::DocStore;
use crate::docs::topic::{InvalidTopic, Topic};

/// Translates a topic string into documentation content.
///
/// Validation is strict (exact enumeration match, loud failure), retrieval
/// is lenient (a missing asset degrades to an empty string inside
/// [`DocStore`]). The split lets the enumeration evolve independently of
/// asset packaging: a bad topic is a caller bug, a missing file is a
/// deployment gap.
#[derive(Debug, Clone)]
pub struct DocResolver {
    store: DocStore,
}

impl DocResolver {
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// Resolve a topic identifier to its markdown content.
    ///
    /// Pure mapping: same topic, same content, barring out-of-band file
    /// changes. No state, no retries.
    pub fn resolve(&self, topic: &str) -> Result<String, InvalidTopic> {
        let topic: Topic = topic.parse()?;
        Ok(self.store.retrieve(topic.filename()))
    }
}
