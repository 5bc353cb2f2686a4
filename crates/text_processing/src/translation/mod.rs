//! Translation clients keyed by language pair

mod noop;

pub use noop::NoopTranslator;

use std::collections::HashMap;
use std::sync::Arc;

use codemix_core::{LanguageLabel, Translator};

/// One translation client per ordered (source, target) pair
#[derive(Clone, Default)]
pub struct TranslationClients {
    clients: HashMap<(LanguageLabel, LanguageLabel), Arc<dyn Translator>>,
}

impl TranslationClients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client under its own source and target; replaces any
    /// client already registered for that pair
    pub fn insert(&mut self, client: Arc<dyn Translator>) {
        let key = (client.source(), client.target());
        tracing::debug!(
            from = %key.0,
            to = %key.1,
            client = client.name(),
            "Registered translation client"
        );
        self.clients.insert(key, client);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, client: Arc<dyn Translator>) -> Self {
        self.insert(client);
        self
    }

    pub fn get(&self, from: LanguageLabel, to: LanguageLabel) -> Option<&Arc<dyn Translator>> {
        self.clients.get(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl std::fmt::Debug for TranslationClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pairs: Vec<_> = self.clients.keys().collect();
        pairs.sort();
        f.debug_struct("TranslationClients")
            .field("pairs", &pairs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LanguageLabel::*;

    #[tokio::test]
    async fn test_lookup_by_pair() {
        let clients = TranslationClients::new()
            .with(Arc::new(NoopTranslator::new(Sundanese, Indonesian)))
            .with(Arc::new(NoopTranslator::new(Javanese, Indonesian)));

        assert_eq!(clients.len(), 2);
        assert!(clients.get(Indonesian, Sundanese).is_none());

        let client = clients.get(Sundanese, Indonesian).unwrap();
        assert_eq!(client.translate("abdi bade tuang").await.unwrap(), "abdi bade tuang");
        assert_eq!(client.name(), "noop");
    }

    #[test]
    fn test_insert_replaces_pair() {
        let mut clients = TranslationClients::new();
        clients.insert(Arc::new(NoopTranslator::new(Sundanese, Indonesian)));
        clients.insert(Arc::new(NoopTranslator::new(Sundanese, Indonesian)));
        assert_eq!(clients.len(), 1);
        assert!(format!("{clients:?}").contains("Sundanese"));
    }
}
