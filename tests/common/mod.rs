// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test sources.

use srcchain::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

static TRACING: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// In-memory source that counts how often it is queried and remembers the
/// contexts it was handed.
#[allow(dead_code)]
pub struct MockSource {
    name: String,
    values: HashMap<String, ConfigValue>,
    calls: AtomicUsize,
    contexts: Mutex<Vec<Option<Context>>>,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: HashMap::new(),
            calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_value(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contexts(&self) -> Vec<Option<Context>> {
        self.contexts.lock().unwrap().clone()
    }
}

impl ConfigSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_value(&self, key: &ConfigKey, context: Option<&Context>) -> Result<Option<ConfigValue>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().unwrap().push(context.cloned());
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}

impl SecretSource for MockSource {}

/// Source whose backend is always down.
#[allow(dead_code)]
pub struct FailingSource;

impl ConfigSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn get_value(&self, _key: &ConfigKey, _context: Option<&Context>) -> Result<Option<ConfigValue>> {
        Err(ConfigError::SourceError {
            source_name: "failing".to_string(),
            message: "backend unavailable".to_string(),
            source: None,
        })
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(vec![])
    }
}

impl SecretSource for FailingSource {}
