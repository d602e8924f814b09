// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for source precedence and list isolation.

mod common;

use common::{FailingSource, MockSource};
use srcchain::prelude::*;
use std::io::Write;
use std::sync::Arc;
use std::thread;
use tempfile::NamedTempFile;

#[test]
fn test_precedence_follows_list_order() {
    let manager = ConfigurationManager::builder()
        .with_source(Arc::new(MockSource::new("a").with_value("key", "from_a")))
        .with_source(Arc::new(MockSource::new("b").with_value("key", "from_b")))
        .build()
        .unwrap();
    assert_eq!(manager.get("key").unwrap(), "from_a");

    let manager = ConfigurationManager::builder()
        .with_source(Arc::new(MockSource::new("b").with_value("key", "from_b")))
        .with_source(Arc::new(MockSource::new("a").with_value("key", "from_a")))
        .build()
        .unwrap();
    assert_eq!(manager.get("key").unwrap(), "from_b");
}

#[test]
#[cfg(feature = "yaml")]
fn test_precedence_cli_over_yaml() {
    let mut yaml_file = NamedTempFile::new().unwrap();
    writeln!(yaml_file, "test.key: yaml_value\nyaml.key: yaml_only").unwrap();

    let manager = ConfigurationManager::builder()
        .with_cli_args(vec!["--test.key", "cli_value"])
        .with_yaml_file(yaml_file.path())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(manager.get("test.key").unwrap(), "cli_value");
    assert_eq!(manager.get("yaml.key").unwrap(), "yaml_only");
}

#[test]
#[cfg(all(feature = "env", feature = "yaml"))]
fn test_partial_overlap() {
    use srcchain::adapters::EnvSource;
    use std::collections::HashMap;

    let mut yaml_file = NamedTempFile::new().unwrap();
    writeln!(yaml_file, "key.a: yaml_a\nkey.b: yaml_b\nkey.c: yaml_c").unwrap();

    let env = EnvSource::with_values(HashMap::from([(
        "key.a".to_string(),
        "env_a".to_string(),
    )]));

    let manager = ConfigurationManager::builder()
        .with_env(env)
        .with_yaml_file(yaml_file.path())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(manager.get("key.a").unwrap(), "env_a");
    assert_eq!(manager.get("key.b").unwrap(), "yaml_b");
    assert_eq!(manager.get("key.c").unwrap(), "yaml_c");
}

#[test]
fn test_later_sources_not_queried_after_match() {
    let second = Arc::new(MockSource::new("second").with_value("key", "two"));
    let manager = ConfigurationManager::builder()
        .with_source(Arc::new(MockSource::new("first").with_value("key", "one")))
        .with_source(second.clone())
        .build()
        .unwrap();

    manager.get("key").unwrap();
    assert_eq!(second.calls(), 0);
}

#[test]
fn test_each_source_queried_at_most_once() {
    let sources: Vec<Arc<MockSource>> = (0..4).map(|i| Arc::new(MockSource::new(&format!("s{i}")))).collect();
    let mut builder = ConfigurationManager::builder();
    for source in &sources {
        builder = builder.with_source(source.clone());
    }
    let manager = builder.build().unwrap();

    assert!(manager.get("absent").is_err());
    for source in &sources {
        assert_eq!(source.calls(), 1);
    }
}

#[test]
fn test_falsy_values_are_found() {
    let first = MockSource::new("first")
        .with_value("bool", false)
        .with_value("int", 0)
        .with_value("string", "")
        .with_value("list", ConfigValue::List(vec![]));
    let second = MockSource::new("second")
        .with_value("bool", true)
        .with_value("int", 1)
        .with_value("string", "x")
        .with_value("list", vec!["x"]);

    let manager = ConfigurationManager::builder()
        .with_source(Arc::new(first))
        .with_source(Arc::new(second))
        .build()
        .unwrap();

    assert_eq!(manager.get("bool").unwrap(), ConfigValue::Bool(false));
    assert_eq!(manager.get("int").unwrap(), ConfigValue::Integer(0));
    assert_eq!(manager.get("string").unwrap(), "");
    assert_eq!(manager.get("list").unwrap(), ConfigValue::List(vec![]));
}

#[test]
fn test_secret_lookup_ignores_regular_sources() {
    let regular = Arc::new(MockSource::new("regular").with_value("password", "plain"));
    let manager = ConfigurationManager::builder()
        .with_source(regular.clone())
        .with_secret_source(Arc::new(MockSource::new("vault")))
        .build()
        .unwrap();

    assert!(matches!(
        manager.get_secret("password"),
        Err(ConfigError::SecretNotFound { .. })
    ));
    assert_eq!(regular.calls(), 0);
}

#[test]
fn test_regular_lookup_ignores_secret_sources() {
    let vault = Arc::new(MockSource::new("vault").with_value("env", "hidden"));
    let manager = ConfigurationManager::builder()
        .with_secret_source(vault.clone())
        .build()
        .unwrap();

    assert!(matches!(
        manager.get("env"),
        Err(ConfigError::ValueNotFound { .. })
    ));
    assert_eq!(vault.calls(), 0);
}

#[test]
fn test_secret_default() {
    let manager = ConfigurationManager::builder().build().unwrap();
    let value = manager
        .resolve(Lookup::new("api_key").secret().with_default("none"))
        .unwrap();
    assert_eq!(value, "none");
}

#[test]
fn test_context_forwarded_unchanged_to_every_queried_source() {
    let first = Arc::new(MockSource::new("first"));
    let second = Arc::new(MockSource::new("second").with_value("key", 1));
    let manager = ConfigurationManager::builder()
        .with_source(first.clone())
        .with_source(second.clone())
        .build()
        .unwrap();

    let ctx = Context::new().with("table_id", "t1").with("extra", true);
    manager.get_with_context("key", ctx.clone()).unwrap();

    assert_eq!(first.contexts(), vec![Some(ctx.clone())]);
    assert_eq!(second.contexts(), vec![Some(ctx)]);
}

#[test]
fn test_processor_invoked_once_with_winning_source() {
    let manager = ConfigurationManager::builder()
        .with_source(Arc::new(MockSource::new("first")))
        .with_source(Arc::new(MockSource::new("second").with_value("key", "v")))
        .with_source(Arc::new(MockSource::new("third").with_value("key", "w")))
        .build()
        .unwrap();

    let mut calls = Vec::new();
    let value = manager
        .resolve(Lookup::new("key").with_processor(|source, value| {
            calls.push((source.name().to_string(), value));
            Ok(ConfigValue::from(42))
        }))
        .unwrap();

    assert_eq!(value, ConfigValue::from(42));
    assert_eq!(calls, vec![("second".to_string(), ConfigValue::from("v"))]);
}

#[test]
fn test_processor_sees_secret_source() {
    let manager = ConfigurationManager::builder()
        .with_secret_source(Arc::new(MockSource::new("vault").with_value("password", "p")))
        .build()
        .unwrap();

    let value = manager
        .resolve(Lookup::new("password").secret().with_processor(|source, value| {
            Ok(ConfigValue::from(format!("{}:{}", source.name(), value)))
        }))
        .unwrap();
    assert_eq!(value, "vault:p");
}

#[test]
fn test_source_failure_propagates() {
    let manager = ConfigurationManager::builder()
        .with_source(Arc::new(MockSource::new("first")))
        .with_source(Arc::new(FailingSource))
        .with_source(Arc::new(MockSource::new("last").with_value("key", "v")))
        .with_secret_source(Arc::new(FailingSource))
        .build()
        .unwrap();

    assert!(matches!(manager.get("key"), Err(ConfigError::SourceError { .. })));
    assert!(matches!(
        manager.get_or("key", "default"),
        Err(ConfigError::SourceError { .. })
    ));
    assert!(matches!(
        manager.get_secret("password"),
        Err(ConfigError::SourceError { .. })
    ));
}

#[test]
fn test_has_key() {
    let manager = ConfigurationManager::builder()
        .with_source(Arc::new(MockSource::new("m").with_value("existing.key", "value")))
        .build()
        .unwrap();

    assert!(manager.has("existing.key").unwrap());
    assert!(!manager.has("nonexistent.key").unwrap());
}

#[test]
fn test_empty_manager() {
    let manager = ConfigurationManager::builder().build().unwrap();
    assert!(manager.get("test.key").unwrap_err().is_not_found());
    assert!(manager.get_secret("test.key").unwrap_err().is_not_found());
}

#[test]
fn test_concurrent_lookups() {
    let manager = Arc::new(
        ConfigurationManager::builder()
            .with_source(Arc::new(MockSource::new("m").with_value("key", "shared")))
            .with_secret_source(Arc::new(MockSource::new("vault").with_value("password", "p")))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert_eq!(manager.get("key").unwrap(), "shared");
                    assert_eq!(manager.get_secret("password").unwrap(), "p");
                    assert_eq!(
                        manager.get_or("missing", i).unwrap(),
                        ConfigValue::from(i)
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
