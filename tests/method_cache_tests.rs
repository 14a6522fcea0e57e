//! Integration Tests for the Method Cache
//!
//! Dispatch by `<method><Action>` name against repository-style targets,
//! backed by the bundled shared store or a failing stub store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use method_cache::{
    CacheConfig, CacheError, CacheTarget, KeyValueStore, MemoryStore, MethodCache, Outcome,
    SharedStore,
};
use serde_json::{json, Value};

// == Fixtures ==

struct BookRepo {
    calls: AtomicUsize,
}

impl BookRepo {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheTarget for BookRepo {
    fn class_name(&self) -> &str {
        "Book"
    }

    fn has_method(&self, method: &str) -> bool {
        matches!(method, "GetById" | "ListByAuthor" | "CountAll" | "Fail")
    }

    async fn call(&self, method: &str, args: &[Value]) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match method {
            "GetById" => Ok(json!({"id": args[0], "title": "Dune"})),
            "ListByAuthor" => Ok(json!([])),
            "CountAll" => Ok(json!(0)),
            "Fail" => anyhow::bail!("database unavailable"),
            other => anyhow::bail!("no such method {}", other),
        }
    }
}

fn setup() -> (SharedStore, MethodCache) {
    setup_with(CacheConfig::default())
}

fn setup_with(config: CacheConfig) -> (SharedStore, MethodCache) {
    let store = SharedStore::new(MemoryStore::new(1000, Duration::from_secs(300)));
    let cache = MethodCache::with_store(Arc::new(store.clone()), config);
    (store, cache)
}

async fn ttl_of(store: &SharedStore, key: &str) -> Duration {
    store.read().await.ttl(key).unwrap().unwrap()
}

// == Cache ==

#[tokio::test]
async fn test_get_by_id_cache_example() {
    let (store, cache) = setup();
    let repo = BookRepo::new();

    let first = cache
        .dispatch(&repo, "GetByIdCache", &[json!(100)])
        .await
        .unwrap();
    assert_eq!(first, Outcome::Value(json!({"id": 100, "title": "Dune"})));
    assert_eq!(repo.calls(), 1);

    let stored = store
        .write()
        .await
        .get("book:getbyid:5dd14615efeb2d086e519ed35efd3f73")
        .unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&stored).unwrap(),
        json!({"id": 100, "title": "Dune"})
    );

    let second = cache
        .dispatch(&repo, "GetByIdCache", &[json!(100)])
        .await
        .unwrap();
    assert_eq!(second, first);
    assert_eq!(repo.calls(), 1, "Second call must be served from the store");
}

#[tokio::test]
async fn test_prefix_and_namespaced_class() {
    let (store, cache) = setup_with(CacheConfig::default().with_prefix("Shop:"));

    struct Namespaced;

    #[async_trait]
    impl CacheTarget for Namespaced {
        fn class_name(&self) -> &str {
            "App\\Repository\\Book"
        }

        fn has_method(&self, _method: &str) -> bool {
            true
        }

        async fn call(&self, _method: &str, _args: &[Value]) -> anyhow::Result<Value> {
            Ok(json!("ok"))
        }
    }

    cache
        .dispatch(&Namespaced, "GetByIdCache", &[json!(100)])
        .await
        .unwrap();

    let keys = store.read().await.keys("*");
    assert_eq!(
        keys,
        vec!["shop:app_repository_book:getbyid:5dd14615efeb2d086e519ed35efd3f73".to_string()]
    );
}

#[tokio::test]
async fn test_ttl_follows_result_emptiness() {
    let (store, cache) = setup();
    let repo = BookRepo::new();

    cache.dispatch(&repo, "GetByIdCache", &[json!(1)]).await.unwrap();
    cache
        .dispatch(&repo, "ListByAuthorCache", &[json!("Herbert")])
        .await
        .unwrap();
    cache.dispatch(&repo, "CountAllCache", &[]).await.unwrap();

    let full = ttl_of(&store, &cache.key("Book", "GetById", &[json!(1)][..]).unwrap()).await;
    let empty_list = ttl_of(
        &store,
        &cache.key("Book", "ListByAuthor", &[json!("Herbert")][..]).unwrap(),
    )
    .await;
    let zero = ttl_of(&store, &cache.key("Book", "CountAll", &[] as &[Value]).unwrap()).await;

    assert!(full > Duration::from_secs(3590));
    assert!(empty_list <= Duration::from_secs(10));
    assert!(zero <= Duration::from_secs(10));
}

#[tokio::test]
async fn test_plain_text_entry_returned_raw() {
    let (store, cache) = setup();
    let repo = BookRepo::new();
    let key = cache.key("Book", "GetById", &[json!(5)][..]).unwrap();
    store
        .write()
        .await
        .set(key, "written by another client".to_string(), None)
        .unwrap();

    let outcome = cache.dispatch(&repo, "GetByIdCache", &[json!(5)]).await.unwrap();

    assert_eq!(outcome, Outcome::Value(json!("written by another client")));
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_argument_order_changes_key() {
    let (_, cache) = setup();
    let repo = BookRepo::new();

    cache
        .dispatch(&repo, "GetByIdCache", &[json!(1), json!(2)])
        .await
        .unwrap();
    cache
        .dispatch(&repo, "GetByIdCache", &[json!(2), json!(1)])
        .await
        .unwrap();

    assert_eq!(repo.calls(), 2);
}

#[tokio::test]
async fn test_invocation_error_is_not_cached() {
    let (store, cache) = setup();
    let repo = BookRepo::new();

    let result = cache.dispatch(&repo, "FailCache", &[]).await;

    match result {
        Err(CacheError::Invocation(err)) => assert!(err.to_string().contains("unavailable")),
        other => panic!("expected invocation error, got {:?}", other),
    }
    assert!(store.read().await.is_empty());
}

#[tokio::test]
async fn test_dispatch_through_trait_object() {
    let (_, cache) = setup();
    let target: Box<dyn CacheTarget> = Box::new(BookRepo::new());

    let outcome = cache
        .dispatch(target.as_ref(), "GetByIdCache", &[json!(9)])
        .await
        .unwrap();
    assert_eq!(outcome.into_value()["id"], 9);
}

#[tokio::test]
async fn test_long_keys_and_large_results_are_cached() {
    let (store, cache) = setup_with(CacheConfig::default().with_prefix("myapp:prod:"));

    struct DeepRepo {
        class: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CacheTarget for DeepRepo {
        fn class_name(&self) -> &str {
            &self.class
        }

        fn has_method(&self, _method: &str) -> bool {
            true
        }

        async fn call(&self, _method: &str, _args: &[Value]) -> anyhow::Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!("x".repeat(1024 * 1024 + 10)))
        }
    }

    let repo = DeepRepo {
        class: format!("my_app::repositories::{}BookRepository", "catalog::".repeat(30)),
        calls: AtomicUsize::new(0),
    };

    let first = cache.dispatch(&repo, "getByIdCache", &[json!(1)]).await.unwrap();
    let second = cache.dispatch(&repo, "getByIdCache", &[json!(1)]).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    let key = cache.key(&repo.class, "getById", &[json!(1)][..]).unwrap();
    assert!(key.len() > 256);
    assert_eq!(store.read().await.len(), 1);
}

// == Clear / Flush ==

#[tokio::test]
async fn test_clear_removes_single_entry() {
    let (store, cache) = setup();
    let repo = BookRepo::new();
    cache.dispatch(&repo, "GetByIdCache", &[json!(1)]).await.unwrap();
    cache.dispatch(&repo, "GetByIdCache", &[json!(2)]).await.unwrap();

    let cleared = cache.dispatch(&repo, "GetByIdClear", &[json!(1)]).await.unwrap();
    assert_eq!(cleared, Outcome::Deleted(1));

    let again = cache.dispatch(&repo, "GetByIdClear", &[json!(1)]).await.unwrap();
    assert_eq!(again, Outcome::Deleted(0));

    assert_eq!(store.read().await.len(), 1);
    cache.dispatch(&repo, "GetByIdCache", &[json!(2)]).await.unwrap();
    assert_eq!(repo.calls(), 2, "Entry for other arguments must survive");
}

#[tokio::test]
async fn test_flush_removes_all_entries_of_one_method() {
    let (store, cache) = setup();
    let repo = BookRepo::new();
    for id in 1..=3 {
        cache.dispatch(&repo, "GetByIdCache", &[json!(id)]).await.unwrap();
    }
    cache
        .dispatch(&repo, "ListByAuthorCache", &[json!("Austen")])
        .await
        .unwrap();

    let flushed = cache
        .dispatch(&repo, "GetByIdFlush", &[json!("ignored")])
        .await
        .unwrap();
    assert_eq!(flushed, Outcome::Deleted(3));

    assert_eq!(
        store.read().await.keys("*"),
        vec![cache
            .key("Book", "ListByAuthor", &[json!("Austen")][..])
            .unwrap()]
    );
}

#[tokio::test]
async fn test_flush_with_glob_characters_in_prefix() {
    let (store, cache) = setup_with(CacheConfig::default().with_prefix("App[v1]*:"));
    let repo = BookRepo::new();
    for id in 1..=2 {
        cache.dispatch(&repo, "GetByIdCache", &[json!(id)]).await.unwrap();
    }

    let flushed = cache.dispatch(&repo, "GetByIdFlush", &[]).await.unwrap();

    assert_eq!(flushed, Outcome::Deleted(2));
    assert!(store.read().await.is_empty());
}

#[tokio::test]
async fn test_flush_with_nothing_cached() {
    let (_, cache) = setup();
    let outcome = cache
        .dispatch(&BookRepo::new(), "GetByIdFlush", &[])
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Deleted(0));
}

// == Errors ==

#[tokio::test]
async fn test_no_store_bound() {
    let cache = MethodCache::new(CacheConfig::default());
    let result = cache
        .dispatch(&BookRepo::new(), "GetByIdCache", &[json!(1)])
        .await;
    assert!(matches!(result, Err(CacheError::NotConfigured)));
}

#[tokio::test]
async fn test_unrecognized_names() {
    let (store, cache) = setup();
    let repo = BookRepo::new();

    for name in ["Foo", "", "GetById", "GetByIdClean", "GetByIdcache"] {
        let result = cache.dispatch(&repo, name, &[]).await;
        assert!(
            matches!(result, Err(CacheError::NoSuchMethod { .. })),
            "{} should be rejected",
            name
        );
    }

    assert_eq!(repo.calls(), 0);
    let stats = store.read().await.stats();
    assert_eq!(stats.hits + stats.misses, 0);
}

#[tokio::test]
async fn test_unknown_base_method() {
    let (_, cache) = setup();
    let repo = BookRepo::new();

    let err = cache
        .dispatch(&repo, "DeleteAllCache", &[])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Method Book->DeleteAll does not exist");
    assert_eq!(repo.calls(), 0);
}

/// Store whose every operation fails, like a dropped connection.
struct DisconnectedStore;

#[async_trait]
impl KeyValueStore for DisconnectedStore {
    async fn get(&self, _key: &str) -> method_cache::Result<Option<String>> {
        Err(CacheError::Store(anyhow::anyhow!("connection refused")))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> method_cache::Result<()> {
        Err(CacheError::Store(anyhow::anyhow!("connection refused")))
    }

    async fn delete(&self, _keys: &[String]) -> method_cache::Result<u64> {
        Err(CacheError::Store(anyhow::anyhow!("connection refused")))
    }

    async fn keys(&self, _pattern: &str) -> method_cache::Result<Vec<String>> {
        Err(CacheError::Store(anyhow::anyhow!("connection refused")))
    }
}

#[tokio::test]
async fn test_store_errors_propagate() {
    let cache = MethodCache::with_store(Arc::new(DisconnectedStore), CacheConfig::default());
    let repo = BookRepo::new();

    for name in ["GetByIdCache", "GetByIdClear", "GetByIdFlush"] {
        let result = cache.dispatch(&repo, name, &[json!(1)]).await;
        assert!(matches!(result, Err(CacheError::Store(_))), "{} should fail", name);
    }
    assert_eq!(repo.calls(), 0, "Lookup failure must not fall through to the method");
}
