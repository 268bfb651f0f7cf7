//! Contract tests run against every catalog backend.

use super::*;
use crate::error::Error;
use crate::services::images::image_ref_for;
use tempfile::TempDir;

/// One store per backend, with the temp dir that keeps its files alive.
fn backends() -> Vec<(&'static str, CatalogStore, TempDir)> {
    let snapshot_dir = TempDir::new().unwrap();
    let snapshot = CatalogStore::snapshot(snapshot_dir.path().join("items.json")).unwrap();

    let sqlite_dir = TempDir::new().unwrap();
    let sqlite = CatalogStore::sqlite(sqlite_dir.path().join("catalog.sqlite3")).unwrap();

    vec![("snapshot", snapshot, snapshot_dir), ("sqlite", sqlite, sqlite_dir)]
}

fn new_item(name: &str, category: &str) -> NewItem {
    NewItem::new(name, category, image_ref_for(name.as_bytes()))
}

#[tokio::test]
async fn test_ids_are_sequential_from_one() {
    for (backend, store, _tmp) in backends() {
        let mut ids = Vec::new();
        for i in 0..5 {
            let item = store.add(new_item(&format!("item {i}"), "Misc")).await.unwrap();
            ids.push(item.id);
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5], "backend: {backend}");
    }
}

#[tokio::test]
async fn test_add_then_get_round_trip() {
    for (backend, store, _tmp) in backends() {
        let image = image_ref_for(b"book cover");
        let added = store
            .add(NewItem::new("Book", "Reading", image.clone()))
            .await
            .unwrap();

        let fetched = store.get(added.id).await.unwrap();
        assert_eq!(fetched, added, "backend: {backend}");
        assert_eq!(fetched.name, "Book");
        assert_eq!(fetched.category, "Reading");
        assert_eq!(fetched.image, image);
    }
}

#[tokio::test]
async fn test_get_missing_id_is_not_found() {
    for (backend, store, _tmp) in backends() {
        store.add(new_item("only", "Misc")).await.unwrap();
        for id in [0, 2, -1, i64::MAX] {
            let err = store.get(id).await.unwrap_err();
            assert!(matches!(err, Error::NotFound(_)), "backend: {backend}, id {id}");
        }
    }
}

#[tokio::test]
async fn test_list_empty_and_ordered() {
    for (backend, store, _tmp) in backends() {
        assert!(store.list().await.unwrap().is_empty(), "backend: {backend}");

        store.add(new_item("b", "Misc")).await.unwrap();
        store.add(new_item("a", "Misc")).await.unwrap();
        store.add(new_item("c", "Misc")).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["b", "a", "c"], "backend: {backend}");
    }
}

#[tokio::test]
async fn test_search_matches_name_only() {
    for (backend, store, _tmp) in backends() {
        store.add(new_item("Red Shoes", "Fashion")).await.unwrap();
        store.add(new_item("Blue Shirt", "Shoe store")).await.unwrap();

        let hits = store.search("Shoe").await.unwrap();
        assert_eq!(hits.len(), 1, "backend: {backend}");
        assert_eq!(hits[0].name, "Red Shoes");
    }
}

#[tokio::test]
async fn test_search_without_matches_is_not_found() {
    for (backend, store, _tmp) in backends() {
        store.add(new_item("Red Shoes", "Fashion")).await.unwrap();

        let err = store.search("xyz").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "backend: {backend}");
    }
}

#[tokio::test]
async fn test_search_empty_keyword_is_invalid() {
    for (backend, store, _tmp) in backends() {
        store.add(new_item("Red Shoes", "Fashion")).await.unwrap();

        let err = store.search("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "backend: {backend}");
    }
}

#[tokio::test]
async fn test_add_rejects_blank_fields() {
    for (backend, store, _tmp) in backends() {
        let err = store.add(new_item("", "Misc")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "backend: {backend}");

        // Rejected adds consume no id
        assert_eq!(store.add(new_item("ok", "Misc")).await.unwrap().id, 1);
    }
}

#[tokio::test]
async fn test_backends_are_observably_identical() {
    let stores = backends();
    let names = [
        "Red Shoes",
        "Blue Shirt",
        "red shoelaces",
        "100% wool",
        "snake_case mug",
        "Éclair tin",
    ];

    for (_, store, _tmp) in &stores {
        for (i, name) in names.iter().enumerate() {
            let category = if i % 2 == 0 { "Fashion" } else { "Home" };
            store.add(new_item(name, category)).await.unwrap();
        }
    }

    let (_, reference, _) = &stores[0];
    for (backend, store, _tmp) in &stores[1..] {
        assert_eq!(
            store.list().await.unwrap(),
            reference.list().await.unwrap(),
            "list differs on {backend}"
        );

        for id in 0..=names.len() as i64 + 1 {
            assert_eq!(
                store.get(id).await.ok(),
                reference.get(id).await.ok(),
                "get({id}) differs on {backend}"
            );
        }

        for keyword in [
            "Shoe", "shoe", "SHIRT", "%", "_", "e_c", "éclair", "Éclair", "zzz", "Red\0zzz",
        ] {
            assert_eq!(
                store.search(keyword).await.ok(),
                reference.search(keyword).await.ok(),
                "search({keyword:?}) differs on {backend}"
            );
        }
    }
}

#[tokio::test]
async fn test_nul_bytes_rejected_on_every_backend() {
    for (backend, store, _tmp) in backends() {
        store.add(new_item("Big Red", "Misc")).await.unwrap();

        // SQLite stops comparing at NUL, so neither side may carry one
        let err = store.add(new_item("Blue\0Shoe", "Misc")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "backend: {backend}");

        let err = store.search("Red\0zzz").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "backend: {backend}");

        assert!(matches!(
            store.search("Shoe").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert_eq!(store.list().await.unwrap().len(), 1, "backend: {backend}");
    }
}
