//! Integration tests for local collections persisted in a `FileStore`.

mod common;

use std::{fs, sync::Arc};

use common::TestResult;
use lightdash::prelude::*;

fn item(uuid: &str, kind: ResultKind) -> DashboardSetItem {
    DashboardSetItem {
        uuid: uuid.into(),
        name: format!("Item {uuid}"),
        url: format!("https://app.lightdash.cloud/projects/p/dashboards/{uuid}"),
        kind,
    }
}

fn file_collections(dir: &std::path::Path) -> TestResult<Collections> {
    let store = Arc::new(FileStore::new(dir)?);
    Ok(Collections::new(store, StorageKeys::default()))
}

#[test_log::test]
fn test_collections_survive_reopen() -> TestResult {
    let dir = tempfile::tempdir()?;

    let set_id = {
        let collections = file_collections(dir.path())?;
        let set = collections.sets().create("Morning")?;
        collections
            .sets()
            .add_item(&set.id, item("d1", ResultKind::Dashboard))?;
        collections.favorites().toggle("d1")?;
        collections.recent().track_open("c1")?;
        collections.default_project().set("p-1")?;
        set.id
    };

    let collections = file_collections(dir.path())?;
    let set = collections.sets().get(&set_id)?.expect("set persisted");
    assert_eq!(set.name, "Morning");
    assert_eq!(set.items, vec![item("d1", ResultKind::Dashboard)]);
    assert!(collections.favorites().is_favorite("d1")?);
    assert_eq!(collections.recent().uuids()?, ["c1"]);
    assert_eq!(collections.default_project().get()?.as_deref(), Some("p-1"));

    assert!(dir.path().join("dashboardSets.json").exists());
    assert!(dir.path().join("favorites.json").exists());
    assert!(dir.path().join("recentlyOpened.json").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("defaultProjectUuid.json"))?,
        "p-1"
    );
    Ok(())
}

#[test_log::test]
fn test_corrupt_file_is_removed() -> TestResult {
    let dir = tempfile::tempdir()?;
    let sets_file = dir.path().join("dashboardSets.json");
    fs::write(&sets_file, "[{\"id\": truncated")?;

    let collections = file_collections(dir.path())?;
    assert!(matches!(
        collections.sets().try_list(),
        Err(LightdashError::Storage {
            source: StorageError::Malformed { .. }
        })
    ));
    assert!(sets_file.exists());

    assert!(collections.sets().list()?.is_empty());
    assert!(!sets_file.exists());

    // usable again afterwards
    collections.sets().create("Fresh")?;
    assert_eq!(collections.sets().list()?.len(), 1);
    Ok(())
}

#[test_log::test]
fn test_profiles_are_isolated() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path())?);
    let work = Collections::new(store.clone(), StorageKeys::with_namespace("work"));
    let home = Collections::new(store, StorageKeys::with_namespace("home"));

    work.favorites().toggle("d1")?;
    assert!(work.favorites().is_favorite("d1")?);
    assert!(!home.favorites().is_favorite("d1")?);
    assert!(dir.path().join("work.favorites.json").exists());
    Ok(())
}

#[test_log::test]
fn test_set_urls_follow_item_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let collections = file_collections(dir.path())?;

    let set = collections
        .sets()
        .create_and_add("Weekly", item("b", ResultKind::Chart))?;
    collections
        .sets()
        .add_item(&set.id, item("a", ResultKind::Explore))?;
    collections
        .sets()
        .add_item(&set.id, item("b", ResultKind::Chart))?;

    let set = collections.sets().get(&set.id)?.expect("set");
    let urls = DashboardSets::urls_of(&set);
    assert_eq!(urls.len(), 2);
    assert!(urls[0].ends_with("/b"));
    assert!(urls[1].ends_with("/a"));
    Ok(())
}

#[test_log::test]
fn test_set_item_from_search_result() -> TestResult {
    let result = SearchResult::Explore(ExploreItem {
        uuid: "explore:orders".into(),
        name: "Orders".into(),
        description: None,
        space_name: Some("Sales".into()),
        url: "https://app.lightdash.cloud/projects/p/tables/orders".into(),
    });
    let item = DashboardSetItem::from(&result);
    assert_eq!(item.uuid, "explore:orders");
    assert_eq!(item.kind, ResultKind::Explore);
    assert_eq!(item.url, result.url());
    Ok(())
}
