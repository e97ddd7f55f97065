// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]

use std::collections::BTreeMap;

use mapstudio_config::{ConfigError, ConfigService, ConfigStore, FsConfigStore};

#[test]
fn saves_one_json_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path().join("nested"));
    assert!(!store.base().exists());
    let service = ConfigService::new(store.clone());

    let mut value = BTreeMap::new();
    value.insert("pose_space".to_owned(), "world".to_owned());
    service.save("transcode", &value).unwrap();

    let path = store.base().join("transcode.json");
    assert!(path.is_file());
    assert!(!store.base().join("transcode.json.tmp").exists());
    let loaded: Option<BTreeMap<String, String>> = service.load("transcode").unwrap();
    assert_eq!(loaded, Some(value));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path());
    assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));
    let service = ConfigService::new(store);
    assert_eq!(service.load::<u8>("nope").unwrap(), None);
}

#[test]
fn saving_twice_replaces_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = ConfigService::new(FsConfigStore::at(dir.path()));
    service.save("transcode", &1_u32).unwrap();
    service.save("transcode", &2_u32).unwrap();
    assert_eq!(service.load::<u32>("transcode").unwrap(), Some(2));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
