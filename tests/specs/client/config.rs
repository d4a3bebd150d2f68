//! Client configuration specs
//!
//! Verify clients are built from configuration files.

use crate::prelude::*;
use similar_asserts::assert_eq;
use std::io::Write;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn client_from_config_file_serves_requests() {
    let file = config_file("region = \"us-east-2\"\ntrace = \"force\"\n");

    let config = ClientConfig::load(file.path()).unwrap();
    let pool = Pool::with_config(config);

    assert_eq!(pool.client.region(), Region::UsEast2);
    assert_eq!(pool.client.config().trace, TraceCapture::Force);
    let user = pool.client.get_user(&pool.token).await.unwrap();
    assert_eq!(user.username, USERNAME);
}

#[test]
fn empty_config_file_uses_defaults() {
    let file = config_file("");

    let config = ClientConfig::load(file.path()).unwrap();

    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.trace, TraceCapture::Caller);
}

#[test]
fn unknown_region_is_rejected() {
    let file = config_file("region = \"mars-north-1\"\n");

    let err = ClientConfig::load(file.path()).unwrap_err();

    assert!(err.to_string().contains("mars-north-1"), "{}", err);
}

#[test]
fn missing_config_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cog.toml");

    let err = ClientConfig::load(&path).unwrap_err();

    assert!(err.to_string().contains("cog.toml"), "{}", err);
}

#[test]
fn every_region_code_round_trips() {
    for region in Region::ALL {
        let parsed: Region = region.code().parse().unwrap();
        assert_eq!(parsed, *region);
    }
}

#[test]
fn separate_clients_do_not_share_state() {
    let east = Pool::with_config(ClientConfig::new(Region::UsEast2));
    let west = Pool::with_config(ClientConfig::new(Region::UsWest2));

    assert_eq!(east.client.region(), Region::UsEast2);
    assert_eq!(west.client.region(), Region::UsWest2);
    assert!(east.fake.calls().is_empty());
    assert!(west.fake.calls().is_empty());
}
