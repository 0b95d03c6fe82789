//! Integration tests for capability gating driven by host configuration.
//!
//! Flags are loaded through the config layer (file plus environment) and
//! the resulting snapshot is handed to the router.

mod common;

use std::collections::HashMap;

use common::{CONTENT_TOKEN, PipelineHarness, token_request};
use folio_config::{ConfigFlag, ConfigFlags, loader};
use folio_core::{ErrorKind, RawRequest};
use folio_test::{MockIdentityResolver, TestConfigDir};
use serde_json::Value;

#[tokio::test]
async fn test_disabled_capability_is_server_error() {
    let harness = PipelineHarness::new(ConfigFlags::none());

    let err = harness
        .router
        .call("search.query", &token_request(CONTENT_TOKEN), Value::Null)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(err.code, -32603);
    assert_eq!(err.data.http_status, 500);
    assert_eq!(harness.search.call_count(), 0);
}

#[tokio::test]
async fn test_capability_checked_before_credentials() {
    let resolver = MockIdentityResolver::failing();
    let harness = PipelineHarness::with_resolver(resolver.clone().shared(), ConfigFlags::none());

    let err = harness
        .router
        .call("search.query", &RawRequest::new(), Value::Null)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(resolver.call_count(), 0);
}

#[tokio::test]
async fn test_capability_from_config_file() {
    let dir = TestConfigDir::new("[features]\nsearch = true\n");
    let flags = dir.load().flags();
    assert!(flags.is_enabled(ConfigFlag::Search));

    let harness = PipelineHarness::new(flags);
    harness
        .router
        .call("search.query", &token_request(CONTENT_TOKEN), Value::Null)
        .await
        .unwrap();
    assert_eq!(harness.search.call_count(), 1);
}

#[tokio::test]
async fn test_environment_disables_file_capability() {
    let dir = TestConfigDir::new("[features]\nsearch = true\n");
    let env = HashMap::from([("FOLIO_SEARCH".to_string(), "false".to_string())]);

    let resolved = loader::load(Some(dir.path.as_path()), &env).unwrap();
    assert_eq!(resolved.env_overrides, 1);

    let harness = PipelineHarness::new(resolved.config.flags());
    let err = harness
        .router
        .call("search.query", &token_request(CONTENT_TOKEN), Value::Null)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);
}

#[tokio::test]
async fn test_ungated_operations_ignore_flags() {
    let harness = PipelineHarness::new(ConfigFlags::none());

    harness
        .router
        .call("contentPieces.list", &token_request(CONTENT_TOKEN), Value::Null)
        .await
        .unwrap();
    assert_eq!(harness.list.call_count(), 1);
}
