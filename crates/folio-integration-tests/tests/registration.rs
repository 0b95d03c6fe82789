//! Integration tests for operation registration and introspection.

use folio_config::{ConfigFlag, ConfigFlags};
use folio_core::{ErrorKind, RawRequest, SessionPermission, TokenPermission};
use folio_guard::{
    Operation, OperationMeta, OperationRequirement, Protection, RegistrationError, Router,
};
use folio_test::{MockIdentityResolver, RecordingHandler};
use serde_json::Value;

fn router() -> Router {
    Router::new(MockIdentityResolver::new().shared(), ConfigFlags::none())
}

#[test]
fn test_duplicate_path_rejected() {
    let mut router = router();
    router
        .register(Operation::public("auth.status", RecordingHandler::new()))
        .unwrap();

    let err = router
        .register(Operation::user(
            "auth.status",
            OperationRequirement::user(),
            RecordingHandler::new(),
        ))
        .unwrap_err();
    assert_eq!(err, RegistrationError::DuplicatePath("auth.status".to_string()));
    assert_eq!(router.operations().count(), 1);
}

#[test]
fn test_public_permissions_rejected() {
    let meta = OperationMeta::new(
        "auth.signIn",
        Protection::Public,
        OperationRequirement::user().session([SessionPermission::ManageTokens]),
    );
    let err = router()
        .register(Operation::new(meta, RecordingHandler::new()))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::PublicWithPermissions { ref path } if path == "auth.signIn"
    ));
}

#[test]
fn test_mode_mismatch_rejected() {
    let meta = OperationMeta::new(
        "tokens.list",
        Protection::Workspace,
        OperationRequirement::user().session([SessionPermission::ManageTokens]),
    );
    let err = router()
        .register(Operation::new(meta, RecordingHandler::new()))
        .unwrap_err();
    assert!(err.to_string().contains("tokens.list"));
}

#[test]
fn test_operations_introspection() {
    let mut router = router();
    router
        .register(
            Operation::workspace(
                "webhooks.create",
                OperationRequirement::workspace()
                    .session([SessionPermission::ManageWebhooks])
                    .token([TokenPermission::WriteWebhooks]),
                RecordingHandler::new(),
            )
            .with_config([ConfigFlag::Extensions]),
        )
        .unwrap()
        .register(Operation::public("auth.status", RecordingHandler::new()))
        .unwrap();

    let metas: Vec<&OperationMeta> = router.operations().collect();
    assert_eq!(metas.len(), 2);
    assert_eq!(metas[0].path, "auth.status");
    assert_eq!(metas[0].protection, Protection::Public);

    let json = serde_json::to_value(metas[1]).unwrap();
    assert_eq!(json["protection"], "workspace");
    assert_eq!(json["requirement"]["sessionPermissions"][0], "manageWebhooks");
    assert_eq!(json["requirement"]["tokenPermissions"][0], "writeWebhooks");
    assert_eq!(json["requirement"]["requiredConfig"][0], "extensions");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let router = router();
    let err = router
        .call("missing.op", &RawRequest::new(), Value::Null)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["data"]["code"], "NOT_FOUND");
    assert_eq!(json["data"]["httpStatus"], 404);
    assert!(json["data"]["cause"].is_null());
}
