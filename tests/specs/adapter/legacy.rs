//! Callback-convention specs
//!
//! Verify the callback form of every adapted operation behaves exactly like
//! the underlying client.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn get_user_callback_form_leaves_finish_to_caller() {
    let pool = Pool::new();

    let (callback, rx) = forward();
    pool.client.get_user_async(&pool.token, callback);
    let handle = rx.await.unwrap();

    assert_eq!(pool.fake.unfinished(), 1);
    let user = pool.client.get_user_finish(handle).unwrap();
    assert_eq!(user.username, USERNAME);
    assert_eq!(pool.fake.unfinished(), 0);
}

#[tokio::test]
async fn initiate_auth_callback_form_matches_raw_client() {
    let pool = Pool::new();

    let (callback, rx) = forward();
    pool.client
        .initiate_auth_async(password_auth(USERNAME, PASSWORD), callback);
    let via_client = pool
        .client
        .initiate_auth_finish(rx.await.unwrap())
        .unwrap();

    let (callback, rx) = forward();
    pool.fake
        .initiate_auth_async(password_auth(USERNAME, PASSWORD), callback);
    let via_raw = pool.fake.initiate_auth_finish(rx.await.unwrap()).unwrap();

    assert_eq!(
        via_client.authentication.unwrap().token_type,
        via_raw.authentication.unwrap().token_type
    );
    assert_eq!(
        pool.fake.calls(),
        vec![
            IdentityCall::InitiateAuth {
                request: password_auth(USERNAME, PASSWORD)
            },
            IdentityCall::InitiateAuth {
                request: password_auth(USERNAME, PASSWORD)
            },
        ]
    );
}

#[tokio::test]
async fn sign_up_callback_form_reports_service_failure_from_finish() {
    let pool = Pool::new();

    let (callback, rx) = forward();
    pool.client.sign_up_async(sign_up(USERNAME), callback);
    let err = pool.client.sign_up_finish(rx.await.unwrap()).unwrap_err();

    assert_eq!(err.code(), Some(ServiceErrorCode::UsernameExists));
}

#[tokio::test]
async fn update_callback_form_applies_changes() {
    let pool = Pool::new();

    let (callback, rx) = forward();
    pool.client.update_user_attributes_async(
        &pool.token,
        attributes(&[("phone_number", "+15555550123")]),
        callback,
    );
    let updated = pool
        .client
        .update_user_attributes_finish(rx.await.unwrap())
        .unwrap();

    assert_eq!(updated.code_delivery.len(), 1);
    assert_eq!(updated.code_delivery[0].destination, "+*******0123");
    let user = pool.fake.get_user(USERNAME).unwrap();
    assert_eq!(user.attributes["phone_number_verified"], "false");
}

#[tokio::test]
async fn registry_callback_form_runs_operation_unchanged() {
    let registry = timer_registry(TraceCapture::Caller);
    let wait = registry.adapted::<Delayed>("Timer", "wait_async").unwrap();

    let (tx, rx) = tokio::sync::oneshot::channel();
    wait.start_with_callback(
        &Timer,
        (std::time::Duration::from_millis(5), Ok(7)),
        Box::new(move |timer: &Timer, handle: Result<u32, Fault>| {
            let _ = tx.send(Delayed.finish(timer, handle));
        }),
    );

    assert_eq!(rx.await.unwrap(), Ok(7));
}
