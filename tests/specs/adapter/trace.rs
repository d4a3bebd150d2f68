//! Call-site trace specs
//!
//! Verify rejected calls report where they were made, joined to the
//! failure's own trace.

use crate::prelude::*;
use similar_asserts::assert_eq;
use std::time::Duration;

fn boom(trace: Option<&str>) -> Fault {
    Fault {
        message: "boom".to_string(),
        trace: trace.map(str::to_string),
    }
}

#[tokio::test]
async fn rejection_trace_joins_failure_and_call_site() {
    let registry = timer_registry(TraceCapture::Caller);
    let wait = registry.adapted::<Delayed>("Timer", "wait_async").unwrap();

    let line = line!() + 1;
    let promise = wait.start(&Timer, (Duration::ZERO, Err(boom(Some("at timer::fire")))));
    let rejection = promise.await.unwrap_err();

    assert_eq!(rejection.to_string(), "boom");
    let location = rejection.trace().called_from().location();
    assert!(location.file().ends_with("trace.rs"), "{}", location);
    assert_eq!(location.line(), line);

    let expected = format!(
        "at timer::fire\n{}\nat {}\n",
        CALLED_FROM_MARKER, location
    );
    assert_eq!(rejection.render_trace(), expected);
}

#[tokio::test]
async fn failure_trace_ending_in_newline_is_not_doubled() {
    let registry = timer_registry(TraceCapture::Caller);
    let wait = registry.adapted::<Delayed>("Timer", "wait_async").unwrap();

    let rejection = wait
        .start(&Timer, (Duration::ZERO, Err(boom(Some("at timer::fire\n")))))
        .await
        .unwrap_err();

    let rendered = rejection.render_trace();
    assert!(rendered.starts_with(&format!("at timer::fire\n{}\n", CALLED_FROM_MARKER)));
    assert_eq!(rendered.matches(CALLED_FROM_MARKER).count(), 1);
}

#[tokio::test]
async fn failure_without_trace_reports_call_site_only() {
    let registry = timer_registry(TraceCapture::Caller);
    let wait = registry.adapted::<Delayed>("Timer", "wait_async").unwrap();

    let rejection = wait
        .start(&Timer, (Duration::ZERO, Err(boom(None))))
        .await
        .unwrap_err();

    assert!(rejection.trace().failure().is_none());
    let rendered = rejection.render_trace();
    assert!(!rendered.contains(CALLED_FROM_MARKER));
    assert!(rendered.starts_with("at "));
    assert!(rendered.contains("trace.rs"));
}

#[tokio::test]
async fn forced_backtrace_omits_adapter_frames() {
    let registry = timer_registry(TraceCapture::Force);
    let wait = registry.adapted::<Delayed>("Timer", "wait_async").unwrap();

    let rejection = wait
        .start(&Timer, (Duration::ZERO, Err(boom(Some("at timer::fire")))))
        .await
        .unwrap_err();

    let called_from = rejection.trace().called_from();
    for frame in called_from.frames() {
        assert!(!frame.contains("cog_core::adapter"), "{}", frame);
        assert!(!frame.contains("cog_core::trace"), "{}", frame);
    }
}

#[tokio::test]
async fn client_rejection_points_at_the_calling_line() {
    let pool = Pool::new();
    pool.fake.fail_next(
        FakeOperation::UpdateUserAttributes,
        ClientError::service(ServiceErrorCode::InternalError, "boom")
            .with_trace("at user_pool::update"),
    );

    let line = line!() + 1;
    let promise = pool.client.update_user_attributes(&pool.token, attributes(&[("name", "Al")]));
    let rejection = promise.await.unwrap_err();

    assert_eq!(rejection.to_string(), "boom");
    let rendered = rejection.render_trace();
    let (failure, called_from) = rendered.split_once(CALLED_FROM_MARKER).unwrap();
    assert_eq!(failure, "at user_pool::update\n");
    assert!(
        called_from.contains(&format!("trace.rs:{}:", line)),
        "{}",
        called_from
    );
}

#[tokio::test]
async fn concurrent_rejections_keep_their_own_call_sites() {
    let registry = timer_registry(TraceCapture::Caller);
    let wait = registry.adapted::<Delayed>("Timer", "wait_async").unwrap();

    let first_line = line!() + 1;
    let first = wait.start(&Timer, (Duration::from_millis(20), Err(boom(None))));
    let second_line = line!() + 1;
    let second = wait.start(&Timer, (Duration::from_millis(1), Err(boom(None))));

    let (first, second) = tokio::join!(first, second);

    let first = first.unwrap_err();
    let second = second.unwrap_err();
    assert_eq!(first.trace().called_from().location().line(), first_line);
    assert_eq!(second.trace().called_from().location().line(), second_line);
}

#[tokio::test]
async fn natural_client_failure_carries_both_segments() {
    let pool = Pool::new();

    let line = line!() + 1;
    let promise = pool.client.get_user("not-a-session");
    let rejection = promise.await.unwrap_err();

    assert_eq!(rejection.to_string(), "Invalid Access Token");
    let rendered = rejection.render_trace();
    let (failure, called_from) = rendered.split_once(CALLED_FROM_MARKER).unwrap();
    assert!(failure.starts_with("raised at "), "{}", failure);
    assert!(
        called_from.contains(&format!("trace.rs:{}:", line)),
        "{}",
        called_from
    );
}

#[tokio::test]
async fn injected_failure_without_trace_carries_both_segments() {
    let pool = Pool::new();
    pool.fake.fail_next(
        FakeOperation::SignUp,
        ClientError::service(ServiceErrorCode::InternalError, "boom"),
    );

    let rejection = pool.client.sign_up(sign_up("erin")).await.unwrap_err();

    let rendered = rejection.render_trace();
    let (failure, _) = rendered.split_once(CALLED_FROM_MARKER).unwrap();
    assert!(failure.contains("trace.rs"), "{}", failure);
}

#[tokio::test]
async fn forced_client_call_site_omits_client_frames() {
    let pool = Pool::with_config(ClientConfig::new(Region::UsEast2).with_trace(TraceCapture::Force));

    let rejection = pool.client.get_user("not-a-session").await.unwrap_err();

    let called_from = rejection.trace().called_from();
    for frame in called_from.frames() {
        assert!(!frame.contains("cog_adapters::client"), "{}", frame);
        assert!(!frame.contains("cog_core::adapter"), "{}", frame);
    }
}
