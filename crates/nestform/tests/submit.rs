mod common;

use std::time::Duration;

use common::{entries, log, recording_hooks, FakeClient, FakeNavigator, Outcome, Response};
use nestform::{
    error_map, Form, FormConfig, FormError, Hooks, Method, Progress, TransportError, VisitOptions,
};
use serde_json::json;

fn user_form() -> nestform::FormBuilder {
    Form::builder(json!({"user": {"name": "Sam", "email": ""}}))
}

#[tokio::test]
async fn deferred_success_hook_order() {
    let client = FakeClient::with_progress(
        Response::Ok(json!({"id": 1})),
        vec![Progress::new(10, Some(10))],
    );
    let form = user_form().http_client(client.clone()).build();
    let log = log();

    form.post("/users", VisitOptions::deferred().with_hooks(recording_hooks(&log)))
        .await
        .unwrap();

    assert_eq!(
        entries(&log),
        ["before", "start", "progress", "success", "finish"]
    );
    assert!(form.was_successful());
    assert!(form.recently_successful());
    assert!(!form.processing());
    assert_eq!(form.progress(), None);

    let sent = client.last_sent().unwrap();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "/users");
    assert_eq!(sent.data, json!({"user": {"name": "Sam", "email": ""}}));
}

#[tokio::test]
async fn visit_mode_matches_deferred_order() {
    let navigator = FakeNavigator::with_progress(
        Outcome::Success(json!(null)),
        vec![Progress::new(1, Some(2))],
    );
    let form = user_form().navigator(navigator.clone()).build();
    let log = log();

    form.patch("/users/1", VisitOptions::visit().with_hooks(recording_hooks(&log)))
        .await
        .unwrap();

    assert_eq!(
        entries(&log),
        ["before", "start", "progress", "success", "finish"]
    );
    assert_eq!(navigator.visits.lock()[0].method, Method::Patch);
}

#[tokio::test]
async fn progress_hook_sees_percentage() {
    let client = FakeClient::with_progress(
        Response::Ok(json!({})),
        vec![Progress::new(5, Some(20))],
    );
    let form = user_form().http_client(client).build();
    let observed = log();
    let (started, progressed) = (observed.clone(), observed.clone());

    let hooks = Hooks::new()
        .on_start(move |_| started.lock().push("start".into()))
        .on_progress(move |progress| {
            progressed
                .lock()
                .push(format!("{:?}", progress.percentage()));
        });
    form.put("/users/1", VisitOptions::deferred().with_hooks(hooks))
        .await
        .unwrap();

    assert_eq!(entries(&observed), ["start", "Some(25.0)"]);
}

#[tokio::test]
async fn validation_errors_are_rewritten_under_root_key() {
    let errors = error_map([("name", "can't be blank"), ("user.email", "is taken")]);
    let client = FakeClient::new(Response::Err(TransportError::Validation(errors)));
    let form = user_form().http_client(client).build();
    let log = log();

    form.post("/users", VisitOptions::deferred().with_hooks(recording_hooks(&log)))
        .await
        .unwrap();

    assert_eq!(entries(&log), ["before", "start", "error", "finish"]);
    assert!(form.has_errors());
    assert_eq!(
        form.errors().keys().collect::<Vec<_>>(),
        ["user.name", "user.email"]
    );
    assert!(!form.was_successful());
    assert!(!form.processing());
}

#[tokio::test]
async fn errors_merge_with_existing_entries() {
    let navigator = FakeNavigator::new(Outcome::Errors(error_map([("email", "is taken")])));
    let form = user_form().navigator(navigator).build();
    form.set_error("user.name", "too short");

    form.post("/users", VisitOptions::visit()).await.unwrap();

    assert_eq!(
        form.errors(),
        error_map([("user.name", "too short"), ("user.email", "is taken")])
    );
}

#[tokio::test]
async fn no_rewrite_without_single_object_root() {
    let navigator = FakeNavigator::new(Outcome::Errors(error_map([("name", "blank")])));
    let form = Form::builder(json!({"name": "", "email": ""}))
        .navigator(navigator)
        .build();

    form.post("/signup", VisitOptions::visit()).await.unwrap();

    assert_eq!(form.errors(), error_map([("name", "blank")]));
}

#[tokio::test]
async fn network_failure_lands_under_base() {
    let client = FakeClient::new(Response::Err(TransportError::Network("timeout".into())));
    let form = Form::builder(json!({"q": ""})).http_client(client).build();

    form.get("/search", VisitOptions::deferred()).await.unwrap();

    assert_eq!(form.errors(), error_map([("base", "timeout")]));
    assert!(form.has_errors());
    assert_eq!(form.data(), json!({"q": ""}));
}

#[tokio::test]
async fn success_clears_previous_errors() {
    let form = user_form()
        .http_client(FakeClient::new(Response::Ok(json!({}))))
        .build();
    form.set_error("user.name", "blank");

    form.post("/users", VisitOptions::deferred()).await.unwrap();

    assert!(form.errors().is_empty());
    assert!(!form.has_errors());
}

#[tokio::test]
async fn cancel_in_flight_deferred_submission() {
    let form = user_form()
        .http_client(FakeClient::new(Response::Hang))
        .build();
    let log = log();

    let (result, _) = tokio::join!(
        form.delete("/users/1", VisitOptions::deferred().with_hooks(recording_hooks(&log))),
        async {
            tokio::task::yield_now().await;
            assert!(form.processing());
            form.cancel();
        }
    );

    result.unwrap();
    assert_eq!(entries(&log), ["before", "start", "cancel", "finish"]);
    assert!(!form.processing());
    assert!(!form.was_successful());
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn cancel_without_submission_is_a_noop() {
    let form = user_form().build();
    form.cancel();
    assert!(!form.processing());
}

#[tokio::test]
async fn visit_mode_cancel_outcome() {
    let navigator = FakeNavigator::new(Outcome::Cancel);
    let form = user_form().navigator(navigator).build();
    let log = log();

    form.post("/users", VisitOptions::visit().with_hooks(recording_hooks(&log)))
        .await
        .unwrap();

    assert_eq!(entries(&log), ["before", "start", "cancel", "finish"]);
    assert!(!form.processing());
}

#[tokio::test]
async fn missing_transport_is_an_error() {
    let form = user_form().build();
    let log = log();

    let visit = form
        .post("/users", VisitOptions::visit().with_hooks(recording_hooks(&log)))
        .await;
    assert_eq!(visit, Err(FormError::TransportUnavailable("navigator")));

    let deferred = form.post("/users", VisitOptions::deferred()).await;
    assert_eq!(deferred, Err(FormError::TransportUnavailable("http client")));
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn payload_is_transformed_then_renamed() {
    let client = FakeClient::new(Response::Ok(json!({})));
    let config = FormConfig {
        rails_attributes: true,
        ..FormConfig::default()
    };
    let form = Form::builder(json!({
        "person": {"first_name": "S", "user": {"username": "u"}}
    }))
    .config(config)
    .http_client(client.clone())
    .build();
    form.transform(|mut data| {
        data["person"]["first_name"] = json!("T");
        data
    });

    form.post("/people", VisitOptions::deferred()).await.unwrap();

    assert_eq!(
        client.last_sent().unwrap().data,
        json!({"person": {"first_name": "T", "user_attributes": {"username": "u"}}})
    );
    assert_eq!(form.get_data("person.first_name"), Some(json!("S")));
}

#[tokio::test(start_paused = true)]
async fn recently_successful_expires() {
    let form = user_form()
        .http_client(FakeClient::new(Response::Ok(json!({}))))
        .build();

    form.post("/users", VisitOptions::deferred()).await.unwrap();
    assert!(form.recently_successful());

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert!(form.recently_successful());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(!form.recently_successful());
    assert!(form.was_successful());
}

#[tokio::test(start_paused = true)]
async fn new_success_restarts_the_window() {
    let form = user_form()
        .http_client(FakeClient::new(Response::Ok(json!({}))))
        .build();

    form.post("/users", VisitOptions::deferred()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    form.post("/users", VisitOptions::deferred()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(form.recently_successful());

    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert!(!form.recently_successful());
}

#[tokio::test(start_paused = true)]
async fn before_hook_clears_the_window() {
    let form = user_form()
        .http_client(FakeClient::new(Response::Ok(json!({}))))
        .navigator(FakeNavigator::new(Outcome::Errors(error_map([("name", "blank")]))))
        .build();

    form.post("/users", VisitOptions::deferred()).await.unwrap();
    assert!(form.recently_successful());

    form.post("/users", VisitOptions::visit()).await.unwrap();
    assert!(!form.recently_successful());
    assert!(!form.was_successful());

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(!form.recently_successful());
    assert_eq!(form.errors(), error_map([("user.name", "blank")]));
}

#[tokio::test(start_paused = true)]
async fn window_length_comes_from_config() {
    let config = FormConfig::from_toml_str("recently_successful_ms = 100").unwrap();
    let form = user_form()
        .config(config)
        .http_client(FakeClient::new(Response::Ok(json!({}))))
        .build();

    form.post("/users", VisitOptions::deferred()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(101)).await;
    assert!(!form.recently_successful());
}

#[tokio::test(start_paused = true)]
async fn timed_out_submission_can_be_resubmitted() {
    let client = FakeClient::new(Response::Hang);
    let form = user_form().http_client(client.clone()).build();

    let outcome = tokio::time::timeout(
        Duration::from_millis(10),
        form.post("/users", VisitOptions::deferred()),
    )
    .await;

    assert!(outcome.is_err());
    assert!(!form.processing());
    assert_eq!(form.progress(), None);
    assert!(!form.was_successful());
    assert!(client.last_sent().is_some());
}

#[tokio::test]
async fn user_hooks_may_read_the_form() {
    let client = FakeClient::new(Response::Ok(json!({})));
    let form = std::sync::Arc::new(user_form().http_client(client).build());
    let seen = log();
    let (reader, sink) = (form.clone(), seen.clone());

    let hooks = Hooks::new().on_success(move |_| {
        sink.lock()
            .push(format!("{} {}", reader.processing(), reader.was_successful()));
    });
    form.post("/users", VisitOptions::deferred().with_hooks(hooks))
        .await
        .unwrap();

    assert_eq!(entries(&seen), ["false true"]);
}
