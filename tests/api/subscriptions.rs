use crate::helpers::{test_configuration, TestApp, TEST_API_KEY};
use nexus_landing::startup::Application;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use wiremock::{
    matchers::{any, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const SUCCESS_TEXT: &str = "Thank you for subscribing!";
const DUPLICATE_TEXT: &str = "This email is already subscribed.";

async fn mount_insert(app: &TestApp, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(path("/rest/v1/subscribers"))
        .and(method("POST"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(&app.store_server)
        .await;
}

fn unique_violation() -> ResponseTemplate {
    ResponseTemplate::new(409).set_body_json(json!({
        "code": "23505",
        "details": "Key (email)=(a@b.com) already exists.",
        "hint": null,
        "message": "duplicate key value violates unique constraint \"subscribers_email_key\""
    }))
}

#[tokio::test]
async fn subscribe_returns_a_200_and_shows_the_notice_for_a_fresh_email() {
    // given
    let app = TestApp::spawn().await;
    mount_insert(&app, ResponseTemplate::new(201), 1).await;

    // when
    let response = app.subscribe("a@b.com").await;

    // then
    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(SUCCESS_TEXT));
    assert!(html.contains(r#"data-auto-close-ms="10000""#));
    assert!(html.contains(r#"value="""#), "email field was not cleared");
}

#[tokio::test]
async fn subscribe_sends_the_email_and_timestamps_to_the_store() {
    // given
    let app = TestApp::spawn().await;
    Mock::given(path("/rest/v1/subscribers"))
        .and(method("POST"))
        .and(header("apikey", TEST_API_KEY))
        .and(header("Authorization", format!("Bearer {TEST_API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.store_server)
        .await;
    let before = OffsetDateTime::now_utc();

    // when
    app.subscribe("satoshi@example.com").await;

    // then
    let requests = app.store_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["email"], "satoshi@example.com");
    assert_eq!(body["subscribed_at"], body["created_at"]);
    let subscribed_at =
        OffsetDateTime::parse(body["subscribed_at"].as_str().unwrap(), &Rfc3339).unwrap();
    assert!(subscribed_at >= before);
}

#[tokio::test]
async fn subscribing_twice_shows_the_duplicate_message_and_keeps_the_email() {
    // given
    let app = TestApp::spawn().await;
    Mock::given(path("/rest/v1/subscribers"))
        .respond_with(ResponseTemplate::new(201))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.store_server)
        .await;
    mount_insert(&app, unique_violation(), 1).await;
    app.subscribe("a@b.com").await;

    // when
    let response = app.subscribe("a@b.com").await;

    // then
    assert_eq!(response.status(), 409);
    let html = response.text().await.unwrap();
    assert!(html.contains(DUPLICATE_TEXT));
    assert!(html.contains(r#"value="a@b.com""#));
    assert!(!html.contains(SUCCESS_TEXT));
}

#[tokio::test]
async fn permission_denied_reports_a_temporarily_unavailable_service() {
    // given
    let app = TestApp::spawn().await;
    let response = ResponseTemplate::new(401).set_body_json(json!({
        "code": "42501",
        "details": null,
        "hint": null,
        "message": "permission denied for table subscribers"
    }));
    mount_insert(&app, response, 1).await;

    // when
    let response = app.subscribe("a@b.com").await;

    // then
    assert_eq!(response.status(), 503);
    let html = response.text().await.unwrap();
    assert!(html.contains("Subscription service is temporarily unavailable."));
}

#[tokio::test]
async fn unexpected_store_failure_reports_a_generic_message() {
    // given
    let app = TestApp::spawn().await;
    mount_insert(&app, ResponseTemplate::new(500), 1).await;

    // when
    let response = app.subscribe("a@b.com").await;

    // then
    assert_eq!(response.status(), 500);
    let html = response.text().await.unwrap();
    assert!(html.contains("Failed to subscribe. Please try again."));
    assert!(html.contains(r#"value="a@b.com""#));
}

#[tokio::test]
async fn subscribe_returns_a_422_for_malformed_emails_without_calling_the_store() {
    // given
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.store_server)
        .await;
    let test_cases = vec![
        ("", "empty email"),
        ("definitely-not-an-email", "invalid email"),
        ("@example.com", "missing local part"),
    ];

    for (email, description) in test_cases {
        // when
        let response = app.subscribe(email).await;

        // then
        assert_eq!(
            response.status(),
            422,
            "The API did not return a 422 Unprocessable Entity when the payload was {description}"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("Please enter a valid email address."));
    }
}

#[tokio::test]
async fn subscribe_returns_a_422_when_email_is_missing() {
    // given
    let app = TestApp::spawn().await;

    // when
    let response = app.post_subscriptions("name=Satoshi".into()).await;

    // then
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn application_refuses_to_start_without_store_credentials() {
    // given
    let store_server = MockServer::start().await;
    let mut without_key = test_configuration(&store_server);
    without_key.subscriber_store.api_key = None;
    let mut without_url = test_configuration(&store_server);
    without_url.subscriber_store.base_url = None;

    for config in [without_key, without_url] {
        // when
        let result = Application::build(config).await;

        // then
        assert!(result.is_err());
    }
}
