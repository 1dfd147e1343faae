
use fixtures::*;
use serde_json::json;
use slotbook_common::{ApiClient, CalendarApi, WidgetError};
use slotbook_flow::controller::MOCK_EVENT_URL;
use slotbook_flow::{
    FlowController, FlowDeps, FlowStep, HttpCalendarApi, QueryParams, SlotSource, SubmitOutcome,
};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_flow(server: &MockServer, page_url: &str, host: Arc<RecordingHost>) -> FlowController {
    let client = ApiClient::new(&server.uri(), None, 5).unwrap();
    let api: Arc<dyn CalendarApi> = Arc::new(HttpCalendarApi::new(client));
    let deps = FlowDeps {
        api: Some(api),
        credentials: test_credentials(),
        host,
        clock: Arc::new(FixedClock(fixed_now())),
    };
    FlowController::new(QueryParams::parse(page_url), test_settings(), deps)
}

#[tokio::test(start_paused = true)]
async fn test_mock_mode_end_to_end() {
    let host = Arc::new(RecordingHost::default());
    let mut flow = build_flow("?psyId=123&mock=1", None, host.clone());

    flow.mount().await;
    let first = flow.slots()[0].start_utc.clone();
    assert!(flow.select_slot(&first));
    assert!(flow.next());

    flow.set_name("Anna");
    flow.set_email("anna@example.com");
    flow.set_telegram("@anna");
    flow.set_agreed(true);

    let started = tokio::time::Instant::now();
    let outcome = flow.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Booked);
    assert!(started.elapsed() >= std::time::Duration::from_millis(600));
    assert_eq!(flow.step(), FlowStep::Success);
    let booking = flow.booking().unwrap();
    assert_eq!(booking.event_url.as_deref(), Some(MOCK_EVENT_URL));
    assert_eq!(booking.created_at.as_deref(), Some("2025-05-05T06:00:00.000Z"));
    assert!(host.navigations().is_empty());
    assert_eq!(flow.view().event_url.as_deref(), Some(MOCK_EVENT_URL));
}

#[tokio::test]
async fn test_real_mode_redirects_to_payment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/calendly"))
        .and(query_param("from_utc", "2025-05-05T06:00:00.000Z"))
        .and(query_param("to_utc", "2025-05-19T06:00:00.000Z"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slots": [
                {"start_utc": "2025-05-05T07:00:00.000Z", "end_utc": "2025-05-05T07:30:00.000Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/calendly"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "invitee": {"name": "Anna", "email": "anna@example.com"},
            "start_utc": "2025-05-05T07:00:00Z",
            "telegram": "@anna"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created_at": "2025-05-05T06:00:02Z",
            "event_url": "https://calendly.example/e/1",
            "payment_url": "https://pay.example/x",
            "invoice_id": 77
        })))
        .expect(1)
        .mount(&server)
        .await;

    let host = Arc::new(RecordingHost::default());
    let mut flow = http_flow(&server, "https://site.example/?psyId=123", host.clone());

    flow.mount().await;
    assert_eq!(flow.slot_source(), SlotSource::Api);
    assert_eq!(flow.slots().len(), 1);

    assert!(flow.select_slot("2025-05-05T07:00:00.000Z"));
    assert!(flow.next());
    fill_valid_form(&mut flow);

    let outcome = flow.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Redirected {
            url: "https://pay.example/x".to_string()
        }
    );
    assert_eq!(flow.step(), FlowStep::Success);
    assert_eq!(host.navigations(), vec!["https://pay.example/x".to_string()]);
    assert_eq!(flow.redirected_to(), Some("https://pay.example/x"));
    assert_eq!(flow.booking().unwrap().extra.get("invoice_id"), Some(&json!(77)));

    // Nothing but close works once the booking is done.
    assert!(!flow.back());
    assert_eq!(flow.submit().await.unwrap(), SubmitOutcome::Ignored);
    flow.set_name("Someone else");
    assert_eq!(flow.form().name, "Anna");
}

#[tokio::test]
async fn test_refused_navigation_keeps_payment_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slots": [
                {"start_utc": "2025-05-05T07:00:00.000Z", "end_utc": "2025-05-05T07:30:00.000Z"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"payment_url": "https://pay.example/x"})),
        )
        .mount(&server)
        .await;

    let host = Arc::new(RecordingHost::refusing_navigation());
    let mut flow = http_flow(&server, "?psyId=123", host.clone());
    flow.mount().await;
    flow.select_slot("2025-05-05T07:00:00.000Z");
    flow.next();
    fill_valid_form(&mut flow);

    let outcome = flow.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::PaymentPending {
            url: "https://pay.example/x".to_string()
        }
    );
    assert!(matches!(
        flow.notice(),
        Some(WidgetError::PaymentRedirectRequired { url }) if url == "https://pay.example/x"
    ));
    assert_eq!(flow.view().payment_url.as_deref(), Some("https://pay.example/x"));
    assert!(flow.redirected_to().is_none());
}

#[tokio::test]
async fn test_server_error_message_reaches_the_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let mut flow = http_flow(&server, "?psyId=123", Arc::new(RecordingHost::default()));
    flow.mount().await;

    assert_eq!(flow.slot_source(), SlotSource::Mock);
    assert_eq!(flow.slots().len(), 42);
    assert_eq!(flow.view().notice.as_deref(), Some("HTTP 503"));
}

async fn book_against(server: &MockServer) -> (FlowController, Result<SubmitOutcome, WidgetError>) {
    let mut flow = http_flow(server, "?psyId=123", Arc::new(RecordingHost::default()));
    flow.mount().await;
    flow.select_slot("2025-05-05T07:00:00.000Z");
    flow.next();
    fill_valid_form(&mut flow);
    let result = flow.submit().await;
    (flow, result)
}

async fn server_with_one_slot() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slots": [
                {"start_utc": "2025-05-05T07:00:00.000Z", "end_utc": "2025-05-05T07:30:00.000Z"}
            ]
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_empty_created_body_is_a_booking() {
    let server = server_with_one_slot().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (flow, result) = book_against(&server).await;

    assert_eq!(result.unwrap(), SubmitOutcome::Booked);
    assert_eq!(flow.step(), FlowStep::Success);
    assert!(flow.notice().is_none());
    assert!(flow.booking().unwrap().event_url.is_none());
}

#[tokio::test]
async fn test_plain_text_body_is_a_booking() {
    let server = server_with_one_slot().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Created"))
        .expect(1)
        .mount(&server)
        .await;

    let (flow, result) = book_against(&server).await;

    assert_eq!(result.unwrap(), SubmitOutcome::Booked);
    assert_eq!(flow.step(), FlowStep::Success);
    assert!(flow.notice().is_none());
    assert_eq!(
        flow.booking().unwrap().extra.get("body"),
        Some(&json!("Created"))
    );
}

#[tokio::test]
async fn test_null_slots_fall_back_without_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slots": null})))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = http_flow(&server, "?psyId=123", Arc::new(RecordingHost::default()));
    flow.mount().await;

    assert_eq!(flow.slot_source(), SlotSource::Mock);
    assert_eq!(flow.slots().len(), 42);
    assert!(flow.notice().is_none());
}
