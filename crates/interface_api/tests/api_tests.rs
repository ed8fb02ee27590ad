//! Router tests for interface_api

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use domain_claims::adapters::{InMemoryClaimStore, TracingNotificationSender};
use domain_claims::{ClaimAggregate, MessageType};
use domain_eligibility::{Journey, School};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{ConfigFixtures, SchoolFixtures};

struct TestApp {
    router: Router,
    state: AppState,
    store: Arc<InMemoryClaimStore>,
    notifications: Arc<TracingNotificationSender>,
}

fn test_app() -> TestApp {
    let store = Arc::new(InMemoryClaimStore::new());
    let notifications = Arc::new(TracingNotificationSender::new());
    let state = AppState::new(
        ApiConfig::default(),
        Arc::new(ConfigFixtures::policy_configuration()),
        store.clone(),
        Arc::new(SchoolFixtures::directory()),
        notifications.clone(),
    );

    TestApp {
        router: create_router(state.clone()),
        state,
        store,
        notifications,
    }
}

/// The fixture school the directory serves, sharing its ID
fn directory_school(name: &str) -> &'static School {
    SchoolFixtures::all()
        .iter()
        .find(|school| school.name == name)
        .expect("fixture school")
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(serde_json::to_vec(&body).expect("serialize body")),
            None => Body::empty(),
        })
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("body");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json")
    };
    (status, payload)
}

async fn start(router: &Router, journey: &str) -> String {
    let (status, body) = send(router, "POST", "/api/v1/journeys", Some(json!({ "journey": journey }))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["journey_id"].as_str().expect("journey id").to_string()
}

async fn answer(router: &Router, journey_id: &str, slug: &str, answers: Value) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        &format!("/api/v1/journeys/{}/slugs/{}", journey_id, slug),
        Some(json!({ "answers": answers })),
    )
    .await
}

/// Answers given on each page of an eligible combined claim
fn combined_answers(slug: &str) -> Value {
    match slug {
        "current-school" => json!({ "current_school": directory_school("Hampstead School").id }),
        "nqt-in-academic-year-after-itt" => json!({ "nqt_in_academic_year_after_itt": true }),
        "supply-teacher" => json!({ "employed_as_supply_teacher": false }),
        "poor-performance" => json!({
            "subject_to_formal_performance_action": false,
            "subject_to_disciplinary_action": false,
        }),
        "qualification" => json!({ "qualification": "postgraduate_itt" }),
        "itt-year" => json!({ "itt_academic_year": "2019/2020" }),
        "eligible-itt-subject" => json!({ "eligible_itt_subject": "mathematics" }),
        "teaching-subject-now" => json!({ "teaching_subject_now": true }),
        "personal-details" => json!({
            "first_name": "Jo",
            "surname": "Bloggs",
            "date_of_birth": "1990-01-01",
            "national_insurance_number": "QQ123456C",
        }),
        "postcode-search" => json!({ "postcode": "S1 1AA", "address_from_lookup": false }),
        "address" => json!({
            "address_line_1": "1 Test Road",
            "address_line_3": "Sheffield",
            "postcode": "S1 1AA",
        }),
        "email-address" => json!({ "email_address": "jo.bloggs@example.com" }),
        "email-verification" => json!({ "email_verified": true }),
        "provide-mobile-number" => json!({ "provide_mobile_number": false }),
        "bank-or-building-society" => json!({ "bank_or_building_society": "personal_bank_account" }),
        "personal-bank-account" => json!({
            "banking_name": "Jo Bloggs",
            "bank_sort_code": "123456",
            "bank_account_number": "12345678",
        }),
        "gender" => json!({ "payroll_gender": "female" }),
        "teacher-reference-number" => json!({ "teacher_reference_number": "1234567" }),
        "student-loan" => json!({ "has_student_loan": false }),
        "masters-doctoral-loan" => json!({ "has_masters_doctoral_loan": false }),
        "check-your-answers-part-one" | "eligibility-confirmed" | "information-provided" => json!({}),
        other => panic!("unexpected page {}", other),
    }
}

// ============================================================================
// Health
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_and_readiness() {
        let app = test_app();

        let (status, body) = send(&app.router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&app.router, "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }
}

// ============================================================================
// Journeys
// ============================================================================

mod journey_tests {
    use super::*;

    #[tokio::test]
    async fn test_combined_journey_round_trip() {
        let app = test_app();
        let journey_id = start(&app.router, "additional_payments").await;

        let mut slug = "current-school".to_string();
        for _ in 0..40 {
            let (status, body) = answer(&app.router, &journey_id, &slug, combined_answers(&slug)).await;
            assert_eq!(status, StatusCode::OK, "{}: {}", slug, body);
            assert_ne!(body["next_slug"], "ineligible", "{}", slug);

            slug = body["next_slug"].as_str().expect("next page").to_string();
            if slug == "check-your-answers" {
                break;
            }
        }
        assert_eq!(slug, "check-your-answers");

        let (status, body) = send(&app.router, "GET", &format!("/api/v1/journeys/{}", journey_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "eligible_now");

        let (status, submitted) = send(
            &app.router,
            "POST",
            &format!("/api/v1/journeys/{}/submit", journey_id),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", submitted);
        assert_eq!(submitted["policy"], "early_career_payments");
        assert_eq!(submitted["policy_options_provided"].as_array().map(Vec::len), Some(2));

        // The session ends with the submission and only the winner is stored
        let (status, _) = send(&app.router, "GET", &format!("/api/v1/journeys/{}", journey_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.store.len().unwrap(), 1);

        let sent = app.notifications.sent().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message_type, MessageType::ClaimSubmitted);

        let reference = submitted["reference"].as_str().expect("reference");
        let (status, claim) = send(&app.router, "GET", &format!("/api/v1/claims?reference={}", reference), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(claim["id"], submitted["claim_id"]);
        assert_eq!(claim["approvable"], true);
    }

    #[tokio::test]
    async fn test_start_lists_first_pages() {
        let app = test_app();

        let (status, body) = send(
            &app.router,
            "POST",
            "/api/v1/journeys",
            Some(json!({ "journey": "student_loans" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["slugs"][0], "qts-year");
        assert_eq!(body["policies"], json!(["student_loans"]));
        assert_eq!(app.state.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_page_lists_questions_and_links() {
        let app = test_app();
        let journey_id = start(&app.router, "additional_payments").await;

        let (status, body) = send(
            &app.router,
            "GET",
            &format!("/api/v1/journeys/{}/slugs/poor-performance", journey_id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["previous_slug"], "supply-teacher");
        assert_eq!(body["next_slug"], "qualification");
    }

    #[tokio::test]
    async fn test_unknown_and_hidden_pages_are_not_found() {
        let app = test_app();
        let journey_id = start(&app.router, "additional_payments").await;

        let (status, _) = send(
            &app.router,
            "GET",
            &format!("/api/v1/journeys/{}/slugs/landing-page", journey_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app.router,
            "GET",
            &format!("/api/v1/journeys/{}/slugs/entire-term-contract", journey_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_incomplete_page_reports_each_missing_answer() {
        let app = test_app();
        let journey_id = start(&app.router, "additional_payments").await;

        let (status, body) = answer(&app.router, &journey_id, "personal-details", json!({ "first_name": "Jo" })).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        let fields: Vec<&str> = body["details"]
            .as_array()
            .expect("details")
            .iter()
            .filter_map(|detail| detail["field"].as_str())
            .collect();
        assert_eq!(fields, vec!["surname", "date_of_birth", "national_insurance_number"]);

        // Rejected answers are not kept
        let (_, body) = send(
            &app.router,
            "GET",
            &format!("/api/v1/journeys/{}/slugs/personal-details", journey_id),
            None,
        )
        .await;
        assert_eq!(body["status"], "undetermined");
        assert!(app.store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_unparseable_answer_is_rejected() {
        let app = test_app();
        let journey_id = start(&app.router, "additional_payments").await;

        let (status, body) = answer(
            &app.router,
            &journey_id,
            "nqt-in-academic-year-after-itt",
            json!({ "nqt_in_academic_year_after_itt": "sometimes" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    }

    #[tokio::test]
    async fn test_ineligible_answer_leads_to_ineligible_page() {
        let app = test_app();
        let journey_id = start(&app.router, "additional_payments").await;

        let (status, body) = answer(
            &app.router,
            &journey_id,
            "current-school",
            json!({ "current_school": directory_school("Independent Hall").id }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["status"], "ineligible");
        assert_eq!(body["next_slug"], "ineligible");
    }

    #[tokio::test]
    async fn test_submitting_incomplete_claim_is_rejected() {
        let app = test_app();
        let journey_id = start(&app.router, "additional_payments").await;

        let (status, _) = send(
            &app.router,
            "POST",
            &format!("/api/v1/journeys/{}/submit", journey_id),
            Some(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(app.store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_idle_session_has_expired() {
        let app = test_app();
        let claim = ClaimAggregate::start(
            Journey::AdditionalPayments,
            &ConfigFixtures::policy_configuration(),
            Utc::now(),
        )
        .unwrap();
        let journey_id = app.state.sessions.open(claim, Utc::now() - Duration::minutes(31)).await;

        let (status, body) = send(
            &app.router,
            "GET",
            &format!("/api/v1/journeys/{}", journey_id.as_uuid()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::GONE);
        assert_eq!(body["error"], "session_expired");
        assert_eq!(app.state.sessions.len().await, 0);
    }
}

// ============================================================================
// Store Failures
// ============================================================================

mod store_failure_tests {
    use super::*;
    use test_utils::{ClaimBuilder, Fault, FaultyClaimStore};

    fn app_with_faulty_store(fault: Fault) -> (Router, AppState, Arc<FaultyClaimStore>) {
        let store = Arc::new(FaultyClaimStore::new(fault));
        let state = AppState::new(
            ApiConfig::default(),
            Arc::new(ConfigFixtures::policy_configuration()),
            store.clone(),
            Arc::new(SchoolFixtures::directory()),
            Arc::new(TracingNotificationSender::new()),
        );
        (create_router(state.clone()), state, store)
    }

    #[tokio::test]
    async fn test_answer_is_discarded_when_store_is_unreachable() {
        let (router, _state, store) = app_with_faulty_store(Fault::Save);
        let journey_id = start(&router, "additional_payments").await;

        let (status, body) = answer(
            &router,
            &journey_id,
            "current-school",
            json!({ "current_school": directory_school("Independent Hall").id }),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", body);
        assert_eq!(body["error"], "service_unavailable");

        let (status, body) = send(&router, "GET", &format!("/api/v1/journeys/{}", journey_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "undetermined");
        assert!(store.inner().is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_the_journey_open() {
        let (router, state, store) = app_with_faulty_store(Fault::Delete);
        let claim = ClaimBuilder::default_combined().with_personal_details().build();
        let journey_id = state.sessions.open(claim, Utc::now()).await;

        let (status, body) = send(
            &router,
            "POST",
            &format!("/api/v1/journeys/{}/submit", journey_id.as_uuid()),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", body);

        let (status, body) = send(
            &router,
            "GET",
            &format!("/api/v1/journeys/{}", journey_id.as_uuid()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "eligible_now");
        assert_eq!(body["policies"].as_array().map(Vec::len), Some(2));
        assert!(store.inner().is_empty().unwrap());
    }
}

// ============================================================================
// Schools
// ============================================================================

mod school_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_by_name() {
        let app = test_app();

        let (status, body) = send(&app.router, "GET", "/api/v1/schools?query=Hampstead", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Hampstead School");
        assert_eq!(body[0]["urn"], 100049);
    }

    #[tokio::test]
    async fn test_short_query_is_rejected() {
        let app = test_app();

        let (status, body) = send(&app.router, "GET", "/api/v1/schools?query=Ha", None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "query");
    }
}

// ============================================================================
// Admin decisions
// ============================================================================

mod decision_tests {
    use super::*;
    use test_utils::ClaimBuilder;

    fn submitted_claim(app: &TestApp) -> String {
        let claim = ClaimBuilder::default_combined()
            .with_personal_details()
            .submit(app.store.as_ref());
        claim.id.as_uuid().to_string()
    }

    #[tokio::test]
    async fn test_approve_then_undo() {
        let app = test_app();
        let claim_id = submitted_claim(&app);
        let operator = uuid::Uuid::new_v4();

        let (status, body) = send(
            &app.router,
            "POST",
            &format!("/api/v1/claims/{}/decisions", claim_id),
            Some(json!({ "result": "approved", "created_by": operator })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["approvable"], false);
        assert_eq!(body["decision_undoable"], true);

        let sent = app.notifications.sent().unwrap();
        assert_eq!(sent.last().map(|n| n.message_type), Some(MessageType::ClaimApproved));

        let (status, body) = send(
            &app.router,
            "POST",
            &format!("/api/v1/claims/{}/decisions/undo", claim_id),
            Some(json!({ "created_by": operator, "notes": "Approved in error" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["decisions"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["approvable"], true);
    }

    #[tokio::test]
    async fn test_rejection_needs_a_reason() {
        let app = test_app();
        let claim_id = submitted_claim(&app);

        let (status, body) = send(
            &app.router,
            "POST",
            &format!("/api/v1/claims/{}/decisions", claim_id),
            Some(json!({ "result": "rejected", "created_by": uuid::Uuid::new_v4() })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "At least one reason is required");
    }

    #[tokio::test]
    async fn test_held_claim_cannot_be_approved() {
        let app = test_app();
        let claim_id = submitted_claim(&app);
        let operator = uuid::Uuid::new_v4();

        let (status, body) = send(
            &app.router,
            "PUT",
            &format!("/api/v1/claims/{}/hold", claim_id),
            Some(json!({ "held": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["held"], true);

        let (status, _) = send(
            &app.router,
            "POST",
            &format!("/api/v1/claims/{}/decisions", claim_id),
            Some(json!({ "result": "approved", "created_by": operator })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_undoing_without_decision_is_an_integrity_error() {
        let app = test_app();
        let claim_id = submitted_claim(&app);

        let (status, _) = send(
            &app.router,
            "POST",
            &format!("/api/v1/claims/{}/decisions/undo", claim_id),
            Some(json!({ "created_by": uuid::Uuid::new_v4() })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_claim_is_not_found() {
        let app = test_app();

        let (status, _) = send(
            &app.router,
            "GET",
            &format!("/api/v1/claims/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
