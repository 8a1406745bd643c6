use healthhub_gateway::client::http::HttpHealthApi;
use healthhub_gateway::client::{ApiError, HealthApi};
use healthhub_gateway::models::plan::RecommendationRequest;
use healthhub_gateway::models::user::Goal;
use healthhub_gateway::services::normalizer;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> HttpHealthApi {
    let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    HttpHealthApi::new(Client::new(), base, token.map(str::to_string))
}

fn task_json(id: &str, completed: bool) -> Value {
    json!({
        "_id": id,
        "title": "Drink water",
        "category": "hydration",
        "completed": completed,
        "createdAt": "2024-01-01T08:00:00Z"
    })
}

#[tokio::test]
async fn unauthorized_maps_to_session_expired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server, Some("stale")).profile().await.unwrap_err();
    assert_eq!(err, ApiError::SessionExpired);
}

#[tokio::test]
async fn bearer_token_is_sent_with_each_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/stats/summary"))
        .and(header("Authorization", "Bearer abc.def"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "completedTasks": 2,
            "pendingTasks": 1,
            "completionRate": 67
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = client_for(&server, Some("abc.def")).task_stats().await.unwrap();
    assert_eq!(stats.total(), Some(3));
}

#[tokio::test]
async fn error_bodies_surface_message_or_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/t1/toggle"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Task not found" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/t1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "database offline" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let api = client_for(&server, Some("tok"));
    assert_eq!(
        api.toggle_task("t1").await.unwrap_err(),
        ApiError::Status { status: 404, message: "Task not found".to_string() }
    );
    assert_eq!(
        api.delete_task("t1").await.unwrap_err(),
        ApiError::Status { status: 500, message: "database offline".to_string() }
    );
    assert_eq!(
        api.list_tasks(None).await.unwrap_err(),
        ApiError::Status { status: 502, message: "Bad Gateway".to_string() }
    );
}

#[tokio::test]
async fn completed_query_is_sent_only_for_narrow_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [task_json("t1", false), task_json("t2", true)]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server, Some("tok"));
    assert_eq!(api.list_tasks(None).await.unwrap().len(), 2);
    api.list_tasks(Some(true)).await.unwrap();
    api.list_tasks(Some(false)).await.unwrap();

    let queries: Vec<Option<String>> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.query().map(str::to_string))
        .collect();
    assert_eq!(
        queries,
        vec![None, Some("completed=true".to_string()), Some("completed=false".to_string())]
    );
}

#[tokio::test]
async fn bmi_history_asks_for_a_bounded_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/bmi-history"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "date": "2024-01-02T08:00:00Z", "bmi": 24.1, "weight": 69.5, "height": 170 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let history = client_for(&server, Some("tok")).bmi_history(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].bmi, 24.1);
}

#[tokio::test]
async fn ai_responses_are_unwrapped_from_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "recommendations": { "nutrition": ["Eat more greens"] } }
        })))
        .mount(&server)
        .await;

    let payload = client_for(&server, Some("tok"))
        .recommendations(&RecommendationRequest::default())
        .await
        .unwrap();
    assert_eq!(payload["recommendations"]["nutrition"][0], "Eat more greens");
}

#[tokio::test]
async fn missing_data_reads_as_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let payload = client_for(&server, Some("tok"))
        .recommendations(&RecommendationRequest::default())
        .await
        .unwrap();
    assert_eq!(payload, Value::Null);
    assert_eq!(
        normalizer::recommendations(&payload).raw_text(),
        Some("No recommendations available.")
    );
}

#[tokio::test]
async fn task_ids_stay_inside_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    client_for(&server, Some("tok")).toggle_task("abc?x=1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/tasks/abc%3Fx=1/toggle");
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn dot_segment_ids_are_refused_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client_for(&server, Some("tok"));
    assert!(matches!(api.delete_task("..").await, Err(ApiError::Validation(_))));
    assert!(matches!(api.toggle_task(".").await, Err(ApiError::Validation(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn profile_with_blank_and_unknown_values_still_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "gender": "",
            "goals": ["improve_sleep", "muscle_gain"],
            "currentBMI": 22.5
        })))
        .mount(&server)
        .await;

    let user = client_for(&server, Some("tok")).profile().await.unwrap();
    assert_eq!(user.gender, None);
    assert_eq!(user.goals, vec![Goal::MuscleGain]);
    assert_eq!(user.current_bmi, Some(22.5));
}
