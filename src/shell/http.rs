use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, Json, Router, response::Html, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::modules::roster_lock::use_cases::reconcile_scores::inbound::http as score_http;
use crate::shell::graphql::{AppSchema, build_schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());
    Router::new()
        .route("/gql", get(graphiql).post(graphql))
        .route("/health", get(health))
        .route("/teams/{team_id}/matchups/{matchup_id}/score", get(score_http::handle))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod router_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::router;
    use crate::modules::roster_lock::use_cases::audit_integrity::handler::AuditOptions;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::matchups::december;
    use crate::tests::fixtures::pipeline::Pipeline;

    async fn make_test_state() -> AppState {
        let pipeline = Pipeline::team_a_week(december(8)).await;
        AppState::new(pipeline.store, pipeline.league, pipeline.clock, AuditOptions::default())
    }

    async fn post_gql(state: AppState, query: &str) -> Value {
        let body = serde_json::json!({ "query": query }).to_string();
        let response = router(state)
            .oneshot(
                Request::post("/gql")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_report_health() {
        let response = router(make_test_state().await)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn it_should_serve_graphiql() {
        let response = router(make_test_state().await)
            .oneshot(Request::get("/gql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn it_should_generate_then_list_snapshots_over_graphql() {
        let state = make_test_state().await;
        let generated = post_gql(
            state.clone(),
            "mutation { generateSnapshots(teamId: 1, matchupId: 10) { inserted skipped } }",
        )
        .await;
        assert_eq!(generated["data"]["generateSnapshots"]["inserted"], 21);

        let listed = post_gql(
            state,
            r#"{ snapshots(teamId: 1, from: "2025-12-08", to: "2025-12-08") { playerId slotType isLocked } }"#,
        )
        .await;
        let rows = listed["data"]["snapshots"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["slotType"], "bench");
    }

    #[tokio::test]
    async fn it_should_surface_domain_errors_as_graphql_errors() {
        let response = post_gql(
            make_test_state().await,
            "{ periodScore(teamId: 3, matchupId: 10) { total } }",
        )
        .await;
        let message = response["errors"][0]["message"].as_str().unwrap();
        assert!(message.contains("does not play in matchup 10"));
    }

    #[tokio::test]
    async fn it_should_run_a_lock_check_and_a_backfill() {
        let state = make_test_state().await;
        let backfill = post_gql(
            state.clone(),
            r#"mutation { backfill(date: "2025-12-08") { units succeeded generation { inserted } } }"#,
        )
        .await;
        assert_eq!(backfill["data"]["backfill"]["units"], 2);
        assert_eq!(backfill["data"]["backfill"]["generation"]["inserted"], 42);

        let lock = post_gql(state, "mutation { runLockCheck { evaluated locked } }").await;
        assert_eq!(lock["data"]["runLockCheck"]["evaluated"], 6);
        assert_eq!(lock["data"]["runLockCheck"]["locked"], 0);
    }
}
