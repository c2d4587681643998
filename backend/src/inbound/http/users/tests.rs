//! Handler tests over mocked driving ports.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockUsersCommand, MockUsersQuery};
use crate::domain::{Error, User, UserDetails, UserId};

fn state(query: MockUsersQuery, command: MockUsersCommand) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(query), Arc::new(command)))
}

async fn call(
    state: web::Data<HttpState>,
    request: actix_test::TestRequest,
) -> (StatusCode, String) {
    let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, String::from_utf8(body.to_vec()).expect("utf8 body"))
}

#[actix_web::test]
async fn create_user_responds_with_created_text() {
    let mut command = MockUsersCommand::new();
    command
        .expect_create_user()
        .withf(|details| details == &UserDetails::new("Ana", "ana@x.com"))
        .times(1)
        .returning(|_| Ok(UserId::new(1)));

    let (status, body) = call(
        state(MockUsersQuery::new(), command),
        actix_test::TestRequest::post()
            .uri("/users")
            .set_payload(r#"{"name":"Ana","email":"ana@x.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "Successfully created user 1");
}

#[rstest]
#[case::post(actix_test::TestRequest::post().uri("/users"))]
#[case::put(actix_test::TestRequest::put().uri("/users/1"))]
#[actix_web::test]
async fn malformed_json_is_rejected_before_reaching_the_service(
    #[case] request: actix_test::TestRequest,
) {
    let mut command = MockUsersCommand::new();
    command.expect_create_user().never();
    command.expect_update_user().never();

    let (status, body) = call(
        state(MockUsersQuery::new(), command),
        request.set_payload("{\"name\":"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to unmarshal request body!");
}

#[actix_web::test]
async fn list_users_returns_json_array() {
    let mut query = MockUsersQuery::new();
    query.expect_list_users().times(1).returning(|| {
        Ok(vec![
            User::new(UserId::new(2), UserDetails::new("Bo", "bo@x.com")),
            User::new(UserId::new(1), UserDetails::new("Ana", "ana@x.com")),
        ])
    });

    let (status, body) = call(
        state(query, MockUsersCommand::new()),
        actix_test::TestRequest::get().uri("/users"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(
        value,
        json!([
            { "id": 2, "name": "Bo", "email": "bo@x.com" },
            { "id": 1, "name": "Ana", "email": "ana@x.com" },
        ])
    );
}

#[actix_web::test]
async fn list_users_returns_empty_array_not_null() {
    let mut query = MockUsersQuery::new();
    query.expect_list_users().returning(|| Ok(Vec::new()));

    let (status, body) = call(
        state(query, MockUsersCommand::new()),
        actix_test::TestRequest::get().uri("/users"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn get_user_passes_parsed_id() {
    let mut query = MockUsersQuery::new();
    query
        .expect_find_user()
        .withf(|id| *id == UserId::new(42))
        .times(1)
        .returning(|id| Ok(User::new(id, UserDetails::new("Zed", "z@x.com"))));

    let (status, body) = call(
        state(query, MockUsersCommand::new()),
        actix_test::TestRequest::get().uri("/users/42"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id":42,"name":"Zed","email":"z@x.com"}"#);
}

#[rstest]
#[case::get(actix_test::TestRequest::get().uri("/users/abc"))]
#[case::put(actix_test::TestRequest::put().uri("/users/-1").set_payload("{}"))]
#[case::delete(actix_test::TestRequest::delete().uri("/users/4294967296"))]
#[actix_web::test]
async fn unparsable_ids_fail_with_parameter_message(#[case] request: actix_test::TestRequest) {
    let mut query = MockUsersQuery::new();
    query.expect_find_user().never();
    let mut command = MockUsersCommand::new();
    command.expect_update_user().never();
    command.expect_delete_user().never();

    let (status, body) = call(state(query, command), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to convert parameter to integer");
}

#[actix_web::test]
async fn update_user_returns_no_content() {
    let mut command = MockUsersCommand::new();
    command
        .expect_update_user()
        .withf(|id, details| {
            *id == UserId::new(3) && details == &UserDetails::new("Cy", "cy@x.com")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, body) = call(
        state(MockUsersQuery::new(), command),
        actix_test::TestRequest::put()
            .uri("/users/3")
            .set_payload(r#"{"id":8,"name":"Cy","email":"cy@x.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[actix_web::test]
async fn delete_user_returns_no_content() {
    let mut command = MockUsersCommand::new();
    command
        .expect_delete_user()
        .withf(|id| *id == UserId::new(9))
        .times(1)
        .returning(|_| Ok(()));

    let (status, _) = call(
        state(MockUsersQuery::new(), command),
        actix_test::TestRequest::delete().uri("/users/9"),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn service_failures_surface_their_message() {
    let mut query = MockUsersQuery::new();
    query
        .expect_find_user()
        .returning(|id| Err(Error::query(format!("Failed to retrieve user {id}"))));

    let (status, body) = call(
        state(query, MockUsersCommand::new()),
        actix_test::TestRequest::get().uri("/users/5"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to retrieve user 5");
}

#[rstest]
#[case::patch(actix_test::TestRequest::patch().uri("/users/1"))]
#[case::post_with_id(actix_test::TestRequest::post().uri("/users/1"))]
#[case::unknown_path(actix_test::TestRequest::get().uri("/accounts"))]
#[actix_web::test]
async fn unmatched_routes_fall_through_to_not_found(#[case] request: actix_test::TestRequest) {
    let (status, _) = call(state(MockUsersQuery::new(), MockUsersCommand::new()), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
