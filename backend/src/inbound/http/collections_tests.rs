//! Tests for collection HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use mockall::predicate::{always, eq};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockCollectionsCommand, MockCollectionsQuery};
use crate::domain::{
    AuthContext, COLLECTION_NAME_MAX, CollectionId, CollectionName, ErrorCode, ImageId,
    NOT_AUTHENTICATED, UserId,
};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{
    SIGN_IN_PATH, fixture_ports, session_cookie_for, sign_in_route, test_session_middleware,
    test_state,
};

const OWNER: &str = "user_owner";

fn owner_auth() -> AuthContext {
    AuthContext::authenticated(UserId::new(OWNER).expect("user id"))
}

fn sample_collection(name: &str) -> Collection {
    Collection {
        id: CollectionId::random(),
        user_id: UserId::new(OWNER).expect("user id"),
        name: CollectionName::new(name).expect("name"),
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("timestamp"),
    }
}

fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(test_state(ports)))
        .wrap(test_session_middleware())
        .route(SIGN_IN_PATH, sign_in_route())
        .service(
            web::scope("/api/v1")
                .service(list_collections)
                .service(create_collection)
                .service(get_collection)
                .service(rename_collection)
                .service(delete_collection)
                .service(list_collection_images)
                .service(add_image_to_collection)
                .service(remove_image_from_collection)
                .service(list_collections_for_image)
                .service(list_available_collections_for_image),
        )
}

fn with_query(query: MockCollectionsQuery) -> HttpStatePorts {
    let mut ports = fixture_ports();
    ports.collections_query = Arc::new(query);
    ports
}

fn with_command(command: MockCollectionsCommand) -> HttpStatePorts {
    let mut ports = fixture_ports();
    ports.collections = Arc::new(command);
    ports
}

fn untouched_command() -> MockCollectionsCommand {
    let mut command = MockCollectionsCommand::new();
    command.expect_create_collection().never();
    command.expect_rename_collection().never();
    command.expect_add_image_to_collection().never();
    command
}

#[actix_web::test]
async fn list_requires_a_session() {
    let app = actix_test::init_service(test_app(fixture_ports())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/collections")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.message(), NOT_AUTHENTICATED);
}

#[actix_web::test]
async fn list_passes_the_session_user_to_the_port() {
    let holidays = sample_collection("Holidays");
    let expected = vec![holidays.clone()];
    let mut query = MockCollectionsQuery::new();
    query
        .expect_list_collections()
        .with(eq(owner_auth()))
        .times(1)
        .return_once(move |_| Ok(expected));
    let app = actix_test::init_service(test_app(with_query(query))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/collections")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<Collection> = actix_test::read_body_json(res).await;
    assert_eq!(body, vec![holidays]);
}

#[actix_web::test]
async fn create_returns_created_collection() {
    let created = sample_collection("Holidays");
    let response = created.clone();
    let mut command = MockCollectionsCommand::new();
    command
        .expect_create_collection()
        .with(
            eq(owner_auth()),
            eq(CollectionName::new("Holidays").expect("name")),
        )
        .times(1)
        .return_once(move |_, _| Ok(response));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/collections")
            .cookie(cookie)
            .set_json(json!({ "name": "  Holidays " }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Collection = actix_test::read_body_json(res).await;
    assert_eq!(body, created);
}

#[rstest]
#[case::blank("   ".to_owned(), "empty_name")]
#[case::too_long("n".repeat(COLLECTION_NAME_MAX + 1), "name_too_long")]
#[actix_web::test]
async fn create_rejects_invalid_names(#[case] name: String, #[case] code: &str) {
    let app = actix_test::init_service(test_app(with_command(untouched_command()))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/collections")
            .cookie(cookie)
            .set_json(json!({ "name": name }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "name");
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn get_of_invisible_collection_is_not_found() {
    let id = CollectionId::random();
    let mut query = MockCollectionsQuery::new();
    query
        .expect_get_collection()
        .with(eq(owner_auth()), eq(id))
        .times(1)
        .return_once(|_, _| Ok(None));
    let app = actix_test::init_service(test_app(with_query(query))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/collections/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::NotFound);
    assert_eq!(body.message(), COLLECTION_NOT_FOUND);
}

#[actix_web::test]
async fn malformed_collection_id_is_rejected_before_the_port() {
    let mut query = MockCollectionsQuery::new();
    query.expect_get_collection().never();
    let app = actix_test::init_service(test_app(with_query(query))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/collections/not-a-uuid")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
    assert_eq!(body["details"]["value"], "not-a-uuid");
}

#[actix_web::test]
async fn rename_returns_updated_collection() {
    let renamed = sample_collection("Trips");
    let id = renamed.id;
    let response = renamed.clone();
    let mut command = MockCollectionsCommand::new();
    command
        .expect_rename_collection()
        .with(
            eq(owner_auth()),
            eq(id),
            eq(CollectionName::new("Trips").expect("name")),
        )
        .times(1)
        .return_once(move |_, _, _| Ok(response));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/collections/{id}"))
            .cookie(cookie)
            .set_json(json!({ "name": "Trips" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Collection = actix_test::read_body_json(res).await;
    assert_eq!(body, renamed);
}

#[actix_web::test]
async fn delete_answers_no_content() {
    let id = CollectionId::random();
    let mut command = MockCollectionsCommand::new();
    command
        .expect_delete_collection()
        .with(eq(owner_auth()), eq(id))
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/collections/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn images_of_someone_elses_collection_are_not_found() {
    let id = CollectionId::random();
    let mut query = MockCollectionsQuery::new();
    query
        .expect_list_images_in_collection()
        .times(1)
        .return_once(|_, _| Err(Error::not_found(COLLECTION_NOT_FOUND)));
    let app = actix_test::init_service(test_app(with_query(query))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/collections/{id}/images"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn add_image_forwards_metadata() {
    let id = CollectionId::random();
    let metadata = json!({ "alt_description": "a lighthouse" });
    let expected = AddImageRequest {
        collection_id: id,
        image_id: ImageId::new("Dwu85P9SOIk").expect("image id"),
        metadata: metadata.clone(),
    };
    let mut command = MockCollectionsCommand::new();
    command
        .expect_add_image_to_collection()
        .with(eq(owner_auth()), eq(expected))
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/collections/{id}/images/Dwu85P9SOIk"))
            .cookie(cookie)
            .set_json(json!({ "metadata": metadata }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn add_image_without_body_records_empty_metadata() {
    let id = CollectionId::random();
    let mut command = MockCollectionsCommand::new();
    command
        .expect_add_image_to_collection()
        .withf(|_, request| request.metadata == json!({}))
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/collections/{id}/images/Dwu85P9SOIk"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn remove_image_answers_no_content() {
    let id = CollectionId::random();
    let mut command = MockCollectionsCommand::new();
    command
        .expect_remove_image_from_collection()
        .with(
            eq(owner_auth()),
            eq(id),
            eq(ImageId::new("Dwu85P9SOIk").expect("image id")),
        )
        .times(1)
        .return_once(|_, _, _| Ok(()));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/collections/{id}/images/Dwu85P9SOIk"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn anonymous_image_membership_is_empty() {
    let mut query = MockCollectionsQuery::new();
    query
        .expect_list_collections_containing_image()
        .with(eq(AuthContext::anonymous()), always())
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(with_query(query))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/images/Dwu85P9SOIk/collections")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<Collection> = actix_test::read_body_json(res).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn available_collections_forward_search_text() {
    let trips = sample_collection("Trips");
    let expected = vec![trips.clone()];
    let mut query = MockCollectionsQuery::new();
    query
        .expect_list_collections_available_for_image()
        .with(
            eq(owner_auth()),
            eq(ImageId::new("Dwu85P9SOIk").expect("image id")),
            eq(Some("tri".to_owned())),
        )
        .times(1)
        .return_once(move |_, _, _| Ok(expected));
    let app = actix_test::init_service(test_app(with_query(query))).await;
    let cookie = session_cookie_for(&app, OWNER).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/images/Dwu85P9SOIk/available-collections?search=tri")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<Collection> = actix_test::read_body_json(res).await;
    assert_eq!(body, vec![trips]);
}
