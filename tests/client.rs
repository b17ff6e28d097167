//! End-to-end request tests against a mock PostgREST server

use httpmock::prelude::*;
use serde_json::json;

use postgrest_client::{Client, Column, CountMethod, Error};

#[tokio::test]
async fn bare_condition_is_a_single_query_param() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/countries")
                .query_param("select", "name")
                .query_param("name", "eq.India");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{"name": "India"}]));
        })
        .await;

    let client = Client::new(server.base_url()).unwrap();
    let resp = client
        .from_("countries")
        .select(&["name"])
        .where_(Column::new("name").eq("India"))
        .unwrap()
        .execute()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.data, json!([{"name": "India"}]));
    assert_eq!(resp.count, None);
}

#[tokio::test]
async fn composed_expression_lands_in_one_or_param() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/countries").query_param(
                "or",
                "(and(continent.eq.Asia,population.gte.5000000),name.ilike.*stan)",
            );
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([]));
        })
        .await;

    let expr = Column::new("continent").eq("Asia") & Column::new("population").gte(5_000_000)
        | Column::new("name").ilike("%stan").unwrap();

    let client = Client::new(server.base_url()).unwrap();
    client
        .from_("countries")
        .select(&["name"])
        .where_(expr)
        .unwrap()
        .execute()
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn chained_filters_become_repeated_params() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/countries")
                .query_param("name", "eq.India")
                .query_param("capital", "ilike.*el*");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([]));
        })
        .await;

    let client = Client::new(server.base_url()).unwrap();
    client
        .from_("countries")
        .select(&["name"])
        .eq("name", "India")
        .ilike("capital", "%el%")
        .execute()
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn count_is_read_from_content_range() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/countries")
                .header("Prefer", "count=exact");
            then.status(200)
                .header("content-type", "application/json")
                .header("content-range", "0-24/3573")
                .json_body(json!([]));
        })
        .await;

    let client = Client::new(server.base_url()).unwrap();
    let resp = client
        .from_("countries")
        .select(&["name"])
        .count(CountMethod::Exact)
        .execute()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.count, Some(3573));
}

#[tokio::test]
async fn insert_posts_row_with_prefer_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/countries")
                .header("Prefer", "return=representation")
                .json_body(json!({"name": "India"}));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!([{"id": 1, "name": "India"}]));
        })
        .await;

    let client = Client::new(server.base_url()).unwrap();
    let resp = client
        .from_("countries")
        .insert(json!({"name": "India"}))
        .execute()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.data[0]["id"], json!(1));
}

#[tokio::test]
async fn bearer_auth_and_schema_headers_are_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/countries")
                .header("Authorization", "Bearer secret-token")
                .header("Accept-Profile", "tenant_a");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([]));
        })
        .await;

    let client = Client::new(server.base_url())
        .unwrap()
        .bearer_auth("secret-token")
        .schema("tenant_a");
    client
        .from_("countries")
        .select(&["name"])
        .execute()
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn postgrest_error_document_is_surfaced() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/nope");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(json!({
                    "message": "relation \"public.nope\" does not exist",
                    "code": "42P01",
                    "hint": null,
                    "details": null
                }));
        })
        .await;

    let client = Client::new(server.base_url()).unwrap();
    let err = client
        .from_("nope")
        .select(&["id"])
        .execute()
        .await
        .unwrap_err();

    match err {
        Error::Api { status, response } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(response.code.as_deref(), Some("42P01"));
            assert!(response.message.unwrap().contains("does not exist"));
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn rpc_posts_params_to_rpc_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rpc/add_them")
                .json_body(json!({"a": 1, "b": 2}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!(3));
        })
        .await;

    let client = Client::new(server.base_url()).unwrap();
    let resp = client
        .rpc("add_them", json!({"a": 1, "b": 2}))
        .execute()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.data, json!(3));
}
