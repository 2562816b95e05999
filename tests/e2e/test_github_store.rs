use crate::helpers::github_mock::{
    contents_path, mount_existing_file, mount_existing_items, mount_get_status, mount_put,
    recorded_puts, stored_item, StatefulContents,
};
use crate::helpers::{
    authed, discord_message, GitHubBranchTestContext, GitHubTestContext, TEST_BRANCH,
};

use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn hello_item() -> Value {
    stored_item("Hello", "Bob", "2024-10-04T14:00:00.000Z", "October 4, 2024")
}

async fn post_hello(ctx: &GitHubTestContext) -> crate::helpers::api_client::ApiResponse {
    post_hello_with(&ctx.client).await
}

async fn post_hello_with(
    client: &crate::helpers::api_client::TestClient,
) -> crate::helpers::api_client::ApiResponse {
    client
        .post(
            &authed("/"),
            &discord_message("Hello", "Bob", "2024-10-04T14:00:00.000Z"),
        )
        .await
        .unwrap()
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_prepend_to_existing_file(ctx: &GitHubTestContext) {
    let existing = json!([
        stored_item("Older news", "Ana", "2024-10-03T09:00:00.000Z", "October 3, 2024"),
        stored_item("Oldest news", "Ana", "2024-10-01T09:00:00.000Z", "October 1, 2024"),
    ]);
    mount_existing_items(&ctx.github, &existing, "abc123").await;
    mount_put(&ctx.github, 200, 1).await;

    post_hello(ctx)
        .await
        .assert_status(StatusCode::OK)
        .assert_text("News updated successfully!");

    let puts = recorded_puts(&ctx.github).await;
    assert_eq!(puts.len(), 1);

    let put = &puts[0];
    assert_eq!(put.sha.as_deref(), Some("abc123"));
    assert_eq!(put.message, "Update news: Hello");
    assert!(put.body.get("branch").is_none(), "{}", put.body);
    assert_eq!(
        put.content,
        json!([hello_item(), existing[0].clone(), existing[1].clone()])
    );
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_create_file_when_missing(ctx: &GitHubTestContext) {
    mount_get_status(&ctx.github, 404).await;
    mount_put(&ctx.github, 201, 1).await;

    post_hello(ctx).await.assert_status(StatusCode::OK);

    let puts = recorded_puts(&ctx.github).await;
    assert_eq!(puts.len(), 1);
    assert!(
        puts[0].body.get("sha").is_none(),
        "sha must be omitted on create: {}",
        puts[0].body
    );
    assert_eq!(puts[0].content, json!([hello_item()]));
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_start_empty_when_fetch_fails(ctx: &GitHubTestContext) {
    mount_get_status(&ctx.github, 500).await;
    mount_put(&ctx.github, 200, 1).await;

    post_hello(ctx).await.assert_status(StatusCode::OK);

    let puts = recorded_puts(&ctx.github).await;
    assert_eq!(puts[0].sha, None);
    assert_eq!(puts[0].content, json!([hello_item()]));
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_replace_unparseable_file_contents(ctx: &GitHubTestContext) {
    mount_existing_file(&ctx.github, "{ this is not a news array", "corrupt-sha").await;
    mount_put(&ctx.github, 200, 1).await;

    post_hello(ctx).await.assert_status(StatusCode::OK);

    let puts = recorded_puts(&ctx.github).await;
    assert_eq!(puts[0].sha.as_deref(), Some("corrupt-sha"));
    assert_eq!(puts[0].content, json!([hello_item()]));
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_evict_oldest_when_file_is_full(ctx: &GitHubTestContext) {
    let existing: Vec<Value> = (0..10)
        .map(|n| {
            stored_item(
                &format!("item {}", n),
                "Ana",
                "2024-10-01T09:00:00.000Z",
                "October 1, 2024",
            )
        })
        .collect();
    mount_existing_items(&ctx.github, &json!(existing), "full-sha").await;
    mount_put(&ctx.github, 200, 1).await;

    post_hello(ctx).await.assert_status(StatusCode::OK);

    let puts = recorded_puts(&ctx.github).await;
    let written = puts[0].content.as_array().unwrap();

    assert_eq!(written.len(), 10);
    assert_eq!(written[0], hello_item());
    assert_eq!(written[1..].to_vec(), existing[..9].to_vec());
    assert!(!written.contains(&existing[9]));
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_fail_when_github_rejects_update(ctx: &GitHubTestContext) {
    mount_existing_items(&ctx.github, &json!([]), "stale-sha").await;
    mount_put(&ctx.github, 409, 1).await;

    post_hello(ctx)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_text("Internal error")
        .assert_header("access-control-allow-origin", "*");
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_not_touch_github_for_ignored_messages(ctx: &GitHubTestContext) {
    mount_put(&ctx.github, 200, 0).await;

    ctx.client
        .post(
            &authed("/"),
            &json!({ "content": "beep", "author": { "username": "Bot", "bot": true } }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK)
        .assert_text("Ignored bot message or empty content");

    let requests = ctx.github.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "unexpected GitHub calls: {}", requests.len());
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_serve_feed_from_file(ctx: &GitHubTestContext) {
    mount_existing_items(&ctx.github, &json!([hello_item()]), "abc123").await;

    let response = ctx.client.get("/").await.unwrap();
    response.assert_status(StatusCode::OK);

    assert_eq!(
        response.body.unwrap(),
        json!([{
            "content": "Hello",
            "author": "Bob",
            "timestamp": "2024-10-04T14:00:00.000Z",
            "formattedDate": "October 4, 2024"
        }])
    );
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_truncate_long_commit_previews(ctx: &GitHubTestContext) {
    mount_get_status(&ctx.github, 404).await;
    mount_put(&ctx.github, 201, 1).await;

    let content = "A".repeat(120);
    ctx.client
        .post(
            &authed("/"),
            &discord_message(&content, "Bob", "2024-10-04T14:00:00.000Z"),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let puts = recorded_puts(&ctx.github).await;
    assert_eq!(
        puts[0].message,
        format!("Update news: {}...", "A".repeat(50))
    );
    assert_eq!(puts[0].content[0]["content"], json!(content));
}

#[test_context(GitHubBranchTestContext)]
#[tokio::test]
async fn it_should_read_and_write_configured_branch(ctx: &GitHubBranchTestContext) {
    let existing = json!([stored_item(
        "Older news",
        "Ana",
        "2024-10-03T09:00:00.000Z",
        "October 3, 2024"
    )]);
    Mock::given(method("GET"))
        .and(path(contents_path()))
        .and(query_param("ref", TEST_BRANCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": base64_items(&existing),
            "sha": "branch-sha"
        })))
        .mount(&ctx.github)
        .await;
    Mock::given(method("PUT"))
        .and(path(contents_path()))
        .and(body_partial_json(json!({ "branch": TEST_BRANCH })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&ctx.github)
        .await;

    post_hello_with(&ctx.client)
        .await
        .assert_status(StatusCode::OK)
        .assert_text("News updated successfully!");

    let puts = recorded_puts(&ctx.github).await;
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body["branch"], json!(TEST_BRANCH));
    assert_eq!(puts[0].sha.as_deref(), Some("branch-sha"));
    assert_eq!(puts[0].content, json!([hello_item(), existing[0].clone()]));

    let response = ctx.client.get("/").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.unwrap()[0]["content"], json!("Older news"));
}

#[test_context(GitHubTestContext)]
#[tokio::test]
async fn it_should_serialize_concurrent_appends(ctx: &GitHubTestContext) {
    let contents = StatefulContents::default();
    contents.mount(&ctx.github).await;

    let mut futures = Vec::new();
    for n in 0..5 {
        let client = ctx.client.clone();
        futures.push(async move {
            client
                .post(
                    &authed("/"),
                    &discord_message(&format!("burst {}", n), "Bob", "2024-10-04T14:00:00.000Z"),
                )
                .await
        });
    }

    for result in futures::future::join_all(futures).await {
        result
            .unwrap()
            .assert_status(StatusCode::OK)
            .assert_text("News updated successfully!");
    }

    let puts = recorded_puts(&ctx.github).await;
    assert_eq!(puts.len(), 5);

    // Each write carries the sha produced by the write before it
    let shas: Vec<Option<String>> = puts.iter().map(|put| put.sha.clone()).collect();
    let expected: Vec<Option<String>> = std::iter::once(None)
        .chain((1..5).map(|n| Some(format!("sha-{}", n))))
        .collect();
    assert_eq!(shas, expected);

    let stored = contents.content().unwrap();
    let mut stored_contents: Vec<String> = stored
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["content"].as_str().unwrap().to_string())
        .collect();
    stored_contents.sort();
    assert_eq!(
        stored_contents,
        (0..5).map(|n| format!("burst {}", n)).collect::<Vec<_>>()
    );
}

fn base64_items(items: &Value) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(serde_json::to_string(items).unwrap())
}
