mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn server_binary_serves_health_and_guards_api() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok", "unexpected health body: {}", body);

    // Anonymous requests look like missing pages
    let res = client.get(format!("{}/api/projects", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
