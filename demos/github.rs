//! GitHub-style API bindings
//!
//! Declares three endpoints, authenticates from the environment and posts a
//! comment on an issue.
//!
//! Run with: GITHUB_USER=me GITHUB_PASSWORD=secret cargo run --example github

use anyhow::Context;
use serde_json::json;
use webbind::callbacks::{request_to_formdata, response_to_json};
use webbind::{Api, Call, Endpoint};

fn github_api() -> webbind::Result<Api> {
    Api::builder("github")
        .base_url("https://github.com/api/v2/json")
        .response_callback(response_to_json)
        .endpoint("get_user_data", Endpoint::get("/user/show/:user"))
        .endpoint(
            "get_user_data_extra",
            Endpoint::get("/user/show").requires_auth(true),
        )
        .endpoint(
            "comment_on_issue",
            Endpoint::post("/issues/comment/:user/:repo/:id")
                .request_callback(request_to_formdata)
                .requires_auth(true),
        )
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let username = std::env::var("GITHUB_USER").context("GITHUB_USER is not set")?;
    let password = std::env::var("GITHUB_PASSWORD").context("GITHUB_PASSWORD is not set")?;

    let gh = github_api()?;
    gh.authenticate(&username, &password);

    println!("Declared endpoints:");
    for (name, endpoint) in gh.endpoints() {
        println!("  {:<20} {} {}", name, endpoint.method(), endpoint.pattern());
    }

    let call = Call::new()
        .with_param("user", username.as_str())
        .with_param("repo", "somerepo")
        .with_param("id", "someid")
        .with_body(json!({"comment": "test comment"}));

    let reply = gh
        .call("comment_on_issue", call)
        .await
        .context("commenting on issue")?;
    println!("{:#?}", reply);

    Ok(())
}
