//! End-to-end tests for MCP server tools.
//!
//! These tests invoke the tools through the server against an in-memory
//! documentation tree and verify the responses.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeFetcher, docs_fixture};
use quasar_docs_mcp::docs::fetcher::Fetcher;
use quasar_docs_mcp::mcp::QuasarDocs;
use quasar_docs_mcp::mcp::tools::{
    GetComponentParams, GetPageParams, ListSectionsParams, ResponseFormat, SearchDocsParams,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};

fn server_over(fake: Arc<FakeFetcher>) -> QuasarDocs {
    let fetcher: Arc<dyn Fetcher> = fake;
    QuasarDocs::new(fetcher, Duration::from_secs(3600))
}

fn text_of(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        other => panic!("expected text content, got: {other:?}"),
    }
}

fn search_params(query: &str) -> SearchDocsParams {
    SearchDocsParams {
        query: query.to_string(),
        section: None,
        limit: 10,
        offset: 0,
        include_content: false,
        format: ResponseFormat::Json,
    }
}

#[tokio::test]
async fn test_get_component_resolves_alias() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .get_component(Parameters(GetComponentParams {
            component: "button".to_string(),
            format: ResponseFormat::Json,
        }))
        .await
        .expect("get_component should succeed");

    assert_eq!(result.is_error, Some(false));
    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["path"], "vue-components/btn.md");
    assert_eq!(parsed["url"], "https://quasar.dev/vue-components/btn");
    assert!(parsed["content"].as_str().unwrap().contains("QBtn"));
}

#[tokio::test]
async fn test_get_component_accepts_prefixed_name() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .get_component(Parameters(GetComponentParams {
            component: "QBtn".to_string(),
            format: ResponseFormat::Json,
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["path"], "vue-components/btn.md");
}

#[tokio::test]
async fn test_get_component_camel_case_variant() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .get_component(Parameters(GetComponentParams {
            component: "DatePicker".to_string(),
            format: ResponseFormat::Json,
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["path"], "vue-components/date.md");
}

#[tokio::test]
async fn test_get_component_not_found_suggests_search() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .get_component(Parameters(GetComponentParams {
            component: "flux-capacitor".to_string(),
            format: ResponseFormat::Markdown,
        }))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("search-docs"));
}

#[tokio::test]
async fn test_get_component_rejects_oversized_name() {
    let server = server_over(Arc::new(docs_fixture()));
    let err = server
        .get_component(Parameters(GetComponentParams {
            component: "x".repeat(101),
            format: ResponseFormat::Markdown,
        }))
        .await
        .unwrap_err();
    assert!(err.message.contains("component"));
}

#[tokio::test]
async fn test_get_page_without_extension() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .get_page(Parameters(GetPageParams {
            path: "style/color-palette".to_string(),
            format: ResponseFormat::Json,
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["path"], "style/color-palette.md");
    assert_eq!(parsed["url"], "https://quasar.dev/style/color-palette");
}

#[tokio::test]
async fn test_get_page_index_fallback() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .get_page(Parameters(GetPageParams {
            path: "/layout/grid".to_string(),
            format: ResponseFormat::Json,
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["path"], "layout/grid/index.md");
    assert_eq!(parsed["url"], "https://quasar.dev/layout/grid");
}

#[tokio::test]
async fn test_get_page_clips_oversized_content() {
    let mut fake = docs_fixture();
    let body = format!(
        "---\ntitle: Everything\n---\n# Everything\n\n{}",
        "lorem ipsum dolor sit amet ".repeat(2_000)
    );
    fake.add_file("style/everything.md", &body);
    let server = server_over(Arc::new(fake));

    let result = server
        .get_page(Parameters(GetPageParams {
            path: "style/everything".to_string(),
            format: ResponseFormat::Json,
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["truncated"], true);
    let content = parsed["content"].as_str().unwrap();
    assert!(content.len() < body.len());
    assert!(content.contains("[Content truncated"));
}

#[tokio::test]
async fn test_get_page_not_found() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .get_page(Parameters(GetPageParams {
            path: "no/such/page".to_string(),
            format: ResponseFormat::Markdown,
        }))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("no/such/page"));
}

#[tokio::test]
async fn test_search_docs_ranks_btn_first() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .search_docs(Parameters(search_params("btn")))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    let results = parsed["results"].as_array().unwrap();
    assert_eq!(results[0]["path"], "vue-components/btn.md");
    assert!(results[0]["score"].as_u64().unwrap() >= 100);
}

#[tokio::test]
async fn test_search_docs_pagination_metadata() {
    let server = server_over(Arc::new(docs_fixture()));
    let mut params = search_params("components");
    params.limit = 5;
    let result = server.search_docs(Parameters(params)).await.unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["results"].as_array().unwrap().len(), 5);
    assert_eq!(parsed["total"], 7);
    assert_eq!(parsed["hasMore"], true);
    assert_eq!(parsed["nextOffset"], 5);

    let mut next = search_params("components");
    next.limit = 5;
    next.offset = 5;
    let result = server.search_docs(Parameters(next)).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["hasMore"], false);
    assert!(parsed.get("nextOffset").is_none());
}

#[tokio::test]
async fn test_search_docs_unknown_section_is_structured() {
    let server = server_over(Arc::new(docs_fixture()));
    let mut params = search_params("btn");
    params.section = Some("nonexistent".to_string());
    let result = server.search_docs(Parameters(params)).await.unwrap();

    // Structured response, not a tool error.
    assert_eq!(result.is_error, Some(false));
    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(parsed["error"], "section_not_found");
    let sections = parsed["availableSections"].as_array().unwrap();
    assert!(sections.iter().any(|s| s == "vue-components"));
}

#[tokio::test]
async fn test_search_docs_rejects_out_of_range_limit() {
    let server = server_over(Arc::new(docs_fixture()));
    let mut params = search_params("btn");
    params.limit = 0;
    let err = server.search_docs(Parameters(params)).await.unwrap_err();
    assert!(err.message.contains("limit"));
}

#[tokio::test]
async fn test_search_docs_markdown_format() {
    let server = server_over(Arc::new(docs_fixture()));
    let mut params = search_params("btn");
    params.format = ResponseFormat::Markdown;
    let result = server.search_docs(Parameters(params)).await.unwrap();

    let body = text_of(&result);
    assert!(body.contains("Search results for \"btn\""));
    assert!(body.contains("`vue-components/btn.md`"));
}

#[tokio::test]
async fn test_list_sections_with_counts() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .list_sections(Parameters(ListSectionsParams {
            section: None,
            format: ResponseFormat::Json,
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    let sections = parsed["sections"].as_array().unwrap();
    let components = sections
        .iter()
        .find(|s| s["name"] == "vue-components")
        .unwrap();
    assert_eq!(components["pages"], 7);
    assert_eq!(components["title"], "Vue Components");
}

#[tokio::test]
async fn test_list_sections_expands_one_section() {
    let server = server_over(Arc::new(docs_fixture()));
    let result = server
        .list_sections(Parameters(ListSectionsParams {
            section: Some("style".to_string()),
            format: ResponseFormat::Json,
        }))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
    let pages = parsed["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().any(|p| p["path"] == "style/typography.md"));
}

#[tokio::test]
async fn test_index_is_reused_within_ttl() {
    let fake = Arc::new(docs_fixture());
    let server = server_over(fake.clone());

    server
        .search_docs(Parameters(search_params("btn")))
        .await
        .unwrap();
    let crawls_after_first = fake.dir_calls();
    assert!(crawls_after_first > 0);

    server
        .search_docs(Parameters(search_params("input")))
        .await
        .unwrap();
    // The cached index served the second search without re-crawling.
    assert_eq!(fake.dir_calls(), crawls_after_first);
}

#[tokio::test]
async fn test_invalidate_forces_rebuild() {
    let fake = Arc::new(docs_fixture());
    let server = server_over(fake.clone());

    server
        .search_docs(Parameters(search_params("btn")))
        .await
        .unwrap();
    let crawls_after_first = fake.dir_calls();

    server.index_cache().invalidate().await;
    server
        .search_docs(Parameters(search_params("btn")))
        .await
        .unwrap();
    assert!(fake.dir_calls() > crawls_after_first);
}
