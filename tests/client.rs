mod common;

use anyhow::Result;
use common::MockPlatform;
use freshstats::{
    CollectionQuery, FreshserviceClient, PageSource, WalkLimit, WalkRequest, walker,
};

#[tokio::test]
async fn test_filter_is_sent_quoted() -> Result<()> {
    let (base_url, platform, handle) = common::start_mock_platform(MockPlatform {
        tickets: vec![("status:2".into(), common::tickets(1, 3, 0, 7))],
        ..Default::default()
    })
    .await?;
    let client = FreshserviceClient::new(&common::client_config(&base_url))?;

    let page = client
        .fetch_page(&CollectionQuery::tickets("status:2 AND priority:4"), 1, 30)
        .await?;
    assert_eq!(page.records.len(), 3);
    assert!(page.cursor.is_empty());

    let requests = platform.requests();
    assert_eq!(
        requests[0],
        "/api/v2/tickets/filter?query=%22status%3A2%20AND%20priority%3A4%22&page=1"
    );

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_walk_over_http_stops_on_short_page() -> Result<()> {
    let (base_url, platform, handle) = common::start_mock_platform(MockPlatform {
        tickets: vec![("group_id:3".into(), common::tickets(1, 72, 0, 7))],
        ..Default::default()
    })
    .await?;
    let client = FreshserviceClient::new(&common::client_config(&base_url))?;

    let request = WalkRequest::new(
        CollectionQuery::tickets("group_id:3"),
        30,
        WalkLimit::capped(1000)?,
    );
    let result = walker::collect(&client, &request).await?;
    assert_eq!(result.total_fetched, 72);
    assert_eq!(result.pages_fetched, 3);
    assert!(!result.truncated);
    assert_eq!(platform.requests_to("/api/v2/tickets/filter"), 3);

    let capped = WalkRequest::new(
        CollectionQuery::tickets("group_id:3"),
        30,
        WalkLimit::capped(50)?,
    );
    let result = walker::collect(&client, &capped).await?;
    assert_eq!(result.total_fetched, 50);
    assert!(result.truncated);
    assert_eq!(platform.requests_to("/api/v2/tickets/filter"), 5);

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_link_header_drives_agent_walk() -> Result<()> {
    let agents: Vec<_> = (1..=25)
        .map(|id| common::agent(id, "Agent", &id.to_string(), &format!("a{}@example.com", id)))
        .collect();
    let (base_url, platform, handle) = common::start_mock_platform(MockPlatform {
        agents,
        link_headers: true,
        ..Default::default()
    })
    .await?;
    let client = FreshserviceClient::new(&common::client_config(&base_url).page_size(10))?;

    let first = client.fetch_page(&CollectionQuery::agents(), 1, 10).await?;
    assert_eq!(first.cursor.next, Some(2));

    let result = walker::collect(&client, &WalkRequest::drain(CollectionQuery::agents(), 10)).await?;
    assert_eq!(result.total_fetched, 25);
    assert_eq!(result.pages_fetched, 3);
    assert!(platform.requests().iter().any(|r| r == "/api/v2/agents?page=3&per_page=10"));

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_error_status_carries_json_details() -> Result<()> {
    let (base_url, _platform, handle) = common::start_mock_platform(MockPlatform {
        ticket_failure: Some((400, r#"{"code":"invalid_value","field":"query"}"#.into())),
        ..Default::default()
    })
    .await?;
    let client = FreshserviceClient::new(&common::client_config(&base_url))?;

    let err = walker::collect(&client, &WalkRequest::drain(CollectionQuery::tickets("status:2"), 30))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    match err.details() {
        Some(freshstats::ErrorDetails::Json(body)) => assert_eq!(body["code"], "invalid_value"),
        other => panic!("expected JSON details, got {:?}", other),
    }

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_error_status_keeps_raw_text() -> Result<()> {
    let (base_url, _platform, handle) = common::start_mock_platform(MockPlatform {
        ticket_failure: Some((503, "upstream unavailable".into())),
        ..Default::default()
    })
    .await?;
    let client = FreshserviceClient::new(&common::client_config(&base_url))?;

    let err = client
        .fetch_page(&CollectionQuery::tickets("status:2"), 1, 30)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(
        err.details(),
        Some(&freshstats::ErrorDetails::Text("upstream unavailable".into()))
    );

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn test_wrong_key_is_rejected() -> Result<()> {
    let (base_url, _platform, handle) = common::start_mock_platform(MockPlatform::default()).await?;
    let client = FreshserviceClient::new(&freshstats::ClientConfig::with_base_url(&base_url, "nope"))?;

    let err = client.fetch_page(&CollectionQuery::groups(), 1, 30).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    handle.abort();
    Ok(())
}
