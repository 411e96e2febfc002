// ABOUTME: Tests for the cursor pagination engine
// ABOUTME: Page walks, record caps, empty pages, repeated tokens and lazy streaming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use whoopy::errors::{WhoopError, WhoopResult};
use whoopy::pagination::{
    collect_all, fetch_single_page, record_stream, ListParams, Page, PageQuery, PageSource,
};

use common::{cycle_json, page_response, scripted_client, test_options, ScriptedTransport};

/// In-memory source serving fixed pages chained by `p1`, `p2`, ... tokens
struct FakeSource {
    pages: Vec<Vec<u32>>,
    queries: Mutex<Vec<PageQuery>>,
}

impl FakeSource {
    fn new(sizes: &[usize]) -> Self {
        let mut next = 0_u32;
        let pages = sizes
            .iter()
            .map(|&size| {
                (0..size)
                    .map(|_| {
                        next += 1;
                        next
                    })
                    .collect()
            })
            .collect();
        Self {
            pages,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn fetches(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn queries(&self) -> Vec<PageQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FakeSource {
    type Record = u32;

    async fn fetch_page(&self, query: PageQuery) -> WhoopResult<Page<u32>> {
        let index = match query.next_token.as_deref() {
            None => 0,
            Some(token) => token.trim_start_matches('p').parse::<usize>().unwrap(),
        };
        self.queries.lock().unwrap().push(query);
        let records = self.pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < self.pages.len()).then(|| format!("p{}", index + 1));
        Ok(Page::new(records, next))
    }
}

/// Source whose continuation token never changes
struct StuckSource;

#[async_trait]
impl PageSource for StuckSource {
    type Record = u32;

    async fn fetch_page(&self, _query: PageQuery) -> WhoopResult<Page<u32>> {
        Ok(Page::new(vec![1], Some("same".to_owned())))
    }
}

#[tokio::test]
async fn test_get_page_returns_page_unchanged() {
    let source = FakeSource::new(&[2, 2, 1]);
    let page = fetch_single_page(&source, ListParams::new()).await.unwrap();

    assert_eq!(page.records, vec![1, 2]);
    assert_eq!(page.next_token.as_deref(), Some("p1"));
    assert_eq!(source.queries()[0].limit, 10);
}

#[tokio::test]
async fn test_get_all_follows_tokens_in_order() {
    let source = FakeSource::new(&[2, 2, 1]);
    let records = collect_all(&source, ListParams::new()).await.unwrap();

    assert_eq!(records, vec![1, 2, 3, 4, 5]);
    assert_eq!(source.fetches(), 3);
    let queries = source.queries();
    assert_eq!(queries[0].next_token, None);
    assert_eq!(queries[1].next_token.as_deref(), Some("p1"));
    assert_eq!(queries[2].next_token.as_deref(), Some("p2"));
    assert!(queries.iter().all(|q| q.limit == 25));
}

#[tokio::test]
async fn test_get_all_truncates_to_max_records() {
    for (max, expected_fetches) in [(1, 1), (2, 1), (3, 2), (5, 3), (9, 3)] {
        let source = FakeSource::new(&[2, 2, 1]);
        let records = collect_all(&source, ListParams::new().max_records(max))
            .await
            .unwrap();
        assert_eq!(records.len(), max.min(5), "max {max}");
        assert_eq!(records, (1..=5).take(max).collect::<Vec<u32>>());
        assert_eq!(source.fetches(), expected_fetches, "max {max}");
    }
}

#[tokio::test]
async fn test_max_records_zero_fetches_first_page_only() {
    let source = FakeSource::new(&[2, 2, 1]);
    let records = collect_all(&source, ListParams::new().max_records(0))
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn test_empty_first_page_is_empty_result() {
    let source = FakeSource::new(&[0]);

    assert!(collect_all(&source, ListParams::new()).await.unwrap().is_empty());
    let streamed: Vec<u32> = record_stream(&source, ListParams::new())
        .try_collect()
        .await
        .unwrap();
    assert!(streamed.is_empty());
}

#[tokio::test]
async fn test_empty_middle_page_with_token_continues() {
    let source = FakeSource::new(&[2, 0, 1]);
    let records = collect_all(&source, ListParams::new()).await.unwrap();

    assert_eq!(records, vec![1, 2, 3]);
    assert_eq!(source.fetches(), 3);
}

#[tokio::test]
async fn test_repeated_token_stops_walk() {
    let records = collect_all(&StuckSource, ListParams::new()).await.unwrap();
    assert_eq!(records, vec![1, 1]);

    let streamed: Vec<u32> = record_stream(StuckSource, ListParams::new())
        .try_collect()
        .await
        .unwrap();
    assert_eq!(streamed, vec![1, 1]);
}

#[tokio::test]
async fn test_iterate_yields_all_records_then_ends() {
    let source = FakeSource::new(&[2, 2, 1]);
    let mut stream = record_stream(&source, ListParams::new());

    let mut seen = Vec::new();
    while let Some(record) = stream.next().await {
        seen.push(record.unwrap());
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_iterate_fetches_lazily_at_page_boundaries() {
    let source = FakeSource::new(&[2, 2, 1]);
    {
        let mut stream = record_stream(&source, ListParams::new());
        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        assert_eq!(stream.next().await.unwrap().unwrap(), 2);
    }
    assert_eq!(source.fetches(), 1);

    let taken: Vec<u32> = record_stream(&source, ListParams::new())
        .take(3)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(taken, vec![1, 2, 3]);
    assert_eq!(source.fetches(), 3);
}

#[tokio::test]
async fn test_stream_ends_after_error() {
    struct Failing;

    #[async_trait]
    impl PageSource for Failing {
        type Record = u32;

        async fn fetch_page(&self, _query: PageQuery) -> WhoopResult<Page<u32>> {
            Err(WhoopError::transport("connection reset"))
        }
    }

    let mut stream = record_stream(Failing, ListParams::new());
    assert!(stream.next().await.unwrap().is_err());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_client_iterate_walks_http_pages() {
    let transport = ScriptedTransport::new(vec![
        page_response(&[cycle_json(1), cycle_json(2)], Some("t1")),
        page_response(&[cycle_json(3), cycle_json(4)], Some("t2")),
        page_response(&[cycle_json(5)], None),
    ]);
    let client = scripted_client(&transport, test_options());

    let ids: Vec<i64> = client
        .cycles()
        .iterate(ListParams::new())
        .map_ok(|cycle| cycle.id)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1]
        .query
        .contains(&("nextToken".to_owned(), "t1".to_owned())));
    assert!(requests[2]
        .query
        .contains(&("nextToken".to_owned(), "t2".to_owned())));
}
