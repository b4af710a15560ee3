use catalog_api::mock::{character, create_mock_source, expect_fetch, info, page_of, MockCatalog};
use catalog_api::{decode_page, CatalogError, CatalogPage, Page, ResourceKind};
use catalog_browser::coordinator::{self, CoordinatorClient, LoadOutcome, LoadState};
use std::time::Duration;

fn start(mock: &MockCatalog) -> CoordinatorClient {
    let (actor, client) = coordinator::new(mock.clone());
    tokio::spawn(actor.run());
    client
}

fn rick_and_morty() -> CatalogPage {
    CatalogPage::Characters(Page {
        info: info(2, None, None),
        results: vec![character(1, "Rick"), character(2, "Morty")],
    })
}

/// Gives spawned fetch tasks and the actor time to run.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_first_load_stores_characters() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character).return_ok(rick_and_morty());
    let client = start(&mock);

    let outcome = client.first_load().await.unwrap();
    assert!(outcome.is_issued());
    let state = client.settled(outcome).await.unwrap();

    assert_eq!(state.load_state, LoadState::Loaded);
    assert_eq!(state.characters.len(), 2);
    assert_eq!(state.characters[0].name, "Rick");
    assert!(!state.has_next());
    assert!(!state.has_prev());

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].page, Some(1));
    assert_eq!(calls[0].name, None);
    mock.verify();
}

#[tokio::test]
async fn test_server_error_keeps_previous_results() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character).return_ok(rick_and_morty());
    mock.expect_fetch(ResourceKind::Character)
        .return_err(CatalogError::BadResponse { status: 500 });
    let client = start(&mock);

    let loaded = client.settled(client.first_load().await.unwrap()).await.unwrap();
    let failed = client
        .settled(client.apply_search("Summer").await.unwrap())
        .await
        .unwrap();

    match &failed.load_state {
        LoadState::Failed(message) => assert!(message.contains("500"), "message: {message}"),
        other => panic!("Expected Failed, got {:?}", other),
    }
    assert_eq!(failed.characters, loaded.characters);
    assert_eq!(failed.info, loaded.info);
    mock.verify();
}

#[tokio::test]
async fn test_decode_failure_is_reported_as_decode() {
    let mock = MockCatalog::new();
    let decode_err = decode_page(ResourceKind::Character, br#"{"bad":"shape"}"#).unwrap_err();
    mock.expect_fetch(ResourceKind::Character).return_err(decode_err);
    let client = start(&mock);

    let state = client.settled(client.first_load().await.unwrap()).await.unwrap();
    match state.load_state {
        LoadState::Failed(message) => {
            assert!(message.contains("could not decode"), "message: {message}");
            assert!(!message.contains("network error"));
        }
        other => panic!("Expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_next_page_without_cursor_is_ignored() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character).return_ok(rick_and_morty());
    let client = start(&mock);

    let before = client.settled(client.first_load().await.unwrap()).await.unwrap();
    assert_eq!(client.next_page().await.unwrap(), LoadOutcome::Ignored);
    assert_eq!(client.prev_page().await.unwrap(), LoadOutcome::Ignored);

    let after = client.snapshot().await.unwrap();
    assert_eq!(after, before);
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_pagination_before_any_load_is_ignored() {
    let mock = MockCatalog::new();
    let client = start(&mock);

    assert_eq!(client.next_page().await.unwrap(), LoadOutcome::Ignored);
    assert_eq!(client.prev_page().await.unwrap(), LoadOutcome::Ignored);
    let state = client.snapshot().await.unwrap();
    assert_eq!(state.load_state, LoadState::Idle);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_paging_forward_and_back_keeps_filter() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character)
        .return_ok(page_of(ResourceKind::Character, 20, Some("p2"), None));
    mock.expect_fetch(ResourceKind::Character)
        .return_ok(page_of(ResourceKind::Character, 20, Some("p3"), Some("p1")));
    mock.expect_fetch(ResourceKind::Character)
        .return_ok(page_of(ResourceKind::Character, 20, Some("p2"), None));
    let client = start(&mock);

    let state = client.settled(client.apply_search("rick").await.unwrap()).await.unwrap();
    assert_eq!(state.page, 1);
    assert!(state.has_next());

    let state = client.settled(client.next_page().await.unwrap()).await.unwrap();
    assert_eq!(state.page, 2);
    assert!(state.has_prev());

    let state = client.settled(client.prev_page().await.unwrap()).await.unwrap();
    assert_eq!(state.page, 1);
    assert_eq!(state.load_state, LoadState::Loaded);

    let pages: Vec<_> = mock.calls().iter().map(|q| (q.page, q.name.clone())).collect();
    let rick = Some("rick".to_string());
    assert_eq!(pages, vec![(Some(1), rick.clone()), (Some(2), rick.clone()), (Some(1), rick)]);
    mock.verify();
}

#[tokio::test]
async fn test_prev_page_at_first_page_is_ignored() {
    let mock = MockCatalog::new();
    // A server that reports a previous page even on page 1.
    mock.expect_fetch(ResourceKind::Episode)
        .return_ok(page_of(ResourceKind::Episode, 5, None, Some("p0")));
    let client = start(&mock);

    let outcome = client.select_resource(ResourceKind::Episode).await.unwrap();
    let state = client.settled(outcome).await.unwrap();
    assert!(state.has_prev());
    assert_eq!(state.page, 1);

    assert_eq!(client.prev_page().await.unwrap(), LoadOutcome::Ignored);
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_reselecting_current_kind_is_noop() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character).return_ok(rick_and_morty());
    let client = start(&mock);

    let before = client.settled(client.first_load().await.unwrap()).await.unwrap();
    assert_eq!(
        client.select_resource(ResourceKind::Character).await.unwrap(),
        LoadOutcome::Ignored
    );
    assert_eq!(client.snapshot().await.unwrap(), before);
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_select_resource_resets_search_and_page() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character)
        .return_ok(page_of(ResourceKind::Character, 3, Some("p2"), None));
    mock.expect_fetch(ResourceKind::Character)
        .return_ok(page_of(ResourceKind::Character, 3, None, Some("p1")));
    mock.expect_fetch(ResourceKind::Location)
        .return_ok(page_of(ResourceKind::Location, 4, None, None));
    let client = start(&mock);

    client.settled(client.apply_search("smith").await.unwrap()).await.unwrap();
    client.settled(client.next_page().await.unwrap()).await.unwrap();

    let state = client
        .settled(client.select_resource(ResourceKind::Location).await.unwrap())
        .await
        .unwrap();
    assert_eq!(state.selected, ResourceKind::Location);
    assert_eq!(state.page, 1);
    assert_eq!(state.search_text, "");
    assert_eq!(state.locations.len(), 4);
    // The other kind's results stay where they were.
    assert_eq!(state.characters.len(), 3);

    let last = mock.calls().pop().unwrap();
    assert_eq!((last.kind, last.page, last.name), (ResourceKind::Location, Some(1), None));
    mock.verify();
}

#[tokio::test]
async fn test_empty_search_equals_first_load() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character)
        .return_ok(page_of(ResourceKind::Character, 1, Some("p2"), None));
    mock.expect_fetch(ResourceKind::Character)
        .return_ok(page_of(ResourceKind::Character, 1, None, Some("p1")));
    mock.expect_fetch(ResourceKind::Character).return_ok(rick_and_morty());
    mock.expect_fetch(ResourceKind::Character).return_ok(rick_and_morty());
    let client = start(&mock);

    client.settled(client.first_load().await.unwrap()).await.unwrap();
    client.settled(client.next_page().await.unwrap()).await.unwrap();

    let searched = client.settled(client.apply_search("").await.unwrap()).await.unwrap();
    let reloaded = client.settled(client.first_load().await.unwrap()).await.unwrap();

    assert_eq!(searched.page, 1);
    assert_eq!(searched.characters, reloaded.characters);
    let calls = mock.calls();
    assert_eq!(calls[2], calls[3]);
    assert_eq!(calls[2].page, Some(1));
    assert_eq!(calls[2].name, None);
}

#[tokio::test]
async fn test_retry_after_failure() {
    let mock = MockCatalog::new();
    mock.expect_fetch(ResourceKind::Character)
        .return_err(CatalogError::BadResponse { status: 503 });
    mock.expect_fetch(ResourceKind::Character).return_ok(rick_and_morty());
    let client = start(&mock);

    let failed = client.settled(client.first_load().await.unwrap()).await.unwrap();
    assert!(matches!(failed.load_state, LoadState::Failed(_)));
    assert!(failed.characters.is_empty());

    let state = client.settled(client.retry().await.unwrap()).await.unwrap();
    assert_eq!(state.load_state, LoadState::Loaded);
    assert_eq!(state.characters.len(), 2);
}

// =============================================================================
// Single-flight ordering
// =============================================================================

#[tokio::test]
async fn test_latest_load_wins_when_responses_arrive_out_of_order() {
    let (source, mut pending) = create_mock_source(8);
    let (actor, client) = coordinator::new(source);
    tokio::spawn(actor.run());

    let first = client.first_load().await.unwrap();
    let first_fetch = expect_fetch(&mut pending).await.unwrap();
    let second = client.apply_search("Morty").await.unwrap();
    let second_fetch = expect_fetch(&mut pending).await.unwrap();
    assert_eq!(second_fetch.query.name.as_deref(), Some("Morty"));

    second_fetch.respond(Ok(CatalogPage::Characters(Page {
        info: info(1, None, None),
        results: vec![character(2, "Morty")],
    })));
    let state = client.settled(second).await.unwrap();
    assert_eq!(state.characters[0].name, "Morty");

    // The superseded response arrives late and must be ignored.
    first_fetch.respond(Ok(page_of(ResourceKind::Character, 20, Some("p2"), None)));
    settle().await;

    let state = client.snapshot().await.unwrap();
    assert_eq!(state.load_state, LoadState::Loaded);
    assert_eq!(state.characters.len(), 1);
    assert_eq!(state.characters[0].name, "Morty");
    assert!(!state.has_next());
    assert!(matches!((first, second), (LoadOutcome::Issued(a), LoadOutcome::Issued(b)) if a < b));
    assert_eq!(state.settled, Some(2));
}

#[tokio::test]
async fn test_cancelled_failure_does_not_change_state() {
    let (source, mut pending) = create_mock_source(8);
    let (actor, client) = coordinator::new(source);
    tokio::spawn(actor.run());

    client.first_load().await.unwrap();
    let first_fetch = expect_fetch(&mut pending).await.unwrap();
    let second = client.next_page().await.unwrap();
    // No page info yet, so there is nothing to page to.
    assert_eq!(second, LoadOutcome::Ignored);

    let second = client.select_resource(ResourceKind::Episode).await.unwrap();
    let second_fetch = expect_fetch(&mut pending).await.unwrap();
    assert_eq!(second_fetch.query.kind, ResourceKind::Episode);

    first_fetch.respond(Err(CatalogError::BadResponse { status: 500 }));
    settle().await;
    assert_eq!(client.snapshot().await.unwrap().load_state, LoadState::Loading);

    second_fetch.respond(Ok(page_of(ResourceKind::Episode, 3, None, None)));
    let state = client.settled(second).await.unwrap();
    assert_eq!(state.load_state, LoadState::Loaded);
    assert_eq!(state.episodes.len(), 3);
    assert!(state.characters.is_empty());
}

#[tokio::test]
async fn test_burst_of_requests_observes_only_the_last() {
    let (source, mut pending) = create_mock_source(16);
    let (actor, client) = coordinator::new(source);
    tokio::spawn(actor.run());

    client.select_resource(ResourceKind::Location).await.unwrap();
    client.apply_search("a").await.unwrap();
    client.apply_search("ab").await.unwrap();
    client.select_resource(ResourceKind::Episode).await.unwrap();
    let last = client.apply_search("pilot").await.unwrap();

    let mut fetches = Vec::new();
    for _ in 0..5 {
        fetches.push(expect_fetch(&mut pending).await.unwrap());
    }
    let winner_at = fetches
        .iter()
        .position(|f| f.query.name.as_deref() == Some("pilot"))
        .unwrap();
    let winner = fetches.remove(winner_at);
    assert_eq!(winner.query.kind, ResourceKind::Episode);

    winner.respond(Ok(page_of(ResourceKind::Episode, 1, None, None)));
    let state = client.settled(last).await.unwrap();
    // Every stale response lands after the winner.
    for stale in fetches {
        let kind = stale.query.kind;
        stale.respond(Ok(page_of(kind, 9, Some("next"), None)));
    }
    settle().await;

    let final_state = client.snapshot().await.unwrap();
    assert_eq!(final_state, state);
    assert_eq!(final_state.selected, ResourceKind::Episode);
    assert_eq!(final_state.search_text, "pilot");
    assert_eq!(final_state.episodes.len(), 1);
    assert!(final_state.locations.is_empty());
}

#[tokio::test]
async fn test_subscribers_see_loading_then_loaded() {
    let (source, mut pending) = create_mock_source(4);
    let (actor, client) = coordinator::new(source);
    tokio::spawn(actor.run());
    let mut watcher = client.subscribe();
    assert_eq!(watcher.borrow_and_update().load_state, LoadState::Idle);

    client.first_load().await.unwrap();
    watcher.changed().await.unwrap();
    assert_eq!(watcher.borrow_and_update().load_state, LoadState::Loading);

    expect_fetch(&mut pending)
        .await
        .unwrap()
        .respond(Ok(rick_and_morty()));
    watcher.changed().await.unwrap();
    let state = watcher.borrow_and_update().clone();
    assert_eq!(state.load_state, LoadState::Loaded);
    assert_eq!(state.characters.len(), 2);
}
