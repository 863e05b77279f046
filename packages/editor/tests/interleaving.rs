//! Interleaved input and remote calls on a paused clock
//!
//! Remote latency is scripted through MemoryApi so that completions arrive
//! in a known order relative to operator input.

use locations_common::{Coordinate, Site, SiteId};
use locations_editor::{Editor, Event, Field, Runtime, LOAD_FAILED_MESSAGE};
use locations_sync::{MemoryApi, Operation, SyncClient};
use std::time::Duration;

fn point(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_commit_does_not_close_a_newer_session() {
    let api = MemoryApi::new();
    api.delay_next(Operation::Create, Duration::from_secs(1));
    let mut runtime = Runtime::new(
        Editor::default(),
        SyncClient::new(api, Duration::from_secs(5)),
    );

    runtime.handle(Event::StartAdd).unwrap();
    runtime
        .handle(Event::EditField(Field::Name, "First".to_string()))
        .unwrap();
    runtime.handle(Event::PointSelected(point(1.0, 1.0))).unwrap();
    runtime.handle(Event::Submit).unwrap();

    // Operator abandons the form and starts another one before the create lands
    runtime.handle(Event::Cancel).unwrap();
    runtime.handle(Event::StartAdd).unwrap();
    runtime
        .handle(Event::EditField(Field::Name, "Second".to_string()))
        .unwrap();

    runtime.settle().await;

    let editor = runtime.editor();
    assert!(editor.mode().is_adding());
    assert_eq!(editor.session().unwrap().draft().name, "Second");
    assert_eq!(editor.store().len(), 1);
    assert_eq!(editor.store().sites()[0].name, "First");
}

#[tokio::test(start_paused = true)]
async fn test_late_list_response_is_discarded() {
    let api = MemoryApi::with_sites(vec![Site {
        id: SiteId::new("a").unwrap(),
        name: "Depot".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        description: None,
        address: None,
    }]);
    api.delay_next(Operation::List, Duration::from_secs(5));
    let mut runtime = Runtime::new(
        Editor::default(),
        SyncClient::new(api, Duration::from_secs(10)),
    );

    // Slow refresh takes sequence 1, the delete's re-list takes sequence 2
    runtime.handle(Event::Refresh).unwrap();
    runtime
        .handle(Event::Delete(SiteId::new("a").unwrap()))
        .unwrap();
    assert_eq!(runtime.editor().in_flight(), 2);

    let first = runtime.next_completion().await.unwrap();
    runtime.apply(first);
    assert_eq!(runtime.editor().store().applied_seq(), 2);
    assert!(runtime.editor().store().is_empty());

    runtime.settle().await;
    assert_eq!(runtime.editor().store().applied_seq(), 2);
    assert_eq!(runtime.editor().in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_hung_list_times_out_into_banner() {
    let api = MemoryApi::new();
    api.delay_next(Operation::List, Duration::from_secs(60));
    let mut runtime = Runtime::new(
        Editor::default(),
        SyncClient::new(api, Duration::from_secs(2)),
    );

    runtime.handle(Event::Refresh).unwrap();
    assert!(runtime.editor().affordances().busy);
    runtime.settle().await;

    assert_eq!(runtime.editor().error(), Some(LOAD_FAILED_MESSAGE));
    assert!(!runtime.editor().affordances().busy);
}

#[tokio::test]
async fn test_typing_while_commit_pending() {
    let mut runtime = Runtime::new(
        Editor::default(),
        SyncClient::new(MemoryApi::new(), Duration::from_secs(5)),
    );

    runtime.handle(Event::StartAdd).unwrap();
    runtime.handle(Event::PointSelected(point(2.0, 2.0))).unwrap();
    runtime
        .handle(Event::EditField(Field::Name, "Kitchen".to_string()))
        .unwrap();
    runtime.handle(Event::Submit).unwrap();

    // Input keeps flowing into the session while the commit is pending
    runtime
        .handle(Event::EditField(Field::Description, "late edit".to_string()))
        .unwrap();
    assert!(!runtime.editor().affordances().submit);

    runtime.settle().await;
    assert!(runtime.editor().mode().is_idle());
    let kitchen = &runtime.editor().store().sites()[0];
    assert_eq!(kitchen.name, "Kitchen");
    assert_eq!(kitchen.description, None);
}
