use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use fresponse::{
    AggregationHooks, AggregationSummary, CancellationToken, Content, FinishReason,
    ResponseAggregator, ResponseError, ResponseErrorKind, ResponseUpdate, Role, UsageDetails,
    VecUpdateStream, aggregate, aggregate_choices, collect, decompose,
};

fn text(message_id: &str, text: &str) -> ResponseUpdate {
    ResponseUpdate::from_text(text).with_message_id(message_id)
}

#[test]
fn distinct_message_ids_produce_messages_in_arrival_order() {
    let response = aggregate(vec![
        text("a", "Hi "),
        text("a", "there"),
        text("b", "!"),
    ]);

    let texts: Vec<String> = response.messages.iter().map(|message| message.text()).collect();
    assert_eq!(texts, vec!["Hi there".to_string(), "!".to_string()]);
}

#[test]
fn usage_is_summed_and_removed_from_messages() {
    let response = aggregate(vec![
        ResponseUpdate::from_usage(UsageDetails::new().with_input_tokens(10)),
        ResponseUpdate::from_usage(UsageDetails::new().with_input_tokens(5)),
    ]);

    assert_eq!(
        response.usage.and_then(|usage| usage.input_tokens),
        Some(15)
    );
    assert!(response.messages.iter().all(|message| {
        message.contents.iter().all(|content| !content.is_usage())
    }));
}

#[test]
fn role_and_author_keep_first_value_within_a_message() {
    let response = aggregate(vec![
        ResponseUpdate::new()
            .with_role(Role::Assistant)
            .with_author_name("A")
            .with_message_id("m"),
        ResponseUpdate::from_text("hi")
            .with_role(Role::Assistant)
            .with_author_name("B")
            .with_message_id("m"),
    ]);

    let message = response.message().expect("one message");
    assert_eq!(message.author_name.as_deref(), Some("A"));
    assert_eq!(message.text(), "hi");
}

#[test]
fn response_scalars_keep_latest_value() {
    let later = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
    let response = aggregate(vec![
        ResponseUpdate::new()
            .with_model_id("m1")
            .with_created_at(SystemTime::UNIX_EPOCH)
            .with_finish_reason(FinishReason::Length),
        ResponseUpdate::new()
            .with_model_id("m2")
            .with_created_at(later)
            .with_finish_reason(FinishReason::Stop),
        ResponseUpdate::new(),
    ]);

    assert_eq!(response.model_id.as_deref(), Some("m2"));
    assert_eq!(response.created_at, Some(later));
    assert_eq!(response.finish_reason, Some(FinishReason::Stop));
}

#[test]
fn decompose_round_trip_keeps_text_and_roles() {
    let updates = vec![
        text("u", "What is ").with_role(Role::User),
        text("u", "two plus two?"),
        text("t", "calc(2+2)").with_role(Role::Tool).with_author_name("calc"),
        text("r", "Four.").with_role(Role::Assistant),
    ];
    let original = aggregate(updates);

    let rebuilt = aggregate(decompose(&original));

    assert_eq!(rebuilt.messages.len(), original.messages.len());
    for (rebuilt, original) in rebuilt.messages.iter().zip(&original.messages) {
        assert_eq!(rebuilt.role, original.role);
        assert_eq!(rebuilt.text(), original.text());
        assert_eq!(rebuilt.author_name, original.author_name);
    }
}

#[test]
fn empty_input_yields_empty_response_without_first_message() {
    let response = aggregate(Vec::new());

    assert!(response.messages.is_empty());
    let error = response.message().expect_err("no first message");
    assert_eq!(error.kind, ResponseErrorKind::InvalidState);
}

#[test]
fn lone_choice_hands_usage_to_response() {
    let response = aggregate_choices(vec![ResponseUpdate::new().with_contents(vec![
        Content::text("ok"),
        Content::usage(UsageDetails::new().with_output_tokens(3)),
    ])]);

    assert_eq!(
        response.usage.and_then(|usage| usage.output_tokens),
        Some(3)
    );
    assert_eq!(response.messages.len(), 1);
    assert_eq!(response.messages[0].contents, vec![Content::text("ok")]);
}

#[test]
fn interleaved_choices_are_ordered_by_index() {
    let response = aggregate_choices(vec![
        ResponseUpdate::from_text("B1").with_choice_index(1),
        ResponseUpdate::from_text("A1").with_choice_index(0),
        ResponseUpdate::from_text("B2").with_choice_index(1),
        ResponseUpdate::from_text("A2").with_choice_index(0),
    ]);

    assert_eq!(response.messages.len(), 2);
    assert_eq!(response.messages[0].contents, vec![Content::text("A1A2")]);
    assert_eq!(response.messages[1].contents, vec![Content::text("B1B2")]);
    for message in &response.messages {
        assert_eq!(message.contents.len(), 1);
    }
}

#[derive(Default)]
struct RecordingHooks {
    events: Mutex<Vec<String>>,
}

impl AggregationHooks for RecordingHooks {
    fn on_message_started(
        &self,
        strategy: &'static str,
        position: usize,
        message_id: Option<&str>,
    ) {
        self.events.lock().expect("events lock").push(format!(
            "{strategy}:start:{position}:{}",
            message_id.unwrap_or("-")
        ));
    }

    fn on_finalized(&self, summary: &AggregationSummary) {
        self.events.lock().expect("events lock").push(format!(
            "finalized:{}:{}:{}",
            summary.updates_folded, summary.messages, summary.text_items_coalesced
        ));
    }
}

#[tokio::test]
async fn async_producer_is_collected_in_order_with_hooks() {
    let hooks = Arc::new(RecordingHooks::default());
    let aggregator = ResponseAggregator::builder().hooks(hooks.clone()).build();
    let stream = async_stream::stream! {
        for (id, chunk) in [("a", "one "), ("a", "two"), ("b", "three")] {
            tokio::task::yield_now().await;
            yield Ok::<_, ResponseError>(text(id, chunk));
        }
    };

    let response = aggregator.collect(stream).await.expect("stream should aggregate");

    assert_eq!(response.text(), "one twothree");
    assert_eq!(
        *hooks.events.lock().expect("events lock"),
        vec![
            "identifier:start:0:a".to_string(),
            "identifier:start:1:b".to_string(),
            "finalized:3:2:1".to_string(),
        ]
    );
}

#[tokio::test]
async fn cancellation_from_another_task_surfaces_as_cancelled() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    let stream = async_stream::stream! {
        yield Ok::<_, ResponseError>(text("a", "started"));
        futures_util::future::pending::<()>().await;
    };

    let handle = tokio::spawn(async move {
        tokio::task::yield_now().await;
        canceller.cancel();
    });

    let error = ResponseAggregator::new()
        .collect_with_cancellation(stream, &token)
        .await
        .expect_err("aggregation should be cancelled");
    handle.await.expect("canceller should finish");

    assert!(error.is_cancelled());
}

#[tokio::test]
async fn replayed_response_collects_back_to_equal_text() {
    let original = aggregate(vec![
        text("a", "alpha"),
        text("b", "beta"),
        ResponseUpdate::from_usage(UsageDetails::new().with_total_tokens(12)),
    ]);

    let replayed = collect(original.clone().into_update_stream())
        .await
        .expect("replay should aggregate");

    assert_eq!(replayed.text(), original.text());
    assert_eq!(replayed.usage, original.usage);
}

#[tokio::test]
async fn source_error_is_returned_unchanged() {
    let stream = VecUpdateStream::new(vec![
        Ok(text("a", "x")),
        Err(ResponseError::source("upstream closed")),
    ]);

    let error = collect(stream).await.expect_err("error should propagate");

    assert_eq!(error, ResponseError::source("upstream closed"));
}
