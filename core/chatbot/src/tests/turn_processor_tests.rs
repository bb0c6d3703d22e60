use crate::adapter::{MemoryTranscriptStore, StubCompletionClient};
use crate::domain::UserText;
use crate::ports::outbound::{CompletionOutcome, TranscriptStore};
use crate::usecase::turn::TurnProcessor;
use common::adapter::NoopLog;
use common::domain::SessionId;
use common::llm::{Message, Role};
use std::sync::Arc;

fn processor(
    client: Arc<StubCompletionClient>,
) -> (TurnProcessor, Arc<MemoryTranscriptStore>) {
    let store = Arc::new(MemoryTranscriptStore::new());
    let p = TurnProcessor::new(store.clone(), client, Arc::new(NoopLog));
    (p, store)
}

#[test]
fn test_success_returns_reply_and_stores_it_last() {
    let client = Arc::new(StubCompletionClient::replying(&["4"]));
    let (p, store) = processor(client.clone());
    let session = SessionId::default();

    let reply = p.process_turn(&session, &UserText::from_raw("What is 2+2?"));

    assert_eq!(reply, Message::assistant("4"));
    let transcript = store.snapshot(&session);
    assert_eq!(
        transcript,
        vec![Message::user("What is 2+2?"), Message::assistant("4")]
    );
    // 補完には user 追記後のスナップショットが渡る
    assert_eq!(client.transcript_at(0), vec![Message::user("What is 2+2?")]);
}

#[test]
fn test_failure_is_absorbed_into_substitute_reply() {
    let client = Arc::new(StubCompletionClient::failing("Request timed out."));
    let (p, store) = processor(client);
    let session = SessionId::default();

    let reply = p.process_turn(&session, &UserText::from_raw("Hello"));

    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(
        reply.content,
        "Sorry, I encountered an error: Request timed out."
    );
    assert_eq!(store.snapshot(&session).last(), Some(&reply));
}

#[test]
fn test_each_turn_appends_exactly_two_messages() {
    let client = Arc::new(StubCompletionClient::new(vec![
        CompletionOutcome::Reply(Message::assistant("a")),
        CompletionOutcome::Failed("boom".to_string()),
        CompletionOutcome::Reply(Message::assistant("c")),
    ]));
    let (p, store) = processor(client);
    let session = SessionId::default();

    for (i, text) in ["one", "two", "three"].iter().enumerate() {
        p.process_turn(&session, &UserText::from_raw(text));
        let transcript = store.snapshot(&session);
        assert_eq!(transcript.len(), 2 * (i + 1));
        assert_eq!(transcript[2 * i], Message::user(*text));
        assert_eq!(transcript[2 * i + 1].role, Role::Assistant);
    }
}

#[test]
fn test_substitute_reply_is_seen_by_next_turn() {
    let client = Arc::new(StubCompletionClient::new(vec![
        CompletionOutcome::Failed("rate limited".to_string()),
        CompletionOutcome::Reply(Message::assistant("sorry about that")),
    ]));
    let (p, _store) = processor(client.clone());
    let session = SessionId::default();

    let first = p.process_turn(&session, &UserText::from_raw("Hi"));
    p.process_turn(&session, &UserText::from_raw("Are you there?"));

    assert_eq!(
        client.transcript_at(1),
        vec![
            Message::user("Hi"),
            first,
            Message::user("Are you there?"),
        ]
    );
}

#[test]
fn test_same_text_twice_is_not_deduplicated() {
    let client = Arc::new(StubCompletionClient::replying(&["x", "y"]));
    let (p, store) = processor(client);
    let session = SessionId::default();

    p.process_turn(&session, &UserText::from_raw("same"));
    p.process_turn(&session, &UserText::from_raw("same"));

    assert_eq!(
        store.snapshot(&session),
        vec![
            Message::user("same"),
            Message::assistant("x"),
            Message::user("same"),
            Message::assistant("y"),
        ]
    );
}
