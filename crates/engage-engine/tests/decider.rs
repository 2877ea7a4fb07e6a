mod support;

use engage_core::{ActionKind, AuthorId};
use engage_engine::{InteractionDecider, InteractionOutcome, SkipReason};
use support::{liked, post, StubPlatform};

#[tokio::test]
async fn already_liked_post_is_skipped_without_calls() {
    let platform = StubPlatform::new();
    let mut decider = InteractionDecider::new(&platform);

    let outcome = decider.process(&liked(post("p1", "did:plc:a"))).await;

    assert!(matches!(
        outcome,
        Ok(InteractionOutcome::Skipped(SkipReason::AlreadyLiked))
    ));
    assert!(platform.calls().is_empty());
    assert_eq!(SkipReason::AlreadyLiked.to_string(), "already-liked");
}

#[tokio::test]
async fn like_failure_is_returned_and_author_not_considered() {
    let platform = StubPlatform::new().with_failing_like("p1");
    let mut decider = InteractionDecider::new(&platform);

    let outcome = decider.process(&post("p1", "did:plc:a")).await;

    assert!(outcome.is_err());
    assert!(!decider.ledger().seen(&AuthorId::new("did:plc:a")));
    assert_eq!(platform.relationship_calls(), 0);
}

#[tokio::test]
async fn author_is_marked_seen_even_when_follow_fails() {
    let platform = StubPlatform::new().with_failing_follow("did:plc:a");
    let mut decider = InteractionDecider::new(&platform);

    let outcome = decider.process(&post("p1", "did:plc:a")).await.unwrap();

    match outcome {
        InteractionOutcome::Acted {
            actions, failures, ..
        } => {
            assert_eq!(actions, vec![ActionKind::Liked]);
            assert_eq!(failures.len(), 1);
        }
        InteractionOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
    }
    assert!(decider.ledger().seen(&AuthorId::new("did:plc:a")));

    let second = decider.process(&post("p2", "did:plc:a")).await.unwrap();
    assert_eq!(second.actions(), &[ActionKind::Liked]);
    assert_eq!(platform.follow_calls(), 1);
}

#[tokio::test]
async fn failed_author_lookup_skips_the_like() {
    let platform = StubPlatform::new().with_failing_author_lookup("did:plc:a");
    let mut decider = InteractionDecider::new(&platform);

    let outcome = decider.process(&post("p1", "did:plc:a")).await;

    assert!(outcome.is_err());
    assert_eq!(platform.like_calls(), 0);
    assert!(!decider.ledger().seen(&AuthorId::new("did:plc:a")));
}
