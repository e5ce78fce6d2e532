//! End-to-end dialogue flow against mock collaborators.

use std::sync::Arc;

use hirechat::adapters::ai::MockAnswerGenerator;
use hirechat::adapters::retrieval::InMemoryRetriever;
use hirechat::adapters::storage::InMemorySessionStore;
use hirechat::application::handlers::dialogue::{
    EndSessionCommand, EndSessionHandler, GetSessionHandler, GetSessionQuery, ProcessTurnCommand,
    ProcessTurnHandler, StartSessionCommand, StartSessionHandler,
};
use hirechat::domain::catalog::FieldKey;
use hirechat::domain::foundation::SessionId;
use hirechat::ports::{GenerationError, SessionStore};

struct Harness {
    start: StartSessionHandler,
    turn: ProcessTurnHandler,
    end: EndSessionHandler,
    get: GetSessionHandler,
}

fn harness(generator: MockAnswerGenerator) -> Harness {
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    Harness {
        start: StartSessionHandler::new(Arc::clone(&store)),
        turn: ProcessTurnHandler::new(
            Arc::clone(&store),
            Arc::new(generator),
            Arc::new(InMemoryRetriever::new()),
        ),
        end: EndSessionHandler::new(Arc::clone(&store)),
        get: GetSessionHandler::new(store),
    }
}

fn turn(session_id: SessionId, utterance: &str) -> ProcessTurnCommand {
    ProcessTurnCommand {
        session_id,
        utterance: utterance.to_string(),
        current_field: None,
    }
}

#[tokio::test]
async fn two_field_collection_scenario() {
    let h = harness(MockAnswerGenerator::new());

    // Start with [department, headcount].
    let started = h
        .start
        .handle(StartSessionCommand {
            fields: Some(vec![FieldKey::Department, FieldKey::Headcount]),
        })
        .await
        .unwrap();
    assert_eq!(started.first_field, FieldKey::Department);
    assert!(started.first_prompt.contains("구인 부서"));
    let id = started.session_id;

    // Turn 1: direct department answer fills and advances.
    let first = h.turn.handle(turn(id, "개발팀이요")).await.unwrap();
    assert_eq!(first.field, Some(FieldKey::Department));
    assert_eq!(first.value.as_deref(), Some("개발팀"));
    assert!(first.message.contains("채용 인원"));
    assert!(!first.completed);

    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert_eq!(view.cursor, 1);
    assert_eq!(view.current_field, Some(FieldKey::Headcount));

    // Turn 2: an unclassifiable utterance leaves the cursor in place.
    let second = h.turn.handle(turn(id, "모름")).await.unwrap();
    assert!(second.value.is_none());
    assert!(second.message.contains("다시 말씀해주세요"));
    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert_eq!(view.cursor, 1);

    // Turn 3: headcount answer completes the session.
    let third = h.turn.handle(turn(id, "3명 정도 생각하고 있어요")).await.unwrap();
    assert_eq!(third.value.as_deref(), Some("3명"));
    assert!(third.completed);

    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert_eq!(view.cursor, 2);
    assert!(view.completed);
    assert_eq!(view.filled_fields.len(), 2);
}

#[tokio::test]
async fn question_turn_is_answered_without_advancing() {
    let generator = MockAnswerGenerator::new().with_response("보통 1~3명으로 시작합니다.");
    let h = harness(generator);

    let started = h
        .start
        .handle(StartSessionCommand {
            fields: Some(vec![FieldKey::Headcount]),
        })
        .await
        .unwrap();
    let id = started.session_id;

    let result = h.turn.handle(turn(id, "몇 명 뽑는 게 좋을까요?")).await.unwrap();
    assert!(result.message.contains("1~3명"));
    assert!(result.value.is_none());

    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert_eq!(view.cursor, 0);

    // The user can still answer normally afterwards.
    let answer = h.turn.handle(turn(id, "2명입니다")).await.unwrap();
    assert_eq!(answer.value.as_deref(), Some("2명"));
    assert!(answer.completed);
}

#[tokio::test]
async fn backend_failure_degrades_and_state_survives_for_retry() {
    let generator = MockAnswerGenerator::new()
        .with_error(GenerationError::Timeout(30))
        .with_response("협의로 표기하는 회사가 많습니다.");
    let h = harness(generator);

    let started = h
        .start
        .handle(StartSessionCommand {
            fields: Some(vec![FieldKey::Salary]),
        })
        .await
        .unwrap();
    let id = started.session_id;

    // First attempt times out and degrades to an apology naming the field.
    let failed = h.turn.handle(turn(id, "연봉은 얼마나 줘야 할까요?")).await.unwrap();
    assert!(failed.message.contains("급여 조건"));
    assert!(failed.message.contains("다시 시도"));

    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert_eq!(view.cursor, 0);

    // Retry succeeds.
    let retried = h.turn.handle(turn(id, "연봉은 얼마나 줘야 할까요?")).await.unwrap();
    assert!(retried.message.contains("협의"));
}

#[tokio::test]
async fn conversational_answer_is_recovered_through_the_backend() {
    let generator = MockAnswerGenerator::new().with_response("마케팅");
    let h = harness(generator);

    let started = h
        .start
        .handle(StartSessionCommand {
            fields: Some(vec![FieldKey::Department, FieldKey::Headcount]),
        })
        .await
        .unwrap();
    let id = started.session_id;

    let result = h
        .turn
        .handle(turn(id, "잘 모르겠는데 홍보 쪽 일을 주로 하게 될 것 같아요"))
        .await
        .unwrap();
    assert_eq!(result.field, Some(FieldKey::Department));
    assert_eq!(result.value.as_deref(), Some("마케팅팀"));

    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert_eq!(view.cursor, 1);
}

#[tokio::test]
async fn completed_session_is_terminal_but_readable_until_ended() {
    let h = harness(MockAnswerGenerator::new());

    let started = h
        .start
        .handle(StartSessionCommand {
            fields: Some(vec![FieldKey::Department]),
        })
        .await
        .unwrap();
    let id = started.session_id;

    let done = h.turn.handle(turn(id, "디자인팀")).await.unwrap();
    assert!(done.completed);

    // Further turns cannot change collected values.
    let after = h.turn.handle(turn(id, "개발팀으로 바꿔줘")).await.unwrap();
    assert!(after.completed);
    assert!(after.value.is_none());

    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert_eq!(view.filled_fields[0].1, "디자인팀");

    // Disposal is explicit.
    let ended = h.end.handle(EndSessionCommand { session_id: id }).await.unwrap();
    assert!(ended.ok);
    assert!(h.get.handle(GetSessionQuery { session_id: id }).await.is_err());

    // Ending twice reports not-ok.
    let again = h.end.handle(EndSessionCommand { session_id: id }).await.unwrap();
    assert!(!again.ok);
}

#[tokio::test]
async fn full_default_field_set_runs_to_completion() {
    let h = harness(MockAnswerGenerator::new());

    let started = h.start.handle(StartSessionCommand { fields: None }).await.unwrap();
    let id = started.session_id;

    let answers = [
        "개발팀입니다",
        "신입 2명 경력 1명 총 3명",
        "백엔드 서버 개발 담당",
        "9시부터 6시까지",
        "서울 사무실",
        "연봉 4000 생각합니다",
        "2025-12-31 마감",
        "recruit@company.com",
    ];

    let mut last_completed = false;
    for answer in answers {
        let result = h.turn.handle(turn(id, answer)).await.unwrap();
        assert!(result.value.is_some(), "expected a fill for {answer:?}");
        last_completed = result.completed;
    }
    assert!(last_completed);

    let view = h.get.handle(GetSessionQuery { session_id: id }).await.unwrap();
    assert!(view.completed);
    assert_eq!(view.filled_fields.len(), 8);
    assert_eq!(view.filled_fields[1].1, "3명");
    assert_eq!(view.filled_fields[3].1, "09:00-18:00");
    assert_eq!(view.filled_fields[7].1, "recruit@company.com");
}
