use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{Category, CategoryId, Question, QuestionId};
use services::{EmptyReason, QuizLoopService, QuizSession};
use storage::repository::{InMemoryQuestionBank, QuestionSource, StoreError};

fn build_category(id: u64, name: &str) -> Category {
    Category::new(CategoryId::new(id), name).unwrap()
}

fn build_question(id: u64, category: u64) -> Question {
    Question::new(
        QuestionId::new(id),
        CategoryId::new(category),
        format!("Question {id}?"),
        format!("Right {id}"),
        vec![
            format!("Wrong {id}a"),
            format!("Wrong {id}b"),
            format!("Wrong {id}c"),
        ],
        format!("Right {id} is the documented answer."),
        None,
    )
    .unwrap()
}

fn seeded_session() -> QuizSession {
    QuizSession::new().with_rng(StdRng::seed_from_u64(11))
}

fn build_bank() -> InMemoryQuestionBank {
    let bank = InMemoryQuestionBank::new();
    bank.upsert_category(build_category(1, "Science")).unwrap();
    bank.upsert_category(build_category(2, "History")).unwrap();
    for id in 1..=3 {
        bank.upsert_question(build_question(id, 2)).unwrap();
    }
    bank
}

#[tokio::test]
async fn unfiltered_session_presents_grades_and_advances() {
    let loop_svc = QuizLoopService::new(Arc::new(build_bank()));
    let mut session = seeded_session();

    loop_svc.start(&mut session).await;

    let active = session.state().presenting().expect("question presented");
    let shown = active.question().id();
    assert!((1..=3).map(QuestionId::new).any(|id| id == shown));
    let correct = active.question().correct_answer().to_owned();

    session.select_choice(&correct).unwrap();
    assert!(session.submit().unwrap());

    let graded = session.state().graded().expect("graded");
    assert!(graded.is_correct());
    assert_eq!(graded.selected(), correct);
    assert_eq!(graded.choices().len(), graded.question().choice_count());
    assert!(!graded.question().explanation().is_empty());

    loop_svc.next_question(&mut session).await;
    assert!(session.state().presenting().is_some());
}

#[tokio::test]
async fn filtered_session_serves_only_matching_questions() {
    let bank = build_bank();
    bank.upsert_question(build_question(10, 1)).unwrap();
    let loop_svc = QuizLoopService::new(Arc::new(bank));
    let mut session = seeded_session();

    loop_svc.toggle_category(&mut session, CategoryId::new(1)).await;

    let active = session.state().presenting().expect("question presented");
    assert_eq!(active.question().category_id(), CategoryId::new(1));
    assert_eq!(active.question().id(), QuestionId::new(10));
}

#[tokio::test]
async fn empty_filtered_pool_recovers_after_clearing() {
    // "Science" has no questions; the overall pool is non-empty.
    let loop_svc = QuizLoopService::new(Arc::new(build_bank()));
    let mut session = seeded_session();

    loop_svc.toggle_category(&mut session, CategoryId::new(1)).await;
    assert!(matches!(
        session.state().empty_reason(),
        Some(EmptyReason::NoQuestions)
    ));

    loop_svc.clear_categories(&mut session).await;
    assert!(session.state().presenting().is_some());
}

#[tokio::test]
async fn store_failure_surfaces_as_empty_with_reason() {
    struct FailingSource;

    #[async_trait]
    impl QuestionSource for FailingSource {
        async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn list_questions(
            &self,
            _filter: &HashSet<CategoryId>,
        ) -> Result<Vec<Question>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    let loop_svc = QuizLoopService::new(Arc::new(FailingSource));
    let mut session = seeded_session();

    loop_svc.start(&mut session).await;

    assert!(matches!(
        session.state().empty_reason(),
        Some(EmptyReason::StoreUnavailable(_))
    ));
}

#[tokio::test]
async fn categories_come_back_sorted_for_the_selector() {
    let loop_svc = QuizLoopService::new(Arc::new(build_bank()));

    let names: Vec<_> = loop_svc
        .list_categories()
        .await
        .unwrap()
        .iter()
        .map(|c| c.name().to_owned())
        .collect();

    assert_eq!(names, ["History", "Science"]);
}
