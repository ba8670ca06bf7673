use services::{QuizStep, ScoreBadge, TopicCatalog, TutorServices};
use tutor_core::model::{CompletionPolicy, QuizError, QuizPhase, TopicId};
use tutor_core::time::{fixed_clock, fixed_now};

fn services() -> TutorServices {
    TutorServices::new(
        TopicCatalog::builtin().expect("builtin catalog"),
        CompletionPolicy::default(),
        fixed_clock(),
    )
}

#[test]
fn context_api_attempt_scores_two_of_three() {
    let services = services();
    let topic = TopicId::new("context-api");
    let mut quiz = services.open_quiz(&topic).unwrap();

    let mut finished = Vec::new();
    for answer in [1, 1, 2] {
        quiz.select_answer(answer).unwrap();
        let feedback = quiz.check_answer().unwrap();
        assert_eq!(feedback.selected, answer);
        if let QuizStep::Finished(outcome) = quiz.next().unwrap() {
            finished.push(outcome);
        }
    }

    assert_eq!(finished.len(), 1);
    let outcome = &finished[0];
    assert_eq!(outcome.score().value(), 67);
    assert!(!outcome.passed);
    assert_eq!(outcome.submitted_at, fixed_now());

    let review = quiz.session().review().unwrap();
    assert!(!review[1].is_correct);
    assert_eq!(review[1].correct_option, 0);
    assert_eq!(
        review[1].correct_text,
        quiz.session().questions()[1].options()[0].as_str()
    );

    let progress = services.progress();
    assert_eq!(progress.get_quiz_score(&topic), 67);
    assert!(!progress.is_topic_completed(&topic));
    assert_eq!(
        services.overview().row(&topic).unwrap().badge,
        Some(ScoreBadge::NeedsWork)
    );
}

#[test]
fn retake_resets_and_replay_passes() {
    let services = services();
    let topic = TopicId::new("context-api");
    let mut quiz = services.open_quiz(&topic).unwrap();

    for answer in [1, 1, 2] {
        quiz.select_answer(answer).unwrap();
        quiz.next().unwrap();
    }
    assert_eq!(quiz.session().phase(), QuizPhase::Submitted);

    quiz.retake().unwrap();
    assert_eq!(quiz.session().current_index(), 0);
    assert!(quiz.session().answers().iter().all(Option::is_none));
    assert_eq!(quiz.next().unwrap_err(), QuizError::Unanswered { index: 0 });

    let mut last = None;
    for answer in [1, 0, 2] {
        quiz.select_answer(answer).unwrap();
        last = Some(quiz.next().unwrap());
    }
    let Some(QuizStep::Finished(outcome)) = last else {
        panic!("expected the attempt to finish");
    };
    assert_eq!(outcome.score().value(), 100);
    assert!(outcome.newly_completed);
    assert_eq!(outcome.attempt, 2);

    let progress = services.progress();
    assert!(progress.is_topic_completed(&topic));
    assert_eq!(progress.get_quiz_score(&topic), 100);
    assert_eq!(services.overview().completed_topics, 1);
}

#[test]
fn untouched_topic_reports_defaults() {
    let services = services();
    let hooks = TopicId::new("hooks");
    let progress = services.progress();
    assert_eq!(progress.get_quiz_score(&hooks), 0);
    assert!(!progress.is_topic_completed(&hooks));
    assert!(services.overview().row(&hooks).unwrap().score.is_none());
}

#[test]
fn every_builtin_topic_can_be_completed() {
    let services = services();
    let ids: Vec<TopicId> = services.catalog().ids().cloned().collect();

    for id in &ids {
        let mut quiz = services.open_quiz(id).unwrap();
        loop {
            let correct = quiz.session().current_question().correct_option();
            quiz.select_answer(correct).unwrap();
            if let QuizStep::Finished(outcome) = quiz.next().unwrap() {
                assert!(outcome.passed, "{id} should pass with all answers correct");
                break;
            }
        }
    }

    let overview = services.overview();
    assert_eq!(overview.completed_topics, ids.len());
    assert_eq!(overview.percent_complete.value(), 100);
}
