//! Line-oriented front end over the tutor services.
//!
//! Reads commands from any `BufRead` and renders to any `Write`, so the same
//! loop drives stdin/stdout and in-memory buffers in tests.

use std::io::{self, BufRead, Write};

use services::{AttemptOutcome, ProgressOverview, QuizStep, ScoreBadge, TopicQuizService, TutorServices};
use tutor_core::model::{QuizError, QuizPhase, QuizSession, TopicId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizCommand {
    Select(usize),
    Check,
    Next,
    Previous,
    MarkDone,
    Leave,
}

impl QuizCommand {
    /// Options are typed 1-based and stored 0-based.
    fn parse(input: &str) -> Option<Self> {
        match input {
            "c" | "check" => Some(Self::Check),
            "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "m" | "done" => Some(Self::MarkDone),
            "q" | "b" | "back" => Some(Self::Leave),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Self::Select),
        }
    }
}

enum Screen {
    Home,
    Quiz(TopicId),
    Quit,
}

/// Interactive tutor session over a reader/writer pair.
pub struct Terminal<R, W> {
    services: TutorServices,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(services: TutorServices, input: R, output: W) -> Self {
        Self {
            services,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    ///
    /// Starts on the topic's quiz when `start` is given, otherwise on the
    /// progress overview.
    pub fn run(&mut self, start: Option<TopicId>) -> io::Result<()> {
        let mut screen = start.map_or(Screen::Home, Screen::Quiz);
        loop {
            screen = match screen {
                Screen::Home => self.home()?,
                Screen::Quiz(id) => self.quiz(&id)?,
                Screen::Quit => {
                    writeln!(self.output, "Bye!")?;
                    return self.output.flush();
                }
            };
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn home(&mut self) -> io::Result<Screen> {
        loop {
            render_overview(&mut self.output, &self.services.overview())?;
            self.prompt("Pick a topic (number or id, q to quit)")?;
            let Some(line) = self.read_line()? else {
                return Ok(Screen::Quit);
            };
            match line.as_str() {
                "" => {}
                "q" | "quit" => return Ok(Screen::Quit),
                choice => match self.resolve_topic(choice) {
                    Some(id) => return Ok(Screen::Quiz(id)),
                    None => writeln!(self.output, "Unknown topic: {choice}")?,
                },
            }
        }
    }

    fn resolve_topic(&self, choice: &str) -> Option<TopicId> {
        let catalog = self.services.catalog();
        choice
            .parse::<usize>()
            .ok()
            .and_then(|position| catalog.nth(position))
            .or_else(|| catalog.get(&TopicId::new(choice)))
            .map(|topic| topic.id().clone())
    }

    fn quiz(&mut self, id: &TopicId) -> io::Result<Screen> {
        let mut quiz = match self.services.open_quiz(id) {
            Ok(quiz) => quiz,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(Screen::Home);
            }
        };
        writeln!(self.output)?;
        writeln!(self.output, "== {} Quiz ==", quiz.title())?;
        if !quiz.description().is_empty() {
            writeln!(self.output, "{}", quiz.description())?;
        }

        loop {
            if quiz.session().is_submitted() {
                render_results(&mut self.output, &quiz)?;
                self.prompt("r to retake, b to go back")?;
                let Some(line) = self.read_line()? else {
                    return Ok(Screen::Quit);
                };
                match line.as_str() {
                    "r" | "retake" => {
                        if let Err(err) = quiz.retake() {
                            report(&mut self.output, &err)?;
                        }
                    }
                    "b" | "back" | "q" => return Ok(Screen::Home),
                    _ => writeln!(self.output, "Unknown command: {line}")?,
                }
                continue;
            }

            render_question(&mut self.output, quiz.session())?;
            self.prompt(&quiz_hint(quiz.session()))?;
            let Some(line) = self.read_line()? else {
                return Ok(Screen::Quit);
            };
            let Some(command) = QuizCommand::parse(&line) else {
                writeln!(self.output, "Unknown command: {line}")?;
                continue;
            };

            let step = match command {
                QuizCommand::Select(option) => quiz.select_answer(option).map(|()| None),
                QuizCommand::Check => quiz.check_answer().map(|_| None),
                QuizCommand::Next => quiz.next().map(|step| match step {
                    QuizStep::Finished(outcome) => Some(outcome),
                    QuizStep::Moved { .. } => None,
                }),
                QuizCommand::Previous => quiz.previous().map(|_| None),
                QuizCommand::MarkDone => {
                    self.mark_done(quiz.topic_id())?;
                    continue;
                }
                QuizCommand::Leave => return Ok(Screen::Home),
            };
            match step {
                Ok(Some(outcome)) => render_outcome(&mut self.output, &outcome)?,
                Ok(None) => {}
                Err(err) => report(&mut self.output, &err)?,
            }
        }
    }

    /// Complete a topic without taking its quiz. Leaves any score alone.
    fn mark_done(&mut self, id: &TopicId) -> io::Result<()> {
        if self.services.progress().mark_topic_complete(id) {
            writeln!(self.output, "Marked as completed.")
        } else {
            writeln!(self.output, "Already completed.")
        }
    }

    fn prompt(&mut self, hint: &str) -> io::Result<()> {
        write!(self.output, "{hint}> ")?;
        self.output.flush()
    }

    /// Next trimmed, lowercased line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

fn render_overview(out: &mut impl Write, overview: &ProgressOverview) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Your Progress: {} of {} topics completed ({})",
        overview.completed_topics, overview.total_topics, overview.percent_complete
    )?;
    for (position, row) in overview.rows.iter().enumerate() {
        let mark = if row.completed { "x" } else { " " };
        let score = match (row.score, row.badge) {
            (Some(score), Some(ScoreBadge::Passing)) => format!("  {score} passed"),
            (Some(score), _) => format!("  {score} needs work"),
            (None, _) => String::new(),
        };
        writeln!(out, "  [{mark}] {}. {}{score}", position + 1, row.name)?;
    }
    Ok(())
}

fn quiz_hint(session: &QuizSession) -> String {
    let mut hint = format!(
        "1-{} select, c check",
        session.current_question().option_count()
    );
    if session.can_advance() {
        hint.push_str(if session.is_last_question() { ", n submit" } else { ", n next" });
    }
    if session.can_go_back() {
        hint.push_str(", p previous");
    }
    hint.push_str(", m mark done, b back");
    hint
}

fn render_question(out: &mut impl Write, session: &QuizSession) -> io::Result<()> {
    let progress = session.progress();
    let question = session.current_question();
    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {} ({} answered)",
        progress.current + 1,
        progress.total,
        progress.answered
    )?;
    writeln!(out, "{}", question.prompt())?;

    let selected = session.current_answer();
    let reviewing = session.phase() == QuizPhase::Reviewing;
    for (index, option) in question.options().iter().enumerate() {
        let marker = match (selected == Some(index), reviewing && question.is_correct(index)) {
            (_, true) => "+",
            (true, false) if reviewing => "-",
            (true, false) => "*",
            (false, false) => " ",
        };
        writeln!(out, " {marker} {}. {option}", index + 1)?;
    }

    if let Some(feedback) = session.feedback() {
        if feedback.is_correct {
            writeln!(out, "Correct!")?;
        } else {
            writeln!(out, "Incorrect. The correct answer is: {}", feedback.correct_text)?;
        }
        if let Some(explanation) = feedback.explanation {
            writeln!(out, "{explanation}")?;
        }
    }
    Ok(())
}

fn render_outcome(out: &mut impl Write, outcome: &AttemptOutcome) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Quiz submitted: {}", outcome.score())?;
    if outcome.newly_completed {
        writeln!(out, "Topic complete!")?;
    } else if !outcome.passed {
        writeln!(out, "Keep practicing to complete this topic.")?;
    }
    Ok(())
}

fn render_results(out: &mut impl Write, quiz: &TopicQuizService) -> io::Result<()> {
    let session = quiz.session();
    let (Some(result), Some(review)) = (session.result(), session.review()) else {
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "Quiz Results: {}", result.score)?;
    writeln!(
        out,
        "You got {} out of {} questions correct",
        result.correct, result.total
    )?;
    for row in review {
        let verdict = if row.is_correct { "correct" } else { "incorrect" };
        writeln!(out, "{}. {} [{verdict}]", row.index + 1, row.prompt)?;
        writeln!(out, "   Your answer: {}", row.selected_text.unwrap_or("Not answered"))?;
        if !row.is_correct {
            writeln!(out, "   Correct answer: {}", row.correct_text)?;
        }
        if let Some(explanation) = row.explanation {
            writeln!(out, "   {explanation}")?;
        }
    }
    Ok(())
}

fn report(out: &mut impl Write, err: &QuizError) -> io::Result<()> {
    let message = match err {
        QuizError::Unanswered { .. } => "Select an answer first.".to_string(),
        QuizError::OptionOutOfRange { options, .. } => {
            format!("Pick an option between 1 and {options}.")
        }
        QuizError::AtFirstQuestion => "This is the first question.".to_string(),
        other => other.to_string(),
    };
    writeln!(out, "{message}")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use services::TopicCatalog;
    use tutor_core::model::CompletionPolicy;
    use tutor_core::time::fixed_clock;

    fn services() -> TutorServices {
        TutorServices::new(
            TopicCatalog::builtin().unwrap(),
            CompletionPolicy::default(),
            fixed_clock(),
        )
    }

    fn drive(services: &TutorServices, start: Option<&str>, script: &str) -> String {
        let mut terminal = Terminal::new(
            services.clone(),
            Cursor::new(script.to_string()),
            Vec::new(),
        );
        terminal.run(start.map(TopicId::new)).unwrap();
        String::from_utf8(terminal.into_output()).unwrap()
    }

    #[test]
    fn parses_quiz_commands() {
        assert_eq!(QuizCommand::parse("1"), Some(QuizCommand::Select(0)));
        assert_eq!(QuizCommand::parse("4"), Some(QuizCommand::Select(3)));
        assert_eq!(QuizCommand::parse("0"), None);
        assert_eq!(QuizCommand::parse("c"), Some(QuizCommand::Check));
        assert_eq!(QuizCommand::parse("next"), Some(QuizCommand::Next));
        assert_eq!(QuizCommand::parse("p"), Some(QuizCommand::Previous));
        assert_eq!(QuizCommand::parse("b"), Some(QuizCommand::Leave));
        assert_eq!(QuizCommand::parse("m"), Some(QuizCommand::MarkDone));
        assert_eq!(QuizCommand::parse("done"), Some(QuizCommand::MarkDone));
        assert_eq!(QuizCommand::parse("x"), None);
    }

    #[test]
    fn passing_hooks_quiz_completes_the_topic() {
        let services = services();
        // hooks answers are options 2, 3, 3 (1-based)
        let output = drive(&services, None, "3\n2\nc\nn\n3\nn\n3\nn\nb\nq\n");

        assert!(output.contains("== React Hooks Quiz ==\nLearn how to use React Hooks"));
        assert!(output.contains("Correct!"));
        assert!(output.contains("Quiz submitted: 100%"));
        assert!(output.contains("Topic complete!"));
        assert!(output.contains("You got 3 out of 3 questions correct"));
        assert!(output.contains("Your Progress: 1 of 9 topics completed (11%)"));
        assert!(output.ends_with("Bye!\n"));

        let hooks = TopicId::new("hooks");
        assert!(services.progress().is_topic_completed(&hooks));
        assert_eq!(services.progress().get_quiz_score(&hooks), 100);
    }

    #[test]
    fn failing_attempt_then_retake() {
        let services = services();
        // context-api answers are 2, 1, 3 (1-based)
        let script = "2\nn\n2\nn\n3\nn\nr\n2\nn\n1\nn\n3\nn\nb\nq\n";
        let output = drive(&services, Some("context-api"), script);

        assert!(output.contains("Quiz submitted: 67%"));
        assert!(output.contains("Keep practicing to complete this topic."));
        assert!(output.contains("Correct answer:"));
        assert!(output.contains("Quiz submitted: 100%"));

        let context = TopicId::new("context-api");
        assert!(services.progress().is_topic_completed(&context));
        assert_eq!(services.progress().get_quiz_score(&context), 100);
    }

    #[test]
    fn guards_are_reported_without_changing_state() {
        let services = services();
        let output = drive(&services, Some("hooks"), "n\np\n9\nzz\nb\nq\n");

        assert!(output.contains("Select an answer first."));
        assert!(output.contains("This is the first question."));
        assert!(output.contains("Pick an option between 1 and 4."));
        assert!(output.contains("Unknown command: zz"));
        assert!(services.progress().snapshot().is_empty());
    }

    #[test]
    fn hints_follow_what_the_quiz_accepts() {
        let services = services();
        let output = drive(&services, Some("hooks"), "2
n
3
n
3
b
q
");

        assert!(output.contains("1-4 select, c check, m mark done, b back> "));
        assert!(output.contains("1-4 select, c check, n next, m mark done, b back> "));
        assert!(output.contains(
            "1-4 select, c check, n submit, p previous, m mark done, b back> "
        ));
    }

    #[test]
    fn mark_done_completes_without_a_score() {
        let services = services();
        let output = drive(&services, Some("hooks"), "m
done
b
q
");

        assert!(output.contains("Marked as completed."));
        assert!(output.contains("Already completed."));
        assert!(!output.contains("Unknown command"));
        assert!(output.contains("Your Progress: 1 of 9 topics completed (11%)"));
        assert!(output.contains("  [x] 3. Hooks\n"));

        let hooks = TopicId::new("hooks");
        assert!(services.progress().is_topic_completed(&hooks));
        assert_eq!(services.progress().quiz_score(&hooks), None);
        assert_eq!(services.progress().get_quiz_score(&hooks), 0);
    }

    /// Accepts everything until a write contains `needle`.
    struct FailOn {
        needle: &'static str,
        written: Vec<u8>,
    }

    impl Write for FailOn {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if String::from_utf8_lossy(buf).contains(self.needle) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn outcome_write_failure_stops_the_session() {
        let services = services();
        let output = FailOn {
            needle: "Quiz submitted",
            written: Vec::new(),
        };
        let script = Cursor::new("2
n
3
n
3
n
b
q
".to_string());
        let mut terminal = Terminal::new(services.clone(), script, output);

        let err = terminal.run(Some(TopicId::new("hooks"))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        // The attempt was recorded before rendering failed.
        assert_eq!(services.progress().get_quiz_score(&TopicId::new("hooks")), 100);
        let written = String::from_utf8(terminal.into_output().written).unwrap();
        assert!(!written.contains("Bye!"));
    }

    #[test]
    fn unknown_topics_and_end_of_input() {
        let services = services();
        let output = drive(&services, None, "redux\n");
        assert!(output.contains("Unknown topic: redux"));
        assert!(output.ends_with("Bye!\n"));

        let output = drive(&services, Some("redux"), "");
        assert!(output.contains("unknown topic"));
    }
}
