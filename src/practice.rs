//! A practice attempt over a QCM.

use crate::error::{Error, Result};
use crate::models::{letter_index, Qcm, Question};

/// Answer token that leaves a question unanswered.
pub const SKIP_TOKEN: &str = "-";

pub struct PracticeSession<'a> {
    questions: &'a [Question],
    current_question_index: usize,
    selected_option: usize,
    answers: Vec<Option<usize>>,
}

impl<'a> PracticeSession<'a> {
    pub fn new(qcm: &'a Qcm) -> Self {
        Self::with_questions(&qcm.questions)
    }

    pub fn with_questions(questions: &'a [Question]) -> Self {
        Self {
            questions,
            current_question_index: 0,
            selected_option: 0,
            answers: vec![None; questions.len()],
        }
    }

    pub fn current_question(&self) -> Option<&'a Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.current_question_index >= self.questions.len()
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.options.len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Selects an option by position. Returns false if it does not exist.
    pub fn select_option(&mut self, index: usize) -> bool {
        if index < self.option_count() {
            self.selected_option = index;
            true
        } else {
            false
        }
    }

    /// Records the selected option and moves to the next question.
    pub fn submit_answer(&mut self) {
        if self.is_finished() {
            return;
        }

        self.answers[self.current_question_index] = Some(self.selected_option);
        self.current_question_index += 1;
        self.selected_option = 0;

        if self.is_finished() {
            tracing::debug!(score = self.score_percent(), "Practice attempt finished");
        }
    }

    /// Selects the option for `letter` and submits it. An unknown letter is
    /// rejected and leaves the session unchanged.
    pub fn submit_letter(&mut self, letter: char) -> bool {
        match letter_index(letter) {
            Some(index) if self.select_option(index) => {
                self.submit_answer();
                true
            }
            _ => false,
        }
    }

    /// Moves to the next question without answering the current one.
    pub fn skip(&mut self) {
        if self.is_finished() {
            return;
        }

        self.current_question_index += 1;
        self.selected_option = 0;
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| answer.is_some_and(|a| question.is_correct(a)))
            .count()
    }

    /// Rounded share of correct answers over all questions, 0 to 100.
    pub fn score_percent(&self) -> u8 {
        let total = self.questions.len();
        if total == 0 {
            return 0;
        }
        ((self.correct_count() * 100 + total / 2) / total) as u8
    }

    pub fn restart(&mut self) {
        self.current_question_index = 0;
        self.selected_option = 0;
        self.answers = vec![None; self.questions.len()];
    }
}

/// Plays one answer per question through a session and returns the score.
///
/// [`SKIP_TOKEN`] leaves a question unanswered. A question without options,
/// as left behind by damaged stored data, cannot be answered, so any answer
/// to it counts as wrong. Answers past the last question are ignored.
pub fn score_answers<S: AsRef<str>>(qcm: &Qcm, answers: &[S]) -> Result<u8> {
    if answers.len() > qcm.total_questions() {
        tracing::warn!(
            answers = answers.len(),
            questions = qcm.total_questions(),
            "More answers than questions, ignoring the rest"
        );
    }

    let mut session = PracticeSession::new(qcm);
    for answer in answers.iter().take(qcm.total_questions()) {
        let answer = answer.as_ref().trim();
        let question = session.current_question_number();
        let answerable = session
            .current_question()
            .is_some_and(|q| !q.options.is_empty());

        if answer == SKIP_TOKEN {
            session.skip();
            continue;
        }
        if !answerable {
            tracing::warn!(question, "Question has no options, counting it as wrong");
            session.skip();
            continue;
        }

        let accepted = answer
            .chars()
            .next()
            .is_some_and(|letter| session.submit_letter(letter));
        if !accepted {
            return Err(Error::InvalidAnswer {
                question,
                answer: answer.to_string(),
            });
        }
    }

    Ok(session.score_percent())
}
