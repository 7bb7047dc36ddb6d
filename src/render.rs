//! Plain-text export in the same layout the parser reads.

use std::fmt;

use crate::models::{option_letter, Question};

/// Questions formatted as numbered blocks separated by a blank line.
///
/// Options past `Z` have no letter and are left out.
pub struct CompletionText<'a>(pub &'a [Question]);

impl fmt::Display for CompletionText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, question) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write_question(f, index + 1, question)?;
        }
        Ok(())
    }
}

pub fn to_completion_text(questions: &[Question]) -> String {
    CompletionText(questions).to_string()
}

fn write_question(f: &mut fmt::Formatter<'_>, number: usize, question: &Question) -> fmt::Result {
    writeln!(f, "{}. {}", number, question.text)?;

    if let Some(code) = question.code.as_deref().filter(|code| !code.is_empty()) {
        writeln!(f, "```")?;
        writeln!(f, "{}", code)?;
        writeln!(f, "```")?;
    }

    for (position, option) in question.options.iter().enumerate() {
        match option_letter(position) {
            Some(letter) => writeln!(f, "{}) {}", letter, option)?,
            None => {
                tracing::warn!(number, position, "Option has no letter, leaving it out");
                break;
            }
        }
    }

    if let Some(answer) = question.answer.as_deref().filter(|answer| !answer.is_empty()) {
        writeln!(f, "Answer: {}", answer)?;
    }

    Ok(())
}
