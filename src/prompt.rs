//! Prompt construction for tutoring answers and quiz generation.
//!
//! Both builders are pure: they only fill the configured templates. The quiz
//! prompt asks for a bare JSON array, but nothing downstream relies on the model
//! obeying it (see `quiz::extract`).

use crate::config::Prompts;
use crate::util::fill_template;

/// Everything the tutor prompt embeds, borrowed from the request.
#[derive(Clone, Copy, Debug)]
pub struct TutorContext<'a> {
  pub subject: &'a str,
  pub level: &'a str,
  pub question: &'a str,
  pub learning_style: &'a str,
  pub background: &'a str,
  pub language: &'a str,
}

pub fn build_tutor_prompt(prompts: &Prompts, ctx: &TutorContext<'_>) -> String {
  fill_template(
    &prompts.tutor_template,
    &[
      ("subject", ctx.subject),
      ("level", ctx.level),
      ("learning_style", ctx.learning_style),
      ("background", ctx.background),
      ("language", ctx.language),
      ("question", ctx.question),
    ],
  )
}

pub fn build_quiz_prompt(prompts: &Prompts, subject: &str, level: &str, num_questions: usize) -> String {
  let n = num_questions.to_string();
  fill_template(
    &prompts.quiz_template,
    &[("num_questions", n.as_str()), ("level", level), ("subject", subject)],
  )
}
