//! Quiz pipeline: recover questions from model output, fall back to placeholders
//! when that fails, and render the result as an answer-marked HTML fragment.

pub mod extract;
pub mod fallback;
pub mod render;

pub use extract::extract;
pub use render::render_quiz_html;
