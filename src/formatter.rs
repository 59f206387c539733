//! Learning-style suffixes appended to tutoring answers.
//!
//! Only the exact tokens `"visual"` and `"Hands-on"` get a note; every other
//! style (including `"Visual"` and `"Hands-On"` as the UI sends them) passes through.

pub const VISUAL_NOTE: &str = "\n\n*Note: The response includes a visual representation of the answer.";
pub const HANDS_ON_NOTE: &str =
  "\n\n*Note: The response includes a hands-on activity to help the student understand the answer.";

pub fn format_tutoring_response(raw: &str, learning_style: &str) -> String {
  match learning_style {
    "visual" => format!("{raw}{VISUAL_NOTE}"),
    "Hands-on" => format!("{raw}{HANDS_ON_NOTE}"),
    _ => raw.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn visual_and_hands_on_get_notes() {
    assert_eq!(format_tutoring_response("A", "visual"), format!("A{VISUAL_NOTE}"));
    assert_eq!(format_tutoring_response("A", "Hands-on"), format!("A{HANDS_ON_NOTE}"));
  }

  #[test]
  fn matching_is_case_sensitive() {
    assert_eq!(format_tutoring_response("A", "Visual"), "A");
    assert_eq!(format_tutoring_response("A", "Hands-On"), "A");
    assert_eq!(format_tutoring_response("A", "Text-Based"), "A");
    assert_eq!(format_tutoring_response("", ""), "");
  }
}
