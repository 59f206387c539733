//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// The template is scanned once; inserted values are never rescanned, so braces
/// inside a value come through verbatim. Unknown `{...}` spans are left as-is.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  while let Some(open) = rest.find('{') {
    out.push_str(&rest[..open]);
    let after = &rest[open + 1..];
    let hit = after.find('}').and_then(|close| {
      let key = &after[..close];
      pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v, close))
    });
    match hit {
      Some((value, close)) => {
        out.push_str(value);
        rest = &after[close + 1..];
      }
      None => {
        out.push('{');
        rest = after;
      }
    }
  }
  out.push_str(rest);
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) { cut -= 1; }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
  s.replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_every_occurrence() {
    let out = fill_template("{a} and {a} but not {b}", &[("a", "x")]);
    assert_eq!(out, "x and x but not {b}");
  }

  #[test]
  fn fill_template_inserts_values_verbatim() {
    let out = fill_template("Q: {q}", &[("q", "what is {x}?")]);
    assert_eq!(out, "Q: what is {x}?");
  }

  #[test]
  fn fill_template_never_rescans_inserted_text() {
    let out = fill_template("{a}|{b}", &[("a", "{b}"), ("b", "{a}")]);
    assert_eq!(out, "{b}|{a}");
  }

  #[test]
  fn fill_template_keeps_unknown_and_unbalanced_braces() {
    let out = fill_template("{ \"json\": {x} } {{a} {a", &[("a", "1")]);
    assert_eq!(out, "{ \"json\": {x} } {1 {a");
  }

  #[test]
  fn trunc_for_log_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    let out = trunc_for_log("ééééé", 3);
    assert!(out.starts_with('é'));
    assert!(out.ends_with("(10 bytes total)"));
  }

  #[test]
  fn html_escape_handles_markup() {
    assert_eq!(html_escape("a & b"), "a &amp; b");
    assert_eq!(html_escape("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
  }
}
