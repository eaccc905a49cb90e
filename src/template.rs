//! Placeholder substitution for display templates.
//!
//! Templates are plain text with `{key}` placeholders. `{{` and `}}` produce
//! literal braces. A placeholder bound to `None` renders as nothing, and a
//! placeholder with no binding at all is kept as written so typos stay
//! visible in the bar.

/// Fill `template` using `values`.
///
/// Never fails: unterminated placeholders are emitted verbatim.
#[must_use]
pub fn safe_format(template: &str, values: &[(&str, Option<&str>)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
        } else if let Some(end) = tail.find('}') {
            let key = &tail[1..end];
            match values.iter().find(|(k, _)| *k == key) {
                Some((_, Some(value))) => out.push_str(value),
                Some((_, None)) => {}
                None => out.push_str(&tail[..=end]),
            }
            rest = &tail[end + 1..];
        } else {
            out.push_str(tail);
            rest = "";
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_value() {
        assert_eq!(
            safe_format("{name} is live!", &[("name", Some("exotic_bug"))]),
            "exotic_bug is live!"
        );
    }

    #[test]
    fn test_none_renders_empty() {
        assert_eq!(safe_format("{name} is offline.", &[("name", None)]), " is offline.");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        assert_eq!(safe_format("{game}: {name}", &[("name", Some("x"))]), "{game}: x");
    }

    #[test]
    fn test_escapes_and_unterminated() {
        assert_eq!(safe_format("{{{name}}}", &[("name", Some("x"))]), "{x}");
        assert_eq!(safe_format("oops {name", &[("name", Some("x"))]), "oops {name");
        assert_eq!(safe_format("a } b", &[]), "a } b");
    }

    #[test]
    fn test_repeated_placeholders() {
        assert_eq!(
            safe_format("{name}/{stream_name}", &[("name", Some("a")), ("stream_name", Some("a"))]),
            "a/a"
        );
    }
}
