//! Markdown code-fence removal, applied to every raw model reply.

const FENCE: &str = "```";

/// Return the body of the first fenced block in `raw`, or `raw` trimmed if
/// it has no complete block.
///
/// Only fence lines are removed: the opening fence with its info string
/// (```` ```html ````, ```` ```json ````) and the closing fence. Chatter the
/// model wrote before or after a complete block is dropped with them. A lone
/// fence line with no partner (a stray trailing ```` ``` ````) is stripped and
/// everything else kept.
pub fn unwrap_code_fence(raw: &str) -> &str {
    let text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        let body = skip_info_line(rest);
        let body = match body.find("\n```") {
            Some(end) => &body[..end],
            None => body.trim_end().strip_suffix(FENCE).unwrap_or(body),
        };
        return body.trim();
    }

    // Prose, then a block: only when the opener has a closing partner.
    if let Some(idx) = text.find("\n```") {
        let body = skip_info_line(&text[idx + 1 + FENCE.len()..]);
        if let Some(end) = body.find("\n```") {
            return body[..end].trim();
        }
    }

    match text.strip_suffix(FENCE) {
        Some(before) if before.ends_with('\n') => before.trim(),
        _ => text,
    }
}

fn skip_info_line(rest: &str) -> &str {
    match rest.find('\n') {
        Some(nl) if is_info_string(&rest[..nl]) => &rest[nl + 1..],
        _ => rest,
    }
}

fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_only_trimmed() {
        assert_eq!(unwrap_code_fence("  Teapot \n"), "Teapot");
        assert_eq!(unwrap_code_fence("<html></html>"), "<html></html>");
    }

    #[test]
    fn html_fence_is_removed() {
        let raw = "```html\n<!DOCTYPE html>\n<html></html>\n```";
        assert_eq!(unwrap_code_fence(raw), "<!DOCTYPE html>\n<html></html>");
    }

    #[test]
    fn bare_fence_is_removed() {
        assert_eq!(unwrap_code_fence("```\n{\"a\": 1}\n```\n"), "{\"a\": 1}");
    }

    #[test]
    fn chatter_around_block_is_dropped() {
        let raw = "Here is your page:\n```html\n<html>x</html>\n```\nEnjoy!";
        assert_eq!(unwrap_code_fence(raw), "<html>x</html>");
    }

    #[test]
    fn missing_closing_fence_keeps_body() {
        assert_eq!(unwrap_code_fence("```json\n[1, 2]"), "[1, 2]");
    }

    #[test]
    fn closing_fence_on_content_line() {
        assert_eq!(unwrap_code_fence("```\n<p>hi</p>```"), "<p>hi</p>");
    }

    #[test]
    fn inline_backticks_in_content_survive() {
        let raw = "<script>const s = `a ${b}`;</script>";
        assert_eq!(unwrap_code_fence(raw), raw);
    }

    #[test]
    fn stray_trailing_fence_keeps_content() {
        let raw = "<!DOCTYPE html>\n<html><body>apple</body></html>\n```";
        assert_eq!(
            unwrap_code_fence(raw),
            "<!DOCTYPE html>\n<html><body>apple</body></html>"
        );
        assert_eq!(unwrap_code_fence("Apple\n```\n"), "Apple");
        assert_eq!(
            unwrap_code_fence("{\"questions\": []}\n```"),
            "{\"questions\": []}"
        );
    }

    #[test]
    fn unpaired_fence_after_prose_is_not_an_opener() {
        let raw = "line one\n```json\nline two";
        assert_eq!(unwrap_code_fence(raw), raw);
    }

    #[test]
    fn non_info_first_line_is_kept() {
        assert_eq!(unwrap_code_fence("```<b>bold</b>\nmore```"), "<b>bold</b>\nmore");
    }
}
