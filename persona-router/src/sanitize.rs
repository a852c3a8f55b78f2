//! Strips block-level markup the chat client cannot render from generated answers.
//!
//! Matching is textual: no nesting or balance checks. Inline tags (`b`, `i`, `a`, `code`, ...)
//! are left untouched.

/// Tags removed by default, in opening, closing and self-closing form.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "img", "div", "table", "tr", "th",
    "td", "form", "input", "textarea", "button", "br", "hr",
];

#[derive(Debug, Clone)]
pub struct ResponseSanitizer {
    tags: Vec<String>,
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::with_tags(DEFAULT_DENYLIST.iter().copied())
    }
}

impl ResponseSanitizer {
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Removes every denylisted tag. Repeats until nothing changes, so the result is a fixpoint
    /// and `sanitize(sanitize(x)) == sanitize(x)`.
    pub fn sanitize(&self, raw: &str) -> String {
        let mut current = self.strip_once(raw);
        loop {
            let next = self.strip_once(&current);
            if next.len() == current.len() {
                return current;
            }
            current = next;
        }
    }

    fn strip_once(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find('<') {
            out.push_str(&rest[..pos]);
            let candidate = &rest[pos..];
            match self.denylisted_tag_len(candidate) {
                Some(len) => rest = &candidate[len..],
                None => {
                    out.push('<');
                    rest = &candidate[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Byte length of the denylisted tag at the start of `s` (which starts with '<'), if any.
    /// Accepts `<t>`, `</t>`, `<t/>`, `<t attr="..">` with ASCII case-insensitive names.
    fn denylisted_tag_len(&self, s: &str) -> Option<usize> {
        let bytes = s.as_bytes();
        let mut i = 1;
        if bytes.get(i) == Some(&b'/') {
            i += 1;
        }
        let name_start = i;
        while bytes.get(i).is_some_and(|b| b.is_ascii_alphanumeric()) {
            i += 1;
        }
        if i == name_start {
            return None;
        }
        let name = &s[name_start..i];
        if !self.tags.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            return None;
        }
        match bytes.get(i) {
            Some(b'>') => Some(i + 1),
            Some(&b) if b == b'/' || b.is_ascii_whitespace() => {
                let tail = &s[i..];
                let end = tail.find('>')?;
                if tail[..end].contains('<') {
                    return None;
                }
                Some(i + end + 1)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(raw: &str) -> String {
        ResponseSanitizer::default().sanitize(raw)
    }

    #[test]
    fn test_strips_block_tags_keeps_inline() {
        assert_eq!(sanitize("<p>Hello <b>world</b></p>"), "Hello <b>world</b>");
        assert_eq!(
            sanitize("<h1>Title</h1><ul><li><i>one</i></li><li>two</li></ul>"),
            "Title<i>one</i>two"
        );
        assert_eq!(sanitize("<a href=\"x\">link</a><br>"), "<a href=\"x\">link</a>");
    }

    #[test]
    fn test_every_denylisted_form_is_removed() {
        for tag in DEFAULT_DENYLIST {
            let upper = tag.to_ascii_uppercase();
            let input = format!(
                "a<{t}>b</{t}>c<{t}/>d<{t} />e<{u}>f</{u}>g<{t} class=\"x\">h",
                t = tag,
                u = upper
            );
            assert_eq!(sanitize(&input), "abcdefgh", "tag {}", tag);
        }
    }

    #[test]
    fn test_similar_names_and_plain_text_untouched() {
        let text = "<pre>x</pre> <b>bold</b> <code>1 < 2</code> a <= b, <tdx>";
        assert_eq!(sanitize(text), text);
        assert_eq!(sanitize("no markup at all"), "no markup at all");
        assert_eq!(sanitize("dangling <p"), "dangling <p");
    }

    #[test]
    fn test_spliced_tags_are_removed_and_result_is_idempotent() {
        let once = sanitize("<<p>p>text<</p>/p>");
        assert_eq!(once, "text");
        for input in [
            "<<p>p>x",
            "<p>Hello <b>world</b></p>",
            "<di<div>v>nested</d</div>iv>",
            "plain",
            "<li<br>>",
        ] {
            let first = sanitize(input);
            assert_eq!(sanitize(&first), first, "input {:?}", input);
        }
    }

    #[test]
    fn test_custom_denylist() {
        let sanitizer = ResponseSanitizer::with_tags(["b"]);
        assert_eq!(sanitizer.sanitize("<p><b>x</b></p>"), "<p>x</p>");
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        assert_eq!(sanitize("<p>Привет, мир</p>"), "Привет, мир");
        assert_eq!(sanitize("<p>日本語</p><b>太字</b>"), "日本語<b>太字</b>");
    }
}
