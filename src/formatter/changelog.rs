//! Changelog rendering
//!
//! Pure text production: an issue collection in, a markdown fragment out.
//! Issue titles get two rounds of escaping. HTML entities keep the text
//! safe wherever the fragment is pasted; the numeric references neutralize
//! the characters markdown would otherwise read as link or emphasis syntax
//! inside the bullet's `[...]` label.

use crate::types::{Issue, IssueCollection};

use super::MarkdownContent;

/// Escape an issue title for use inside a markdown link label.
pub fn escape_title(title: &str) -> String {
    title
        // ampersand first so later entities survive untouched
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('[', "&#91;")
        .replace(']', "&#93;")
        .replace('_', "&#95;")
}

fn issue_bullet(issue: &Issue) -> String {
    format!(
        "- [{}: {}]({})",
        issue.number,
        escape_title(&issue.title),
        issue.html_url
    )
}

/// Render the whole changelog fragment: count line first, then one bullet
/// per issue in ascending number order, trailing newline included.
pub fn changelog_markdown(issues: &IssueCollection) -> MarkdownContent {
    let mut content = String::new();
    content.push_str(&format!("Total issues resolved: **{}**\n", issues.count()));
    for issue in issues.iter() {
        content.push_str(&issue_bullet(issue));
        content.push('\n');
    }
    MarkdownContent(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueNumber, IssueUrl};

    fn issue(number: u64, title: &str) -> Issue {
        Issue {
            number: IssueNumber::new(number),
            title: title.to_string(),
            html_url: IssueUrl::new(format!("https://github.com/acme/widget/issues/{}", number)),
        }
    }

    #[test]
    fn escaping_leaves_no_raw_special_characters() {
        let escaped = escape_title(r#"[BC break] set_option & <select> "fix"_v2"#);
        assert_eq!(
            escaped,
            "&#91;BC break&#93; set&#95;option &amp; &lt;select&gt; &quot;fix&quot;&#95;v2"
        );
        for raw in ['[', ']', '_', '<', '>', '"'] {
            assert!(!escaped.contains(raw), "raw {:?} survived escaping", raw);
        }
        // every remaining ampersand must open an entity or reference
        for (position, _) in escaped.match_indices('&') {
            let rest = &escaped[position..];
            assert!(
                rest.starts_with("&amp;")
                    || rest.starts_with("&lt;")
                    || rest.starts_with("&gt;")
                    || rest.starts_with("&quot;")
                    || rest.starts_with("&#"),
                "bare ampersand at {} in {}",
                position,
                escaped
            );
        }
    }

    #[test]
    fn ampersand_is_escaped_exactly_once() {
        assert_eq!(escape_title("a & b"), "a &amp; b");
        assert_eq!(escape_title("&amp;"), "&amp;amp;");
    }

    #[test]
    fn renders_count_line_and_sorted_bullets() {
        let issues: IssueCollection = [
            issue(204, "Fix session handling"),
            issue(7, "Add CS fixes"),
            issue(58, "Update docs"),
        ]
        .into_iter()
        .collect();

        let markdown = changelog_markdown(&issues);
        assert_eq!(
            markdown.0,
            "Total issues resolved: **3**\n\
             - [7: Add CS fixes](https://github.com/acme/widget/issues/7)\n\
             - [58: Update docs](https://github.com/acme/widget/issues/58)\n\
             - [204: Fix session handling](https://github.com/acme/widget/issues/204)\n"
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let issues: IssueCollection =
            [issue(3, "a [b]_c"), issue(1, "x & y")].into_iter().collect();
        assert_eq!(changelog_markdown(&issues), changelog_markdown(&issues));
    }

    #[test]
    fn empty_collection_renders_zero_count_only() {
        let markdown = changelog_markdown(&IssueCollection::new());
        assert_eq!(markdown.0, "Total issues resolved: **0**\n");
    }
}
