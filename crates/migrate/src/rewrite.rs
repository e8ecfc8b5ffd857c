//! Line-oriented rewriting of argument declarations.
//!
//! A declaration is matched on a single line by pattern, not parsed. A
//! declaration spread over several lines, or one whose `required:` value is
//! anything but the literal `true`, is left alone.

use std::sync::LazyLock;

use regex::Regex;

/// The option inserted after `required: true`.
pub const PRESENCE_OPTION: &str = ", validates: { presence: true }";

/// Marker whose presence means a line is already migrated.
const VALIDATES_MARKER: &str = "validates:";

/// `argument :name ... required: true`, anchored at the start of the line.
/// The name may also be a quoted string (`"name"` or `'name'`).
/// The match ends right after the first `required: true` token.
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*argument\b\s*\(?\s*(?::\w+|"\w+"|'\w+').*?\brequired:\s*true\b"#)
        .expect("declaration pattern is valid")
});

/// Rewrite one line (without its terminator).
///
/// Returns `None` when the line is not a legacy declaration, including when
/// it already carries a `validates:` option.
///
/// # Examples
///
/// ```
/// use telephone_migrate::rewrite_line;
///
/// assert_eq!(
///     rewrite_line("  argument :user, required: true").as_deref(),
///     Some("  argument :user, required: true, validates: { presence: true }"),
/// );
/// assert_eq!(rewrite_line("  argument :optional"), None);
/// ```
#[must_use]
pub fn rewrite_line(line: &str) -> Option<String> {
    if line.contains(VALIDATES_MARKER) {
        return None;
    }
    let head = DECLARATION.find(line)?;
    let (before, after) = line.split_at(head.end());
    Some(format!("{before}{PRESENCE_OPTION}{after}"))
}

/// Outcome of rewriting a whole source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten text. Equal to the input when nothing matched.
    pub text: String,
    /// 1-based numbers of the rewritten lines.
    pub changed_lines: Vec<usize>,
}

impl Rewrite {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.changed_lines.is_empty()
    }
}

/// Rewrite every matching line of `source`.
///
/// Line terminators (`\n` or `\r\n`) and a missing final newline are kept
/// byte for byte.
#[must_use]
pub fn rewrite_source(source: &str) -> Rewrite {
    let mut text = String::with_capacity(source.len());
    let mut changed_lines = Vec::new();

    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let (body, ending) = split_terminator(raw);
        match rewrite_line(body) {
            Some(rewritten) => {
                text.push_str(&rewritten);
                text.push_str(ending);
                changed_lines.push(index + 1);
            }
            None => text.push_str(raw),
        }
    }

    Rewrite {
        text,
        changed_lines,
    }
}

fn split_terminator(line: &str) -> (&str, &str) {
    let body = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    line.split_at(body.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "argument :user, required: true",
        "argument :user, required: true, validates: { presence: true }"
    )]
    #[case(
        "    argument :user, required: true",
        "    argument :user, required: true, validates: { presence: true }"
    )]
    #[case(
        "\targument :user, required: true",
        "\targument :user, required: true, validates: { presence: true }"
    )]
    #[case(
        "argument :email, required: true, default: nil",
        "argument :email, required: true, validates: { presence: true }, default: nil"
    )]
    #[case(
        "argument :email, default: nil, required: true",
        "argument :email, default: nil, required: true, validates: { presence: true }"
    )]
    #[case(
        "argument(:user, required: true)",
        "argument(:user, required: true, validates: { presence: true })"
    )]
    #[case(
        "argument :user, required: true # who signs up",
        "argument :user, required: true, validates: { presence: true } # who signs up"
    )]
    #[case(
        "argument :user,   required:true",
        "argument :user,   required:true, validates: { presence: true }"
    )]
    #[case(
        "argument \"user\", required: true",
        "argument \"user\", required: true, validates: { presence: true }"
    )]
    #[case(
        "argument 'user', required: true",
        "argument 'user', required: true, validates: { presence: true }"
    )]
    fn rewrites_legacy_declarations(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite_line(input).as_deref(), Some(expected));
    }

    #[rstest]
    #[case::already_migrated("argument :email, required: true, validates: { format: { with: /@/ } }")]
    #[case::validates_first("argument :email, validates: { presence: true }, required: true")]
    #[case::not_required("argument :name, default: \"test\"")]
    #[case::bare("argument :optional")]
    #[case::required_false("argument :user, required: false")]
    #[case::computed_flag("argument :user, required: strict?")]
    #[case::truthy_prefix("argument :user, required: trueish")]
    #[case::commented("# argument :user, required: true")]
    #[case::other_keyword("attribute :user, required: true")]
    #[case::plural_keyword("arguments :user, required: true")]
    #[case::no_symbol("argument required: true")]
    #[case::unterminated_string("argument \"user, required: true")]
    #[case::interpolated_name("argument \"#{name}\", required: true")]
    #[case::blank("")]
    fn leaves_other_lines_alone(#[case] input: &str) {
        assert_eq!(rewrite_line(input), None);
    }

    #[test]
    fn source_keeps_unmatched_lines_and_reports_changes() {
        let source = "class ExampleService < Telephone::Service\n  \
                      argument :user, required: true\n  \
                      argument :name, default: \"test\"\n\n  \
                      def call\n    user\n  end\nend\n";

        let rewrite = rewrite_source(source);

        assert_eq!(rewrite.changed_lines, vec![2]);
        assert_eq!(
            rewrite.text,
            "class ExampleService < Telephone::Service\n  \
             argument :user, required: true, validates: { presence: true }\n  \
             argument :name, default: \"test\"\n\n  \
             def call\n    user\n  end\nend\n"
        );
    }

    #[test]
    fn crlf_and_missing_final_newline_survive() {
        let source = "argument :a, required: true\r\nargument :b\r\nargument :c, required: true";
        let rewrite = rewrite_source(source);

        assert_eq!(rewrite.changed_lines, vec![1, 3]);
        assert_eq!(
            rewrite.text,
            "argument :a, required: true, validates: { presence: true }\r\n\
             argument :b\r\n\
             argument :c, required: true, validates: { presence: true }"
        );
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let source = "  argument :user, required: true\n  argument :account, required: true\n";
        let once = rewrite_source(source);
        let twice = rewrite_source(&once.text);

        assert!(once.is_changed());
        assert!(!twice.is_changed());
        assert_eq!(twice.text, once.text);
    }

    #[test]
    fn empty_source() {
        let rewrite = rewrite_source("");
        assert_eq!(rewrite.text, "");
        assert!(!rewrite.is_changed());
    }
}
