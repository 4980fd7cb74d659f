use std::sync::LazyLock;

use regex::Regex;

// Tags, comments and doctype declarations; attribute values may contain `>`
// only when quoted.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<!--.*?-->|<!?/?[a-z][^<>"']*(?:(?:"[^"]*"|'[^']*')[^<>"']*)*>"#)
        .expect("tag pattern is valid")
});

/// Remove every markup tag, keeping the text between tags.
///
/// This is not a sanitizer with an allowed subset: `<script>x</script>`
/// becomes `x`.
pub fn strip_html(input: &str) -> String {
    let mut text = input.to_string();
    // Removing a tag can join its neighbours into a new one (`<<b>a>`).
    while text.contains('<') {
        let stripped = TAG.replace_all(&text, "");
        if stripped.len() == text.len() {
            break;
        }
        text = stripped.into_owned();
    }
    text
}
