//! Positional placeholder substitution

/// Substitute `$1`, `$2`, ... in `body` with `args`
///
/// Replacement is literal and runs in increasing index order over the
/// progressively updated text, so text inserted for `$1` is itself subject
/// to the `$2` pass, and `$1` also matches the start of `$10`. Placeholders
/// without a matching argument are left as they are.
pub fn render(body: &str, args: &[String]) -> String {
    let mut text = body.to_string();
    for (index, arg) in args.iter().enumerate() {
        let placeholder = format!("${}", index + 1);
        if text.contains(&placeholder) {
            text = text.replace(&placeholder, arg);
        }
    }
    text
}
