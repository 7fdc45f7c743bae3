use lexis_types::{UpdateAction, UpdateCommand};

/// Parse one dictionary line: `<word> [add|delete] [<attr> <freq> ...]`.
///
/// Lines without an action keyword are treated as `add` so that old
/// dictionaries, which only listed words and attributes, keep working.
/// A blank line, or one starting with whitespace, has an empty first token
/// and is skipped. Attribute pairing is not checked here.
///
/// Only ASCII whitespace separates tokens. Other spaces, such as the
/// full-width U+3000, are part of the token they appear in.
pub fn parse_line(line: &str) -> UpdateCommand {
    if line.is_empty() || line.starts_with(|c: char| c.is_ascii_whitespace()) {
        return UpdateCommand::skip();
    }

    let mut tokens = line.split_ascii_whitespace();
    let word = match tokens.next() {
        Some(word) => word.to_string(),
        None => return UpdateCommand::skip(),
    };

    let rest: Vec<String> = tokens.map(str::to_string).collect();

    match rest.first().and_then(|t| UpdateAction::from_keyword(t)) {
        Some(action) => UpdateCommand {
            word,
            action,
            attribute_tokens: rest[1..].to_vec(),
        },
        None => UpdateCommand {
            word,
            action: UpdateAction::Add,
            attribute_tokens: rest,
        },
    }
}
