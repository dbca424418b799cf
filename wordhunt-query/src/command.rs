/// Token that lists every word instead of looking one up.
pub const LIST_ALL: &str = "-all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    All,            // -all
    Lookup(String), // any other token, matched verbatim
}

/// Interpret one whitespace-delimited token; empty input yields nothing.
pub fn parse_command(token: &str) -> Option<Command> {
    match token.trim() {
        "" => None,
        LIST_ALL => Some(Command::All),
        word => Some(Command::Lookup(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_list_all() {
        assert_eq!(parse_command("-all"), Some(Command::All));
    }

    #[test]
    fn other_tokens_are_literal_lookups() {
        assert_eq!(
            parse_command("word."),
            Some(Command::Lookup("word.".into()))
        );
        assert_eq!(parse_command("-ALL"), Some(Command::Lookup("-ALL".into())));
        assert_eq!(parse_command("--all"), Some(Command::Lookup("--all".into())));
    }

    #[test]
    fn blank_tokens_are_ignored() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  \t"), None);
    }
}
