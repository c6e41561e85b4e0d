/// Does the message content ask for a game?
pub fn is_game_trigger(content: &str) -> bool {
    content.contains("WHACK") || content.contains(":wack:")
}

/// Parse a board button's custom id of the form `option_{index}`.
///
/// Anything else is not ours and gets dropped by the caller.
pub fn parse_cell_id(custom_id: &str) -> Option<usize> {
    custom_id.strip_prefix("option_")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_trigger() {
        assert!(is_game_trigger("WHACK"));
        assert!(is_game_trigger("time for some WHACK :)"));
        assert!(is_game_trigger("go :wack: go"));
        assert!(!is_game_trigger("whack"));
        assert!(!is_game_trigger("nothing to see here"));
    }

    #[test]
    fn test_parse_cell_id() {
        assert_eq!(parse_cell_id("option_0"), Some(0));
        assert_eq!(parse_cell_id("option_23"), Some(23));
        assert_eq!(parse_cell_id("option_"), None);
        assert_eq!(parse_cell_id("option_x"), None);
        assert_eq!(parse_cell_id("pagination_start"), None);
    }
}
