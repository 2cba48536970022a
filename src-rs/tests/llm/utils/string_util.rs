use crate::llm::utils::string_util::log_preview;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_flattened_only() {
        assert_eq!(log_preview("  a\nb\r\nc  ", 100), "a b  c");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(log_preview("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn cut_respects_char_boundaries() {
        // "é" is two bytes; a 3-byte budget fits "aé" but not "aéé".
        assert_eq!(log_preview("aééé", 3), "aé...");
        assert_eq!(log_preview("ééé", 1), "...");
    }
}
