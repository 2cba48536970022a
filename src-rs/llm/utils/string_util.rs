/// Single-line preview of `s` for log output: newlines collapsed to spaces,
/// cut at a char boundary after at most `max_bytes` bytes, with an ellipsis
/// when truncated.
pub fn log_preview(s: &str, max_bytes: usize) -> String {
    let flat: String = s
        .trim()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.len() <= max_bytes {
        return flat;
    }

    let end = flat
        .char_indices()
        .map(|(i, ch)| i + ch.len_utf8())
        .take_while(|next| *next <= max_bytes)
        .last()
        .unwrap_or(0);

    format!("{}...", &flat[..end])
}
