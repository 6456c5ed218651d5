/// Cuts a logged body down to at most `max_bytes` on a char boundary and
/// notes how much was dropped. `usize::MAX` disables clipping.
pub fn clip_for_log(value: &str, max_bytes: usize) -> String {
    if max_bytes == usize::MAX || value.len() <= max_bytes {
        return value.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} more bytes)", &value[..end], value.len() - end)
}
