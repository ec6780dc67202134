/// Builds an `ILIKE` pattern matching `keyword` anywhere in a column. LIKE
/// metacharacters in the keyword are escaped so they match literally.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
