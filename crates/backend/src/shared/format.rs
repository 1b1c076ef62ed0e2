/// Число с разделителями тысяч (точками): 1234567 -> "1.234.567"
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::new();
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend(
        digits.as_bytes()[head..]
            .chunks(3)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok()),
    );
    groups.join(".")
}

/// Размер ответа для журнала запросов: байты до 10 КБ, дальше КБ/МБ
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    match bytes {
        b if b < 10 * KB => format!("{} B", format_number(b)),
        b if b < 10 * MB => format!("{} KB", format_number(b / KB)),
        b => format!("{} MB", format_number(b / MB)),
    }
}
