//! Text helpers shared by the card and error renderers.

/// Escape the five reserved XML characters
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Truncate to `max_chars` characters, ending in "..." when shortened
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Group digits by thousands: 1234567 -> "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_stars(stars: u64) -> String {
    format!("{} ⭐", format_thousands(stars))
}

/// Up to five "#N" entries, with "..." when more exist
pub fn format_pr_numbers(numbers: &[u64]) -> String {
    const MAX_NUMBERS: usize = 5;

    let shown = numbers
        .iter()
        .take(MAX_NUMBERS)
        .map(|n| format!("#{}", n))
        .collect::<Vec<_>>()
        .join(", ");
    if numbers.len() > MAX_NUMBERS {
        format!("{}...", shown)
    } else {
        shown
    }
}
