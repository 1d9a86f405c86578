use crate::fonts::FontMetrics;

/// Greedy word wrap against font metrics.
///
/// Words are separated by any run of whitespace and re-joined with a single
/// space. A word wider than `max_width` on its own is emitted as its own line
/// without being split. Blank input produces no lines.
pub fn wrap(text: &str, max_width: f32, metrics: &dyn FontMetrics, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut candidate = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        candidate.clear();
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);
        if metrics.width_of(&candidate, font_size) <= max_width {
            std::mem::swap(&mut current, &mut candidate);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
