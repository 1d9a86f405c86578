/// Result of checking one element against the space left on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

// Absorbs float drift from summed line heights.
const EPSILON: f32 = 0.01;

/// Whether an element of `required_height` whose top edge sits at
/// `cursor_y` would descend below `min_content_y`.
pub fn check_fit(cursor_y: f32, required_height: f32, min_content_y: f32) -> BreakAnalysis {
    let available = (cursor_y - min_content_y).max(0.0);
    BreakAnalysis {
        should_break: required_height > available + EPSILON,
        remaining_height: available,
    }
}
