use concentra_types::Rect;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether a row of `row_height` still fits below `cursor_y`.
///
/// * `cursor_y`: position relative to the top of `bounds`.
/// * `bounds`: the printable body of the page.
pub fn check_row_fit(cursor_y: f32, row_height: f32, bounds: Rect) -> BreakAnalysis {
    let available = (bounds.height - cursor_y).max(0.0);
    // Absorbs float noise from summing row heights.
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: row_height > available + EPSILON,
        remaining_height: available,
    }
}
