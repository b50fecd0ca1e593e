//! Regular-stride trajectory decimation.

/// Keep every `ceil(len / budget)`-th element, plus the final one.
///
/// Sequences within budget come back unchanged. The last element is always
/// kept so a replay ends where the trip ended, which can put the output one
/// over budget. A zero budget is treated as one.
pub fn decimate<T: Clone>(points: &[T], budget: usize) -> Vec<T> {
    let budget = budget.max(1);
    let len = points.len();
    if len <= budget {
        return points.to_vec();
    }

    let step = len.div_ceil(budget);
    let mut kept: Vec<T> = points.iter().step_by(step).cloned().collect();
    if (len - 1) % step != 0 {
        kept.push(points[len - 1].clone());
    }
    kept
}
