//! Majority-Vote Labeling

use sensor_table::CellValue;

/// Most frequent value in a slice of labels.
///
/// Ties go to the smallest value under [`CellValue::total_cmp`], so the
/// result does not depend on the order labels appear in.
pub fn majority_vote(labels: &[CellValue]) -> Option<CellValue> {
    if labels.is_empty() {
        return None;
    }

    let mut sorted: Vec<&CellValue> = labels.iter().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut best = sorted[0];
    let mut best_count = 0;
    let mut run_start = 0;

    for i in 1..=sorted.len() {
        let run_ended = i == sorted.len() || sorted[i].total_cmp(sorted[run_start]).is_ne();
        if run_ended {
            let count = i - run_start;
            // strict: an equal count later in sort order never wins
            if count > best_count {
                best = sorted[run_start];
                best_count = count;
            }
            run_start = i;
        }
    }

    Some(best.clone())
}
