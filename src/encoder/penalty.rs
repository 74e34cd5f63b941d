/// Mask penalty scoring (the four standard rules)
use crate::models::ModuleMatrix;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Total penalty of a fully drawn matrix; lower is better.
pub fn penalty_score(matrix: &ModuleMatrix) -> u32 {
    let size = matrix.size();
    let mut result = 0;

    // Runs of same color and finder-like patterns, rows then columns
    for y in 0..size {
        result += line_penalty(size, |x| matrix.is_dark(x, y));
    }
    for x in 0..size {
        result += line_penalty(size, |y| matrix.is_dark(x, y));
    }

    // 2x2 blocks
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = matrix.is_dark(x, y);
            if color == matrix.is_dark(x + 1, y)
                && color == matrix.is_dark(x, y + 1)
                && color == matrix.is_dark(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    result + balance_penalty(matrix.dark_count(), size * size)
}

/// Rule 4: 10 points per full 5% step away from a 50% dark ratio
fn balance_penalty(dark: usize, total: usize) -> u32 {
    let deviation = (dark as i64 * 20 - total as i64 * 10).unsigned_abs() as usize;
    let k = ((deviation + total - 1) / total).saturating_sub(1);
    k as u32 * PENALTY_N4
}

/// Rules 1 and 3 over a single row or column
fn line_penalty(size: usize, is_dark: impl Fn(usize) -> bool) -> u32 {
    let mut result = 0;
    let mut run_color = false;
    let mut run_len = 0;
    let mut history = FinderPenalty::new(size);
    for i in 0..size {
        let dark = is_dark(i);
        if dark == run_color {
            run_len += 1;
            if run_len == 5 {
                result += PENALTY_N1;
            } else if run_len > 5 {
                result += 1;
            }
        } else {
            history.add_history(run_len);
            if !run_color {
                result += history.count_patterns() * PENALTY_N3;
            }
            run_color = dark;
            run_len = 1;
        }
    }
    result + history.terminate_and_count(run_color, run_len) * PENALTY_N3
}

/// Rolling history of the last seven run lengths in a line.
///
/// The light border outside the symbol counts as part of the first and last
/// light runs, so finder-like patterns touching an edge are still detected.
struct FinderPenalty {
    size: usize,
    run_history: [usize; 7],
}

impl FinderPenalty {
    fn new(size: usize) -> Self {
        Self {
            size,
            run_history: [0; 7],
        }
    }

    /// Count 1:1:3:1:1 dark patterns with a 4-wide light run on either side
    fn count_patterns(&self) -> u32 {
        let rh = &self.run_history;
        let n = rh[1];
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        u32::from(core && rh[0] >= n * 4 && rh[6] >= n)
            + u32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    fn terminate_and_count(mut self, run_color: bool, mut run_len: usize) -> u32 {
        if run_color {
            self.add_history(run_len);
            run_len = 0;
        }
        run_len += self.size;
        self.add_history(run_len);
        self.count_patterns()
    }

    fn add_history(&mut self, mut run_len: usize) {
        if self.run_history[0] == 0 {
            run_len += self.size;
        }
        self.run_history.copy_within(0..6, 1);
        self.run_history[0] = run_len;
    }
}
