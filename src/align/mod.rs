//! Global alignment of HB-seq read 1 against read 2.
//!
//! Needleman-Wunsch with a linear gap penalty. Bisulfite conversion turns
//! C into T on read 1 and G into A on read 2, so `T` over `C` and `G` over
//! `A` score as matches.

pub const GAP: u8 = b'-';

/// Scores used by [`needleman_wunsch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BisulfiteScoring {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// Penalty for aligning a base to a gap.
    pub indel: i32,
}

impl Default for BisulfiteScoring {
    fn default() -> Self {
        Self {
            match_score: 3,
            mismatch_score: -3,
            indel: -5,
        }
    }
}

impl BisulfiteScoring {
    /// True when `x` (read 1) and `y` (read 2) count as the same base.
    ///
    /// Not symmetric: `T`/`C` and `G`/`A` match, `C`/`T` and `A`/`G` do not.
    pub fn is_match(x: u8, y: u8) -> bool {
        x == y || (x == b'T' && y == b'C') || (x == b'G' && y == b'A')
    }

    pub fn score(&self, x: u8, y: u8) -> i32 {
        if Self::is_match(x, y) {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// A gapped pair of reads of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairAlignment {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
    pub score: i32,
}

/// One traceback move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `x[i]` over `y[j]`.
    Diagonal,
    /// `x[i]` over a gap.
    GapInY,
    /// A gap over `y[j]`.
    GapInX,
}

/// Order in which traceback tries the moves out of cell `(i, j)`.
///
/// In the middle of the matrix gaps are preferred, pushing them toward the
/// read ends; near the edges the diagonal is tried first.
pub fn step_order(i: usize, j: usize, m: usize, n: usize) -> [Step; 3] {
    if i * 4 >= m + n && j * 4 >= m + n {
        [Step::GapInY, Step::GapInX, Step::Diagonal]
    } else {
        [Step::Diagonal, Step::GapInY, Step::GapInX]
    }
}

struct ScoreMatrix {
    cols: usize,
    cells: Vec<i32>,
}

impl ScoreMatrix {
    fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.cols + j]
    }

    fn set(&mut self, i: usize, j: usize, value: i32) {
        self.cells[i * self.cols + j] = value;
    }
}

fn fill(x: &[u8], y: &[u8], scoring: &BisulfiteScoring) -> ScoreMatrix {
    let (m, n) = (x.len(), y.len());
    let mut s = ScoreMatrix {
        cols: n + 1,
        cells: vec![0; (m + 1) * (n + 1)],
    };

    for i in 1..=m {
        s.set(i, 0, i as i32 * scoring.indel);
    }
    for j in 1..=n {
        s.set(0, j, j as i32 * scoring.indel);
    }

    for i in 1..=m {
        for j in 1..=n {
            let best = (s.get(i - 1, j - 1) + scoring.score(x[i - 1], y[j - 1]))
                .max(s.get(i - 1, j) + scoring.indel)
                .max(s.get(i, j - 1) + scoring.indel);
            s.set(i, j, best);
        }
    }
    s
}

/// Globally aligns `x` against `y`.
pub fn needleman_wunsch(x: &[u8], y: &[u8], scoring: &BisulfiteScoring) -> PairAlignment {
    let (m, n) = (x.len(), y.len());
    let s = fill(x, y, scoring);

    let leads_here = |step: Step, i: usize, j: usize| -> bool {
        match step {
            Step::Diagonal => {
                i > 0
                    && j > 0
                    && s.get(i - 1, j - 1) + scoring.score(x[i - 1], y[j - 1]) == s.get(i, j)
            }
            Step::GapInY => i > 0 && s.get(i - 1, j) + scoring.indel == s.get(i, j),
            Step::GapInX => j > 0 && s.get(i, j - 1) + scoring.indel == s.get(i, j),
        }
    };

    let mut ax = Vec::with_capacity(m + n);
    let mut ay = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);

    while i > 0 || j > 0 {
        // Every filled cell is the max of its predecessors, so one move always fits.
        let step = step_order(i, j, m, n)
            .into_iter()
            .find(|&step| leads_here(step, i, j))
            .unwrap_or(if i > 0 { Step::GapInY } else { Step::GapInX });

        match step {
            Step::Diagonal => {
                ax.push(x[i - 1]);
                ay.push(y[j - 1]);
                i -= 1;
                j -= 1;
            }
            Step::GapInY => {
                ax.push(x[i - 1]);
                ay.push(GAP);
                i -= 1;
            }
            Step::GapInX => {
                ax.push(GAP);
                ay.push(y[j - 1]);
                j -= 1;
            }
        }
    }

    ax.reverse();
    ay.reverse();
    PairAlignment {
        x: ax,
        y: ay,
        score: s.get(m, n),
    }
}
