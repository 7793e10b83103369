use serde::Serialize;

use crate::core::inference::engine::ScoreVector;

/// Scores plus the winning class, created per inference call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class: usize,
    pub scores: Vec<f32>,
}

impl Prediction {
    /// `[p0, p1, ..., p9]` with fixed precision.
    pub fn format_scores(&self, decimals: usize) -> String {
        let cells: Vec<String> = self
            .scores
            .iter()
            .map(|s| format!("{:.*}", decimals, s))
            .collect();
        format!("[{}]", cells.join(", "))
    }

    /// Score of the winning class.
    pub fn confidence(&self) -> f32 {
        self.scores.get(self.class).copied().unwrap_or(f32::NAN)
    }
}

/// Index of the largest score; the first of equal maxima wins and NaN never does.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &s) in scores.iter().enumerate() {
        if s.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}

/// Full-precision arg-max; an all-NaN vector falls back to class 0.
pub fn reduce_scores(scores: ScoreVector) -> Prediction {
    let scores = scores.into_vec();
    let class = argmax(&scores).unwrap_or(0);
    Prediction { class, scores }
}
