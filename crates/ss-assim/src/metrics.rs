//! Error metrics over state vectors.

use crate::{AssimError, AssimResult};

/// Root-mean-square difference between two equally long vectors.
///
/// Two empty vectors have zero error.
pub fn rmse(estimate: &[f64], truth: &[f64]) -> AssimResult<f64> {
    if estimate.len() != truth.len() {
        return Err(AssimError::LengthMismatch {
            expected: truth.len(),
            got:      estimate.len(),
            what:     "estimate",
        });
    }
    if truth.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = estimate.iter().zip(truth).map(|(e, t)| (e - t).powi(2)).sum();
    Ok((sum / truth.len() as f64).sqrt())
}

/// Element-wise mean of ensemble member states.  `None` for an empty
/// ensemble.
pub fn ensemble_mean(members: &[Vec<f64>]) -> AssimResult<Option<Vec<f64>>> {
    let Some(first) = members.first() else {
        return Ok(None);
    };
    let mut mean = vec![0.0; first.len()];
    for member in members {
        if member.len() != mean.len() {
            return Err(AssimError::LengthMismatch {
                expected: mean.len(),
                got:      member.len(),
                what:     "ensemble member state",
            });
        }
        for (m, v) in mean.iter_mut().zip(member) {
            *m += v;
        }
    }
    let n = members.len() as f64;
    mean.iter_mut().for_each(|m| *m /= n);
    Ok(Some(mean))
}
