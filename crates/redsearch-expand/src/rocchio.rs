use crate::vector::ScoreVector;

/// `q0 + relevant - nonrelevant`, term by term, over the union of all keys.
///
/// The Rocchio weights are expected to be baked into the inputs already.
/// Terms enter the result in order of first appearance: `q0` first, then
/// `relevant`, then `nonrelevant`.
pub fn merge_rocchio(q0: &ScoreVector, relevant: &ScoreVector, nonrelevant: &ScoreVector) -> ScoreVector {
    let mut merged = q0.clone();
    for (term, score) in relevant.iter() { merged.add(term, score); }
    for (term, score) in nonrelevant.iter() { merged.add(term, -score); }
    merged
}
