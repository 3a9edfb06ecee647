use crate::config::Tolerance;
use crate::error::Result;
use crate::geometry::Segment;
use crate::spatial::GridIndex;

use super::crossings;

/// Splits one closed curve's segments into runs between consecutive crossings.
///
/// Segments are walked strictly in curve order. Each crossing closes the run
/// being collected and starts a new one. The run still open when the walk
/// ends continues past the curve's start, so it is prepended to the first
/// run. A curve without crossings comes back as a single run.
pub(super) fn split(segments: &[Segment], index: &GridIndex, tol: Tolerance) -> Result<Vec<Vec<Segment>>> {
    let mut runs: Vec<Vec<Segment>> = Vec::new();
    let mut current: Vec<Segment> = Vec::new();

    for segment in segments {
        let mut rest = Some(*segment);
        for point in crossings::find(segment, index, tol)? {
            let Some(piece) = rest else { break };
            let (before, after) = piece.split_at(point, tol);
            current.extend(before);
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            rest = after;
        }
        current.extend(rest);
    }

    match runs.first_mut() {
        Some(first) if !current.is_empty() => {
            current.append(first);
            *first = current;
        }
        Some(_) => {}
        None => {
            if !current.is_empty() {
                runs.push(current);
            }
        }
    }

    Ok(runs)
}
