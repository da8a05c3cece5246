use crate::error::{TfResult, TourForgeError};
use crate::protocol::Submission;
use std::sync::Mutex;
use tracing::info;

/// Collects one final submission per node and keeps the shortest tour.
#[derive(Default)]
pub struct GlobalReduction {
    submissions: Mutex<Vec<Submission>>,
}

impl GlobalReduction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&self, submission: Submission) -> TfResult<()> {
        let mut subs = self
            .submissions
            .lock()
            .map_err(|e| TourForgeError::Protocol(e.to_string()))?;
        if subs.iter().any(|s| s.node_rank == submission.node_rank) {
            return Err(TourForgeError::Protocol(format!(
                "node {} submitted twice",
                submission.node_rank
            )));
        }
        subs.push(submission);
        Ok(())
    }

    /// Returns the winner and every submission in node-rank order.
    ///
    /// Submissions are scanned by rank with a strict `<`, so equal lengths
    /// resolve to the lowest rank regardless of arrival order.
    pub fn finish(self) -> TfResult<(Submission, Vec<Submission>)> {
        let mut subs = self
            .submissions
            .into_inner()
            .map_err(|e| TourForgeError::Protocol(e.to_string()))?;
        subs.sort_by_key(|s| s.node_rank);

        let best = subs
            .iter()
            .fold(None::<&Submission>, |best, s| match best {
                Some(b) if s.length >= b.length => Some(b),
                _ => Some(s),
            })
            .cloned()
            .ok_or_else(|| TourForgeError::Protocol("no node submitted a result".into()))?;

        info!(
            node = best.node_rank,
            length = best.length,
            submissions = subs.len(),
            "global reduction complete"
        );
        Ok((best, subs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::City;

    fn sub(node: usize, length: f64) -> Submission {
        Submission {
            node_rank: node,
            tour: vec![City::new(node as i32, 0)],
            length,
        }
    }

    #[test]
    fn test_shortest_wins() {
        let r = GlobalReduction::new();
        r.submit(sub(0, 9.0)).unwrap();
        r.submit(sub(1, 4.5)).unwrap();
        r.submit(sub(2, 7.0)).unwrap();
        let (best, all) = r.finish().unwrap();
        assert_eq!(best.node_rank, 1);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_tie_goes_to_lowest_rank() {
        let r = GlobalReduction::new();
        r.submit(sub(2, 4.0)).unwrap();
        r.submit(sub(0, 4.0)).unwrap();
        r.submit(sub(1, 5.0)).unwrap();
        let (best, all) = r.finish().unwrap();
        assert_eq!(best.node_rank, 0);
        assert_eq!(
            all.iter().map(|s| s.node_rank).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_empty_and_duplicate_submissions() {
        assert!(GlobalReduction::new().finish().is_err());
        let r = GlobalReduction::new();
        r.submit(sub(0, 1.0)).unwrap();
        assert!(r.submit(sub(0, 2.0)).is_err());
    }
}
