pub const DEFAULT_CAPACITY: usize = 5;

/// Bounded leaderboard, best first. Equal scores keep arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    capacity: usize,
    entries: Vec<u32>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HighScores {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `score`, returning its zero-based rank when it made the list.
    ///
    /// Once full, a score has to beat the current lowest entry to get in; that entry is evicted.
    pub fn insert(&mut self, score: u32) -> Option<usize> {
        if self.capacity == 0 {
            return None;
        }
        if self.entries.len() >= self.capacity {
            let lowest = *self.entries.last()?;
            if score <= lowest {
                return None;
            }
            self.entries.pop();
        }
        let rank = self
            .entries
            .iter()
            .position(|&e| e < score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, score);
        Some(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_best_five_in_descending_order() {
        let mut scores = HighScores::new(5);
        for s in [50, 30, 80, 10, 60, 20] {
            scores.insert(s);
        }
        assert_eq!(scores.entries(), &[80, 60, 50, 30, 20]);
    }

    #[test]
    fn insert_reports_rank() {
        let mut scores = HighScores::new(3);
        assert_eq!(scores.insert(10), Some(0));
        assert_eq!(scores.insert(30), Some(0));
        assert_eq!(scores.insert(20), Some(1));
        assert_eq!(scores.insert(5), None);
        assert_eq!(scores.entries(), &[30, 20, 10]);
    }

    #[test]
    fn ties_keep_arrival_order_and_do_not_evict() {
        let mut scores = HighScores::new(2);
        assert_eq!(scores.insert(7), Some(0));
        assert_eq!(scores.insert(7), Some(1));
        assert_eq!(scores.insert(7), None);
        assert_eq!(scores.entries(), &[7, 7]);
    }

    #[test]
    fn zero_is_a_valid_score() {
        let mut scores = HighScores::default();
        assert_eq!(scores.insert(0), Some(0));
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut scores = HighScores::new(0);
        assert_eq!(scores.insert(100), None);
        assert!(scores.is_empty());
    }
}
