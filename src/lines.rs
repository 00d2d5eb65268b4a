//! Bounded iteration over windows of log lines.
//!
//! Scanners walk logs backwards (errors cluster near the end) or forwards
//! over a bounded tail; these helpers keep the original line offsets
//! attached while doing so.

/// Indexed iteration over a window of lines.
pub trait LineWindow<'a> {
    /// Iterate `(offset, line)` pairs from the start, visiting at most
    /// `limit` lines when given.
    fn enumerate_forward(&'a self, limit: Option<usize>) -> impl Iterator<Item = (usize, &'a str)>;

    /// Iterate `(offset, line)` pairs from the end backwards, visiting at
    /// most `limit` lines when given. Offsets are the original forward
    /// offsets.
    fn enumerate_backward(&'a self, limit: Option<usize>) -> impl Iterator<Item = (usize, &'a str)>;

    /// Iterate the last `limit` lines in forward order, keeping original
    /// offsets.
    fn enumerate_tail_forward(&'a self, limit: usize) -> impl Iterator<Item = (usize, &'a str)>;
}

impl<'a> LineWindow<'a> for [&'a str] {
    fn enumerate_forward(&'a self, limit: Option<usize>) -> impl Iterator<Item = (usize, &'a str)> {
        let limit = limit.unwrap_or(self.len());
        self.iter().copied().enumerate().take(limit)
    }

    fn enumerate_backward(&'a self, limit: Option<usize>) -> impl Iterator<Item = (usize, &'a str)> {
        let len = self.len();
        let limit = limit.unwrap_or(len);
        self.iter()
            .copied()
            .rev()
            .enumerate()
            .map(move |(i, line)| (len - i - 1, line))
            .take(limit)
    }

    fn enumerate_tail_forward(&'a self, limit: usize) -> impl Iterator<Item = (usize, &'a str)> {
        let start = self.len().saturating_sub(limit);
        self[start..]
            .iter()
            .copied()
            .enumerate()
            .map(move |(i, line)| (start + i, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_forward() {
        let lines = ["a", "b", "c", "d", "e"];
        assert_eq!(
            lines.enumerate_forward(None).collect::<Vec<_>>(),
            vec![(0, "a"), (1, "b"), (2, "c"), (3, "d"), (4, "e")]
        );
        assert_eq!(
            lines.enumerate_forward(Some(2)).collect::<Vec<_>>(),
            vec![(0, "a"), (1, "b")]
        );
    }

    #[test]
    fn test_enumerate_backward() {
        let lines = ["a", "b", "c", "d", "e"];
        assert_eq!(
            lines.enumerate_backward(None).collect::<Vec<_>>(),
            vec![(4, "e"), (3, "d"), (2, "c"), (1, "b"), (0, "a")]
        );
        assert_eq!(
            lines.enumerate_backward(Some(2)).collect::<Vec<_>>(),
            vec![(4, "e"), (3, "d")]
        );
    }

    #[test]
    fn test_enumerate_tail_forward() {
        let lines = ["a", "b", "c", "d", "e"];
        assert_eq!(
            lines.enumerate_tail_forward(3).collect::<Vec<_>>(),
            vec![(2, "c"), (3, "d"), (4, "e")]
        );
        assert_eq!(lines.enumerate_tail_forward(10).count(), 5);
    }

    #[test]
    fn test_empty() {
        let lines: [&str; 0] = [];
        assert_eq!(lines.enumerate_forward(None).count(), 0);
        assert_eq!(lines.enumerate_backward(None).count(), 0);
        assert_eq!(lines.enumerate_tail_forward(3).count(), 0);
    }
}
