use serde::{Deserialize, Serialize};

/// An inclusive range of 0-based line indices owned by one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }

    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    #[must_use]
    pub const fn disjoint(&self, other: Self) -> bool {
        self.end < other.start || other.end < self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_and_disjointness() {
        let outer = LineSpan::new(2, 10);
        let inner = LineSpan::new(3, 5);
        let after = LineSpan::new(11, 12);

        assert!(outer.contains(inner));
        assert!(!inner.contains(outer));
        assert!(outer.disjoint(after));
        assert!(!outer.disjoint(inner));
        assert!(outer.contains_line(10));
        assert!(!outer.contains_line(11));
    }

    #[test]
    fn single_line_span() {
        let span = LineSpan::new(4, 4);
        assert_eq!(span.line_count(), 1);
        assert!(span.contains(span));
        assert!(!span.disjoint(span));
    }
}
