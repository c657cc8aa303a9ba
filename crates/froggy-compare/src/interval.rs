/// A closed numeric interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `value ± uncertainty`.
    pub fn from_value_uncertainty(value: f64, uncertainty: f64) -> Self {
        Self::new(value - uncertainty, value + uncertainty)
    }

    /// True when the intervals share at least one point; touching counts.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_uncertainty_bounds() {
        let interval = Interval::from_value_uncertainty(15.0, 5.0);
        assert_eq!(interval, Interval::new(10.0, 20.0));
    }

    #[test]
    fn touching_intervals_overlap() {
        assert!(Interval::new(10.0, 20.0).overlaps(&Interval::new(20.0, 25.0)));
        assert!(!Interval::new(10.0, 20.0).overlaps(&Interval::new(25.0, 30.0)));
    }
}
