//! Progress derived from the completion set

/// Completed count over total count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Completed modules
    pub completed: usize,
    /// All modules in the guide
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Percentage in [0, 100]; a guide with no modules is at 0%
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed.min(self.total) as f64 / self.total as f64 * 100.0
    }

    /// Fraction in [0, 1], for gauges
    pub fn ratio(&self) -> f64 {
        self.percent() / 100.0
    }

    /// Percentage rounded to the nearest integer
    pub fn rounded(&self) -> u8 {
        self.percent().round() as u8
    }

    /// Gauge label, e.g. "75% Complete"
    pub fn label(&self) -> String {
        format!("{}% Complete", self.rounded())
    }

    /// The completion banner shows once every module is done
    pub fn banner_visible(&self) -> bool {
        self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn four_module_walkthrough() {
        let p = Progress::new(0, 4);
        assert_eq!(p.label(), "0% Complete");
        assert!(!p.banner_visible());

        let p = Progress::new(2, 4);
        assert_eq!(p.rounded(), 50);
        assert!(!p.banner_visible());

        let p = Progress::new(4, 4);
        assert_eq!(p.rounded(), 100);
        assert!(p.banner_visible());

        let p = Progress::new(3, 4);
        assert_eq!(p.rounded(), 75);
        assert!(!p.banner_visible());
    }

    #[test]
    fn zero_modules_is_zero_percent() {
        let p = Progress::new(0, 0);
        assert_eq!(p.percent(), 0.0);
        assert_eq!(p.rounded(), 0);
        assert!(p.banner_visible());
    }

    #[test]
    fn thirds_round_to_nearest() {
        assert_eq!(Progress::new(1, 3).rounded(), 33);
        assert_eq!(Progress::new(2, 3).rounded(), 67);
    }

    proptest! {
        #[test]
        fn percent_matches_formula(total in 1usize..200, completed_seed in 0usize..200) {
            let completed = completed_seed % (total + 1);
            let p = Progress::new(completed, total);

            prop_assert!((0.0..=100.0).contains(&p.percent()));
            let exact = 100.0 * completed as f64 / total as f64;
            prop_assert!((f64::from(p.rounded()) - exact).abs() <= 0.5 + 1e-9);
            prop_assert_eq!(p.banner_visible(), completed == total);
        }
    }
}
