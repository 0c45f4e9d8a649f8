use crate::host::ElementId;

/// Count-up animation of one numeric stat.
///
/// Each [`step`](Self::step) adds `target / steps`. Targets with a
/// fractional part render with two decimals; whole targets render as
/// integers and end with a trailing `+`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCounter {
    element: ElementId,
    target: f64,
    current: f64,
    increment: f64,
    decimals: bool,
    done: bool,
}

impl StatCounter {
    pub fn new(element: ElementId, target: f64, steps: u32) -> Self {
        Self {
            element,
            target,
            current: 0.0,
            increment: target / f64::from(steps.max(1)),
            decimals: target.fract() != 0.0,
            done: false,
        }
    }

    /// Leading number of a stat's text: `"150+"` is 150, `"3.85 GPA"` is
    /// 3.85. Text that does not start with a number yields `None`.
    pub fn parse_target(text: &str) -> Option<f64> {
        let text = text.trim_start();
        let mut end = 0;
        let mut seen_digit = false;
        let mut seen_dot = false;

        for (index, ch) in text.char_indices() {
            match ch {
                '+' | '-' if index == 0 => {}
                '0'..='9' => seen_digit = true,
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            end = index + ch.len_utf8();
        }

        if !seen_digit {
            return None;
        }
        text[..end].trim_end_matches('.').parse().ok()
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances one tick and returns the text to display.
    pub fn step(&mut self) -> String {
        if self.done {
            return self.final_text();
        }
        self.current += self.increment;
        if self.current >= self.target {
            self.done = true;
            return self.final_text();
        }
        if self.decimals {
            format!("{:.2}", self.current)
        } else {
            format!("{}", self.current.round())
        }
    }

    /// Jumps to the end and returns the final text.
    pub fn finish(&mut self) -> String {
        self.current = self.target;
        self.done = true;
        self.final_text()
    }

    pub fn final_text(&self) -> String {
        if self.decimals {
            format!("{:.2}", self.target)
        } else {
            format!("{}+", self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_target_reads_leading_number() {
        assert_eq!(StatCounter::parse_target("150+"), Some(150.0));
        assert_eq!(StatCounter::parse_target("  3.85 GPA"), Some(3.85));
        assert_eq!(StatCounter::parse_target("12."), Some(12.0));
        assert_eq!(StatCounter::parse_target("1,200"), Some(1.0));
        assert_eq!(StatCounter::parse_target("-4"), Some(-4.0));
        assert_eq!(StatCounter::parse_target("years"), None);
        assert_eq!(StatCounter::parse_target("."), None);
        assert_eq!(StatCounter::parse_target(""), None);
    }

    #[test]
    fn whole_target_counts_in_integers_and_ends_with_plus() {
        let mut counter = StatCounter::new(ElementId(0), 150.0, 50);
        assert_eq!(counter.step(), "3");
        assert_eq!(counter.step(), "6");
        let mut last = String::new();
        while !counter.is_done() {
            last = counter.step();
        }
        assert_eq!(last, "150+");
    }

    #[test]
    fn fractional_target_uses_two_decimals() {
        let mut counter = StatCounter::new(ElementId(0), 3.85, 50);
        assert_eq!(counter.step(), "0.08");
        assert_eq!(counter.finish(), "3.85");
        assert!(counter.is_done());
        assert_eq!(counter.step(), "3.85");
    }

    #[test]
    fn reaches_target_within_step_count() {
        let mut counter = StatCounter::new(ElementId(0), 42.0, 50);
        let ticks = std::iter::from_fn(|| (!counter.is_done()).then(|| counter.step())).count();
        assert!(ticks <= 51);
        assert_eq!(counter.final_text(), "42+");
    }

    #[test]
    fn zero_target_finishes_on_first_step() {
        let mut counter = StatCounter::new(ElementId(0), 0.0, 50);
        assert_eq!(counter.step(), "0+");
        assert!(counter.is_done());
    }
}
