use crate::array;

/// Domain construction for linear axes.
///
/// Adjustments are applied in call order; the usual sequence is
/// `expand_degenerate → include_zero → pad → nice`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearNumericScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearNumericScale {
    pub fn new(domain: (f64, f64)) -> Self {
        let (start, end) = if domain.0 <= domain.1 {
            domain
        } else {
            (domain.1, domain.0)
        };
        Self {
            domain_start: start,
            domain_end: end,
        }
    }

    pub fn get_domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn span(&self) -> f64 {
        self.domain_end - self.domain_start
    }

    /// Widen a zero-width domain so that it has a usable extent
    pub fn expand_degenerate(mut self) -> Self {
        if self.domain_start == self.domain_end {
            let value = self.domain_start;
            let half = if value == 0.0 { 1.0 } else { value.abs() * 0.1 };
            self.domain_start = value - half;
            self.domain_end = value + half;
        }
        self
    }

    /// Extend the domain to zero when the added whitespace is at most `tolerance`
    /// of the resulting span
    pub fn include_zero(mut self, tolerance: f64) -> Self {
        let (start, end) = (self.domain_start, self.domain_end);
        if start > 0.0 {
            if start / end <= tolerance {
                self.domain_start = 0.0;
            }
        } else if end < 0.0 && end / start <= tolerance {
            self.domain_end = 0.0;
        }
        self
    }

    /// Pad each side by a fraction of the span without crossing zero
    pub fn pad(mut self, pad_fraction: [f64; 2]) -> Self {
        let span = self.span();
        let start = self.domain_start - pad_fraction[0] * span;
        let end = self.domain_end + pad_fraction[1] * span;
        self.domain_start = if self.domain_start >= 0.0 && start < 0.0 {
            0.0
        } else {
            start
        };
        self.domain_end = if self.domain_end <= 0.0 && end > 0.0 {
            0.0
        } else {
            end
        };
        self
    }

    /// Extends the domain to nice round numbers for the given tick count
    pub fn nice(mut self, count: f64) -> Self {
        if self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
        {
            return self;
        }

        let (mut start, mut stop) = (self.domain_start, self.domain_end);
        let mut prestep = 0.0;
        let mut max_iter = 10;

        while max_iter > 0 {
            let step = array::tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = step;
            max_iter -= 1;
        }

        self.domain_start = start;
        self.domain_end = stop;
        self
    }

    /// Snap the domain outwards to multiples of `step`
    pub fn snap_to_step(mut self, step: f64) -> Self {
        if step > 0.0 && step.is_finite() {
            self.domain_start = (self.domain_start / step).floor() * step;
            self.domain_end = (self.domain_end / step).ceil() * step;
        }
        self
    }

    pub fn ticks(&self, count: f64) -> Vec<f64> {
        array::ticks(self.domain_start, self.domain_end, count)
    }

    /// Evenly stepped ticks from the domain start, e.g. bin boundaries
    pub fn stepped_ticks(&self, step: f64) -> Vec<f64> {
        if !(step > 0.0) || !step.is_finite() {
            return vec![self.domain_start, self.domain_end];
        }
        let n = (self.span() / step).round() as usize;
        (0..=n)
            .map(|i| self.domain_start + i as f64 * step)
            .collect()
    }
}
