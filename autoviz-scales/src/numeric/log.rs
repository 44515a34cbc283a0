/// Domain construction for base-10 logarithmic axes.
///
/// All adjustments happen in log space, so "zero" means the exponent zero (a data value
/// of 1) and padding is a fraction of the number of decades shown.
#[derive(Clone, Debug, PartialEq)]
pub struct LogNumericScale {
    log_start: f64,
    log_end: f64,
}

impl LogNumericScale {
    /// Build from a strictly positive data domain
    pub fn new(domain: (f64, f64)) -> Self {
        let (start, end) = if domain.0 <= domain.1 {
            domain
        } else {
            (domain.1, domain.0)
        };
        let mut log_start = start.log10();
        let mut log_end = end.log10();
        if log_start == log_end {
            log_start -= 0.5;
            log_end += 0.5;
        }
        Self { log_start, log_end }
    }

    /// Domain in data units
    pub fn get_domain(&self) -> (f64, f64) {
        (pow10(self.log_start), pow10(self.log_end))
    }

    /// Domain as exponents
    pub fn get_log_domain(&self) -> (f64, f64) {
        (self.log_start, self.log_end)
    }

    pub fn decades(&self) -> f64 {
        self.log_end - self.log_start
    }

    /// Extend down to a data value of 1 when the added whitespace is at most `tolerance`
    pub fn include_zero(mut self, tolerance: f64) -> Self {
        if self.log_start > 0.0 && self.log_start / self.log_end <= tolerance {
            self.log_start = 0.0;
        } else if self.log_end < 0.0 && self.log_end / self.log_start <= tolerance {
            self.log_end = 0.0;
        }
        self
    }

    /// Pad each side by a fraction of the decades shown without crossing a data value of 1
    pub fn pad(mut self, pad_fraction: [f64; 2]) -> Self {
        let decades = self.decades();
        let start = self.log_start - pad_fraction[0] * decades;
        let end = self.log_end + pad_fraction[1] * decades;
        self.log_start = if self.log_start >= 0.0 && start < 0.0 {
            0.0
        } else {
            start
        };
        self.log_end = if self.log_end <= 0.0 && end > 0.0 {
            0.0
        } else {
            end
        };
        self
    }

    /// Extends the domain outwards to whole powers of ten
    pub fn nice(mut self) -> Self {
        if self.log_start.is_nan() || self.log_end.is_nan() {
            return self;
        }
        self.log_start = self.log_start.floor();
        self.log_end = self.log_end.ceil();
        self
    }

    /// Powers of ten inside the domain, subdivided by 2 and 5 when few decades are shown
    /// and thinned to roughly `count` when many are
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let first = self.log_start.floor() as i32;
        let last = self.log_end.ceil() as i32;
        let (lo, hi) = self.get_domain();
        let within = |v: f64| v >= lo * (1.0 - 1e-9) && v <= hi * (1.0 + 1e-9);

        if self.decades() < 3.0 {
            return (first..=last)
                .flat_map(|k| [1.0, 2.0, 5.0].map(|m| m * pow10(k as f64)))
                .filter(|v| within(*v))
                .collect();
        }

        let every = ((self.decades() / count.max(1) as f64).ceil() as usize).max(1);
        (first..=last)
            .filter(|k| k.rem_euclid(every as i32) == 0)
            .map(|k| pow10(k as f64))
            .filter(|v| within(*v))
            .collect()
    }
}

fn pow10(exponent: f64) -> f64 {
    if exponent.fract() == 0.0 {
        10.0_f64.powi(exponent as i32)
    } else {
        10.0_f64.powf(exponent)
    }
}
