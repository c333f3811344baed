use std::fmt;

/// How an average rating is drawn as five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarDisplay {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
    tenths: Option<u32>,
}

impl StarDisplay {
    pub const TOTAL: u8 = 5;

    /// Out-of-range and non-finite averages are clamped to 0..=5.
    pub fn new(average: f64) -> Self {
        let rating = if average.is_finite() {
            average.clamp(0.0, f64::from(Self::TOTAL))
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = rating - rating.floor() >= 0.5;
        let empty = Self::TOTAL - full - u8::from(half);
        let tenths = (rating > 0.0).then(|| (rating * 10.0).round() as u32);
        Self {
            full,
            half,
            empty,
            tenths,
        }
    }

    /// `"4.3"`, or `"No Ratings"` for a resource nobody has reviewed.
    pub fn label(&self) -> String {
        match self.tenths {
            Some(t) => format!("{}.{}", t / 10, t % 10),
            None => "No Ratings".to_string(),
        }
    }
}

impl fmt::Display for StarDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.full {
            f.write_str("★")?;
        }
        if self.half {
            f.write_str("⯪")?;
        }
        for _ in 0..self.empty {
            f.write_str("☆")?;
        }
        write!(f, " {}", self.label())
    }
}
