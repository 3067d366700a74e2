use serde::{Deserialize, Serialize};

pub const DEFAULT_BIN_COUNT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram with a vertical reference at zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub min: f64,
    pub max: f64,
    pub zero_reference: f64,
}

impl Histogram {
    /// Bin `values` into `bin_count` equal-width bins over `[min, max]`.
    ///
    /// Non-finite values are ignored. The last bin is closed on the right.
    /// A single distinct value widens the range by 0.5 on both sides and an
    /// empty sample spans `[0, 1]`.
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        let bin_count = bin_count.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (min, max) = match finite.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        }) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let width = (max - min) / bin_count as f64;
        let mut counts = vec![0usize; bin_count];

        for value in &finite {
            let index = (((value - min) / width) as usize).min(bin_count - 1);
            counts[index] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + width * i as f64,
                end: if i + 1 == bin_count { max } else { min + width * (i + 1) as f64 },
                count,
            })
            .collect();

        Self {
            bins,
            min,
            max,
            zero_reference: 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
