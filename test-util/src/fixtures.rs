use bayesian_blocks::Float;
use rand::Rng;
use rand::distr::uniform::SampleUniform;

/// Events drawn uniformly within every `(start, end, count)` segment, sorted
pub fn piecewise_uniform_events<T>(rng: &mut impl Rng, segments: &[(T, T, usize)]) -> Vec<T>
where
    T: Float + SampleUniform,
{
    let mut events = Vec::with_capacity(segments.iter().map(|&(_, _, n)| n).sum());
    for &(start, end, n) in segments {
        events.extend((0..n).map(|_| rng.random_range(start..end)));
    }
    events.sort_by(|a, b| a.partial_cmp(b).unwrap());
    events
}

/// Fixed-width histogram of event arrivals, events outside of the bins are ignored
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub origin: f64,
    pub bin_width: f64,
    pub counts: Vec<f64>,
}

impl Histogram {
    pub fn new(arrivals: &[f64], origin: f64, bin_width: f64, num_bins: usize) -> Self {
        assert!(bin_width > 0.0, "bin width must be positive");
        let mut counts = vec![0.0; num_bins];
        for &t in arrivals {
            let i = ((t - origin) / bin_width).floor();
            if i >= 0.0 && (i as usize) < num_bins {
                counts[i as usize] += 1.0;
            }
        }
        Self {
            origin,
            bin_width,
            counts,
        }
    }

    pub fn widths(&self) -> Vec<f64> {
        vec![self.bin_width; self.counts.len()]
    }

    pub fn edges(&self) -> Vec<f64> {
        (0..=self.counts.len())
            .map(|i| self.origin + self.bin_width * i as f64)
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }
}
