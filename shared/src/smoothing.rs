//! Moving-average smoothing for forecast series

/// Smooth `samples` with a moving average of `window` samples.
///
/// Element `i` is the mean of `samples[max(0, i - floor(W/2)) .. min(N, i + ceil(W/2))]`.
/// Windows are truncated at both ends rather than padded, so boundary values
/// average over fewer samples. A window of 0 is treated as 1.
pub fn moving_average(samples: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let behind = window / 2;
    let ahead = window - behind;

    (0..samples.len())
        .map(|i| {
            let start = i.saturating_sub(behind);
            let end = (i + ahead).min(samples.len());
            let slice = &samples[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}
