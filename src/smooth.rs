use crate::math::IteratorAvg;

/// Moving average with window `2 * half_width + 1`. Interior values get the
/// centered window mean; the first and last `half_width` values get the mean
/// of the first (respectively last) `half_width`-sized block. The crude
/// boundary handling is intentional and kept as-is.
#[must_use]
pub fn smooth(y: &[f64], half_width: usize) -> Vec<f64> {
    let n = y.len();
    let w = half_width.min(n);
    if w == 0 {
        return y.to_vec();
    }
    let mut out = y.to_vec();
    for i in w..n.saturating_sub(w) {
        out[i] = y[i - w..=i + w].iter().copied().avg().unwrap_or(y[i]);
    }
    let head = y[..w].iter().copied().avg().unwrap_or(0.0);
    let tail = y[n - w..].iter().copied().avg().unwrap_or(0.0);
    for i in 0..w {
        out[i] = head;
        out[n - 1 - i] = tail;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_f64_near;
    use std::iter;

    fn assert_all_near(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len());
        iter::zip(got, want).for_each(|(&got, &want)| {
            assert_f64_near!(got, want);
        });
    }

    #[test]
    fn test_half_width_zero_is_identity() {
        let y = [1.0, 2.0, 4.0, 8.0];
        assert_all_near(&smooth(&y, 0), &y);
    }

    #[test]
    fn test_interior_window_means() {
        let y = [1.0, 2.0, 4.0, 8.0, 16.0];
        let got = smooth(&y, 1);
        let want = [1.0, 7.0 / 3.0, 14.0 / 3.0, 28.0 / 3.0, 16.0];
        assert_all_near(&got, &want);
    }

    #[test]
    fn test_boundary_block_means() {
        let y = [1.0, 3.0, 5.0, 7.0, 9.0, 11.0];
        let got = smooth(&y, 2);
        assert_f64_near!(got[0], 2.0);
        assert_f64_near!(got[1], 2.0);
        assert_f64_near!(got[2], 5.0);
        assert_f64_near!(got[3], 7.0);
        assert_f64_near!(got[4], 10.0);
        assert_f64_near!(got[5], 10.0);
    }

    #[test]
    fn test_window_larger_than_input() {
        let y = [1.0, 2.0];
        let got = smooth(&y, 5);
        assert_eq!(got.len(), 2);
        assert!(smooth(&[], 3).is_empty());
    }
}
