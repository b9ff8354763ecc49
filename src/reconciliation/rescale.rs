//! Proportional rescaling shared by cause breakdowns and hourly trip distances

/// Scale every selected value so the collection sums to `target`.
///
/// Each value is multiplied by `target / sum`. When the current sum is 0
/// there is no shape to scale and the entries are returned unchanged.
pub fn rescale_to_target<T, F>(mut entries: Vec<T>, mut value: F, target: f64) -> Vec<T>
where
    F: FnMut(&mut T) -> &mut f64,
{
    let sum: f64 = entries.iter_mut().map(|e| *value(e)).sum();
    if sum.abs() < f64::EPSILON || !sum.is_finite() {
        return entries;
    }

    let factor = target / sum;
    for entry in &mut entries {
        *value(entry) *= factor;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_sums_to_target() {
        let scaled = rescale_to_target(vec![1.0, 3.0], |v| v, 8.0);
        assert_eq!(scaled, vec![2.0, 6.0]);
    }

    #[test]
    fn test_rescale_zero_sum_is_noop() {
        let scaled = rescale_to_target(vec![0.0, 0.0], |v| v, 5.0);
        assert_eq!(scaled, vec![0.0, 0.0]);
    }

    #[test]
    fn test_rescale_selects_field() {
        #[derive(Debug, PartialEq)]
        struct Row {
            label: &'static str,
            hours: f64,
        }
        let rows = vec![
            Row { label: "a", hours: 0.5 },
            Row { label: "b", hours: 1.5 },
        ];
        let scaled = rescale_to_target(rows, |r| &mut r.hours, 1.0);
        assert_eq!(scaled[0].label, "a");
        assert!((scaled[0].hours - 0.25).abs() < 1e-12);
        assert!((scaled[1].hours - 0.75).abs() < 1e-12);
    }
}
