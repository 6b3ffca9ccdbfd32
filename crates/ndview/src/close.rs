use crate::{ArrayDType, ArrayView, Selector};

impl<const R: usize, T: ArrayDType> ArrayView<R, T> {
    /// Checks that every element of `self` is within `atol + rtol * |other|`
    /// of the matching element of `other`.
    pub fn all_close(&self, other: &Self, atol: f64, rtol: f64) -> anyhow::Result<()> {
        if self.shape() != other.shape() {
            anyhow::bail!("Shape mismatch {:?} != {:?}", self.shape(), other.shape())
        }

        let mut stats = CloseStats::new(atol, rtol);
        Selector::full(*self.shape().inner())
            .indices()
            .zip(self.values().zip(other.values()))
            .for_each(|(idx, (a, b))| {
                let (a, b) = (a.to_f64().unwrap_or(f64::NAN), b.to_f64().unwrap_or(f64::NAN));
                stats.update(a, b, idx);
            });

        if stats.fail_count > 0 {
            anyhow::bail!(
                "{} samples not close - AVGE={} MAE={} at {:?}",
                stats.fail_count,
                stats.avg_error(),
                stats.max_abs_error,
                stats.max_abs_error_idxs,
            );
        }
        log::debug!(
            "All close - AVGE={} MAE={} at {:?}",
            stats.avg_error(),
            stats.max_abs_error,
            stats.max_abs_error_idxs
        );
        Ok(())
    }
}

struct CloseStats<const R: usize> {
    total_error: f64,
    max_abs_error: f64,
    max_abs_error_idxs: Option<[usize; R]>,
    element_count: usize,
    fail_count: usize,
    atol: f64,
    rtol: f64,
}

impl<const R: usize> CloseStats<R> {
    fn new(atol: f64, rtol: f64) -> Self {
        Self {
            total_error: 0.0,
            max_abs_error: 0.0,
            max_abs_error_idxs: None,
            element_count: 0,
            fail_count: 0,
            atol,
            rtol,
        }
    }

    fn update(&mut self, a: f64, b: f64, index: [usize; R]) {
        let abs_diff = (a - b).abs();
        self.total_error += abs_diff;
        self.element_count += 1;

        if abs_diff > self.max_abs_error {
            self.max_abs_error = abs_diff;
            self.max_abs_error_idxs = Some(index);
        }

        if !self.is_close(a, b, abs_diff) {
            self.fail_count += 1;
        }
    }

    fn avg_error(&self) -> f64 {
        if self.element_count == 0 {
            return 0.0;
        }
        self.total_error / self.element_count as f64
    }

    fn is_close(&self, a: f64, b: f64, abs_diff: f64) -> bool {
        (a.is_nan() && b.is_nan())
            || (a.is_infinite() && b.is_infinite() && a.signum() == b.signum())
            || abs_diff <= self.atol + self.rtol * b.abs()
    }
}

#[cfg(test)]
mod tests {
    use crate::ArrayView;

    #[test]
    fn test_all_close() {
        let a = ArrayView::<2>::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let b = ArrayView::<2>::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0 + 1e-7]);
        assert!(a.all_close(&b, 1e-6, 1e-6).is_ok());

        b.set([0, 1], 2.5);
        let err = a.all_close(&b, 1e-6, 1e-6).unwrap_err();
        assert!(err.to_string().starts_with("1 samples not close"));
        assert!(err.to_string().ends_with("at Some([0, 1])"));
    }

    #[test]
    fn test_all_close_shape_mismatch() {
        let a = ArrayView::<2>::zeros([2, 3]);
        let b = ArrayView::<2>::zeros([3, 2]);
        assert!(a.all_close(&b, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_all_close_nan_and_empty() {
        let a = ArrayView::<1>::from(vec![f64::NAN, f64::INFINITY]);
        assert!(a.all_close(&a.copy(), 0.0, 0.0).is_ok());
        let e = ArrayView::<2>::zeros([0, 3]);
        assert!(e.all_close(&e, 0.0, 0.0).is_ok());
    }
}
