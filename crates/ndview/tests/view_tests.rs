#[cfg(test)]
mod tests {
    use ndview::{prelude::*, InvariantError, Storage};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn filled(value: f64) -> Matrix {
        ArrayView::from_elem([10, 10], value)
    }

    #[test]
    fn test_scalar_arithmetic() {
        init();
        let a = filled(2.0);
        let cases = [
            (&a + 1.0, 3.0),
            (&a - 1.0, 1.0),
            (&a * 2.0, 4.0),
            (&a / 2.0, 1.0),
        ];
        for (result, expected) in cases {
            assert!(result.values().all(|x| x == expected));
            assert!(!result.shares(&a));
        }
    }

    #[test]
    fn test_view_arithmetic() {
        init();
        let a = filled(2.0);
        let cases = [(&a + &a, 4.0), (&a - &a, 0.0), (&a * &a, 4.0), (&a / &a, 1.0)];
        for (result, expected) in cases {
            assert!(result.values().all(|x| x == expected));
        }
    }

    #[test]
    fn test_compound_arithmetic() {
        init();
        let a = filled(2.0);

        let mut b = a.copy();
        b += 1.0;
        assert!(b.values().all(|x| x == 3.0));
        b -= &a;
        assert!(b.values().all(|x| x == 1.0));
        b *= 4.0;
        b /= &a;
        assert!(b.values().all(|x| x == 2.0));

        let mut alias = a.clone();
        alias *= &a;
        assert!(a.values().all(|x| x == 4.0));
    }

    #[test]
    fn test_stack_rows() {
        init();
        let rows = [0.0, 1.0, 2.0].map(|v| ArrayView::<1>::from_elem([100], v));
        let stacked = ArrayView::<2>::stack(&rows);
        assert_eq!(stacked.shape(), shape![3, 100]);
        assert!(rows.iter().all(|row| !stacked.shares(row)));
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(stacked.at(i).to_vec(), row.to_vec());
        }
    }

    #[test]
    fn test_rebind_and_copy() {
        init();
        let mut a = filled(1.0);
        let b = filled(5.0);
        assert!(!a.copy().shares(&a));
        a.rebind(&b);
        assert!(a.is(&b));
        a.set([3, 3], 0.0);
        assert_eq!(b[[3, 3]].get(), 0.0);
    }

    #[test]
    fn test_scalar_conversion() {
        let a = ArrayView::scalar(3.14);
        assert_eq!(f64::from(a.clone()), 3.14);
        a[[]].set(1.0);
        assert!(a == 1.0);
        assert_eq!(f64::from(a), 1.0);
    }

    #[test]
    fn test_assign_row() {
        init();
        let a = ArrayView::<2>::zeros([10, 10]);
        let b = ArrayView::<1>::zeros([10]);
        b.fill(1.0);
        a.at(0).assign(&b);
        assert_eq!(a[[0, 0]].get(), 1.0);
        assert_eq!(a.at(0).to_vec(), vec![1.0; 10]);
        assert_eq!(a.at(1).to_vec(), vec![0.0; 10]);
    }

    #[test]
    fn test_shared_storage_across_views() {
        init();
        let storage = Storage::<f32>::zeros(24);
        let cube = ArrayView::from_storage(Selector::full([2, 3, 4]), storage.clone());
        let flat = ArrayView::from_storage(Selector::full([24]), storage);

        cube.at(1).at(2).fill(1.0);
        let ones = flat.values().enumerate().filter(|(_, x)| *x == 1.0);
        assert_eq!(ones.map(|(n, _)| n).collect::<Vec<_>>(), vec![20, 21, 22, 23]);
        assert!(cube.shares(&flat));
        assert_eq!(flat.storage().handle_count(), 2);
    }

    #[test]
    fn test_fallible_entry_points() {
        let a = ArrayView::<2>::zeros([2, 2]);
        let b = ArrayView::<2>::zeros([2, 3]);
        assert_eq!(
            a.binary(&b, BinaryOp::Sub).unwrap_err(),
            InvariantError::ShapeMismatch { axis: 1, a: 2, b: 3 }
        );
        assert!(ArrayView::<2>::try_stack(&[]).is_err());
        assert!(ArrayView::<2>::try_from_vec([3, 3], vec![0.0; 8]).is_err());
    }

    #[test]
    fn test_rank4_chain() {
        init();
        let a = ArrayView::<4>::from_vec([2, 3, 4, 5], (0..120).map(|x| x as f64).collect());
        let b = a.select(|s| s.within(1..2).collapse(2).within(0..4).within_step(0..5, 2));
        assert_eq!(b.shape(), shape![1, 4, 3]);
        assert_eq!(b.at(0).at(3).to_vec(), vec![115.0, 117.0, 119.0]);
        assert_eq!(b[[0, 0, 1]].get(), a[[1, 2, 0, 2]].get());
    }
}
