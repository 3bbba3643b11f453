//! Integration tests for compar-decomp
//!
//! End-to-end factorization scenarios on raw matrices and on rank-2
//! component arrays.

use compar_core::{ComponentArray, Frame};
use compar_decomp::{component_svd, khatri_rao, khatri_rao_components, truncated_svd, DecompError};
use scirs2_core::ndarray_ext::{array, Array1, Array2};

fn reconstruct(u: &Array2<f64>, s: &Array1<f64>, vt: &Array2<f64>) -> Array2<f64> {
    u.dot(&Array2::from_diag(s)).dot(vt)
}

#[test]
fn test_khatri_rao_of_single_columns_end_to_end() {
    // 2x1 and 3x1 inputs: the 6x1 flattened outer product, row-major.
    let a = array![[2.0], [3.0]];
    let b = array![[1.0], [10.0], [100.0]];
    let c = khatri_rao(&[a.view(), b.view()]).unwrap();

    assert_eq!(c.shape(), &[6, 1]);
    assert_eq!(
        c.column(0).to_vec(),
        vec![2.0, 20.0, 200.0, 3.0, 30.0, 300.0]
    );
}

#[test]
fn test_khatri_rao_components_end_to_end() {
    let a = ComponentArray::<f64>::from_array(
        Frame::new(["x", "y"]),
        array![[1.0, 2.0], [3.0, 4.0]].into_dyn(),
        0,
        None,
    )
    .unwrap();
    let b = ComponentArray::<f64>::from_array(
        Frame::new(["u", "v"]),
        array![[5.0, 6.0], [7.0, 8.0]].into_dyn(),
        0,
        None,
    )
    .unwrap();

    let c = khatri_rao_components(&[&a, &b]).unwrap();
    assert_eq!(c.shape(), &[4, 2]);
    assert_eq!(c.start_index(), &[0, 0]);
    assert_eq!(
        c.data()
            .iter()
            .copied()
            .collect::<Vec<_>>(),
        vec![5.0, 12.0, 7.0, 16.0, 15.0, 24.0, 21.0, 32.0]
    );

    // Column counts must agree across inputs.
    let wide = ComponentArray::<f64>::from_array(
        Frame::new(["p"]),
        array![[1.0, 2.0, 3.0]].into_dyn(),
        0,
        None,
    )
    .unwrap();
    assert!(matches!(
        khatri_rao_components(&[&a, &wide]).unwrap_err(),
        DecompError::ColumnMismatch { .. }
    ));
}

#[test]
fn test_truncated_svd_recovers_rank_deficient_matrix() {
    // Rank 2 by construction: row 3 = row 1 + row 2.
    let a = array![
        [1.0, 2.0, 3.0],
        [4.0, 5.0, 6.0],
        [5.0, 7.0, 9.0],
        [2.0, 4.0, 6.0]
    ];
    let (u, s, vt) = truncated_svd(&a.view(), Some(2)).unwrap();

    assert_eq!(u.shape(), &[4, 2]);
    assert_eq!(s.len(), 2);
    assert_eq!(vt.shape(), &[2, 3]);
    assert!(s[0] >= s[1] && s[1] > 0.0);

    let approx = reconstruct(&u, &s, &vt);
    for (lhs, rhs) in approx.iter().zip(a.iter()) {
        assert!((lhs - rhs).abs() < 1e-6, "{} vs {}", lhs, rhs);
    }
}

#[test]
fn test_component_svd_end_to_end() {
    let c = ComponentArray::<f64>::from_array(
        Frame::new(["e1", "e2", "e3"]),
        array![[2.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 1.0]].into_dyn(),
        0,
        None,
    )
    .unwrap();

    let (u, s, vt) = component_svd(&c, None).unwrap();
    assert!((s[0] - 2.0).abs() < 1e-10);
    assert!((s[1] - 1.0).abs() < 1e-10);
    assert!(s[2].abs() < 1e-10);

    let approx = reconstruct(&u, &s, &vt);
    for (lhs, rhs) in approx.iter().zip(c.data().iter()) {
        assert!((lhs - rhs).abs() < 1e-10);
    }
}
