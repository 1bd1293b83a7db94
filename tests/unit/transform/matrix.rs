use super::*;

#[test]
fn identity_supports_dims_2_and_3_only() {
    assert_eq!(MatrixTransform::identity(2).unwrap().dim(), 2);
    assert_eq!(MatrixTransform::identity(3).unwrap().dim(), 3);
    assert!(matches!(
        MatrixTransform::identity(4),
        Err(TellusError::DimensionMismatch(_))
    ));
}

#[test]
fn translation_shifts_coordinates() {
    let t = MatrixTransform::translation(&[10.0, -2.0]).unwrap();
    let mut dst = [0.0; 2];
    t.apply(&[1.0, 1.0], &mut dst).unwrap();
    assert_eq!(dst, [11.0, -1.0]);

    let t = MatrixTransform::translation(&[1.0, 2.0, 3.0]).unwrap();
    let mut dst = [0.0; 3];
    t.apply(&[0.0, 0.0, 0.0], &mut dst).unwrap();
    assert_eq!(dst, [1.0, 2.0, 3.0]);
}

#[test]
fn row_major_round_trips() {
    let elements = [2.0, 0.0, 5.0, 0.0, 3.0, 7.0, 0.0, 0.0, 1.0];
    let t = MatrixTransform::from_row_major(2, &elements).unwrap();
    assert_eq!(t.to_row_major(), elements.to_vec());
}

#[test]
fn from_row_major_checks_element_count() {
    let err = MatrixTransform::from_row_major(2, &[1.0; 8]).unwrap_err();
    assert!(matches!(err, TellusError::DimensionMismatch(_)));
}

#[test]
fn scale_then_translate_applies_in_order() {
    // x' = 2x + 5, y' = 3y + 7 as one row-major affine matrix.
    let t =
        MatrixTransform::from_row_major(2, &[2.0, 0.0, 5.0, 0.0, 3.0, 7.0, 0.0, 0.0, 1.0])
            .unwrap();
    let mut dst = [0.0; 2];
    t.apply(&[1.0, 1.0], &mut dst).unwrap();
    assert_eq!(dst, [7.0, 10.0]);
}

#[test]
fn then_collapses_to_the_composed_product() {
    let scale =
        MatrixTransform::from_row_major(2, &[2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0])
            .unwrap();
    let shift = MatrixTransform::translation(&[1.0, 1.0]).unwrap();

    let composed = scale.then(&shift).unwrap();
    let mut dst = [0.0; 2];
    composed.apply(&[3.0, 4.0], &mut dst).unwrap();
    assert_eq!(dst, [7.0, 9.0]);
}

#[test]
fn then_rejects_mixed_dimensions() {
    let a = MatrixTransform::identity(2).unwrap();
    let b = MatrixTransform::identity(3).unwrap();
    assert!(matches!(
        a.then(&b),
        Err(TellusError::DimensionMismatch(_))
    ));
}

#[test]
fn inverse_undoes_the_transform() {
    let t =
        MatrixTransform::from_row_major(2, &[2.0, 0.0, 5.0, 0.0, 3.0, 7.0, 0.0, 0.0, 1.0])
            .unwrap();
    let inv = t.inverse().unwrap();

    let mut mid = [0.0; 2];
    t.apply(&[1.5, -2.5], &mut mid).unwrap();
    let mut back = [0.0; 2];
    inv.apply(&mid, &mut back).unwrap();

    assert!(math::nearly_eq(back[0], 1.5, 1e-9));
    assert!(math::nearly_eq(back[1], -2.5, 1e-9));
}

#[test]
fn singular_matrix_has_no_inverse() {
    let t = MatrixTransform::from_row_major(2, &[0.0; 9]).unwrap();
    assert!(matches!(
        t.inverse(),
        Err(TellusError::IllegalArgument(_))
    ));
}

#[test]
fn projective_point_at_infinity_is_rejected() {
    // Last row [0 1 0]: w = y, so points on y = 0 map to infinity.
    let t =
        MatrixTransform::from_row_major(2, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0])
            .unwrap();
    let mut dst = [0.0; 2];
    assert!(t.apply(&[3.0, 0.0], &mut dst).is_err());
    assert!(t.apply(&[3.0, 2.0], &mut dst).is_ok());
}

#[test]
fn is_identity_respects_tolerance() {
    assert!(MatrixTransform::identity(3).unwrap().is_identity(0.0));
    let near =
        MatrixTransform::from_row_major(2, &[1.0, 1e-12, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
            .unwrap();
    assert!(near.is_identity(1e-9));
    assert!(!near.is_identity(1e-15));
}
