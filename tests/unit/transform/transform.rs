use super::*;

#[test]
fn apply_checks_tuple_length() {
    let t = Transform::Identity { dim: 3 };
    assert!(matches!(
        t.apply(&[1.0, 2.0]),
        Err(TellusError::IllegalArgument(_))
    ));
    assert_eq!(t.apply(&[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn dims_follow_the_variant() {
    let t = Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 2.0, 3.0));
    assert_eq!(t.source_dim(), 3);
    assert_eq!(t.target_dim(), 3);

    let m = Transform::Matrix(MatrixTransform::identity(2).unwrap());
    assert_eq!(m.source_dim(), 2);
}

#[test]
fn is_identity_spots_numeric_identities() {
    assert!(Transform::Identity { dim: 2 }.is_identity());
    assert!(Transform::Matrix(MatrixTransform::identity(3).unwrap()).is_identity());
    assert!(
        Transform::GeocentricTranslation(GeocentricTranslation::new(0.0, 0.0, 0.0))
            .is_identity()
    );
    assert!(
        !Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 0.0, 0.0))
            .is_identity()
    );
}

#[test]
fn apply_batch_transforms_interleaved_tuples_in_place() {
    let t = Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 2.0, 3.0));
    let mut coords = vec![0.0, 0.0, 0.0, 10.0, 20.0, 30.0];
    t.apply_batch(&mut coords).unwrap();
    assert_eq!(coords, vec![1.0, 2.0, 3.0, 11.0, 22.0, 33.0]);
}

#[test]
fn apply_batch_rejects_ragged_arrays() {
    let t = Transform::Identity { dim: 3 };
    let mut coords = vec![0.0; 7];
    assert!(matches!(
        t.apply_batch(&mut coords),
        Err(TellusError::IllegalArgument(_))
    ));
}

#[test]
fn apply_batch_is_a_no_op_for_identities() {
    let t = Transform::Identity { dim: 2 };
    let mut coords = vec![1.0, 2.0, 3.0, 4.0];
    t.apply_batch(&mut coords).unwrap();
    assert_eq!(coords, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn large_batches_match_single_applies() {
    let t = Transform::Matrix(MatrixTransform::translation(&[0.5, -0.5]).unwrap());
    let points = PARALLEL_BATCH_THRESHOLD + 10;
    let mut coords: Vec<f64> = (0..points * 2).map(|i| i as f64).collect();
    let expected: Vec<f64> = coords
        .chunks(2)
        .flat_map(|p| t.apply(p).unwrap())
        .collect();

    t.apply_batch(&mut coords).unwrap();
    assert_eq!(coords, expected);
}

#[test]
fn inverse_round_trips_within_tolerance() {
    let chain = ConcatenatedTransform::create(
        Transform::GeocentricTranslation(GeocentricTranslation::new(12.5, -7.0, 3.25)),
        Transform::GeocentricTranslation(GeocentricTranslation::new(-1.0, 2.0, -3.0)),
    )
    .unwrap();
    let inv = chain.inverse().unwrap();

    let src = [1000.0, -2000.0, 3000.0];
    let there = chain.apply(&src).unwrap();
    let back = inv.apply(&there).unwrap();
    for (b, s) in back.iter().zip(src.iter()) {
        assert!(math::nearly_eq(*b, *s, 1e-6));
    }
}

#[test]
fn steps_of_an_elementary_transform_is_itself() {
    let t = Transform::GeocentricTranslation(GeocentricTranslation::new(1.0, 2.0, 3.0));
    assert_eq!(t.steps(), vec![t.clone()]);
}
