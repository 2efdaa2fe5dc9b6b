//! Principal values of symmetric 3x3 tensors

// external crates
use nalgebra::Matrix3;

/// Eigenvalues of a symmetric tensor in descending order
///
/// The tensor is given by its 6 independent components in the order
/// `[xx, yy, zz, xy, xz, yz]`, which is how FEAP packs stresses and strains.
///
/// Components must be finite. NaN or infinite input gives meaningless values
/// rather than an error, so callers check first.
///
/// ```rust
/// # use feapost_refactor::symmetric_eigenvalues;
/// let principal = symmetric_eigenvalues(&[3.0, 1.0, 2.0, 0.0, 0.0, 0.0]);
/// for (value, expected) in principal.iter().zip([3.0, 2.0, 1.0]) {
///     assert!((value - expected).abs() < 1e-12);
/// }
/// ```
pub fn symmetric_eigenvalues(components: &[f64; 6]) -> [f64; 3] {
    let [xx, yy, zz, xy, xz, yz] = *components;

    #[rustfmt::skip]
    let tensor = Matrix3::new(
        xx, xy, xz,
        xy, yy, yz,
        xz, yz, zz,
    );

    let mut values: [f64; 3] = tensor.symmetric_eigenvalues().into();
    values.sort_by(|a, b| b.total_cmp(a));
    values
}
