//! Closed form volumes of tetrahedra and hexahedra

// external crates
use nalgebra::Matrix4;

/// Split of a hexahedron into five tetrahedra by local corner index
///
/// Corners follow the VTK hexahedron ordering, i.e. `0-3` counter-clockwise on
/// the bottom face and `4-7` directly above them. The four outer tetrahedra cut
/// off alternating corners and the fifth is the central one between them.
///
/// ```text
///        7 ------- 6
///       /|        /|
///      4 ------- 5 |
///      | 3 ------|-2
///      |/        |/
///      0 ------- 1
/// ```
pub const HEX_TO_TETS: [[usize; 4]; 5] = [
    [1, 2, 3, 6],
    [0, 1, 3, 4],
    [1, 4, 5, 6],
    [3, 4, 6, 7],
    [1, 3, 4, 6],
];

/// Volume of a tetrahedron from its four vertices
///
/// Calculated as `|det(M)| / 6` where each row of `M` is `[x, y, z, 1]`, so the
/// vertex order does not matter.
///
/// ```rust
/// # use feapost_volume::tetrahedron_volume;
/// let unit = [
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 1.0],
/// ];
/// assert!((tetrahedron_volume(&unit) - 1.0 / 6.0).abs() < 1e-15);
/// ```
pub fn tetrahedron_volume(vertices: &[[f64; 3]; 4]) -> f64 {
    let [a, b, c, d] = vertices;

    #[rustfmt::skip]
    let m = Matrix4::new(
        a[0], a[1], a[2], 1.0,
        b[0], b[1], b[2], 1.0,
        c[0], c[1], c[2], 1.0,
        d[0], d[1], d[2], 1.0,
    );

    m.determinant().abs() / 6.0
}

/// Volume of a hexahedron from its eight corners in VTK order
///
/// Sum of the five tetrahedra in [HEX_TO_TETS].
pub fn hexahedron_volume(corners: &[[f64; 3]; 8]) -> f64 {
    HEX_TO_TETS
        .iter()
        .map(|tet| tetrahedron_volume(&tet.map(|i| corners[i])))
        .sum()
}
