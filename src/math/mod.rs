/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 homogeneous transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Extracts the translation column (rows 0-2, column 3) of a homogeneous matrix.
#[must_use]
pub fn translation_of(matrix: &Matrix4) -> Point3 {
    Point3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

/// Builds a pure translation matrix.
#[must_use]
pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4 {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}
