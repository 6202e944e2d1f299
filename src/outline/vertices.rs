use super::edges::EdgeMask;

/// Integer vertex in the marker frame.
pub type Vertex = (i32, i32);

/// Collects one vertex per edge pixel.
///
/// The mask is flipped along both axes and then transposed, so the pixel at
/// `(row, col)` becomes the vertex `(width - 1 - col, height - 1 - row)`.
/// Combined with the angle convention in [`super::order`], this makes the
/// ascending-angle walk counter-clockwise. Vertices come out in row-major
/// order of the transformed mask.
pub fn find_vertices(mask: &EdgeMask) -> Vec<Vertex> {
    let width = mask.width();
    let height = mask.height();
    let mut vertices = Vec::with_capacity(mask.edge_count());
    for i in 0..width {
        for j in 0..height {
            if mask.get(height - 1 - j, width - 1 - i) {
                vertices.push((i as i32, j as i32));
            }
        }
    }
    vertices
}
