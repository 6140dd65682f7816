use glam::Vec3;

/// CPU-side triangle geometry.
///
/// Stores typed vertex data directly. Deformation passes rewrite the
/// position array in place each frame, so the data stays on the CPU and
/// an upload flag tells the host when the GPU copy went stale.
#[derive(Debug, Clone)]
pub struct Geometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    needs_upload: bool,
}

impl Geometry {
    /// Creates geometry from positions and triangle indices.
    ///
    /// Normals are allocated zeroed; call [`Geometry::compute_vertex_normals`]
    /// to fill them.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let normals = vec![Vec3::ZERO; positions.len()];
        Self {
            positions,
            normals,
            indices,
            needs_upload: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable access to positions for in-place deformation.
    ///
    /// Callers that rewrite positions must also call
    /// [`Geometry::mark_needs_upload`].
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Computes smooth per-vertex normals from the triangle faces.
    ///
    /// Area weighted: the cross product magnitude is twice the triangle
    /// area, so accumulating unnormalized face normals weights large
    /// faces more.
    pub fn compute_vertex_normals(&mut self) {
        let pos_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; pos_count];

        let positions = &self.positions;
        let mut accumulate_triangle = |i0: usize, i1: usize, i2: usize| {
            // Out-of-bounds guard against malformed index data
            if i0 >= pos_count || i1 >= pos_count || i2 >= pos_count {
                return;
            }

            let v0 = positions[i0];
            let v1 = positions[i1];
            let v2 = positions[i2];

            let face_normal = (v1 - v0).cross(v2 - v0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        };

        if self.indices.is_empty() {
            // Non-indexed: every 3 vertices form a triangle
            for i in (0..pos_count).step_by(3) {
                if i + 2 < pos_count {
                    accumulate_triangle(i, i + 1, i + 2);
                }
            }
        } else {
            for chunk in self.indices.chunks_exact(3) {
                accumulate_triangle(chunk[0] as usize, chunk[1] as usize, chunk[2] as usize);
            }
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }

        self.normals = normals;
        self.needs_upload = true;
    }

    /// Marks the vertex data stale so a host re-uploads it.
    #[inline]
    pub fn mark_needs_upload(&mut self) {
        self.needs_upload = true;
    }

    #[inline]
    #[must_use]
    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    /// Reads and clears the upload flag. Hosts call this once per frame
    /// after copying vertex data out.
    #[inline]
    pub fn take_needs_upload(&mut self) -> bool {
        std::mem::take(&mut self.needs_upload)
    }
}
