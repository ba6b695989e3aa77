use crate::vertex::Vertex;
use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;
use rayon::prelude::*;

pub const VERTICES_PER_QUAD: usize = 4;
pub const TRIANGLES_PER_QUAD: usize = 2;
pub const INDICES_PER_QUAD: usize = TRIANGLES_PER_QUAD * 3;

/// Pre-sized, flat vertex and index streams for a mesh made of independent quads.
///
/// Every quad owns a block of [`VERTICES_PER_QUAD`] vertices and [`INDICES_PER_QUAD`] indices.
/// The buffer does no computation on its own: generators write into it,
/// either through indexed writes or through the disjoint [`QuadWindow`]s handed out by [`QuadMeshBuffer::quads_mut`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMeshBuffer {
	positions: Vec<[f32; 3]>,
	normals: Vec<[f32; 3]>,
	tangents: Vec<[f32; 4]>,
	tex_coords: Vec<[f32; 2]>,
	indices: Vec<u32>,
	bounds: Aabb3d,
}

impl QuadMeshBuffer {
	/// Allocates zeroed streams sized for `quad_count` quads.
	pub fn new(quad_count: usize, bounds: Aabb3d) -> Self {
		Self::with_counts(quad_count * VERTICES_PER_QUAD, quad_count * INDICES_PER_QUAD, bounds)
	}

	/// Allocates zeroed streams with explicit vertex and index counts.
	///
	/// Nothing checks that the counts describe whole quads; generators validate sizing before writing.
	pub fn with_counts(vertex_count: usize, index_count: usize, bounds: Aabb3d) -> Self {
		Self {
			positions: vec![[0.0; 3]; vertex_count],
			normals: vec![[0.0; 3]; vertex_count],
			tangents: vec![[0.0; 4]; vertex_count],
			tex_coords: vec![[0.0; 2]; vertex_count],
			indices: vec![0; index_count],
			bounds,
		}
	}

	pub fn vertex_count(&self) -> usize {
		self.positions.len()
	}

	pub fn index_count(&self) -> usize {
		self.indices.len()
	}

	/// Number of whole quads the vertex streams can hold.
	pub fn quad_count(&self) -> usize {
		self.vertex_count() / VERTICES_PER_QUAD
	}

	pub fn bounds(&self) -> Aabb3d {
		self.bounds
	}

	pub fn set_bounds(&mut self, bounds: Aabb3d) {
		self.bounds = bounds;
	}

	pub fn set_vertex(&mut self, index: usize, vertex: Vertex) {
		self.positions[index] = vertex.position.to_array();
		self.normals[index] = vertex.normal.to_array();
		self.tangents[index] = vertex.tangent.to_array();
		self.tex_coords[index] = vertex.tex_coord0.to_array();
	}

	/// Writes the triangle at `index`, i.e. index slots `index * 3 .. index * 3 + 3`.
	pub fn set_triangle(&mut self, index: usize, triangle: [u32; 3]) {
		let start = index * 3;
		self.indices[start..start + 3].copy_from_slice(&triangle);
	}

	pub fn vertex(&self, index: usize) -> Vertex {
		Vertex {
			position: Vec3::from_array(self.positions[index]),
			normal: Vec3::from_array(self.normals[index]),
			tangent: Vec4::from_array(self.tangents[index]),
			tex_coord0: Vec2::from_array(self.tex_coords[index]),
		}
	}

	pub fn positions(&self) -> &[[f32; 3]] {
		&self.positions
	}

	pub fn normals(&self) -> &[[f32; 3]] {
		&self.normals
	}

	pub fn tangents(&self) -> &[[f32; 4]] {
		&self.tangents
	}

	pub fn tex_coords(&self) -> &[[f32; 2]] {
		&self.tex_coords
	}

	pub fn indices(&self) -> &[u32] {
		&self.indices
	}

	/// The index stream grouped into triangles.
	pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
		self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
	}

	/// Splits every stream into non-overlapping per-quad windows for parallel writes.
	///
	/// Window `i` covers vertices `i * 4 .. i * 4 + 4` and indices `i * 6 .. i * 6 + 6`.
	pub fn quads_mut(&mut self) -> impl IndexedParallelIterator<Item = QuadWindow<'_>> {
		self.positions
			.par_chunks_mut(VERTICES_PER_QUAD)
			.zip(self.normals.par_chunks_mut(VERTICES_PER_QUAD))
			.zip(self.tangents.par_chunks_mut(VERTICES_PER_QUAD))
			.zip(self.tex_coords.par_chunks_mut(VERTICES_PER_QUAD))
			.zip(self.indices.par_chunks_mut(INDICES_PER_QUAD))
			.enumerate()
			.map(|(index, ((((positions, normals), tangents), tex_coords), indices))| QuadWindow {
				index,
				positions,
				normals,
				tangents,
				tex_coords,
				indices,
			})
	}

	pub(crate) fn into_streams(
		self,
	) -> (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<[f32; 4]>, Vec<[f32; 2]>, Vec<u32>) {
		(self.positions, self.normals, self.tangents, self.tex_coords, self.indices)
	}
}

/// Mutable view over exactly one quad's slots in every stream.
pub struct QuadWindow<'a> {
	index: usize,
	positions: &'a mut [[f32; 3]],
	normals: &'a mut [[f32; 3]],
	tangents: &'a mut [[f32; 4]],
	tex_coords: &'a mut [[f32; 2]],
	indices: &'a mut [u32],
}

impl QuadWindow<'_> {
	/// The quad index this window belongs to.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Index of the first vertex of this quad in the whole buffer.
	pub fn vertex_base(&self) -> u32 {
		(self.index * VERTICES_PER_QUAD) as u32
	}

	/// Writes one of the quad's corners, `corner` in `0..4`.
	pub fn set_vertex(&mut self, corner: usize, vertex: &Vertex) {
		self.positions[corner] = vertex.position.to_array();
		self.normals[corner] = vertex.normal.to_array();
		self.tangents[corner] = vertex.tangent.to_array();
		self.tex_coords[corner] = vertex.tex_coord0.to_array();
	}

	/// Writes one of the quad's triangles, `triangle` in `0..2`.
	///
	/// Corners are quad-local and get offset by [`QuadWindow::vertex_base`].
	pub fn set_triangle(&mut self, triangle: usize, corners: [u32; 3]) {
		debug_assert!(corners.iter().all(|c| (*c as usize) < VERTICES_PER_QUAD));
		let base = self.vertex_base();
		let start = triangle * 3;
		self.indices[start..start + 3].copy_from_slice(&corners.map(|c| base + c));
	}
}
