use crate::buffer::QuadMeshBuffer;
use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, MeshVertexAttribute, PrimitiveTopology};
use bevy::prelude::*;

/// The vertex streams handed to a mesh consumer, one attribute per stream, all 32-bit floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexStream {
	Position,
	Normal,
	Tangent,
	TexCoord0,
}

impl VertexStream {
	pub const ALL: [VertexStream; 4] =
		[VertexStream::Position, VertexStream::Normal, VertexStream::Tangent, VertexStream::TexCoord0];

	/// Number of f32 components per vertex.
	pub fn dimension(&self) -> usize {
		match self {
			VertexStream::Position | VertexStream::Normal => 3,
			VertexStream::Tangent => 4,
			VertexStream::TexCoord0 => 2,
		}
	}

	/// Stream slot the attribute is bound to.
	pub fn stream(&self) -> usize {
		match self {
			VertexStream::Position => 0,
			VertexStream::Normal => 1,
			VertexStream::Tangent => 2,
			VertexStream::TexCoord0 => 3,
		}
	}

	pub fn stride(&self) -> usize {
		self.dimension() * std::mem::size_of::<f32>()
	}

	pub fn attribute(&self) -> MeshVertexAttribute {
		match self {
			VertexStream::Position => Mesh::ATTRIBUTE_POSITION,
			VertexStream::Normal => Mesh::ATTRIBUTE_NORMAL,
			VertexStream::Tangent => Mesh::ATTRIBUTE_TANGENT,
			VertexStream::TexCoord0 => Mesh::ATTRIBUTE_UV_0,
		}
	}
}

impl QuadMeshBuffer {
	/// Raw bytes of one vertex stream, tightly packed with [`VertexStream::stride`].
	pub fn stream_bytes(&self, stream: VertexStream) -> &[u8] {
		match stream {
			VertexStream::Position => bytemuck::cast_slice(self.positions()),
			VertexStream::Normal => bytemuck::cast_slice(self.normals()),
			VertexStream::Tangent => bytemuck::cast_slice(self.tangents()),
			VertexStream::TexCoord0 => bytemuck::cast_slice(self.tex_coords()),
		}
	}

	/// Raw bytes of the 32-bit index stream.
	pub fn index_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(self.indices())
	}

	/// Hands the streams over to a triangle-list [`Mesh`] with a single sub-mesh covering every index.
	///
	/// Bounds are not scanned from the positions; callers wanting the conservative bound use [`QuadMeshBuffer::bounds`] first.
	pub fn into_mesh(self) -> Mesh {
		let vertex_count = self.vertex_count();
		let index_count = self.index_count();
		let (positions, normals, tangents, tex_coords, indices) = self.into_streams();

		let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
		mesh.insert_attribute(VertexStream::Position.attribute(), positions);
		mesh.insert_attribute(VertexStream::Normal.attribute(), normals);
		mesh.insert_attribute(VertexStream::Tangent.attribute(), tangents);
		mesh.insert_attribute(VertexStream::TexCoord0.attribute(), tex_coords);
		mesh.insert_indices(Indices::U32(indices));

		log::debug!("Built mesh with {} vertices and {} indices", vertex_count, index_count);
		mesh
	}
}

impl From<QuadMeshBuffer> for Mesh {
	fn from(buffer: QuadMeshBuffer) -> Self {
		buffer.into_mesh()
	}
}
