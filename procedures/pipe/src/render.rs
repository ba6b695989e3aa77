use crate::segment::PipeSegment;
use bevy::prelude::*;

/// Hands a finished segment over to the renderer as a child of `root`.
///
/// The segment's buffer is moved into `meshes`, so a segment is spawned at most once per generation.
/// Decorations become children of the spawned entity. Returns `None` when the segment holds no mesh.
pub fn spawn_segment<M: Material>(
	commands: &mut Commands,
	meshes: &mut Assets<Mesh>,
	material: &MeshMaterial3d<M>,
	root: Entity,
	segment: &mut PipeSegment,
) -> Option<Entity> {
	let buffer = segment.take_mesh()?;
	let quad_count = buffer.quad_count();
	let mesh_handle = meshes.add(buffer.into_mesh());

	let entity = commands
		.spawn((
			Mesh3d(mesh_handle),
			material.clone(),
			segment.transform(),
			ChildOf(root),
		))
		.id();

	for decoration in segment.decorations() {
		commands.spawn((
			Name::new(decoration.label.clone()),
			decoration.transform,
			ChildOf(entity),
		));
	}

	log::debug!(
		"Spawned segment with {} quads and {} decorations at {:?}",
		quad_count,
		segment.decorations().len(),
		segment.transform().translation
	);

	Some(entity)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::PipeSettings;
	use crate::decoration::{Decoration, DecorationGenerator};
	use crate::segment::CurveParams;
	use bevy::ecs::world::CommandQueue;
	use rand::{RngCore, SeedableRng};
	use rand_pcg::Pcg64;

	struct PairGenerator;

	impl DecorationGenerator for PairGenerator {
		fn generate_decorations(
			&self,
			_segment: &PipeSegment,
			_rng: &mut dyn RngCore,
		) -> Vec<Decoration> {
			vec![
				Decoration::new("left", Transform::from_xyz(-0.5, 0.0, 0.0)),
				Decoration::new("right", Transform::from_xyz(0.5, 0.0, 0.0)),
			]
		}
	}

	#[test]
	fn test_spawn_moves_mesh_into_assets() {
		let mut world = World::new();
		let root = world.spawn(Transform::IDENTITY).id();
		let mut meshes = Assets::<Mesh>::default();
		let material = MeshMaterial3d::<StandardMaterial>(Handle::default());

		let mut segment = PipeSegment::new(PipeSettings::new().with_pipe_segment_count(6));
		segment.generate_with(CurveParams::new(5.0, 4)).expect("valid curve");
		segment.set_transform(Transform::from_xyz(1.0, 2.0, 3.0));

		let mut queue = CommandQueue::default();
		let entity = {
			let mut commands = Commands::new(&mut queue, &world);
			spawn_segment(&mut commands, &mut meshes, &material, root, &mut segment)
		}
		.expect("segment has a mesh");
		queue.apply(&mut world);

		assert_eq!(meshes.len(), 1);
		assert!(segment.mesh().is_none());
		assert_eq!(world.get::<ChildOf>(entity).map(ChildOf::parent), Some(root));
		assert_eq!(world.get::<Transform>(entity), Some(&Transform::from_xyz(1.0, 2.0, 3.0)));

		let mesh_handle = world.get::<Mesh3d>(entity).expect("mesh component");
		let mesh = meshes.get(&mesh_handle.0).expect("mesh asset");
		assert_eq!(mesh.count_vertices(), 4 * 6 * 4);

		// the buffer is gone, nothing left to spawn
		let mut commands = Commands::new(&mut queue, &world);
		assert!(spawn_segment(&mut commands, &mut meshes, &material, root, &mut segment).is_none());
	}

	#[test]
	fn test_spawn_attaches_decorations() {
		let mut world = World::new();
		let root = world.spawn(Transform::IDENTITY).id();
		let mut meshes = Assets::<Mesh>::default();
		let material = MeshMaterial3d::<StandardMaterial>(Handle::default());

		let generators: Vec<Box<dyn DecorationGenerator>> = vec![Box::new(PairGenerator)];
		let mut segment = PipeSegment::new(PipeSettings::new());
		segment
			.generate(&mut Pcg64::seed_from_u64(8), &generators)
			.expect("valid settings");

		let mut queue = CommandQueue::default();
		let entity = {
			let mut commands = Commands::new(&mut queue, &world);
			spawn_segment(&mut commands, &mut meshes, &material, root, &mut segment)
		}
		.expect("segment has a mesh");
		queue.apply(&mut world);

		let children = world.get::<Children>(entity).expect("decorations spawned");
		assert_eq!(children.len(), 2);

		let mut labels: Vec<String> = world
			.query::<(&Name, &ChildOf)>()
			.iter(&world)
			.filter(|(_, child_of)| child_of.parent() == entity)
			.map(|(name, _)| name.as_str().to_string())
			.collect();
		labels.sort();
		assert_eq!(labels, vec!["left".to_string(), "right".to_string()]);
	}
}
