use wgpu::Device;

use crate::assets::LoadedModel;
use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{Material, MaterialManager},
    scene::object::Mesh,
};

use super::object::Object;

/// Main scene containing objects, materials, and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Advances per-tick scene state
    ///
    /// Currently that is camera motion: one damping step plus the refreshed
    /// view projection uniform.
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    /// Adds every object and material from a loaded model to the scene
    ///
    /// Objects arrive with their node-hierarchy transforms already
    /// decomposed; geometry without normals gets smooth normals derived
    /// from its faces. GPU resources are created immediately, so this must
    /// run after the render engine exists.
    pub fn insert_model(&mut self, model: LoadedModel, device: &Device, queue: &wgpu::Queue) {
        for loaded in &model.materials {
            if self.material_manager.get_material(&loaded.name).is_some() {
                continue;
            }
            let mut material = Material::new(
                &loaded.name,
                loaded.base_color,
                loaded.metallic,
                loaded.roughness,
            );
            material.emissive = loaded.emissive;
            self.material_manager.add_material(material);
        }

        for loaded in model.objects {
            let mut meshes = Vec::with_capacity(loaded.meshes.len());
            for mesh_data in loaded.meshes {
                let normals = if !mesh_data.normals.is_empty()
                    && mesh_data.normals.len() == mesh_data.positions.len()
                {
                    mesh_data.normals
                } else {
                    Mesh::averaged_normals(&mesh_data.positions, &mesh_data.indices)
                };
                meshes.push(Mesh::new(mesh_data.positions, normals, mesh_data.indices));
            }

            let mut object = Object::new(loaded.name, meshes);
            object.position = loaded.position;
            object.rotation = loaded.rotation;
            object.scale = loaded.scale;
            object.parent_transform = loaded.parent_transform;
            if let Some(material_id) = &loaded.material {
                object.set_material(material_id);
            }
            object.init_gpu_resources(device);

            self.objects.push(object);
        }

        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Finds an object by exact, case-sensitive name
    ///
    /// Duplicated names resolve to the first match in insertion order. An
    /// empty query never matches; objects loaded from unnamed nodes carry
    /// an empty name and are unreachable by lookup.
    pub fn find_object(&self, name: &str) -> Option<&Object> {
        self.find_object_index(name).map(|index| &self.objects[index])
    }

    /// Index variant of [`find_object`] for callers that hold lookups
    /// across frames.
    ///
    /// [`find_object`]: Scene::find_object
    pub fn find_object_index(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.objects.iter().position(|object| object.name == name)
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }

        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Writes every object's current world matrix to its GPU buffer
    pub fn sync_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if no material is assigned or the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Gets mutable reference to an object by index
    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.index_count / 3).sum::<u32>())
            .sum();

        let total_vertices: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.vertex_count).sum::<u32>())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use cgmath::{Vector3, Zero};

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(5.0, 0.3, 0.1, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.5);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn test_find_object_matches_exact_name() {
        let mut scene = test_scene();
        scene.objects.push(Object::new("White_Fish", Vec::new()));
        scene.objects.push(Object::new("Purple_Fish", Vec::new()));

        assert_eq!(scene.find_object_index("Purple_Fish"), Some(1));
        assert!(scene.find_object("White_Fish").is_some());
    }

    #[test]
    fn test_find_object_is_case_sensitive() {
        let mut scene = test_scene();
        scene.objects.push(Object::new("White_Fish", Vec::new()));

        assert!(scene.find_object("white_fish").is_none());
        assert!(scene.find_object("WHITE_FISH").is_none());
    }

    #[test]
    fn test_find_object_returns_first_of_duplicates() {
        let mut scene = test_scene();
        scene.objects.push(Object::new("Fish", Vec::new()));
        scene.objects.push(Object::new("Fish", Vec::new()));

        assert_eq!(scene.find_object_index("Fish"), Some(0));
    }

    #[test]
    fn test_find_object_never_matches_empty_name() {
        let mut scene = test_scene();
        scene.objects.push(Object::new("", Vec::new()));

        assert!(scene.find_object("").is_none());
        assert_eq!(scene.find_object_index(""), None);
    }

    #[test]
    fn test_statistics_sum_mesh_counts() {
        let mut scene = test_scene();
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let mesh = Mesh::new(positions, normals, vec![0, 1, 2]);
        scene.objects.push(Object::new("tri", vec![mesh]));

        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 1);
        assert_eq!(stats.total_vertices, 3);
        assert_eq!(stats.total_triangles, 1);
    }
}
