use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{
    access::{Collaborative, Collaborator, SharedAccess},
    enums::{
        project_statuses::ProjectStatus,
        three_d::{LightType, Object3DType, SceneCategory},
    },
    geometry::Vector3,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    pub poly_count: u64,
    pub vertex_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object3D {
    pub id: Uuid,
    pub name: String,
    pub object_type: Object3DType,
    pub model_url: Option<String>,
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub mesh: MeshStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub id: Uuid,
    pub name: String,
    pub light_type: LightType,
    pub color: String,
    pub intensity: f64,
    pub position: Vector3,
    pub rotation: Vector3,
    pub cast_shadow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vector3,
    pub rotation: Vector3,
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 1.6, 5.0),
            rotation: Vector3::default(),
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub object_count: usize,
    pub light_count: usize,
    pub total_poly_count: u64,
    pub total_vertex_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene3DEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub collaborators: Vec<Collaborator>,
    pub is_public: bool,
    pub is_template: bool,
    pub category: SceneCategory,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub objects: Vec<Object3D>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub metadata: SceneMetadata,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scene3DEntity {
    pub fn new(owner_id: Uuid, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            owner_id,
            collaborators: Vec::new(),
            is_public: false,
            is_template: false,
            category: SceneCategory::default(),
            tags: Vec::new(),
            thumbnail_url: None,
            objects: Vec::new(),
            lights: Vec::new(),
            camera: Camera::default(),
            metadata: SceneMetadata::default(),
            status: ProjectStatus::Completed,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_object(&mut self, object: Object3D, now: DateTime<Utc>) -> &Object3D {
        self.metadata.total_poly_count += object.mesh.poly_count;
        self.metadata.total_vertex_count += object.mesh.vertex_count;
        self.objects.push(object);
        self.metadata.object_count = self.objects.len();
        self.updated_at = now;
        &self.objects[self.objects.len() - 1]
    }

    pub fn remove_object(&mut self, object_id: Uuid, now: DateTime<Utc>) -> Option<Object3D> {
        let index = self.objects.iter().position(|o| o.id == object_id)?;
        let removed = self.objects.remove(index);
        self.metadata.total_poly_count = self
            .metadata
            .total_poly_count
            .saturating_sub(removed.mesh.poly_count);
        self.metadata.total_vertex_count = self
            .metadata
            .total_vertex_count
            .saturating_sub(removed.mesh.vertex_count);
        self.metadata.object_count = self.objects.len();
        self.updated_at = now;
        Some(removed)
    }

    pub fn add_light(&mut self, light: Light, now: DateTime<Utc>) -> &Light {
        self.lights.push(light);
        self.metadata.light_count = self.lights.len();
        self.updated_at = now;
        &self.lights[self.lights.len() - 1]
    }

    /// Private, non-template copy owned by `owner_id`. Sharing is not carried over.
    pub fn clone_for(&self, owner_id: Uuid, name: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.unwrap_or_else(|| format!("{} (Clone)", self.name)),
            owner_id,
            collaborators: Vec::new(),
            is_public: false,
            is_template: false,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

impl SharedAccess for Scene3DEntity {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn collaborators(&self) -> &[Collaborator] {
        &self.collaborators
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

impl Collaborative for Scene3DEntity {
    fn collaborators_mut(&mut self) -> &mut Vec<Collaborator> {
        &mut self.collaborators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(poly_count: u64, vertex_count: u64) -> Object3D {
        Object3D {
            id: Uuid::new_v4(),
            name: "crate".to_string(),
            object_type: Object3DType::Primitive,
            model_url: None,
            position: Vector3::default(),
            rotation: Vector3::default(),
            scale: Vector3::ONE,
            visible: true,
            cast_shadow: true,
            receive_shadow: true,
            mesh: MeshStats {
                poly_count,
                vertex_count,
            },
        }
    }

    #[test]
    fn object_counters_track_children() {
        let mut scene = Scene3DEntity::new(Uuid::new_v4(), "Room".to_string(), Utc::now());
        scene.add_object(object(100, 300), Utc::now());
        let id = scene.add_object(object(50, 120), Utc::now()).id;

        assert_eq!(scene.metadata.object_count, 2);
        assert_eq!(scene.metadata.total_poly_count, 150);
        assert_eq!(scene.metadata.total_vertex_count, 420);

        scene.remove_object(id, Utc::now()).unwrap();
        assert_eq!(scene.metadata.object_count, 1);
        assert_eq!(scene.metadata.total_poly_count, 100);
        assert!(scene.remove_object(id, Utc::now()).is_none());
    }

    #[test]
    fn clone_is_private_and_owned_by_caller() {
        let mut template = Scene3DEntity::new(Uuid::new_v4(), "Studio".to_string(), Utc::now());
        template.is_public = true;
        template.is_template = true;
        template.add_object(object(10, 30), Utc::now());
        let new_owner = Uuid::new_v4();

        let copy = template.clone_for(new_owner, None, Utc::now());

        assert_ne!(copy.id, template.id);
        assert_eq!(copy.name, "Studio (Clone)");
        assert_eq!(copy.owner_id, new_owner);
        assert!(!copy.is_public && !copy.is_template);
        assert_eq!(copy.objects, template.objects);
        assert_eq!(copy.metadata, template.metadata);
    }
}
