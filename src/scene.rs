use crate::camera;
use crate::decode::{Error, Parser};
use crate::khr_lights_punctual;
use crate::math;
use crate::mesh;
use crate::root::{Index, Root};
use crate::skin;
use crate::Extras;

/// A node in the node hierarchy.
///
/// A node either holds an explicit `matrix` or a TRS decomposition; absent
/// TRS members default to the identity.
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// The parent node, written once during reference fixup.
    pub parent: Option<Index<Node>>,
    /// The children of this node.
    pub children: Vec<Index<Node>>,
    /// The mesh instantiated by this node, when declared.
    pub mesh: Option<Index<mesh::Mesh>>,
    /// The skin referenced by this node, when declared.
    pub skin: Option<Index<skin::Skin>>,
    /// The camera referenced by this node, when declared.
    pub camera: Option<Index<camera::Camera>>,
    /// The `KHR_lights_punctual` light referenced by this node, when
    /// declared.
    pub light: Option<Index<khr_lights_punctual::Light>>,
    /// The weights of the instantiated morph target, when declared.
    pub weights: Vec<f32>,
    /// XYZ translation.
    pub translation: Option<[f32; 3]>,
    /// XYZW unit quaternion rotation, where `w` is the scalar.
    pub rotation: Option<[f32; 4]>,
    /// XYZ scale.
    pub scale: Option<[f32; 3]>,
    /// Explicit column-major transform matrix; takes precedence over TRS.
    pub matrix: Option<[f32; 16]>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

/// The root nodes of a renderable scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// The root nodes of the scene. Each entry is enforced as in-range and
    /// parentless during reference fixup.
    pub nodes: Vec<Index<Node>>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Node {
    /// Returns the node's local transform as a column-major matrix.
    ///
    /// The explicit matrix wins when present; otherwise the TRS members are
    /// composed as `translation * rotation * scale` with identity defaults.
    pub fn transform_local(&self) -> [f32; 16] {
        match self.matrix {
            Some(matrix) => matrix,
            None => math::compose_trs(
                self.translation.unwrap_or([0.0, 0.0, 0.0]),
                self.rotation.unwrap_or([0.0, 0.0, 0.0, 1.0]),
                self.scale.unwrap_or([1.0, 1.0, 1.0]),
            ),
        }
    }

    /// Returns the node's world transform by accumulating ancestor local
    /// transforms through the parent back-links.
    pub fn transform_world(&self, root: &Root) -> [f32; 16] {
        let mut matrix = self.transform_local();
        let mut parent = self.parent;
        // The walk is bounded by the node count to guard against malformed
        // parent cycles.
        let mut remaining = root.nodes.len();
        while let Some(index) = parent {
            let ancestor = match root.get(index) {
                Some(ancestor) if remaining > 0 => ancestor,
                _ => break,
            };
            matrix = math::multiply(&ancestor.transform_local(), &matrix);
            parent = ancestor.parent;
            remaining -= 1;
        }
        matrix
    }

    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut node = Node::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "name" => node.name = Some(p.string()?),
                "children" => node.children = p.index_vec()?,
                "mesh" => node.mesh = Some(p.index()?),
                "skin" => node.skin = Some(p.index()?),
                "camera" => node.camera = Some(p.index()?),
                "translation" => {
                    let mut translation = [0.0; 3];
                    p.float_array(&mut translation)?;
                    node.translation = Some(translation);
                }
                "rotation" => {
                    let mut rotation = [0.0, 0.0, 0.0, 1.0];
                    p.float_array(&mut rotation)?;
                    node.rotation = Some(rotation);
                }
                "scale" => {
                    let mut scale = [1.0; 3];
                    p.float_array(&mut scale)?;
                    node.scale = Some(scale);
                }
                "matrix" => {
                    let mut matrix = math::identity();
                    p.float_array(&mut matrix)?;
                    node.matrix = Some(matrix);
                }
                "weights" => node.weights = p.float_vec()?,
                "extensions" => {
                    let extensions = p.begin_object()?;
                    for _ in 0..extensions {
                        match p.key()? {
                            "KHR_lights_punctual" => {
                                let light_members = p.begin_object()?;
                                for _ in 0..light_members {
                                    match p.key()? {
                                        "light" => node.light = Some(p.index()?),
                                        _ => p.skip()?,
                                    }
                                }
                            }
                            _ => p.skip()?,
                        }
                    }
                }
                "extras" => node.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(node)
    }
}

impl Scene {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut scene = Scene::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "name" => scene.name = Some(p.string()?),
                "nodes" => scene.nodes = p.index_vec()?,
                "extras" => scene.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(scene)
    }
}
