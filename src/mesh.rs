use crate::accessor;
use crate::decode::{Error, Parser};
use crate::material;
use crate::root::Index;
use crate::Extras;

/// The type of primitives to render.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// Corresponds to `GL_POINTS`.
    Points,
    /// Corresponds to `GL_LINES`.
    Lines,
    /// Corresponds to `GL_LINE_LOOP`.
    LineLoop,
    /// Corresponds to `GL_LINE_STRIP`.
    LineStrip,
    /// Corresponds to `GL_TRIANGLES`.
    #[default]
    Triangles,
    /// Corresponds to `GL_TRIANGLE_STRIP`.
    TriangleStrip,
    /// Corresponds to `GL_TRIANGLE_FAN`.
    TriangleFan,
}

/// Vertex attribute semantic tag.
///
/// The set index (`_0`, `_1`, ..) is carried separately on [`Attribute`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Semantic {
    /// The attribute name was not recognised; the verbatim name is still
    /// available on the attribute.
    #[default]
    Invalid,
    /// XYZ vertex positions.
    Position,
    /// XYZ vertex normals.
    Normal,
    /// XYZW vertex tangents where `w` indicates the handedness of the
    /// tangent basis.
    Tangent,
    /// UV texture co-ordinates.
    TexCoord,
    /// RGB or RGBA vertex color.
    Color,
    /// Joint indices.
    Joints,
    /// Joint weights.
    Weights,
}

/// A single vertex attribute of a primitive or morph target.
#[derive(Clone, Debug)]
pub struct Attribute {
    /// The verbatim attribute name.
    pub name: String,
    /// The classified semantic tag.
    pub semantic: Semantic,
    /// The set index parsed from a trailing `_<integer>`, 0 when absent.
    pub set: u32,
    /// The accessor providing the attribute data.
    pub accessor: Index<accessor::Accessor>,
}

/// A morph target: deltas over a subset of a primitive's attributes.
#[derive(Clone, Debug, Default)]
pub struct MorphTarget {
    /// The displaced attributes.
    pub attributes: Vec<Attribute>,
}

/// Geometry to be rendered with the given material.
#[derive(Clone, Debug, Default)]
pub struct Primitive {
    /// The topology to render with.
    pub mode: Mode,
    /// The vertex attributes.
    pub attributes: Vec<Attribute>,
    /// The accessor providing vertex indices, when indexed.
    pub indices: Option<Index<accessor::Accessor>>,
    /// The material to apply, when declared.
    pub material: Option<Index<material::Material>>,
    /// An ordered list of morph targets.
    pub targets: Vec<MorphTarget>,
    /// Optional application specific data.
    pub extras: Extras,
}

/// A set of primitives to be rendered.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// The primitives of the mesh.
    pub primitives: Vec<Primitive>,
    /// Morph target weights, one per target of the primitives.
    pub weights: Vec<f32>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Mode {
    fn from_gl_enum(value: u64) -> Option<Self> {
        use self::Mode::*;
        match value {
            0 => Some(Points),
            1 => Some(Lines),
            2 => Some(LineLoop),
            3 => Some(LineStrip),
            4 => Some(Triangles),
            5 => Some(TriangleStrip),
            6 => Some(TriangleFan),
            _ => None,
        }
    }
}

impl Semantic {
    /// Classifies an attribute name into a tag plus set index.
    pub fn classify(name: &str) -> (Semantic, u32) {
        let (prefix, suffix) = match name.find('_') {
            Some(underscore) => (&name[..underscore], Some(&name[underscore + 1..])),
            None => (name, None),
        };
        let semantic = match prefix {
            "POSITION" => Semantic::Position,
            "NORMAL" => Semantic::Normal,
            "TANGENT" => Semantic::Tangent,
            "TEXCOORD" => Semantic::TexCoord,
            "COLOR" => Semantic::Color,
            "JOINTS" => Semantic::Joints,
            "WEIGHTS" => Semantic::Weights,
            _ => Semantic::Invalid,
        };
        let set = match (semantic, suffix) {
            (Semantic::Invalid, _) | (_, None) => 0,
            (_, Some(suffix)) => suffix.parse().unwrap_or(0),
        };
        (semantic, set)
    }
}

/// Decodes an `attributes` dictionary into an ordered attribute list.
fn decode_attributes(p: &mut Parser<'_>) -> Result<Vec<Attribute>, Error> {
    let members = p.begin_object()?;
    let mut attributes = Vec::with_capacity(members);
    for _ in 0..members {
        let name = p.key_string()?;
        let (semantic, set) = Semantic::classify(&name);
        attributes.push(Attribute {
            name,
            semantic,
            set,
            accessor: p.index()?,
        });
    }
    Ok(attributes)
}

impl Primitive {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut primitive = Primitive::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "mode" => {
                    if let Some(mode) = Mode::from_gl_enum(p.unsigned()? as u64) {
                        primitive.mode = mode;
                    }
                }
                "indices" => primitive.indices = Some(p.index()?),
                "material" => primitive.material = Some(p.index()?),
                "attributes" => primitive.attributes = decode_attributes(p)?,
                "targets" => {
                    let targets = p.begin_array()?;
                    primitive.targets.reserve(targets);
                    for _ in 0..targets {
                        primitive.targets.push(MorphTarget {
                            attributes: decode_attributes(p)?,
                        });
                    }
                }
                "extras" => primitive.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(primitive)
    }
}

impl Mesh {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut mesh = Mesh::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "name" => mesh.name = Some(p.string()?),
                "primitives" => {
                    let primitives = p.begin_array()?;
                    mesh.primitives.reserve(primitives);
                    for _ in 0..primitives {
                        mesh.primitives.push(Primitive::decode(p)?);
                    }
                }
                "weights" => mesh.weights = p.float_vec()?,
                "extras" => mesh.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(mesh)
    }
}
