use crate::accessor;
use crate::decode::{Error, Parser};
use crate::root::Index;
use crate::scene;
use crate::Extras;

/// Joints and matrices defining a skin.
#[derive(Clone, Debug, Default)]
pub struct Skin {
    /// The nodes used as joints in this skin. Each entry is enforced as
    /// in-range during reference fixup.
    pub joints: Vec<Index<scene::Node>>,
    /// The node used as the skeleton root, when declared.
    pub skeleton: Option<Index<scene::Node>>,
    /// The accessor containing one inverse bind matrix per joint, when
    /// declared.
    pub inverse_bind_matrices: Option<Index<accessor::Accessor>>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Skin {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut skin = Skin::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "joints" => skin.joints = p.index_vec()?,
                "skeleton" => skin.skeleton = Some(p.index()?),
                "inverseBindMatrices" => skin.inverse_bind_matrices = Some(p.index()?),
                "name" => skin.name = Some(p.string()?),
                "extras" => skin.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(skin)
    }
}
