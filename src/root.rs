use std::{fmt, marker};

use crate::accessor::Accessor;
use crate::animation::Animation;
use crate::asset::Asset;
use crate::buffer::{self, Buffer, Payload};
use crate::camera::Camera;
use crate::image::Image;
use crate::khr_lights_punctual::Light;
use crate::material::Material;
use crate::mesh::Mesh;
use crate::scene::{Node, Scene};
use crate::skin::Skin;
use crate::texture::{Sampler, Texture};
use crate::{Extras, FileType};

/// Helper trait for retrieving top-level objects by a universal identifier.
pub trait Get<T> {
    /// Retrieves a single value at the given index.
    fn get(&self, index: Index<T>) -> Option<&T>;
}

/// Represents an offset into an array of type `T` owned by the root glTF
/// document.
pub struct Index<T>(u32, marker::PhantomData<T>);

/// The root object of a decoded glTF 2.0 document.
///
/// Every cross-reference in the graph is an [`Index`] into one of the sibling
/// arrays below; reference fixup has checked each of them against the owning
/// array, so lookups through [`Root::get`] cannot dangle.
#[derive(Clone, Debug, Default)]
pub struct Root {
    /// Metadata about the asset.
    pub asset: Asset,
    /// An array of accessors.
    pub accessors: Vec<Accessor>,
    /// An array of keyframe animations.
    pub animations: Vec<Animation>,
    /// An array of buffers.
    pub buffers: Vec<Buffer>,
    /// An array of buffer views.
    pub buffer_views: Vec<buffer::View>,
    /// An array of cameras.
    pub cameras: Vec<Camera>,
    /// An array of images.
    pub images: Vec<Image>,
    /// An array of `KHR_lights_punctual` lights.
    pub lights: Vec<Light>,
    /// An array of materials.
    pub materials: Vec<Material>,
    /// An array of meshes.
    pub meshes: Vec<Mesh>,
    /// An array of nodes.
    pub nodes: Vec<Node>,
    /// An array of samplers.
    pub samplers: Vec<Sampler>,
    /// An array of scenes.
    pub scenes: Vec<Scene>,
    /// An array of skins.
    pub skins: Vec<Skin>,
    /// An array of textures.
    pub textures: Vec<Texture>,
    /// The default scene, when declared.
    pub scene: Option<Index<Scene>>,
    /// Names of glTF extensions used somewhere in this asset.
    pub extensions_used: Vec<String>,
    /// Names of glTF extensions required to properly load this asset.
    pub extensions_required: Vec<String>,
    /// Optional application specific data on the root object.
    pub extras: Extras,
    /// The container form the document arrived in.
    pub file_type: FileType,
    pub(crate) json: Vec<u8>,
    pub(crate) bin: Option<Vec<u8>>,
}

impl Root {
    /// Returns a single item from the root object.
    pub fn get<T>(&self, index: Index<T>) -> Option<&T>
    where
        Self: Get<T>,
    {
        (self as &dyn Get<T>).get(index)
    }

    /// The preserved document JSON bytes.
    ///
    /// For binary glTF this is the JSON chunk; for standard glTF it is the
    /// entire input. Extras spans index into these bytes.
    pub fn json(&self) -> &[u8] {
        &self.json
    }

    /// The GLB BIN chunk, when the document carried one.
    pub fn bin(&self) -> Option<&[u8]> {
        self.bin.as_deref()
    }

    /// Returns the raw JSON slice an `extras` span refers to, or `None` when
    /// no `extras` member was present.
    pub fn extras_json(&self, extras: &Extras) -> Option<&str> {
        if extras.is_present() {
            let slice = self.json.get(extras.start..extras.end)?;
            std::str::from_utf8(slice).ok()
        } else {
            None
        }
    }

    /// Returns the loaded payload bytes of a buffer, resolving the payload
    /// tag. `None` until [`Root::load_buffers`] has populated the buffer.
    ///
    /// [`Root::load_buffers`]: crate::Root::load_buffers
    pub fn buffer_data(&self, index: Index<Buffer>) -> Option<&[u8]> {
        let buffer = self.get(index)?;
        match buffer.payload {
            Payload::Unloaded => None,
            Payload::Bin => self
                .bin
                .as_deref()
                .and_then(|bin| bin.get(..buffer.byte_length)),
            Payload::Owned(ref data) => Some(&data[..]),
        }
    }
}

impl<T> Index<T> {
    /// Creates a new `Index` representing an offset into an array containing
    /// `T`.
    pub fn new(value: u32) -> Self {
        Index(value, marker::PhantomData)
    }

    /// Returns the internal offset value.
    pub fn value(&self) -> usize {
        self.0 as usize
    }
}

impl<T> Clone for Index<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Index<T> {}

impl<T> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Index<T> {}

impl<T> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> fmt::Display for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! impl_get {
    ($ty:ty, $field:ident) => {
        impl Get<$ty> for Root {
            fn get(&self, index: Index<$ty>) -> Option<&$ty> {
                self.$field.get(index.value())
            }
        }
    };
}

impl_get!(Accessor, accessors);
impl_get!(Animation, animations);
impl_get!(Buffer, buffers);
impl_get!(buffer::View, buffer_views);
impl_get!(Camera, cameras);
impl_get!(Image, images);
impl_get!(Light, lights);
impl_get!(Material, materials);
impl_get!(Mesh, meshes);
impl_get!(Node, nodes);
impl_get!(Sampler, samplers);
impl_get!(Scene, scenes);
impl_get!(Skin, skins);
impl_get!(Texture, textures);
