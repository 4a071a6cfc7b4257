//! glTF 2.0 loading without the weight.
//!
//! `gltf-lite` decodes a glTF document (the standard `.gltf` JSON form or
//! the binary `.glb` container) into a fully linked, flat object graph and
//! validates its structural integrity. The JSON layer is a purpose-built
//! flat tokeniser plus a token-walking decoder, so the only work done per
//! document is the work the document requires.
//!
//! Cross-references in glTF are integer indices into sibling arrays of the
//! root object. The graph keeps them that way: every reference is a typed
//! [`Index`] that is bounds-checked once, during the reference fixup pass
//! that runs at the end of [`parse`]. After a successful parse, present
//! references always dereference.
//!
//! # Basic usage
//!
//! ```
//! let root = gltf_lite::parse(br#"{"asset":{"version":"2.0"}}"#)?;
//! assert_eq!(root.asset.version.as_deref(), Some("2.0"));
//! # Ok::<(), gltf_lite::Error>(())
//! ```
//!
//! Buffer payloads are loaded separately, so callers that only need the
//! scene graph never touch the filesystem:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let path = Path::new("model/scene.gltf");
//! let mut root = gltf_lite::parse_file(path)?;
//! root.load_buffers(Some(path))?;
//! root.validate()?;
//! # Ok::<(), gltf_lite::Error>(())
//! ```

use std::path::Path;
use std::{fmt, fs};

/// Accessors for reading typed elements out of buffer views.
pub mod accessor;
/// Keyframe animations.
pub mod animation;
/// Asset metadata.
pub mod asset;
/// The binary glTF (GLB) container.
pub mod binary;
/// Buffers and buffer views.
pub mod buffer;
/// Cameras.
pub mod camera;
/// The token-walking schema decoder.
pub mod decode;
/// Images.
pub mod image;
/// Punctual lights (`KHR_lights_punctual`).
pub mod khr_lights_punctual;
/// Materials.
pub mod material;
/// Meshes, primitives, and vertex attributes.
pub mod mesh;
/// Scenes, nodes, and node transforms.
pub mod scene;
/// Skins.
pub mod skin;
/// Textures and samplers.
pub mod texture;
/// The flat JSON token stream.
pub mod token;
/// Structural validation of the decoded graph.
pub mod validation;

mod extras;
mod fixup;
mod import;
mod math;
mod root;

pub use crate::accessor::Accessor;
pub use crate::animation::Animation;
pub use crate::asset::Asset;
pub use crate::binary::Glb;
pub use crate::buffer::Buffer;
pub use crate::camera::Camera;
pub use crate::extras::Extras;
pub use crate::image::Image;
pub use crate::khr_lights_punctual::Light;
pub use crate::material::Material;
pub use crate::mesh::Mesh;
pub use crate::root::{Get, Index, Root};
pub use crate::scene::{Node, Scene};
pub use crate::skin::Skin;
pub use crate::texture::Texture;
pub use crate::validation::Path as JsonPath;

/// Result type for convenience.
pub type Result<T = ()> = std::result::Result<T, Error>;

/// Represents a runtime error.
#[derive(Debug)]
pub enum Error {
    /// Base64 decoding of a data URI failed.
    Base64(base64::DecodeError),
    /// The GLB envelope is malformed.
    Binary(binary::Error),
    /// A buffer's payload is smaller than its declared byte length.
    BufferLength {
        /// Index of the offending buffer.
        buffer: usize,
        /// Declared byte length.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
    /// The JSON document does not match the glTF 2.0 schema.
    Deserialize(decode::Error),
    /// I/O error.
    Io(std::io::Error),
    /// JSON tokenisation failed.
    Json(token::Error),
    /// The input ended before a complete document could be read.
    TooShort,
    /// The input is neither standard glTF nor binary glTF, or does not match
    /// the form pinned in [`Options`]. Also reported for a `data:` buffer
    /// URI that does not carry base64 payload.
    UnknownFormat,
    /// A buffer URI uses a scheme this crate does not fetch.
    UnsupportedScheme,
    /// Reference fixup or validation rejected the document.
    Validation(Vec<(validation::Path, validation::Error)>),
}

/// The container form of a parsed document.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FileType {
    /// Standard glTF: a standalone JSON document.
    #[default]
    Standard,
    /// Binary glTF: a GLB envelope with an embedded JSON chunk.
    Binary,
}

/// Parse configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Expected container form. `None` auto-detects from the first bytes;
    /// a pinned form that disagrees with the input is rejected as
    /// [`Error::UnknownFormat`].
    pub file_type: Option<FileType>,
    /// Fixed token capacity for the JSON tokeniser. `None` sizes the token
    /// array exactly with a counting pre-pass.
    pub token_capacity: Option<usize>,
}

impl Options {
    /// Parses a complete glTF or GLB document from a byte slice.
    pub fn parse(&self, data: &[u8]) -> Result<Root> {
        // The first twelve bytes decide the container form.
        if data.len() < binary::Glb::HEADER_LENGTH {
            return Err(Error::TooShort);
        }
        let is_binary = data.starts_with(b"glTF");
        match self.file_type {
            Some(FileType::Standard) if is_binary => return Err(Error::UnknownFormat),
            Some(FileType::Binary) if !is_binary => return Err(Error::UnknownFormat),
            _ => {}
        }

        if is_binary {
            let glb = Glb::from_slice(data)?;
            let mut root = self.parse_json(&glb.json)?;
            root.bin = glb.bin.map(|bin| bin.into_owned());
            root.file_type = FileType::Binary;
            Ok(root)
        } else {
            let mut root = self.parse_json(data)?;
            root.file_type = FileType::Standard;
            Ok(root)
        }
    }

    /// Reads a whole file and parses it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Root> {
        let data = fs::read(path).map_err(Error::Io)?;
        self.parse(&data)
    }

    fn parse_json(&self, json: &[u8]) -> Result<Root> {
        let tokens = token::tokenize(json, self.token_capacity).map_err(Error::Json)?;
        if tokens.is_empty() {
            return Err(Error::Json(token::Error::Truncated));
        }
        let mut root = decode::decode_root(json, &tokens).map_err(Error::Deserialize)?;
        // The document bytes outlive the parse: extras spans index into them.
        root.json = json.to_vec();
        fixup::run(&mut root)?;
        Ok(root)
    }
}

/// Parses a complete glTF or GLB document from a byte slice, auto-detecting
/// the container form.
pub fn parse(data: &[u8]) -> Result<Root> {
    Options::default().parse(data)
}

/// Reads a whole file and parses it.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Root> {
    Options::default().parse_file(path)
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Base64(ref e) => e.fmt(f),
            Error::Binary(ref e) => e.fmt(f),
            Error::BufferLength {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "buffer {}: payload holds {} of {} declared bytes",
                buffer, actual, expected
            ),
            Error::Deserialize(ref e) => e.fmt(f),
            Error::Io(ref e) => e.fmt(f),
            Error::Json(ref e) => e.fmt(f),
            Error::TooShort => write!(f, "input too short"),
            Error::UnknownFormat => write!(f, "unknown file format"),
            Error::UnsupportedScheme => write!(f, "unsupported URI scheme"),
            Error::Validation(ref report) => match report.first() {
                Some((path, error)) => write!(f, "{}: {}", path, error),
                None => write!(f, "validation failed"),
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Base64(ref e) => Some(e),
            Error::Binary(ref e) => Some(e),
            Error::Deserialize(ref e) => Some(e),
            Error::Io(ref e) => Some(e),
            Error::Json(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
