use crate::decode::{Error, Parser};
use crate::root::Index;
use crate::Extras;

/// Corresponds to `GL_ARRAY_BUFFER`.
pub const ARRAY_BUFFER: u32 = 34_962;

/// Corresponds to `GL_ELEMENT_ARRAY_BUFFER`.
pub const ELEMENT_ARRAY_BUFFER: u32 = 34_963;

/// Specifies the intended GPU usage of a buffer view.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Target {
    /// The `target` member was absent or carried an unrecognised value.
    #[default]
    Invalid,
    /// Vertex attribute data (`GL_ARRAY_BUFFER`).
    Vertices,
    /// Vertex index data (`GL_ELEMENT_ARRAY_BUFFER`).
    Indices,
}

impl Target {
    pub(crate) fn from_gl_enum(value: u32) -> Self {
        match value {
            ARRAY_BUFFER => Target::Vertices,
            ELEMENT_ARRAY_BUFFER => Target::Indices,
            _ => Target::Invalid,
        }
    }
}

/// The source of a buffer's payload bytes.
///
/// `Bin` carries no bytes of its own: it aliases the BIN chunk owned by the
/// root document, so the payload is freed exactly once with the root.
#[derive(Clone, Debug, Default)]
pub enum Payload {
    /// No payload has been loaded for this buffer yet.
    #[default]
    Unloaded,
    /// The payload is the GLB BIN chunk held by the root.
    Bin,
    /// The payload was loaded from a data URI or an external file.
    Owned(Vec<u8>),
}

impl Payload {
    /// Whether a payload is available.
    pub fn is_loaded(&self) -> bool {
        !matches!(*self, Payload::Unloaded)
    }
}

/// A buffer points to binary data representing geometry, animations, or skins.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    /// The length of the buffer in bytes.
    pub byte_length: usize,
    /// The uri of the buffer. Absent for the buffer backed by the GLB BIN
    /// chunk.
    pub uri: Option<String>,
    /// Payload bytes, populated by [`Root::load_buffers`].
    ///
    /// [`Root::load_buffers`]: crate::Root::load_buffers
    pub payload: Payload,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

/// A view into a buffer generally representing a subset of the buffer.
#[derive(Clone, Debug, Default)]
pub struct View {
    /// The parent buffer. Enforced as present during reference fixup.
    pub buffer: Option<Index<Buffer>>,
    /// The offset into the parent buffer in bytes.
    pub byte_offset: usize,
    /// The length of the view in bytes.
    pub byte_length: usize,
    /// The stride in bytes between vertex attributes or other interleavable
    /// data. `None` means the stride is derived from the consuming accessor.
    pub byte_stride: Option<usize>,
    /// Optional target the view should be bound to.
    pub target: Target,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Buffer {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut buffer = Buffer::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "byteLength" => buffer.byte_length = p.unsigned()?,
                "uri" => buffer.uri = Some(p.string()?),
                "name" => buffer.name = Some(p.string()?),
                "extras" => buffer.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(buffer)
    }
}

impl View {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut view = View::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "buffer" => view.buffer = Some(p.index()?),
                "byteOffset" => view.byte_offset = p.unsigned()?,
                "byteLength" => view.byte_length = p.unsigned()?,
                "byteStride" => view.byte_stride = Some(p.unsigned()?),
                "target" => view.target = Target::from_gl_enum(p.unsigned()? as u32),
                "name" => view.name = Some(p.string()?),
                "extras" => view.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(view)
    }
}
