use crate::buffer;
use crate::decode::{Error, Parser};
use crate::root::Index;
use crate::Extras;

/// Image data used to create a texture.
///
/// Pixels are never decoded; only the reference (URI or buffer view) and the
/// MIME type are recorded.
#[derive(Clone, Debug, Default)]
pub struct Image {
    /// The uri of the image, when external or embedded as a data URI.
    pub uri: Option<String>,
    /// The image's MIME type, when declared.
    pub mime_type: Option<String>,
    /// The buffer view containing the encoded image, when embedded.
    pub buffer_view: Option<Index<buffer::View>>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Image {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut image = Image::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "uri" => image.uri = Some(p.string()?),
                "mimeType" => image.mime_type = Some(p.string()?),
                "bufferView" => image.buffer_view = Some(p.index()?),
                "name" => image.name = Some(p.string()?),
                "extras" => image.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(image)
    }
}
