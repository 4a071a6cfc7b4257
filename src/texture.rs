use crate::decode::{Error, Parser};
use crate::image;
use crate::root::Index;
use crate::Extras;

/// Corresponds to `GL_NEAREST`.
pub const NEAREST: u32 = 9728;

/// Corresponds to `GL_LINEAR`.
pub const LINEAR: u32 = 9729;

/// Corresponds to `GL_NEAREST_MIPMAP_NEAREST`.
pub const NEAREST_MIPMAP_NEAREST: u32 = 9984;

/// Corresponds to `GL_LINEAR_MIPMAP_NEAREST`.
pub const LINEAR_MIPMAP_NEAREST: u32 = 9985;

/// Corresponds to `GL_NEAREST_MIPMAP_LINEAR`.
pub const NEAREST_MIPMAP_LINEAR: u32 = 9986;

/// Corresponds to `GL_LINEAR_MIPMAP_LINEAR`.
pub const LINEAR_MIPMAP_LINEAR: u32 = 9987;

/// Corresponds to `GL_CLAMP_TO_EDGE`.
pub const CLAMP_TO_EDGE: u32 = 33_071;

/// Corresponds to `GL_MIRRORED_REPEAT`.
pub const MIRRORED_REPEAT: u32 = 33_648;

/// Corresponds to `GL_REPEAT`.
pub const REPEAT: u32 = 10_497;

/// Texture sampler properties for filtering and wrapping modes.
///
/// Filter and wrap values are kept as the raw GL enums the document carries;
/// the constants above name the meaningful ones.
#[derive(Clone, Debug)]
pub struct Sampler {
    /// Magnification filter, when declared.
    pub mag_filter: Option<u32>,
    /// Minification filter, when declared.
    pub min_filter: Option<u32>,
    /// `s` wrapping mode.
    pub wrap_s: u32,
    /// `t` wrapping mode.
    pub wrap_t: u32,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Default for Sampler {
    fn default() -> Self {
        Sampler {
            mag_filter: None,
            min_filter: None,
            wrap_s: REPEAT,
            wrap_t: REPEAT,
            name: None,
            extras: Extras::default(),
        }
    }
}

/// A texture and its sampler.
#[derive(Clone, Debug, Default)]
pub struct Texture {
    /// The image used by this texture, when declared.
    pub image: Option<Index<image::Image>>,
    /// The sampler used by this texture, when declared.
    pub sampler: Option<Index<Sampler>>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Sampler {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut sampler = Sampler::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "magFilter" => sampler.mag_filter = Some(p.unsigned()? as u32),
                "minFilter" => sampler.min_filter = Some(p.unsigned()? as u32),
                "wrapS" => sampler.wrap_s = p.unsigned()? as u32,
                "wrapT" => sampler.wrap_t = p.unsigned()? as u32,
                "name" => sampler.name = Some(p.string()?),
                "extras" => sampler.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(sampler)
    }
}

impl Texture {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut texture = Texture::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "source" => texture.image = Some(p.index()?),
                "sampler" => texture.sampler = Some(p.index()?),
                "name" => texture.name = Some(p.string()?),
                "extras" => texture.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(texture)
    }
}
