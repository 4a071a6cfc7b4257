use crate::decode::{Error, Parser};
use crate::Extras;

/// Metadata about the glTF asset.
#[derive(Clone, Debug, Default)]
pub struct Asset {
    /// A copyright message suitable for display to credit the content creator.
    pub copyright: Option<String>,
    /// Tool that generated this glTF model.
    pub generator: Option<String>,
    /// The glTF version of this asset.
    pub version: Option<String>,
    /// The minimum glTF version that this asset targets.
    pub min_version: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Asset {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut asset = Asset::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "copyright" => asset.copyright = Some(p.string()?),
                "generator" => asset.generator = Some(p.string()?),
                "version" => asset.version = Some(p.string()?),
                "minVersion" => asset.min_version = Some(p.string()?),
                "extras" => asset.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(asset)
    }
}
