use crate::decode::{Error, Parser};
use crate::root::Index;
use crate::texture;
use crate::Extras;

/// The alpha rendering mode of a material.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AlphaMode {
    /// The alpha value is ignored and the rendered output is fully opaque.
    #[default]
    Opaque,
    /// The rendered output is either fully opaque or fully transparent
    /// depending on the alpha value and the alpha cutoff value.
    Mask,
    /// The rendered output is combined with the background.
    Blend,
}

/// `KHR_texture_transform` UV transform block.
#[derive(Clone, Copy, Debug)]
pub struct TextureTransform {
    /// UV offset.
    pub offset: [f32; 2],
    /// UV rotation in radians, counter-clockwise around the offset point.
    pub rotation: f32,
    /// UV scale.
    pub scale: [f32; 2],
    /// Overridden texture co-ordinate set, when declared.
    pub texcoord: Option<u32>,
}

impl Default for TextureTransform {
    fn default() -> Self {
        TextureTransform {
            offset: [0.0, 0.0],
            rotation: 0.0,
            scale: [1.0, 1.0],
            texcoord: None,
        }
    }
}

/// A reference from a material to a texture, with sampling parameters.
///
/// The same shape serves every material slot; `scale` carries the normal map
/// scale or the occlusion strength for the slots that have one.
#[derive(Clone, Debug)]
pub struct TextureView {
    /// The referenced texture.
    pub texture: Option<Index<texture::Texture>>,
    /// The set index of the texture's `TEXCOORD` attribute.
    pub texcoord: u32,
    /// Normal map scale or occlusion strength. 1.0 elsewhere.
    pub scale: f32,
    /// `KHR_texture_transform` block, when declared.
    pub transform: Option<TextureTransform>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Default for TextureView {
    fn default() -> Self {
        TextureView {
            texture: None,
            texcoord: 0,
            scale: 1.0,
            transform: None,
            extras: Extras::default(),
        }
    }
}

/// Metallic-roughness material model parameters.
#[derive(Clone, Debug)]
pub struct PbrMetallicRoughness {
    /// The base color factor.
    pub base_color_factor: [f32; 4],
    /// The base color texture.
    pub base_color_texture: Option<TextureView>,
    /// The metalness of the material.
    pub metallic_factor: f32,
    /// The roughness of the material.
    pub roughness_factor: f32,
    /// The metallic-roughness texture.
    pub metallic_roughness_texture: Option<TextureView>,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        PbrMetallicRoughness {
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
        }
    }
}

/// `KHR_materials_pbrSpecularGlossiness` material model parameters.
#[derive(Clone, Debug)]
pub struct PbrSpecularGlossiness {
    /// The diffuse factor.
    pub diffuse_factor: [f32; 4],
    /// The diffuse texture.
    pub diffuse_texture: Option<TextureView>,
    /// The specular factor.
    pub specular_factor: [f32; 3],
    /// The glossiness factor, from 0.0 (rough) to 1.0 (smooth).
    pub glossiness_factor: f32,
    /// The specular-glossiness texture.
    pub specular_glossiness_texture: Option<TextureView>,
}

impl Default for PbrSpecularGlossiness {
    fn default() -> Self {
        PbrSpecularGlossiness {
            diffuse_factor: [1.0, 1.0, 1.0, 1.0],
            diffuse_texture: None,
            specular_factor: [1.0, 1.0, 1.0],
            glossiness_factor: 1.0,
            specular_glossiness_texture: None,
        }
    }
}

/// The material appearance of a primitive.
#[derive(Clone, Debug)]
pub struct Material {
    /// Metallic-roughness model parameters. Defaulted when the document
    /// omits the block.
    pub pbr_metallic_roughness: PbrMetallicRoughness,
    /// Specular-glossiness model parameters, when the
    /// `KHR_materials_pbrSpecularGlossiness` extension block is present.
    pub pbr_specular_glossiness: Option<PbrSpecularGlossiness>,
    /// The tangent space normal texture; its `scale` is the normal scale.
    pub normal_texture: Option<TextureView>,
    /// The occlusion texture; its `scale` is the occlusion strength.
    pub occlusion_texture: Option<TextureView>,
    /// The emissive texture.
    pub emissive_texture: Option<TextureView>,
    /// The emissive color of the material.
    pub emissive_factor: [f32; 3],
    /// The alpha rendering mode of the material.
    pub alpha_mode: AlphaMode,
    /// The alpha cutoff value of the material, used in `Mask` mode.
    pub alpha_cutoff: f32,
    /// Specifies whether the material is double sided.
    pub double_sided: bool,
    /// Whether `KHR_materials_unlit` requests an unlit shading model.
    pub unlit: bool,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            pbr_metallic_roughness: PbrMetallicRoughness::default(),
            pbr_specular_glossiness: None,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: [0.0, 0.0, 0.0],
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            unlit: false,
            name: None,
            extras: Extras::default(),
        }
    }
}

impl TextureTransform {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut transform = TextureTransform::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "offset" => {
                    p.float_array(&mut transform.offset)?;
                }
                "rotation" => transform.rotation = p.float()?,
                "scale" => {
                    p.float_array(&mut transform.scale)?;
                }
                "texCoord" => transform.texcoord = Some(p.unsigned()? as u32),
                _ => p.skip()?,
            }
        }
        Ok(transform)
    }
}

impl TextureView {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut view = TextureView::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "index" => view.texture = Some(p.index()?),
                "texCoord" => view.texcoord = p.unsigned()? as u32,
                // Normal map scale and occlusion strength share a slot.
                "scale" => view.scale = p.float()?,
                "strength" => view.scale = p.float()?,
                "extras" => view.extras = p.extras()?,
                "extensions" => {
                    let extensions = p.begin_object()?;
                    for _ in 0..extensions {
                        match p.key()? {
                            "KHR_texture_transform" => {
                                view.transform = Some(TextureTransform::decode(p)?)
                            }
                            _ => p.skip()?,
                        }
                    }
                }
                _ => p.skip()?,
            }
        }
        Ok(view)
    }
}

impl PbrMetallicRoughness {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut pbr = PbrMetallicRoughness::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "baseColorFactor" => {
                    p.float_array(&mut pbr.base_color_factor)?;
                }
                "baseColorTexture" => pbr.base_color_texture = Some(TextureView::decode(p)?),
                "metallicFactor" => pbr.metallic_factor = p.float()?,
                "roughnessFactor" => pbr.roughness_factor = p.float()?,
                "metallicRoughnessTexture" => {
                    pbr.metallic_roughness_texture = Some(TextureView::decode(p)?)
                }
                _ => p.skip()?,
            }
        }
        Ok(pbr)
    }
}

impl PbrSpecularGlossiness {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut pbr = PbrSpecularGlossiness::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "diffuseFactor" => {
                    p.float_array(&mut pbr.diffuse_factor)?;
                }
                "diffuseTexture" => pbr.diffuse_texture = Some(TextureView::decode(p)?),
                "specularFactor" => {
                    p.float_array(&mut pbr.specular_factor)?;
                }
                "glossinessFactor" => pbr.glossiness_factor = p.float()?,
                "specularGlossinessTexture" => {
                    pbr.specular_glossiness_texture = Some(TextureView::decode(p)?)
                }
                _ => p.skip()?,
            }
        }
        Ok(pbr)
    }
}

impl Material {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut material = Material::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "name" => material.name = Some(p.string()?),
                "pbrMetallicRoughness" => {
                    material.pbr_metallic_roughness = PbrMetallicRoughness::decode(p)?
                }
                "normalTexture" => material.normal_texture = Some(TextureView::decode(p)?),
                "occlusionTexture" => material.occlusion_texture = Some(TextureView::decode(p)?),
                "emissiveTexture" => material.emissive_texture = Some(TextureView::decode(p)?),
                "emissiveFactor" => {
                    p.float_array(&mut material.emissive_factor)?;
                }
                "alphaMode" => {
                    material.alpha_mode = match p.str()? {
                        "OPAQUE" => AlphaMode::Opaque,
                        "MASK" => AlphaMode::Mask,
                        "BLEND" => AlphaMode::Blend,
                        _ => material.alpha_mode,
                    }
                }
                "alphaCutoff" => material.alpha_cutoff = p.float()?,
                "doubleSided" => material.double_sided = p.boolean()?,
                "extensions" => {
                    let extensions = p.begin_object()?;
                    for _ in 0..extensions {
                        match p.key()? {
                            "KHR_materials_pbrSpecularGlossiness" => {
                                material.pbr_specular_glossiness =
                                    Some(PbrSpecularGlossiness::decode(p)?)
                            }
                            "KHR_materials_unlit" => {
                                material.unlit = true;
                                p.skip()?;
                            }
                            _ => p.skip()?,
                        }
                    }
                }
                "extras" => material.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(material)
    }
}
