use crate::accessor;
use crate::decode::{Error, Parser};
use crate::root::Index;
use crate::scene;
use crate::Extras;

/// Specifies an interpolation algorithm.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Interpolation {
    /// Linear interpolation.
    #[default]
    Linear,
    /// The animated values remain constant until the next keyframe.
    Step,
    /// Cubic spline interpolation with in/out tangents.
    CubicSpline,
}

/// Specifies a node property to animate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Property {
    /// The `path` member was absent or carried an unrecognised value.
    #[default]
    Invalid,
    /// XYZ translation vector.
    Translation,
    /// XYZW rotation quaternion.
    Rotation,
    /// XYZ scale vector.
    Scale,
    /// Morph target weights.
    Weights,
}

/// Defines the keyframes of an animated property.
#[derive(Clone, Debug, Default)]
pub struct Sampler {
    /// The accessor providing keyframe input times. Enforced as present
    /// during reference fixup.
    pub input: Option<Index<accessor::Accessor>>,
    /// The accessor providing keyframe output values. Enforced as present
    /// during reference fixup.
    pub output: Option<Index<accessor::Accessor>>,
    /// The interpolation algorithm.
    pub interpolation: Interpolation,
    /// Optional application specific data.
    pub extras: Extras,
}

/// Targets an animation sampler at a node property.
#[derive(Clone, Debug, Default)]
pub struct Channel {
    /// The sampler, indexing into this animation's own sampler array.
    /// Enforced as present during reference fixup.
    pub sampler: Option<Index<Sampler>>,
    /// The node to animate, when declared.
    pub target_node: Option<Index<scene::Node>>,
    /// The node property to animate.
    pub target_path: Property,
    /// Optional application specific data.
    pub extras: Extras,
}

/// A keyframe animation.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    /// The samplers of this animation.
    pub samplers: Vec<Sampler>,
    /// The channels of this animation.
    pub channels: Vec<Channel>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Sampler {
    fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut sampler = Sampler::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "input" => sampler.input = Some(p.index()?),
                "output" => sampler.output = Some(p.index()?),
                "interpolation" => {
                    sampler.interpolation = match p.str()? {
                        "LINEAR" => Interpolation::Linear,
                        "STEP" => Interpolation::Step,
                        "CUBICSPLINE" => Interpolation::CubicSpline,
                        _ => sampler.interpolation,
                    }
                }
                "extras" => sampler.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(sampler)
    }
}

impl Channel {
    fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut channel = Channel::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "sampler" => channel.sampler = Some(p.index()?),
                "target" => {
                    let target_members = p.begin_object()?;
                    for _ in 0..target_members {
                        match p.key()? {
                            "node" => channel.target_node = Some(p.index()?),
                            "path" => {
                                channel.target_path = match p.str()? {
                                    "translation" => Property::Translation,
                                    "rotation" => Property::Rotation,
                                    "scale" => Property::Scale,
                                    "weights" => Property::Weights,
                                    _ => Property::Invalid,
                                }
                            }
                            _ => p.skip()?,
                        }
                    }
                }
                "extras" => channel.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(channel)
    }
}

impl Animation {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut animation = Animation::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "name" => animation.name = Some(p.string()?),
                "samplers" => {
                    let samplers = p.begin_array()?;
                    animation.samplers.reserve(samplers);
                    for _ in 0..samplers {
                        animation.samplers.push(Sampler::decode(p)?);
                    }
                }
                "channels" => {
                    let channels = p.begin_array()?;
                    animation.channels.reserve(channels);
                    for _ in 0..channels {
                        animation.channels.push(Channel::decode(p)?);
                    }
                }
                "extras" => animation.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(animation)
    }
}
