//! Punctual lights as defined by the `KHR_lights_punctual` extension.

use crate::decode::{Error, Parser};

/// Specifies the light emission shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Kind {
    /// Light intensity is in lux and the direction is taken from the node
    /// transform.
    Directional,
    /// Light intensity is in candela, emitted in all directions.
    Point,
    /// Light intensity is in candela, emitted in a cone.
    Spot {
        /// Angle in radians where the spotlight begins to fall off.
        inner_cone_angle: f32,
        /// Angle in radians where the spotlight intensity reaches zero.
        outer_cone_angle: f32,
    },
}

/// A punctual light placed in the scene by a node.
#[derive(Clone, Debug)]
pub struct Light {
    /// RGB color of the emitted light.
    pub color: [f32; 3],
    /// Intensity of the emitted light.
    pub intensity: f32,
    /// Distance cutoff beyond which the light has no effect. Absent means
    /// no cutoff.
    pub range: Option<f32>,
    /// The emission shape.
    pub kind: Kind,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
}

impl Light {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let at = p.offset();
        let mut name = None;
        let mut color = [0.0; 3];
        let mut intensity = 0.0;
        let mut range = None;
        let mut kind: Option<&str> = None;
        let mut inner_cone_angle = 0.0;
        let mut outer_cone_angle = 0.0;

        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "name" => name = Some(p.string()?),
                "color" => {
                    p.float_array(&mut color)?;
                }
                "intensity" => intensity = p.float()?,
                "range" => range = Some(p.float()?),
                "type" => kind = Some(p.str()?),
                "spot" => {
                    let spot_members = p.begin_object()?;
                    for _ in 0..spot_members {
                        match p.key()? {
                            "innerConeAngle" => inner_cone_angle = p.float()?,
                            "outerConeAngle" => outer_cone_angle = p.float()?,
                            _ => p.skip()?,
                        }
                    }
                }
                _ => p.skip()?,
            }
        }

        let kind = match kind {
            Some("directional") => Kind::Directional,
            Some("point") => Kind::Point,
            Some("spot") => Kind::Spot {
                inner_cone_angle,
                outer_cone_angle,
            },
            _ => return Err(Error::new(at, "punctual light type")),
        };
        Ok(Light {
            color,
            intensity,
            range,
            kind,
            name,
        })
    }
}
