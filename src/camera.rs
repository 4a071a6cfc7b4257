use crate::decode::{Error, Parser};
use crate::Extras;

/// Values for a perspective camera.
#[derive(Clone, Copy, Debug, Default)]
pub struct Perspective {
    /// Aspect ratio of the field of view, when declared.
    pub aspect_ratio: Option<f32>,
    /// The vertical field of view in radians.
    pub yfov: f32,
    /// The distance to the far clipping plane. Absent means an infinite
    /// projection.
    pub zfar: Option<f32>,
    /// The distance to the near clipping plane.
    pub znear: f32,
}

/// Values for an orthographic camera.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orthographic {
    /// The horizontal magnification of the view.
    pub xmag: f32,
    /// The vertical magnification of the view.
    pub ymag: f32,
    /// The distance to the far clipping plane.
    pub zfar: f32,
    /// The distance to the near clipping plane.
    pub znear: f32,
}

/// The projection of a camera.
#[derive(Clone, Copy, Debug)]
pub enum Projection {
    /// Perspective projection.
    Perspective(Perspective),
    /// Orthographic projection.
    Orthographic(Orthographic),
}

/// A camera's projection.
///
/// A node may reference a camera to apply a transform to place it in the
/// scene.
#[derive(Clone, Debug)]
pub struct Camera {
    /// The camera's projection.
    pub projection: Projection,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Perspective {
    fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut perspective = Perspective::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "aspectRatio" => perspective.aspect_ratio = Some(p.float()?),
                "yfov" => perspective.yfov = p.float()?,
                "zfar" => perspective.zfar = Some(p.float()?),
                "znear" => perspective.znear = p.float()?,
                _ => p.skip()?,
            }
        }
        Ok(perspective)
    }
}

impl Orthographic {
    fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut orthographic = Orthographic::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "xmag" => orthographic.xmag = p.float()?,
                "ymag" => orthographic.ymag = p.float()?,
                "zfar" => orthographic.zfar = p.float()?,
                "znear" => orthographic.znear = p.float()?,
                _ => p.skip()?,
            }
        }
        Ok(orthographic)
    }
}

impl Camera {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let at = p.offset();
        let mut name = None;
        let mut extras = Extras::default();
        let mut kind: Option<&str> = None;
        let mut perspective = None;
        let mut orthographic = None;

        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "name" => name = Some(p.string()?),
                // `type` may come before or after the projection blocks.
                "type" => kind = Some(p.str()?),
                "perspective" => perspective = Some(Perspective::decode(p)?),
                "orthographic" => orthographic = Some(Orthographic::decode(p)?),
                "extras" => extras = p.extras()?,
                _ => p.skip()?,
            }
        }

        let projection = match kind {
            Some("perspective") => perspective.map(Projection::Perspective),
            Some("orthographic") => orthographic.map(Projection::Orthographic),
            _ => None,
        };
        match projection {
            Some(projection) => Ok(Camera {
                projection,
                name,
                extras,
            }),
            None => Err(Error::new(at, "camera projection")),
        }
    }
}
