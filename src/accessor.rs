use byteorder::{ByteOrder, LE};

use crate::buffer;
use crate::decode::{Error, Parser};
use crate::root::{Index, Root};
use crate::Extras;

/// Corresponds to `GL_BYTE`.
pub const BYTE: u32 = 5120;

/// Corresponds to `GL_UNSIGNED_BYTE`.
pub const UNSIGNED_BYTE: u32 = 5121;

/// Corresponds to `GL_SHORT`.
pub const SHORT: u32 = 5122;

/// Corresponds to `GL_UNSIGNED_SHORT`.
pub const UNSIGNED_SHORT: u32 = 5123;

/// Corresponds to `GL_UNSIGNED_INT`.
pub const UNSIGNED_INT: u32 = 5125;

/// Corresponds to `GL_FLOAT`.
pub const FLOAT: u32 = 5126;

/// The component data type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ComponentType {
    /// The `componentType` member carried an unrecognised value.
    #[default]
    Invalid,
    /// Corresponds to `GL_BYTE`.
    I8,
    /// Corresponds to `GL_UNSIGNED_BYTE`.
    U8,
    /// Corresponds to `GL_SHORT`.
    I16,
    /// Corresponds to `GL_UNSIGNED_SHORT`.
    U16,
    /// Corresponds to `GL_UNSIGNED_INT`.
    U32,
    /// Corresponds to `GL_FLOAT`.
    F32,
}

/// Specifies whether an attribute is a scalar, vector, or matrix.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Type {
    /// Scalar quantity.
    #[default]
    Scalar,
    /// 2D vector.
    Vec2,
    /// 3D vector.
    Vec3,
    /// 4D vector.
    Vec4,
    /// 2x2 matrix.
    Mat2,
    /// 3x3 matrix.
    Mat3,
    /// 4x4 matrix.
    Mat4,
}

impl ComponentType {
    /// Returns the number of bytes this component type occupies.
    pub fn size(self) -> usize {
        use self::ComponentType::*;
        match self {
            Invalid => 0,
            I8 | U8 => 1,
            I16 | U16 => 2,
            U32 | F32 => 4,
        }
    }

    /// Whether this is one of the unsigned integer types permitted for
    /// primitive indices and sparse indices.
    pub fn is_index_type(self) -> bool {
        use self::ComponentType::*;
        matches!(self, U8 | U16 | U32)
    }

    pub(crate) fn from_gl_enum(value: u32) -> Self {
        use self::ComponentType::*;
        match value {
            BYTE => I8,
            UNSIGNED_BYTE => U8,
            SHORT => I16,
            UNSIGNED_SHORT => U16,
            UNSIGNED_INT => U32,
            FLOAT => F32,
            _ => Invalid,
        }
    }
}

impl Type {
    /// Returns the equivalent number of scalar quantities this type
    /// represents.
    pub fn multiplicity(self) -> usize {
        use self::Type::*;
        match self {
            Scalar => 1,
            Vec2 => 2,
            Vec3 => 3,
            Vec4 | Mat2 => 4,
            Mat3 => 9,
            Mat4 => 16,
        }
    }
}

/// Returns the size of one accessor element in bytes.
///
/// Matrix columns are 4-byte aligned within an element, which inflates the
/// small-component matrix cases (see "data alignment" in the glTF 2.0
/// specification).
pub fn element_size(type_: Type, component_type: ComponentType) -> usize {
    let component_size = component_type.size();
    if type_ == Type::Mat2 && component_size == 1 {
        8 * component_size
    } else if type_ == Type::Mat3 && (component_size == 1 || component_size == 2) {
        12 * component_size
    } else {
        component_size * type_.multiplicity()
    }
}

/// Sparse storage of elements that deviate from their initialization value.
#[derive(Clone, Debug, Default)]
pub struct Sparse {
    /// The number of elements encoded in this sparse accessor.
    pub count: usize,
    /// The buffer view containing the sparse indices. Enforced as present
    /// during reference fixup.
    pub indices_buffer_view: Option<Index<buffer::View>>,
    /// The offset of the indices relative to the start of their view in
    /// bytes.
    pub indices_byte_offset: usize,
    /// The data type of each index. Restricted to the unsigned integer
    /// types by the validator.
    pub indices_component_type: ComponentType,
    /// The buffer view containing the substituted values. Enforced as
    /// present during reference fixup.
    pub values_buffer_view: Option<Index<buffer::View>>,
    /// The offset of the values relative to the start of their view in
    /// bytes.
    pub values_byte_offset: usize,
}

/// A typed view into a buffer view.
#[derive(Clone, Debug, Default)]
pub struct Accessor {
    /// The parent buffer view this accessor reads from.
    ///
    /// Sparse accessors may omit this, in which case the base values are
    /// all zero.
    pub buffer_view: Option<Index<buffer::View>>,
    /// The offset relative to the start of the parent buffer view in bytes.
    pub byte_offset: usize,
    /// The data type of components in the element.
    pub component_type: ComponentType,
    /// Specifies whether integer data values should be normalized when read
    /// as floats.
    pub normalized: bool,
    /// The number of elements within the buffer view.
    pub count: usize,
    /// Specifies if the elements are scalars, vectors, or matrices.
    pub type_: Type,
    /// The distance between the starts of consecutive elements in bytes.
    ///
    /// Resolved during reference fixup: the parent view's stride when it
    /// declares one, the element size otherwise.
    pub stride: usize,
    /// Minimum value of each component, when declared. Only the first
    /// `type_.multiplicity()` entries are meaningful.
    pub min: Option<[f32; 16]>,
    /// Maximum value of each component, when declared.
    pub max: Option<[f32; 16]>,
    /// Sparse overrides, when declared.
    pub sparse: Option<Sparse>,
    /// Optional user-defined name for this object.
    pub name: Option<String>,
    /// Optional application specific data.
    pub extras: Extras,
}

impl Accessor {
    /// Returns the size of one element of this accessor in bytes.
    pub fn element_size(&self) -> usize {
        element_size(self.type_, self.component_type)
    }

    /// Reads element `element` as floats into `out`.
    ///
    /// Returns `false` when the accessor is sparse (unsupported by this
    /// reader), has no loaded payload behind it, when `out` holds fewer than
    /// `type_.multiplicity()` floats, or when the element lies outside the
    /// loaded payload. Normalized integer components are scaled to the
    /// `[0, 1]` (unsigned) or `[-1, 1]` (signed) range.
    pub fn read_float(&self, root: &Root, element: usize, out: &mut [f32]) -> bool {
        if self.sparse.is_some() {
            return false;
        }
        if out.len() < self.type_.multiplicity() {
            return false;
        }
        let bytes = match self.element_bytes(root, element) {
            Some(bytes) => bytes,
            None => return false,
        };
        element_read_float(bytes, self.type_, self.component_type, self.normalized, out);
        true
    }

    /// Reads scalar element `element` as an index value.
    ///
    /// Returns 0 when the accessor has no loaded payload behind it or the
    /// element lies outside it. Float components truncate.
    pub fn read_index(&self, root: &Root, element: usize) -> usize {
        match self.element_bytes(root, element) {
            Some(bytes) => component_read_index(bytes, self.component_type),
            None => 0,
        }
    }

    fn element_bytes<'a>(&self, root: &'a Root, element: usize) -> Option<&'a [u8]> {
        let view = root.get(self.buffer_view?)?;
        let data = root.buffer_data(view.buffer?)?;
        let offset = view.byte_offset + self.byte_offset + self.stride * element;
        data.get(offset..offset + self.element_size())
    }

    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut accessor = Accessor::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "bufferView" => accessor.buffer_view = Some(p.index()?),
                "byteOffset" => accessor.byte_offset = p.unsigned()?,
                "componentType" => {
                    accessor.component_type = ComponentType::from_gl_enum(p.unsigned()? as u32)
                }
                "normalized" => accessor.normalized = p.boolean()?,
                "count" => accessor.count = p.unsigned()?,
                "type" => {
                    accessor.type_ = match p.str()? {
                        "SCALAR" => Type::Scalar,
                        "VEC2" => Type::Vec2,
                        "VEC3" => Type::Vec3,
                        "VEC4" => Type::Vec4,
                        "MAT2" => Type::Mat2,
                        "MAT3" => Type::Mat3,
                        "MAT4" => Type::Mat4,
                        _ => accessor.type_,
                    }
                }
                // min/max may precede type, so the expected length is not
                // known yet; up to 16 components are kept.
                "min" => {
                    let mut bounds = [0.0; 16];
                    p.float_array_bounded(&mut bounds)?;
                    accessor.min = Some(bounds);
                }
                "max" => {
                    let mut bounds = [0.0; 16];
                    p.float_array_bounded(&mut bounds)?;
                    accessor.max = Some(bounds);
                }
                "sparse" => accessor.sparse = Some(Sparse::decode(p)?),
                "name" => accessor.name = Some(p.string()?),
                "extras" => accessor.extras = p.extras()?,
                _ => p.skip()?,
            }
        }
        Ok(accessor)
    }
}

impl Sparse {
    pub(crate) fn decode(p: &mut Parser<'_>) -> Result<Self, Error> {
        let mut sparse = Sparse::default();
        let members = p.begin_object()?;
        for _ in 0..members {
            match p.key()? {
                "count" => sparse.count = p.unsigned()?,
                "indices" => {
                    let indices_members = p.begin_object()?;
                    for _ in 0..indices_members {
                        match p.key()? {
                            "bufferView" => sparse.indices_buffer_view = Some(p.index()?),
                            "byteOffset" => sparse.indices_byte_offset = p.unsigned()?,
                            "componentType" => {
                                sparse.indices_component_type =
                                    ComponentType::from_gl_enum(p.unsigned()? as u32)
                            }
                            _ => p.skip()?,
                        }
                    }
                }
                "values" => {
                    let values_members = p.begin_object()?;
                    for _ in 0..values_members {
                        match p.key()? {
                            "bufferView" => sparse.values_buffer_view = Some(p.index()?),
                            "byteOffset" => sparse.values_byte_offset = p.unsigned()?,
                            _ => p.skip()?,
                        }
                    }
                }
                _ => p.skip()?,
            }
        }
        Ok(sparse)
    }
}

fn component_read_index(bytes: &[u8], component_type: ComponentType) -> usize {
    use self::ComponentType::*;
    match component_type {
        I8 => bytes[0] as i8 as usize,
        U8 => bytes[0] as usize,
        I16 => LE::read_i16(bytes) as usize,
        U16 => LE::read_u16(bytes) as usize,
        U32 => LE::read_u32(bytes) as usize,
        F32 => LE::read_f32(bytes) as usize,
        Invalid => 0,
    }
}

fn component_read_float(bytes: &[u8], component_type: ComponentType, normalized: bool) -> f32 {
    use self::ComponentType::*;
    if component_type == F32 {
        return LE::read_f32(bytes);
    }
    if normalized {
        return match component_type {
            U32 => LE::read_u32(bytes) as f32 / u32::MAX as f32,
            I16 => LE::read_i16(bytes) as f32 / i16::MAX as f32,
            U16 => LE::read_u16(bytes) as f32 / u16::MAX as f32,
            I8 => bytes[0] as i8 as f32 / i8::MAX as f32,
            U8 => bytes[0] as f32 / u8::MAX as f32,
            _ => 0.0,
        };
    }
    match component_type {
        I8 => bytes[0] as i8 as f32,
        U8 => bytes[0] as f32,
        I16 => LE::read_i16(bytes) as f32,
        U16 => LE::read_u16(bytes) as f32,
        U32 => LE::read_u32(bytes) as f32,
        _ => 0.0,
    }
}

/// Reads one element worth of components from `bytes` into `out`.
///
/// The aligned matrix cases read their components at the padded column
/// offsets; everything else is contiguous.
fn element_read_float(
    bytes: &[u8],
    type_: Type,
    component_type: ComponentType,
    normalized: bool,
    out: &mut [f32],
) {
    let component_size = component_type.size();
    let component_offsets: &[usize] = match (type_, component_size) {
        (Type::Mat2, 1) => &[0, 1, 4, 5],
        (Type::Mat3, 1) | (Type::Mat3, 2) => &[0, 1, 2, 4, 5, 6, 8, 9, 10],
        _ => {
            for (slot, out) in out.iter_mut().enumerate().take(type_.multiplicity()) {
                *out = component_read_float(
                    &bytes[slot * component_size..],
                    component_type,
                    normalized,
                );
            }
            return;
        }
    };
    for (slot, &component_offset) in component_offsets.iter().enumerate() {
        out[slot] = component_read_float(
            &bytes[component_offset * component_size..],
            component_type,
            normalized,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn element_sizes() {
        assert_eq!(element_size(Type::Scalar, ComponentType::F32), 4);
        assert_eq!(element_size(Type::Vec3, ComponentType::F32), 12);
        assert_eq!(element_size(Type::Vec4, ComponentType::U8), 4);
        assert_eq!(element_size(Type::Mat4, ComponentType::F32), 64);
        // Column alignment inflates small-component matrices.
        assert_eq!(element_size(Type::Mat2, ComponentType::U8), 8);
        assert_eq!(element_size(Type::Mat3, ComponentType::I8), 12);
        assert_eq!(element_size(Type::Mat3, ComponentType::U16), 24);
        // Invalid components occupy nothing.
        assert_eq!(element_size(Type::Vec3, ComponentType::Invalid), 0);
    }

    #[test]
    fn normalized_component_conversion() {
        let max = [0xFFu8, 0xFF];
        assert_relative_eq!(
            component_read_float(&max, ComponentType::U16, true),
            1.0
        );
        assert_relative_eq!(component_read_float(&max[..1], ComponentType::U8, true), 1.0);
        let min16 = i16::MIN.to_le_bytes();
        assert_relative_eq!(
            component_read_float(&min16, ComponentType::I16, true),
            i16::MIN as f32 / i16::MAX as f32
        );
    }

    #[test]
    fn unnormalized_integers_cast() {
        let bytes = (-3i8 as u8).to_le_bytes();
        assert_relative_eq!(component_read_float(&bytes, ComponentType::I8, false), -3.0);
        let bytes = 40000u16.to_le_bytes();
        assert_relative_eq!(
            component_read_float(&bytes, ComponentType::U16, false),
            40000.0
        );
    }

    #[test]
    fn aligned_mat2_reads_padded_columns() {
        // Two 2-byte columns, each padded to 4 bytes.
        let bytes = [1u8, 2, 0xAA, 0xAA, 3, 4, 0xAA, 0xAA];
        let mut out = [0.0f32; 4];
        element_read_float(&bytes, Type::Mat2, ComponentType::U8, false, &mut out);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn aligned_mat3_u16_reads_padded_columns() {
        let mut bytes = [0u8; 24];
        for (index, value) in [1u16, 2, 3, 0, 4, 5, 6, 0, 7, 8, 9, 0].iter().enumerate() {
            bytes[index * 2..index * 2 + 2].copy_from_slice(&value.to_le_bytes());
        }
        let mut out = [0.0f32; 9];
        element_read_float(&bytes, Type::Mat3, ComponentType::U16, false, &mut out);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }
}
