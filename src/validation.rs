use std::fmt;

use byteorder::{ByteOrder, LE};

use crate::accessor::ComponentType;
use crate::buffer;
use crate::root::Root;

/// One step of a JSON source path.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    /// An object member name.
    Field(&'static str),
    /// An array element index.
    Index(usize),
    /// A dictionary key, such as an attribute name.
    Key(String),
}

/// Locates a reported problem within the document as a chain of member
/// names, array indices, and dictionary keys. Rendered only on demand.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Path(Vec<Segment>);

impl Path {
    /// Creates an empty JSON source path.
    pub fn new() -> Self {
        Path(Vec::new())
    }

    /// Returns a new path ending with the given member name.
    pub fn field(&self, name: &'static str) -> Self {
        self.with(Segment::Field(name))
    }

    /// Returns a new path ending with the given array index.
    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// Returns a new path ending with the given dictionary key.
    pub fn key(&self, key: &str) -> Self {
        self.with(Segment::Key(key.to_owned()))
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Key(key) => write!(f, "[\"{}\"]", key)?,
            }
        }
        Ok(())
    }
}

/// Specifies what kind of problem was identified.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// An index was found to be out of bounds.
    IndexOutOfBounds,
    /// An invalid value was identified.
    Invalid,
    /// Some required data has been omitted.
    Missing,
    /// A node is claimed by more than one parent or scene.
    MultipleParents,
    /// A buffer or buffer view is too small for the range projected over it.
    TooShort,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Error::IndexOutOfBounds => "index out of bounds",
                Error::Invalid => "invalid value",
                Error::Missing => "missing data",
                Error::MultipleParents => "node claimed by multiple parents",
                Error::TooShort => "data too short",
            }
        )
    }
}

impl std::error::Error for Error {}

impl Root {
    /// Cross-checks sizes, index bounds, and count coherence over the
    /// populated graph.
    ///
    /// All findings are collected; the graph is never mutated, so callers may
    /// inspect the report and proceed anyway.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let mut report = Vec::new();
        self.validate_accessors(&mut report);
        self.validate_buffer_views(&mut report);
        self.validate_meshes(&mut report);
        self.validate_nodes(&mut report);
        if report.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::Validation(report))
        }
    }

    fn validate_accessors(&self, report: &mut Vec<(Path, Error)>) {
        for (index, accessor) in self.accessors.iter().enumerate() {
            let path = || Path::new().field("accessors").index(index);
            let element_size = accessor.element_size();

            if let Some(view) = accessor.buffer_view.and_then(|view| self.get(view)) {
                let required = accessor.byte_offset
                    + accessor.stride * accessor.count.saturating_sub(1)
                    + element_size;
                if view.byte_length < required {
                    report.push((path(), Error::TooShort));
                }
            }

            if let Some(sparse) = accessor.sparse.as_ref() {
                let index_size = sparse.indices_component_type.size();
                let indices_required = sparse.indices_byte_offset + index_size * sparse.count;
                let values_required = sparse.values_byte_offset + element_size * sparse.count;

                let indices_view = sparse
                    .indices_buffer_view
                    .and_then(|view| self.get(view));
                let values_view = sparse.values_buffer_view.and_then(|view| self.get(view));
                if indices_view.map_or(false, |view| view.byte_length < indices_required)
                    || values_view.map_or(false, |view| view.byte_length < values_required)
                {
                    report.push((path().field("sparse"), Error::TooShort));
                }

                if !sparse.indices_component_type.is_index_type() {
                    report.push((
                        path().field("sparse.indices.componentType"),
                        Error::Invalid,
                    ));
                }

                if let Some(view) = indices_view {
                    if let Some(bound) = self.index_bound(
                        view,
                        sparse.indices_byte_offset,
                        sparse.indices_component_type,
                        sparse.count,
                    ) {
                        if bound >= accessor.count {
                            report.push((path().field("sparse.indices"), Error::TooShort));
                        }
                    }
                }
            }
        }
    }

    fn validate_buffer_views(&self, report: &mut Vec<(Path, Error)>) {
        for (index, view) in self.buffer_views.iter().enumerate() {
            let required = view.byte_offset + view.byte_length;
            if let Some(buffer) = view.buffer.and_then(|buffer| self.get(buffer)) {
                if buffer.byte_length < required {
                    report.push((
                        Path::new().field("bufferViews").index(index),
                        Error::TooShort,
                    ));
                }
            }
        }
    }

    fn validate_meshes(&self, report: &mut Vec<(Path, Error)>) {
        for (index, mesh) in self.meshes.iter().enumerate() {
            let path = || Path::new().field("meshes").index(index);
            let first_target_count = mesh
                .primitives
                .first()
                .map_or(0, |primitive| primitive.targets.len());

            if !mesh.weights.is_empty()
                && !mesh.primitives.is_empty()
                && first_target_count != mesh.weights.len()
            {
                report.push((path().field("weights"), Error::Invalid));
            }

            for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
                let path = || path().field("primitives").index(primitive_index);

                if primitive.targets.len() != first_target_count {
                    report.push((path().field("targets"), Error::Invalid));
                }

                let first = match primitive
                    .attributes
                    .first()
                    .and_then(|attribute| self.get(attribute.accessor))
                {
                    Some(first) => first,
                    None => continue,
                };

                for attribute in &primitive.attributes {
                    if let Some(accessor) = self.get(attribute.accessor) {
                        if accessor.count != first.count {
                            report.push((
                                path().field("attributes").key(&attribute.name),
                                Error::Invalid,
                            ));
                        }
                    }
                }

                for (target_index, target) in primitive.targets.iter().enumerate() {
                    for attribute in &target.attributes {
                        if let Some(accessor) = self.get(attribute.accessor) {
                            if accessor.count != first.count {
                                report.push((
                                    path()
                                        .field("targets")
                                        .index(target_index)
                                        .key(&attribute.name),
                                    Error::Invalid,
                                ));
                            }
                        }
                    }
                }

                if let Some(indices) = primitive.indices.and_then(|indices| self.get(indices)) {
                    if !indices.component_type.is_index_type() {
                        report.push((path().field("indices"), Error::Invalid));
                    } else if let Some(view) =
                        indices.buffer_view.and_then(|view| self.get(view))
                    {
                        if let Some(bound) = self.index_bound(
                            view,
                            indices.byte_offset,
                            indices.component_type,
                            indices.count,
                        ) {
                            if bound >= first.count {
                                report.push((path().field("indices"), Error::TooShort));
                            }
                        }
                    }
                }
            }
        }
    }

    fn validate_nodes(&self, report: &mut Vec<(Path, Error)>) {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.weights.is_empty() {
                continue;
            }
            if let Some(mesh) = node.mesh.and_then(|mesh| self.get(mesh)) {
                let target_count = mesh
                    .primitives
                    .first()
                    .map_or(0, |primitive| primitive.targets.len());
                if !mesh.primitives.is_empty() && target_count != node.weights.len() {
                    report.push((
                        Path::new().field("nodes").index(index).field("weights"),
                        Error::Invalid,
                    ));
                }
            }
        }
    }

    /// Scans loaded index data for its maximum value. `None` when the
    /// backing buffer is not loaded or the range is unreadable.
    fn index_bound(
        &self,
        view: &buffer::View,
        byte_offset: usize,
        component_type: ComponentType,
        count: usize,
    ) -> Option<usize> {
        let data = self.buffer_data(view.buffer?)?;
        let component_size = component_type.size();
        let start = view.byte_offset + byte_offset;
        let bytes = data.get(start..start + component_size * count)?;
        let mut bound = 0;
        for element in 0..count {
            let value = match component_type {
                ComponentType::U8 => bytes[element] as usize,
                ComponentType::U16 => LE::read_u16(&bytes[element * 2..]) as usize,
                ComponentType::U32 => LE::read_u32(&bytes[element * 4..]) as usize,
                _ => return None,
            };
            bound = bound.max(value);
        }
        Some(bound)
    }
}
