//! Merging of per-object attribute buffers into one drawable buffer.
//!
//! A voxel scene is built from many small placed objects. Rendering each one
//! as its own draw call does not scale, so the scene layer flattens them:
//! every object contributes a [`MeshSource`] (its attribute arrays) and a
//! placement transform, and [`merge`] produces one [`MergedBuffer`] holding
//! a single contiguous array per attribute, ready to register with the
//! rendering layer as one drawable object.
//!
//! The merge is a pure, synchronous, two-pass computation:
//!
//! 1. **Discovery**: collect every distinct attribute name (first-seen
//!    order), fix its descriptor from the first source defining it, derive
//!    per-source vertex counts, and validate.
//! 2. **Population**: allocate zeroed output arrays, copy each source's
//!    arrays at its running vertex offset, and transform the just-written
//!    sub-range of point/direction attributes in place.
//!
//! Inputs are never mutated; on error nothing is allocated or returned.

use std::collections::HashMap;

use crate::math::{linear_part, normal_matrix, transform_point, Mat4, Vec3};

use super::attribute::{AttributeBuffer, AttributeData, ScalarType, Spatial};

/// Attribute name used to derive vertex counts.
pub const POSITION_ATTRIBUTE: &str = "position";

/// Components per position element.
const POSITION_ITEM_SIZE: usize = 3;

/// Errors reported by [`merge`].
///
/// All are detected during the discovery pass, before any output is
/// allocated; a failed merge never returns a partial buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The source and transform sequences have different lengths.
    ShapeMismatch {
        /// Number of sources provided.
        sources: usize,
        /// Number of transforms provided.
        transforms: usize,
    },
    /// A source lacks the required `position` attribute.
    MissingPositionAttribute {
        /// Index of the offending source.
        source: usize,
    },
    /// Two sources declare the same attribute with different strides.
    AttributeStrideConflict {
        /// Name of the conflicting attribute.
        attribute: String,
        /// Source that fixed the attribute's descriptor.
        first_source: usize,
        /// Source that disagrees.
        source: usize,
        /// Stride declared by `first_source`.
        expected: u32,
        /// Stride declared by `source`.
        found: u32,
    },
    /// Two sources declare the same attribute with different scalar types.
    AttributeTypeConflict {
        /// Name of the conflicting attribute.
        attribute: String,
        /// Source that fixed the attribute's descriptor.
        first_source: usize,
        /// Source that disagrees.
        source: usize,
        /// Scalar type declared by `first_source`.
        expected: ScalarType,
        /// Scalar type declared by `source`.
        found: ScalarType,
    },
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch {
                sources,
                transforms,
            } => write!(
                f,
                "shape mismatch: {sources} sources but {transforms} transforms"
            ),
            Self::MissingPositionAttribute { source } => {
                write!(f, "source {source} has no position attribute")
            }
            Self::AttributeStrideConflict {
                attribute,
                first_source,
                source,
                expected,
                found,
            } => write!(
                f,
                "attribute '{attribute}' stride conflict: source {first_source} \
                 declares {expected}, source {source} declares {found}"
            ),
            Self::AttributeTypeConflict {
                attribute,
                first_source,
                source,
                expected,
                found,
            } => write!(
                f,
                "attribute '{attribute}' type conflict: source {first_source} \
                 declares {expected}, source {source} declares {found}"
            ),
        }
    }
}

impl std::error::Error for MergeError {}

/// Options controlling transform semantics during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOptions {
    /// Transform direction attributes like points (full affine, translation
    /// included), reproducing the legacy behavior bit-for-bit.
    ///
    /// The default (`false`) applies the inverse-transpose of the linear
    /// part to directions, which is correct under non-uniform scale.
    pub legacy_normals: bool,
}

/// One mergeable input: an object's attribute arrays.
///
/// Attributes are kept in insertion order; the merge writes a source's
/// attributes in that order. Every source handed to [`merge`] must carry a
/// `position` attribute, which also determines its vertex count.
#[derive(Debug, Clone, Default)]
pub struct MeshSource {
    attributes: Vec<(String, AttributeBuffer)>,
}

impl MeshSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, buffer: AttributeBuffer) -> Self {
        let name = name.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = buffer;
        } else {
            self.attributes.push((name, buffer));
        }
        self
    }

    /// Add a float attribute, inferring its spatial tag from the name.
    #[must_use]
    pub fn with_floats(self, name: impl Into<String>, item_size: u32, values: Vec<f32>) -> Self {
        let name = name.into();
        let spatial = Spatial::infer(&name);
        let buffer = AttributeBuffer::new(values, item_size, spatial);
        self.with_attribute(name, buffer)
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttributeBuffer> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeBuffer)> {
        self.attributes.iter().map(|(n, b)| (n.as_str(), b))
    }

    /// Number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Vertex count derived from the `position` attribute, if present.
    pub fn vertex_count(&self) -> Option<usize> {
        self.get(POSITION_ATTRIBUTE)
            .map(|b| b.data().len() / POSITION_ITEM_SIZE)
    }
}

/// The merged output: one contiguous attribute array per discovered name.
///
/// Attributes appear in discovery order (first source that defined them,
/// then that source's insertion order), so iteration is deterministic.
/// The buffer is immutable once returned.
#[derive(Debug, Clone)]
pub struct MergedBuffer {
    attributes: Vec<(String, AttributeBuffer)>,
    vertex_count: usize,
}

impl MergedBuffer {
    /// Total number of vertices across all merged sources.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Look up a merged attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttributeBuffer> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    /// Iterate merged attributes in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeBuffer)> {
        self.attributes.iter().map(|(n, b)| (n.as_str(), b))
    }

    /// Attribute names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(n, _)| n.as_str())
    }

    /// Number of distinct attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Check whether the buffer holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Descriptor fixed by the first source defining an attribute.
struct AttributeSlot {
    name: String,
    scalar: ScalarType,
    item_size: u32,
    spatial: Spatial,
    first_source: usize,
}

/// Merge sources with default options (corrected direction transforms).
pub fn merge(sources: &[MeshSource], transforms: &[Mat4]) -> Result<MergedBuffer, MergeError> {
    merge_with_options(sources, transforms, &MergeOptions::default())
}

/// Merge an ordered sequence of sources, each placed by its transform, into
/// one buffer per attribute.
///
/// See the module docs for the algorithm. Attributes missing from a source
/// leave that source's vertex range zeroed; only `Spatial::Point` and
/// `Spatial::Direction` attributes are transformed.
pub fn merge_with_options(
    sources: &[MeshSource],
    transforms: &[Mat4],
    options: &MergeOptions,
) -> Result<MergedBuffer, MergeError> {
    if sources.len() != transforms.len() {
        return Err(MergeError::ShapeMismatch {
            sources: sources.len(),
            transforms: transforms.len(),
        });
    }

    // Discovery pass: fix descriptors in first-seen order, count vertices.
    let mut slots: Vec<AttributeSlot> = Vec::new();
    let mut slot_index: HashMap<String, usize> = HashMap::new();
    let mut vertex_counts: Vec<usize> = Vec::with_capacity(sources.len());
    let mut total_vertices = 0usize;

    for (source_index, source) in sources.iter().enumerate() {
        for (name, buffer) in source.iter() {
            match slot_index.get(name) {
                Some(&i) => {
                    let slot = &slots[i];
                    if slot.item_size != buffer.item_size() {
                        return Err(MergeError::AttributeStrideConflict {
                            attribute: name.to_string(),
                            first_source: slot.first_source,
                            source: source_index,
                            expected: slot.item_size,
                            found: buffer.item_size(),
                        });
                    }
                    if slot.scalar != buffer.scalar_type() {
                        return Err(MergeError::AttributeTypeConflict {
                            attribute: name.to_string(),
                            first_source: slot.first_source,
                            source: source_index,
                            expected: slot.scalar,
                            found: buffer.scalar_type(),
                        });
                    }
                }
                None => {
                    slot_index.insert(name.to_string(), slots.len());
                    slots.push(AttributeSlot {
                        name: name.to_string(),
                        scalar: buffer.scalar_type(),
                        item_size: buffer.item_size(),
                        spatial: buffer.spatial(),
                        first_source: source_index,
                    });
                }
            }
        }

        let count = source
            .vertex_count()
            .ok_or(MergeError::MissingPositionAttribute {
                source: source_index,
            })?;
        vertex_counts.push(count);
        total_vertices += count;
    }

    log::debug!(
        "merging {} sources: {} vertices, {} attributes",
        sources.len(),
        total_vertices,
        slots.len()
    );

    // Allocation: one zeroed array per discovered attribute.
    let mut outputs: Vec<AttributeBuffer> = slots
        .iter()
        .map(|slot| {
            AttributeBuffer::new(
                AttributeData::zeroed(slot.scalar, total_vertices * slot.item_size as usize),
                slot.item_size,
                slot.spatial,
            )
        })
        .collect();

    // Population pass: copy each source, transform spatial sub-ranges.
    let mut vertex_offset = 0usize;

    for (source_index, source) in sources.iter().enumerate() {
        let matrix = &transforms[source_index];

        for (name, buffer) in source.iter() {
            let slot_i = slot_index[name];
            let slot = &slots[slot_i];
            let output = &mut outputs[slot_i];

            let element_offset = vertex_offset * slot.item_size as usize;
            let capacity = vertex_counts[source_index] * slot.item_size as usize;
            let element_len = buffer.data().len().min(capacity);
            if buffer.data().len() > capacity {
                log::warn!(
                    "attribute '{}' of source {} covers more than its {} vertices; \
                     truncating to keep later sources intact",
                    slot.name,
                    source_index,
                    vertex_counts[source_index]
                );
            }
            output
                .data_mut()
                .copy_from(buffer.data(), element_offset, element_len);

            if slot.spatial == Spatial::None || element_len == 0 {
                continue;
            }
            let range = element_offset..element_offset + element_len;
            match output.data_mut().as_f32_mut() {
                Some(values) if slot.item_size as usize == POSITION_ITEM_SIZE => {
                    apply_transform(&mut values[range], matrix, slot.spatial, options);
                }
                _ => {
                    log::warn!(
                        "attribute '{}' is tagged {:?} but is not a 3-component \
                         float array; copied without transform",
                        slot.name,
                        slot.spatial
                    );
                }
            }
        }

        vertex_offset += vertex_counts[source_index];
    }

    Ok(MergedBuffer {
        attributes: slots
            .into_iter()
            .map(|slot| slot.name)
            .zip(outputs)
            .collect(),
        vertex_count: total_vertices,
    })
}

/// Transform a packed `[x, y, z]*` range in place.
fn apply_transform(values: &mut [f32], matrix: &Mat4, spatial: Spatial, options: &MergeOptions) {
    let as_point = spatial == Spatial::Point || options.legacy_normals;

    if as_point {
        for chunk in values.chunks_exact_mut(POSITION_ITEM_SIZE) {
            let p = transform_point(matrix, Vec3::new(chunk[0], chunk[1], chunk[2]));
            chunk.copy_from_slice(p.as_slice());
        }
    } else {
        // Directions ignore translation; inverse-transpose keeps normals
        // perpendicular under non-uniform scale. Singular matrices fall
        // back to the plain linear part. Renormalization is left to the
        // consumer so an identity transform is an exact no-op.
        let nm = normal_matrix(matrix).unwrap_or_else(|| linear_part(matrix));
        for chunk in values.chunks_exact_mut(POSITION_ITEM_SIZE) {
            let n = nm * Vec3::new(chunk[0], chunk[1], chunk[2]);
            chunk.copy_from_slice(n.as_slice());
        }
    }
}
