//! Per-vertex attribute buffers.
//!
//! An attribute is a named, fixed-stride numeric array: positions, normals,
//! texture coordinates, colors. This module provides:
//!
//! - [`ScalarType`] - Numeric element type of an attribute array
//! - [`AttributeData`] - Typed storage for one attribute array
//! - [`Spatial`] - Whether an attribute is transformed as a point, a
//!   direction, or not at all
//! - [`AttributeBuffer`] - One attribute array with its stride and spatial tag

/// Numeric element type of an attribute array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// 32-bit float.
    F32,
    /// 32-bit signed integer.
    I32,
    /// 32-bit unsigned integer.
    U32,
    /// 8-bit unsigned integer (e.g. packed colors).
    U8,
}

impl ScalarType {
    /// Get the size in bytes of one element.
    pub fn size(&self) -> usize {
        match self {
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::U8 => 1,
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::F32 => write!(f, "f32"),
            Self::I32 => write!(f, "i32"),
            Self::U32 => write!(f, "u32"),
            Self::U8 => write!(f, "u8"),
        }
    }
}

/// Typed storage for one attribute array.
///
/// One variant per [`ScalarType`]. The merge routine only combines arrays
/// of the same variant; transforms apply to `Float32` data only.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    /// 32-bit float values.
    Float32(Vec<f32>),
    /// 32-bit signed integer values.
    Int32(Vec<i32>),
    /// 32-bit unsigned integer values.
    Uint32(Vec<u32>),
    /// 8-bit unsigned integer values.
    Uint8(Vec<u8>),
}

impl AttributeData {
    /// Allocate a zero-filled array of the given scalar type and length.
    pub fn zeroed(scalar: ScalarType, len: usize) -> Self {
        match scalar {
            ScalarType::F32 => Self::Float32(vec![0.0; len]),
            ScalarType::I32 => Self::Int32(vec![0; len]),
            ScalarType::U32 => Self::Uint32(vec![0; len]),
            ScalarType::U8 => Self::Uint8(vec![0; len]),
        }
    }

    /// Get the scalar type of this array.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Self::Float32(_) => ScalarType::F32,
            Self::Int32(_) => ScalarType::I32,
            Self::Uint32(_) => ScalarType::U32,
            Self::Uint8(_) => ScalarType::U8,
        }
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Float32(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Uint32(v) => v.len(),
            Self::Uint8(v) => v.len(),
        }
    }

    /// Check whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the array as raw bytes, suitable for upload to a rendering layer.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Float32(v) => bytemuck::cast_slice(v),
            Self::Int32(v) => bytemuck::cast_slice(v),
            Self::Uint32(v) => bytemuck::cast_slice(v),
            Self::Uint8(v) => v.as_slice(),
        }
    }

    /// Get the values as an f32 slice, if this is a `Float32` array.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            Self::Float32(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Get the values as a mutable f32 slice, if this is a `Float32` array.
    pub fn as_f32_mut(&mut self) -> Option<&mut [f32]> {
        match self {
            Self::Float32(v) => Some(v.as_mut_slice()),
            _ => None,
        }
    }

    /// Copy the first `len` elements of `src` into `self` starting at
    /// `offset`.
    ///
    /// Both arrays must have the same scalar type and the copy must fit;
    /// callers (the merge routine) validate this during discovery.
    pub(crate) fn copy_from(&mut self, src: &AttributeData, offset: usize, len: usize) {
        match (self, src) {
            (Self::Float32(dst), Self::Float32(s)) => {
                dst[offset..offset + len].copy_from_slice(&s[..len])
            }
            (Self::Int32(dst), Self::Int32(s)) => {
                dst[offset..offset + len].copy_from_slice(&s[..len])
            }
            (Self::Uint32(dst), Self::Uint32(s)) => {
                dst[offset..offset + len].copy_from_slice(&s[..len])
            }
            (Self::Uint8(dst), Self::Uint8(s)) => {
                dst[offset..offset + len].copy_from_slice(&s[..len])
            }
            (dst, src) => {
                debug_assert!(
                    false,
                    "scalar type mismatch in copy: {} vs {}",
                    dst.scalar_type(),
                    src.scalar_type()
                );
            }
        }
    }
}

impl From<Vec<f32>> for AttributeData {
    fn from(values: Vec<f32>) -> Self {
        Self::Float32(values)
    }
}

impl From<Vec<i32>> for AttributeData {
    fn from(values: Vec<i32>) -> Self {
        Self::Int32(values)
    }
}

impl From<Vec<u32>> for AttributeData {
    fn from(values: Vec<u32>) -> Self {
        Self::Uint32(values)
    }
}

impl From<Vec<u8>> for AttributeData {
    fn from(values: Vec<u8>) -> Self {
        Self::Uint8(values)
    }
}

/// How an attribute responds to a rigid transform.
///
/// Replaces name-based string matching with an explicit, testable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spatial {
    /// Transformed as a point: full affine, translation included.
    Point,
    /// Transformed as a direction: linear part only, no translation.
    Direction,
    /// Copied verbatim, never transformed (default).
    #[default]
    None,
}

impl Spatial {
    /// Infer the spatial tag from a conventional attribute name.
    ///
    /// `"position"` is a point, `"normal"` is a direction, everything
    /// else is non-spatial.
    pub fn infer(name: &str) -> Self {
        match name {
            "position" => Self::Point,
            "normal" => Self::Direction,
            _ => Self::None,
        }
    }
}

/// One per-vertex attribute array with its stride and spatial tag.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    data: AttributeData,
    item_size: u32,
    spatial: Spatial,
}

impl AttributeBuffer {
    /// Create an attribute buffer with an explicit spatial tag.
    pub fn new(data: impl Into<AttributeData>, item_size: u32, spatial: Spatial) -> Self {
        Self {
            data: data.into(),
            item_size,
            spatial,
        }
    }

    /// Create a position buffer (stride 3, transformed as points).
    pub fn position(values: Vec<f32>) -> Self {
        Self::new(values, 3, Spatial::Point)
    }

    /// Create a normal buffer (stride 3, transformed as directions).
    pub fn normal(values: Vec<f32>) -> Self {
        Self::new(values, 3, Spatial::Direction)
    }

    /// Create a texture coordinate buffer (stride 2, never transformed).
    pub fn uv(values: Vec<f32>) -> Self {
        Self::new(values, 2, Spatial::None)
    }

    /// Create an RGB color buffer (stride 3, never transformed).
    pub fn color(values: Vec<f32>) -> Self {
        Self::new(values, 3, Spatial::None)
    }

    /// Get the attribute data.
    pub fn data(&self) -> &AttributeData {
        &self.data
    }

    /// Get the number of components per vertex.
    pub fn item_size(&self) -> u32 {
        self.item_size
    }

    /// Get the spatial tag.
    pub fn spatial(&self) -> Spatial {
        self.spatial
    }

    /// Get the scalar type of the underlying array.
    pub fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    /// Number of vertices covered by this buffer (`len / item_size`).
    pub fn vertex_count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.data.len() / self.item_size as usize
        }
    }

    pub(crate) fn data_mut(&mut self) -> &mut AttributeData {
        &mut self.data
    }
}
