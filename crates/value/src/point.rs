//! Spatial points
//!
//! A point is a coordinate reference system plus two or three coordinates.
//! Geographic systems store `[longitude, latitude(, height)]`, cartesian ones
//! `[x, y(, z)]`. Coordinates are kept inline, so cloning a point never
//! allocates.
//!
//! Points order by CRS code first and then coordinate by coordinate, with the
//! same NaN rule as doubles.

use core::cmp::Ordering;
use core::fmt;
use core::hash::Hasher;

use smallvec::SmallVec;

use crate::error::{ValueError, ValueResult};
use crate::number::{compare_floating, hash_floating};
use crate::writer::ValueWriter;

/// Supported coordinate reference systems
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateReferenceSystem {
    Wgs84,
    Wgs84_3D,
    Cartesian,
    Cartesian3D,
}

impl CoordinateReferenceSystem {
    pub const ALL: [Self; 4] = [Self::Wgs84, Self::Wgs84_3D, Self::Cartesian, Self::Cartesian3D];

    /// EPSG/SR-ORG code
    pub const fn code(&self) -> i32 {
        match self {
            Self::Wgs84 => 4326,
            Self::Wgs84_3D => 4979,
            Self::Cartesian => 7203,
            Self::Cartesian3D => 9157,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|crs| crs.code() == code)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Wgs84 => "wgs-84",
            Self::Wgs84_3D => "wgs-84-3d",
            Self::Cartesian => "cartesian",
            Self::Cartesian3D => "cartesian-3d",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|crs| crs.name().eq_ignore_ascii_case(name))
    }

    pub const fn dimension(&self) -> usize {
        match self {
            Self::Wgs84 | Self::Cartesian => 2,
            Self::Wgs84_3D | Self::Cartesian3D => 3,
        }
    }

    pub const fn is_geographic(&self) -> bool {
        matches!(self, Self::Wgs84 | Self::Wgs84_3D)
    }

    /// Coordinate names in storage order
    pub const fn axis_names(&self) -> &'static [&'static str] {
        if self.is_geographic() {
            &["longitude", "latitude", "height"]
        } else {
            &["x", "y", "z"]
        }
    }
}

impl fmt::Display for CoordinateReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point in one of the supported coordinate reference systems
#[derive(Debug, Clone)]
pub struct PointValue {
    crs: CoordinateReferenceSystem,
    coordinates: SmallVec<[f64; 3]>,
}

impl PointValue {
    /// Create a point; the coordinate count must match the CRS dimension
    pub fn new(crs: CoordinateReferenceSystem, coordinates: &[f64]) -> ValueResult<Self> {
        if coordinates.len() != crs.dimension() {
            return Err(ValueError::invalid_point(format!(
                "{} expects {} coordinates, got {}",
                crs,
                crs.dimension(),
                coordinates.len()
            )));
        }
        Ok(Self {
            crs,
            coordinates: SmallVec::from_slice(coordinates),
        })
    }

    pub fn cartesian(x: f64, y: f64) -> Self {
        Self::from_array(CoordinateReferenceSystem::Cartesian, [x, y])
    }

    pub fn cartesian_3d(x: f64, y: f64, z: f64) -> Self {
        Self::from_array(CoordinateReferenceSystem::Cartesian3D, [x, y, z])
    }

    pub fn wgs84(longitude: f64, latitude: f64) -> Self {
        Self::from_array(CoordinateReferenceSystem::Wgs84, [longitude, latitude])
    }

    pub fn wgs84_3d(longitude: f64, latitude: f64, height: f64) -> Self {
        Self::from_array(CoordinateReferenceSystem::Wgs84_3D, [longitude, latitude, height])
    }

    fn from_array<const N: usize>(crs: CoordinateReferenceSystem, coordinates: [f64; N]) -> Self {
        debug_assert_eq!(N, crs.dimension());
        Self {
            crs,
            coordinates: SmallVec::from_slice(&coordinates),
        }
    }

    pub const fn crs(&self) -> CoordinateReferenceSystem {
        self.crs
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.crs.code().cmp(&other.crs.code()).then_with(|| {
            self.coordinates
                .iter()
                .zip(other.coordinates.iter())
                .map(|(a, b)| compare_floating(*a, *b))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| self.coordinates.len().cmp(&other.coordinates.len()))
        })
    }

    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.crs.code());
        for c in &self.coordinates {
            hash_floating(*c, state);
        }
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_point(self.crs, &self.coordinates)
    }
}

impl PartialEq for PointValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other).is_eq()
    }
}

impl Eq for PointValue {}
