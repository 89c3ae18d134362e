//! Surface cell categories.

/// What an agent finds at a raster cell.
///
/// `Drivable` and `Pointer` are *safe*: sensors see through them and the
/// vehicle may occupy them.  `Markup` is the white edge / slot paint and
/// `OffTrack` is everything else (grass, parked cars, outside the canvas).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Drivable,
    /// Lane dashes on a track or the target outline in a lot.
    Pointer,
    Markup,
    #[default]
    OffTrack,
}

impl Category {
    #[inline]
    pub fn is_safe(self) -> bool {
        matches!(self, Category::Drivable | Category::Pointer)
    }

    /// Display color used by renderers.
    pub fn rgba(self) -> [u8; 4] {
        match self {
            Category::Drivable => [80, 80, 80, 255],
            Category::Pointer  => [242, 188, 10, 255],
            Category::Markup   => [255, 255, 255, 255],
            Category::OffTrack => [63, 155, 11, 255],
        }
    }
}
