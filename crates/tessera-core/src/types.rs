//! Core value types for the layout vocabulary.

use crate::errors::DocumentError;

/// Extent used in place of "no limit" while measuring.
///
/// A finite sentinel keeps gravity and slack arithmetic well defined where
/// an infinite value would produce NaN.
pub const UNBOUNDED: f64 = 16_777_215.0;

/// Width and height of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a size from main-axis and cross-axis extents.
    pub fn from_axes(main_axis: Axis, main: f64, cross: f64) -> Self {
        match main_axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Extent along the given axis.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Replace the extent along the given axis.
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Shrink by the given insets, never going below zero.
    pub fn deflate(&self, insets: &Insets) -> Size {
        Size::new(
            (self.width - insets.horizontal()).max(0.0),
            (self.height - insets.vertical()).max(0.0),
        )
    }
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Left to right
    Horizontal,
    /// Top to bottom
    #[default]
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Stacking direction of a linear container, or scroll direction of a
/// scroll container.
pub type Orientation = Axis;

/// Edge insets, used for both margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    /// No insets on any side.
    pub const ZERO: Insets = Insets { top: 0.0, left: 0.0, bottom: 0.0, right: 0.0 };

    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }

    /// Same inset on all sides.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Horizontal insets on left/right, vertical insets on top/bottom.
    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Inset at the start of the axis (left or top).
    pub fn leading(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Inset at the end of the axis (right or bottom).
    pub fn trailing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Leading plus trailing inset along the axis.
    pub fn total(&self, axis: Axis) -> f64 {
        self.leading(axis) + self.trailing(axis)
    }

    /// Copy with negative sides clamped to zero.
    pub fn non_negative(&self) -> Insets {
        Insets::new(
            self.top.max(0.0),
            self.left.max(0.0),
            self.bottom.max(0.0),
            self.right.max(0.0),
        )
    }
}

/// Declared size of a node along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Size to the node's own content
    #[default]
    Fit,
    /// Take the parent's exact offer
    Stretch,
    /// A fixed size. Negative values behave like `Fit`.
    Exact(f64),
}

impl Dimension {
    /// The explicit size, if this is a usable fixed size.
    pub fn explicit(&self) -> Option<f64> {
        match *self {
            Dimension::Exact(value) if value >= 0.0 => Some(value),
            _ => None,
        }
    }

    pub fn is_stretch(&self) -> bool {
        matches!(self, Dimension::Stretch)
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Exact(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Dimension {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Fit => serializer.serialize_str("fit"),
            Dimension::Stretch => serializer.serialize_str("stretch"),
            Dimension::Exact(value) => serializer.serialize_f64(*value),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Dimension {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Keyword(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Dimension::Exact(value)),
            Raw::Keyword(keyword) => match keyword.as_str() {
                "fit" | "fit_content" | "wrap_content" => Ok(Dimension::Fit),
                "stretch" | "stretch_to_parent" | "match_parent" => Ok(Dimension::Stretch),
                other => Err(serde::de::Error::custom(format!(
                    "invalid dimension keyword '{other}'"
                ))),
            },
        }
    }
}

/// How binding an offered size is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeasureSpec {
    /// No limit, the offered number is only a hint
    #[default]
    Unspecified,
    /// The offered number is an upper bound
    Limit,
    /// The node must take exactly the offered number
    Exact,
}

impl MeasureSpec {
    /// Resolve a natural extent against an offer under this mode.
    pub fn resolve(self, natural: f64, offered: f64) -> f64 {
        match self {
            MeasureSpec::Exact => offered,
            MeasureSpec::Limit => natural.min(offered),
            MeasureSpec::Unspecified => natural,
        }
    }

    /// Resolve both axes of a natural size against an offer.
    pub fn resolve_size(natural: Size, offered: Size, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        Size::new(
            width_spec.resolve(natural.width, offered.width),
            height_spec.resolve(natural.height, offered.height),
        )
    }

    /// The mode a child inherits by default from this parent mode.
    pub fn derived(self) -> MeasureSpec {
        match self {
            MeasureSpec::Unspecified => MeasureSpec::Unspecified,
            MeasureSpec::Limit | MeasureSpec::Exact => MeasureSpec::Limit,
        }
    }
}

/// Fractional alignment of a child within its slack space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Gravity {
    /// 0 = left, 1 = right
    pub horizontal: f64,
    /// 0 = top, 1 = bottom
    pub vertical: f64,
}

impl Gravity {
    pub const TOP_LEFT: Gravity = Gravity { horizontal: 0.0, vertical: 0.0 };
    pub const CENTER: Gravity = Gravity { horizontal: 0.5, vertical: 0.5 };
    pub const BOTTOM_RIGHT: Gravity = Gravity { horizontal: 1.0, vertical: 1.0 };

    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self { horizontal, vertical }
    }

    /// Parse pipe-separated gravity flags such as `"center_horizontal|bottom"`.
    ///
    /// Axes not mentioned stay at the leading edge.
    pub fn from_flags(flags: &str) -> Result<Gravity, DocumentError> {
        let mut gravity = Gravity::TOP_LEFT;
        for flag in flags.split('|').map(str::trim).filter(|f| !f.is_empty()) {
            match flag {
                "left" | "start" => gravity.horizontal = 0.0,
                "center_horizontal" => gravity.horizontal = 0.5,
                "right" | "end" => gravity.horizontal = 1.0,
                "top" => gravity.vertical = 0.0,
                "center_vertical" => gravity.vertical = 0.5,
                "bottom" => gravity.vertical = 1.0,
                "center" => gravity = Gravity::CENTER,
                other => {
                    return Err(DocumentError::UnknownGravity {
                        flag: other.to_string(),
                    })
                }
            }
        }
        Ok(gravity)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Gravity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flags(String),
            Fractions {
                #[serde(default)]
                horizontal: f64,
                #[serde(default)]
                vertical: f64,
            },
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flags(flags) => Gravity::from_flags(&flags).map_err(serde::de::Error::custom),
            Raw::Fractions { horizontal, vertical } => Ok(Gravity::new(horizontal, vertical)),
        }
    }
}

/// Tri-state visibility of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Visibility {
    /// Drawn and laid out
    #[default]
    Visible,
    /// Not drawn, but still occupies its slot
    Invisible,
    /// Not drawn and takes no space
    Gone,
}
