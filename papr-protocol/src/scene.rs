//! Scene documents
//!
//! A scene is an ordered list of shapes, each tagged by a `Kind` string:
//! ```text
//! { "Shapes": [ { "Kind": "Line", "PositionX": 10, "PositionY": 20,
//!                 "OrientationX": 1, "OrientationY": 0, "Length": 100 }, ... ] }
//! ```
//!
//! Shapes are decoded into [`Shape`] up front so that rendering never starts
//! on a document that turns out to be malformed halfway through. Kind-specific
//! fields fall back to fixed defaults when absent or of the wrong type.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;
use serde_json::Value;

use crate::fields::Fields;
use crate::vec2::Vec2;

/// Widest accepted stroke, in pixels
pub const MAX_THICKNESS: u32 = 32;

/// Packed monochrome bitmap embedded in an `Image` shape
///
/// Field values are kept as sent; validation happens in the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMatrix {
    /// Source width in pixels
    pub width: i32,
    /// Source height in pixels
    pub height: i32,
    /// Bits per pixel (only 1 is renderable)
    pub bpp: i32,
    /// Polarity: when true a set bit is a black pixel
    pub black_is_one: bool,
    /// Base64 of the row-major, MSB-first packed bits
    pub data: String,
}

impl ImageMatrix {
    fn from_fields(fields: Fields<'_>) -> Self {
        Self {
            width: fields.int_or(&["Width"], 0),
            height: fields.int_or(&["Height"], 0),
            bpp: fields.int_or(&["Bpp"], 1),
            black_is_one: fields.flag_or(&["BlackIsOne"], true),
            data: fields
                .non_empty_text(&["Data", "data"])
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Fields shared by every shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Anchor point
    pub position: Vec2,
    /// Unit "forward" direction
    pub orientation: Vec2,
    /// Stroke width in pixels for line-based geometry, 1..=[`MAX_THICKNESS`]
    pub thickness: u32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec2::default(),
            orientation: Vec2::UNIT_X,
            thickness: 1,
        }
    }
}

impl Placement {
    fn from_fields(fields: Fields<'_>) -> Self {
        let position = Vec2::new(
            fields.number_or(&["PositionX"], 0.0),
            fields.number_or(&["PositionY"], 0.0),
        );
        let orientation = Vec2::new(
            fields.number_or(&["OrientationX"], 1.0),
            fields.number_or(&["OrientationY"], 0.0),
        )
        .normalize();
        let thickness = fields
            .int_or(&["Thickness"], 1)
            .clamp(1, MAX_THICKNESS as i32) as u32;

        Self {
            position,
            orientation,
            thickness,
        }
    }

    /// Unit "sideways" direction, 90° counter-clockwise from the orientation
    pub fn normal(&self) -> Vec2 {
        self.orientation.perp()
    }

    /// Point `distance` along the orientation from the position
    pub fn along(&self, distance: f64) -> Vec2 {
        self.position + self.orientation * distance
    }
}

/// Kind-specific shape parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Filled dot at the position
    Point,
    Line {
        length: f64,
    },
    /// Oriented box centered on the position
    Rectangle {
        width: f64,
        height: f64,
    },
    Circle {
        radius: f64,
    },
    Text {
        text: String,
        font_size: f64,
    },
    MultilineText {
        text: String,
        font_size: f64,
    },
    Icon {
        icon_key: String,
        size: f64,
    },
    /// Bitmap resampled into a box centered on the position
    Image {
        width: f64,
        height: f64,
        matrix: Option<ImageMatrix>,
    },
    TextBox {
        width: f64,
        height: f64,
        text: String,
        font_size: f64,
    },
    Arrow {
        length: f64,
        head_length: f64,
    },
    CenterlineRectangle {
        length: f64,
        width: f64,
    },
    /// Orientation and normal axes with arrow heads
    Referential {
        x_axis_length: f64,
        y_axis_length: f64,
    },
    /// Linear dimension with witness lines and a label
    Dimension {
        length: f64,
        offset: f64,
        text: Option<String>,
    },
    AngleDimension {
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        text: Option<String>,
    },
    Arc {
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    },
    /// Anything the renderer does not know how to draw
    Unsupported {
        kind: String,
    },
}

/// A single decoded shape
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub placement: Placement,
    pub kind: ShapeKind,
}

impl Shape {
    /// Decode one element of a `Shapes` array
    ///
    /// Never fails: elements that are not objects or carry an unknown
    /// `Kind` decode to [`ShapeKind::Unsupported`].
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = Fields::of(value) else {
            return Self {
                placement: Placement::default(),
                kind: ShapeKind::Unsupported {
                    kind: String::new(),
                },
            };
        };

        Self {
            placement: Placement::from_fields(fields),
            kind: ShapeKind::from_fields(fields),
        }
    }

    /// The wire name of this shape's kind
    pub fn kind_name(&self) -> &str {
        self.kind.name()
    }
}

impl ShapeKind {
    fn from_fields(fields: Fields<'_>) -> Self {
        let kind = fields.text_or(&["Kind"], "");
        let number = |key: &str, fallback: f64| fields.number_or(&[key], fallback);
        let text = |key: &str, fallback: &str| fields.text(&[key]).unwrap_or(fallback).to_string();
        let label = || fields.non_empty_text(&["Text"]).map(ToString::to_string);

        match kind {
            "Point" => ShapeKind::Point,
            "Line" => ShapeKind::Line {
                length: number("Length", 0.0),
            },
            "Rectangle" => ShapeKind::Rectangle {
                width: number("Width", 0.0),
                height: number("Height", 0.0),
            },
            "Circle" => ShapeKind::Circle {
                radius: number("Radius", 0.0),
            },
            "Text" => ShapeKind::Text {
                text: text("Text", "Text"),
                font_size: number("FontSize", 16.0),
            },
            "MultilineText" => ShapeKind::MultilineText {
                text: text("Text", "Line 1\nLine 2"),
                font_size: number("FontSize", 16.0),
            },
            "Icon" => ShapeKind::Icon {
                icon_key: text("IconKey", "*"),
                size: number("Size", 24.0),
            },
            "Image" => ShapeKind::Image {
                width: number("Width", 0.0),
                height: number("Height", 0.0),
                matrix: fields
                    .object(&["ImageMatrix"])
                    .map(ImageMatrix::from_fields),
            },
            "TextBox" => ShapeKind::TextBox {
                width: number("Width", 0.0),
                height: number("Height", 0.0),
                text: text("Text", "Text"),
                font_size: number("FontSize", 14.0),
            },
            "Arrow" => ShapeKind::Arrow {
                length: number("Length", 0.0),
                head_length: number("HeadLength", 18.0),
            },
            "CenterlineRectangle" => ShapeKind::CenterlineRectangle {
                length: number("Length", 0.0),
                width: number("Width", 0.0),
            },
            "Referential" => ShapeKind::Referential {
                x_axis_length: number("XAxisLength", 80.0),
                y_axis_length: number("YAxisLength", 80.0),
            },
            "Dimension" => ShapeKind::Dimension {
                length: number("Length", 0.0),
                offset: number("Offset", 24.0),
                text: label(),
            },
            "AngleDimension" => ShapeKind::AngleDimension {
                radius: number("Radius", 40.0),
                start_angle: number("StartAngleRad", 0.0),
                sweep_angle: number("SweepAngleRad", FRAC_PI_2),
                text: label(),
            },
            "Arc" => ShapeKind::Arc {
                radius: number("Radius", 40.0),
                start_angle: number("StartAngleRad", 0.0),
                sweep_angle: number("SweepAngleRad", FRAC_PI_2),
            },
            other => ShapeKind::Unsupported {
                kind: other.to_string(),
            },
        }
    }

    /// The wire name of this kind
    pub fn name(&self) -> &str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::Line { .. } => "Line",
            ShapeKind::Rectangle { .. } => "Rectangle",
            ShapeKind::Circle { .. } => "Circle",
            ShapeKind::Text { .. } => "Text",
            ShapeKind::MultilineText { .. } => "MultilineText",
            ShapeKind::Icon { .. } => "Icon",
            ShapeKind::Image { .. } => "Image",
            ShapeKind::TextBox { .. } => "TextBox",
            ShapeKind::Arrow { .. } => "Arrow",
            ShapeKind::CenterlineRectangle { .. } => "CenterlineRectangle",
            ShapeKind::Referential { .. } => "Referential",
            ShapeKind::Dimension { .. } => "Dimension",
            ShapeKind::AngleDimension { .. } => "AngleDimension",
            ShapeKind::Arc { .. } => "Arc",
            ShapeKind::Unsupported { kind } => kind.as_str(),
        }
    }
}

/// An ordered list of shapes; later shapes draw over earlier ones
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Decode every element of a validated `Shapes` array
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            shapes: values.iter().map(Shape::from_value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
