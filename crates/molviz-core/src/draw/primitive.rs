//! Draw primitives emitted by the diagram renderer.
//!
//! A [`Primitive`] is plain data: lines, polylines, filled polygons,
//! ellipses, rectangles and text runs, all in final diagram coordinates.
//! Hosts may consume them directly or convert them to SVG nodes with
//! [`Primitive::to_svg_node`].

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, TextStyle, layer::SvgNode, text},
    geometry::{Bounds, Point, Size},
};

/// A single run of text centered on `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    content: String,
    position: Point,
    style: TextStyle,
    color: Color,
}

impl TextRun {
    pub fn new(content: impl Into<String>, position: Point, style: TextStyle, color: Color) -> Self {
        Self {
            content: content.into(),
            position,
            style,
            color,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> Size {
        text::measure(&self.content, &self.style)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        stroke: StrokeDefinition,
    },
    Polyline {
        points: Vec<Point>,
        stroke: StrokeDefinition,
    },
    /// Closed shape filled with `fill`.
    Polygon { points: Vec<Point>, fill: Color },
    Ellipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
    },
    Rect {
        bounds: Bounds,
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
    },
    Text(TextRun),
}

impl Primitive {
    pub fn line(from: Point, to: Point, stroke: StrokeDefinition) -> Self {
        Self::Line { from, to, stroke }
    }

    pub fn circle(
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
    ) -> Self {
        Self::Ellipse {
            center,
            radius_x: radius,
            radius_y: radius,
            fill,
            stroke,
        }
    }

    pub fn text(run: TextRun) -> Self {
        Self::Text(run)
    }

    /// Short lowercase name of the primitive kind, used in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Polyline { .. } => "polyline",
            Self::Polygon { .. } => "polygon",
            Self::Ellipse { .. } => "ellipse",
            Self::Rect { .. } => "rect",
            Self::Text(_) => "text",
        }
    }

    /// Axis-aligned extent of the primitive, ignoring stroke width.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Line { from, to, .. } => Bounds::from_points([*from, *to]),
            Self::Polyline { points, .. } | Self::Polygon { points, .. } => {
                Bounds::from_points(points.iter().copied())
            }
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
                ..
            } => Some(Bounds::new_from_center(
                *center,
                Size::new(radius_x * 2.0, radius_y * 2.0),
            )),
            Self::Rect { bounds, .. } => Some(*bounds),
            Self::Text(run) => Some(Bounds::new_from_center(run.position(), run.size())),
        }
    }

    pub fn to_svg_node(&self) -> SvgNode {
        match self {
            Self::Line { from, to, stroke } => {
                let line = svg_element::Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y());
                Box::new(apply_stroke!(line, stroke))
            }
            Self::Polyline { points, stroke } => {
                let polyline = svg_element::Polyline::new()
                    .set("points", points_attribute(points))
                    .set("fill", "none");
                Box::new(apply_stroke!(polyline, stroke))
            }
            Self::Polygon { points, fill } => Box::new(
                svg_element::Polygon::new()
                    .set("points", points_attribute(points))
                    .set("fill", fill.to_hex())
                    .set("fill-opacity", fill.alpha()),
            ),
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
                fill,
                stroke,
            } => {
                let mut ellipse = svg_element::Ellipse::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("rx", *radius_x)
                    .set("ry", *radius_y);
                ellipse = match fill {
                    Some(fill) => ellipse
                        .set("fill", fill.to_hex())
                        .set("fill-opacity", fill.alpha()),
                    None => ellipse.set("fill", "none"),
                };
                match stroke {
                    Some(stroke) => Box::new(apply_stroke!(ellipse, stroke)),
                    None => Box::new(ellipse),
                }
            }
            Self::Rect {
                bounds,
                fill,
                stroke,
            } => {
                let mut rect = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height());
                rect = match fill {
                    Some(fill) => rect
                        .set("fill", fill.to_hex())
                        .set("fill-opacity", fill.alpha()),
                    None => rect.set("fill", "none"),
                };
                match stroke {
                    Some(stroke) => Box::new(apply_stroke!(rect, stroke)),
                    None => Box::new(rect),
                }
            }
            Self::Text(run) => Box::new(
                svg_element::Text::new("")
                    .set("x", run.position().x())
                    .set("y", run.position().y())
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "central")
                    .set("font-family", run.style().font_family())
                    .set("font-size", run.style().font_size())
                    .set("fill", run.color().to_hex())
                    .set("fill-opacity", run.color().alpha())
                    .add(SvgText::new(run.content())),
            ),
        }
    }
}

fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_line_bounds() {
        let line = Primitive::line(
            Point::new(-10.0, 5.0),
            Point::new(10.0, -5.0),
            StrokeDefinition::default(),
        );
        let bounds = line.bounds().unwrap();
        assert_approx_eq!(f32, bounds.width(), 20.0);
        assert_approx_eq!(f32, bounds.height(), 10.0);
    }

    #[test]
    fn test_circle_bounds() {
        let circle = Primitive::circle(Point::new(1.0, 1.0), 4.0, Some(Color::white()), None);
        let bounds = circle.bounds().unwrap();
        assert_approx_eq!(f32, bounds.min_x(), -3.0);
        assert_approx_eq!(f32, bounds.max_y(), 5.0);
        assert_eq!(circle.kind(), "ellipse");
    }

    #[test]
    fn test_polygon_svg() {
        let polygon = Primitive::Polygon {
            points: vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 3.0)],
            fill: Color::default(),
        };
        let svg = polygon.to_svg_node().to_string();
        assert!(svg.contains("points=\"0,0 4,0 2,3\""));
        assert!(svg.contains("fill=\"#000000\""));
    }

    #[test]
    fn test_text_svg() {
        let run = TextRun::new("Na+", Point::default(), TextStyle::default(), Color::default());
        let svg = Primitive::text(run).to_svg_node().to_string();
        assert!(svg.contains("Na+"));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_unfilled_ellipse_svg() {
        let circle = Primitive::circle(
            Point::default(),
            3.0,
            None,
            Some(StrokeDefinition::solid(Color::default(), 1.0)),
        );
        let svg = circle.to_svg_node().to_string();
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke-width=\"1\""));
    }
}
