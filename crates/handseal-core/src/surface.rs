//! 2-D drawing surface abstraction.
//!
//! The effect engine only talks to [`Surface`]; the browser front-end backs it
//! with a Canvas 2D context, tests and the replay driver with
//! [`RecordingSurface`].

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn from_array(c: [u8; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba()` notation.
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(Vec2),
    LineTo(Vec2),
    BezierTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
    Ellipse { center: Vec2, radii: Vec2, rotation: f32 },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.ops.push(PathOp::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.ops.push(PathOp::LineTo(p));
        self
    }

    pub fn bezier_to(mut self, c1: Vec2, c2: Vec2, to: Vec2) -> Self {
        self.ops.push(PathOp::BezierTo { c1, c2, to });
        self
    }

    pub fn arc(mut self, center: Vec2, radius: f32, start: f32, end: f32) -> Self {
        self.ops.push(PathOp::Arc {
            center,
            radius,
            start,
            end,
        });
        self
    }

    pub fn circle(self, center: Vec2, radius: f32) -> Self {
        self.arc(center, radius, 0.0, std::f32::consts::TAU)
    }

    pub fn ellipse(mut self, center: Vec2, radii: Vec2, rotation: f32) -> Self {
        self.ops.push(PathOp::Ellipse {
            center,
            radii,
            rotation,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.ops.push(PathOp::Close);
        self
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        let mut it = points.iter();
        if let Some(first) = it.next() {
            path = path.move_to(*first);
            for p in it {
                path = path.line_to(*p);
            }
            path = path.close();
        }
        path
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle<'a> {
    pub font_px: f32,
    pub family: &'a str,
    pub fill: Rgba,
    pub outline: Rgba,
    pub outline_width: f32,
}

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    /// Global alpha multiplied into every subsequent draw until `restore`.
    fn set_alpha(&mut self, alpha: f32);

    fn fill_path(&mut self, path: &Path, color: Rgba);
    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    /// Fill the whole surface with a radial gradient between two circles
    /// sharing `center`.
    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: &[(f32, Rgba)],
    );

    /// Soft glow (shadow blur) applied to subsequent draws.
    fn set_glow(&mut self, blur: f32, color: Rgba);
    fn clear_glow(&mut self);
    /// Centered text: outline stroke first, then fill.
    fn draw_text(&mut self, text: &str, center: Vec2, style: &TextStyle<'_>);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    Scale(f32, f32),
    Alpha(f32),
    FillPath { path: Path, color: Rgba },
    StrokePath { path: Path, color: Rgba, width: f32 },
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    RadialGradient {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<(f32, Rgba)>,
    },
    Glow { blur: f32, color: Rgba },
    ClearGlow,
    Text { text: String, center: Vec2, font_px: f32 },
}

/// Surface that records calls instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }
    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }
    fn translate(&mut self, offset: Vec2) {
        self.ops.push(DrawOp::Translate(offset));
    }
    fn rotate(&mut self, radians: f32) {
        self.ops.push(DrawOp::Rotate(radians));
    }
    fn scale(&mut self, sx: f32, sy: f32) {
        self.ops.push(DrawOp::Scale(sx, sy));
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::Alpha(alpha));
    }
    fn fill_path(&mut self, path: &Path, color: Rgba) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            color,
        });
    }
    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            color,
            width,
        });
    }
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ops.push(DrawOp::FillRect {
            origin,
            size,
            color,
        });
    }
    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: &[(f32, Rgba)],
    ) {
        self.ops.push(DrawOp::RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops: stops.to_vec(),
        });
    }
    fn set_glow(&mut self, blur: f32, color: Rgba) {
        self.ops.push(DrawOp::Glow { blur, color });
    }
    fn clear_glow(&mut self) {
        self.ops.push(DrawOp::ClearGlow);
    }
    fn draw_text(&mut self, text: &str, center: Vec2, style: &TextStyle<'_>) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            center,
            font_px: style.font_px,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_closes_and_keeps_order() {
        let pts = [Vec2::ZERO, Vec2::X, Vec2::Y];
        let path = Path::polygon(&pts);
        assert_eq!(
            path.ops(),
            &[
                PathOp::MoveTo(Vec2::ZERO),
                PathOp::LineTo(Vec2::X),
                PathOp::LineTo(Vec2::Y),
                PathOp::Close
            ]
        );
        assert!(Path::polygon(&[]).is_empty());
    }

    #[test]
    fn css_formats_alpha() {
        assert_eq!(Rgba::rgb(10, 20, 30).with_alpha(0.5).css(), "rgba(10,20,30,0.500)");
        assert_eq!(Rgba::WHITE.with_alpha(3.0).a, 1.0);
    }
}
