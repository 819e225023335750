use glam::Vec2;
use handseal_core::surface::{Path, PathOp, Rgba, Surface, TextStyle};
use web_sys as web;

/// [`Surface`] over a Canvas 2D context.
///
/// Canvas `globalAlpha` is absolute, so the multiplicative alpha of the trait
/// is tracked here alongside `save`/`restore`.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    width: f32,
    height: f32,
    alpha: f64,
    alpha_stack: Vec<f64>,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            width: 0.0,
            height: 0.0,
            alpha: 1.0,
            alpha_stack: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    /// Blit the current video frame across the whole surface, flipped
    /// horizontally when `mirror` is set.
    pub fn draw_video(&mut self, video: &web::HtmlVideoElement, mirror: bool) {
        let (w, h) = (self.width as f64, self.height as f64);
        self.ctx.save();
        if mirror {
            _ = self.ctx.translate(w, 0.0);
            _ = self.ctx.scale(-1.0, 1.0);
        }
        if let Err(e) = self
            .ctx
            .draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w, h)
        {
            log::debug!("[camera] drawImage failed: {:?}", e);
        }
        self.ctx.restore();
    }

    fn trace(&self, path: &Path) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for op in path.ops() {
            match *op {
                PathOp::MoveTo(p) => ctx.move_to(p.x as f64, p.y as f64),
                PathOp::LineTo(p) => ctx.line_to(p.x as f64, p.y as f64),
                PathOp::BezierTo { c1, c2, to } => ctx.bezier_curve_to(
                    c1.x as f64,
                    c1.y as f64,
                    c2.x as f64,
                    c2.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathOp::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => {
                    ctx.move_to(
                        (center.x + radius * start.cos()) as f64,
                        (center.y + radius * start.sin()) as f64,
                    );
                    _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        radius.max(0.0) as f64,
                        start as f64,
                        end as f64,
                    );
                }
                PathOp::Ellipse {
                    center,
                    radii,
                    rotation,
                } => {
                    _ = ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x.max(0.0) as f64,
                        radii.y.max(0.0) as f64,
                        rotation as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                }
                PathOp::Close => ctx.close_path(),
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn save(&mut self) {
        self.alpha_stack.push(self.alpha);
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
        self.alpha = self.alpha_stack.pop().unwrap_or(1.0);
    }

    fn translate(&mut self, offset: Vec2) {
        _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        _ = self.ctx.rotate(radians as f64);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        _ = self.ctx.scale(sx as f64, sy as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha *= alpha.clamp(0.0, 1.0) as f64;
        self.ctx.set_global_alpha(self.alpha);
    }

    fn fill_path(&mut self, path: &Path, color: Rgba) {
        if path.is_empty() {
            return;
        }
        self.trace(path);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32) {
        if path.is_empty() {
            return;
        }
        self.trace(path);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: &[(f32, Rgba)],
    ) {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let gradient = match self.ctx.create_radial_gradient(
            cx,
            cy,
            inner_radius.max(0.0) as f64,
            cx,
            cy,
            outer_radius.max(0.0) as f64,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("[effect] createRadialGradient failed: {:?}", e);
                return;
            }
        };
        for (offset, color) in stops {
            _ = gradient.add_color_stop(offset.clamp(0.0, 1.0), &color.css());
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn set_glow(&mut self, blur: f32, color: Rgba) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(&color.css());
    }

    fn clear_glow(&mut self) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_shadow_color("rgba(0,0,0,0)");
    }

    fn draw_text(&mut self, text: &str, center: Vec2, style: &TextStyle<'_>) {
        let ctx = &self.ctx;
        ctx.set_font(&format!("700 {:.0}px {}", style.font_px, style.family));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let (x, y) = (center.x as f64, center.y as f64);
        if style.outline_width > 0.0 {
            ctx.set_line_join("round");
            ctx.set_line_width(style.outline_width as f64);
            ctx.set_stroke_style_str(&style.outline.css());
            _ = ctx.stroke_text(text, x, y);
        }
        ctx.set_fill_style_str(&style.fill.css());
        _ = ctx.fill_text(text, x, y);
    }
}
