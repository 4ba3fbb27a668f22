//! Presentation collaborator: colors, gradients, and styled splines.
//!
//! Pure data carried alongside the geometry; nothing here rasterizes.

use crate::geom::{LineSegment, Point, Rect, Spline, util};

/// RGB components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue in degrees, saturation and brightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

impl Hsb {
    pub fn from_rgb(rgb: Rgb) -> Hsb {
        let min = rgb.r.min(rgb.g).min(rgb.b);
        let max = rgb.r.max(rgb.g).max(rgb.b);

        if max == min {
            return Hsb { h: 0.0, s: 0.0, b: max };
        }

        let b = (max + min) / 2.0;
        let s = if b < 0.5 {
            (max - min) / (max + min)
        } else {
            (max - min) / (2.0 - max - min)
        };

        let mut h = if max == rgb.r {
            (rgb.g - rgb.b) / (max - min)
        } else if max == rgb.g {
            2.0 + (rgb.b - rgb.r) / (max - min)
        } else {
            4.0 + (rgb.r - rgb.g) / (max - min)
        } * 60.0;

        if h < 0.0 {
            h += 360.0;
        }

        Hsb { h, s, b }
    }

    pub fn to_rgb(self) -> Rgb {
        if self.s <= 0.001 {
            return Rgb {
                r: self.b,
                g: self.b,
                b: self.b,
            };
        }

        let temp1 = if self.b < 0.5 {
            self.b * (1.0 + self.s)
        } else {
            self.b + self.s - self.b * self.s
        };
        let temp2 = 2.0 * self.b - temp1;

        Rgb {
            r: component(self.h / 360.0 + 1.0 / 3.0, temp1, temp2),
            g: component(self.h / 360.0, temp1, temp2),
            b: component(self.h / 360.0 - 1.0 / 3.0, temp1, temp2),
        }
    }
}

fn component(value: f64, temp1: f64, temp2: f64) -> f64 {
    let value = if value < 0.0 {
        value + 1.0
    } else if value > 1.0 {
        value - 1.0
    } else {
        value
    };

    if value * 6.0 < 1.0 {
        temp2 + (temp1 - temp2) * 6.0 * value
    } else if value * 2.0 < 1.0 {
        temp1
    } else if value * 3.0 < 2.0 {
        temp2 + (temp1 - temp2) * (2.0 / 3.0 - value) * 6.0
    } else {
        temp2
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color {
            rgb: Rgb { r, g, b },
            alpha: 1.0,
        }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, alpha: f64) -> Color {
        Color {
            rgb: Rgb { r, g, b },
            alpha,
        }
    }

    pub fn from_hsb(hsb: Hsb, alpha: f64) -> Color {
        Color {
            rgb: hsb.to_rgb(),
            alpha,
        }
    }

    pub fn hsb(&self) -> Hsb {
        Hsb::from_rgb(self.rgb)
    }

    /// Re-hues this color toward `other`: takes its hue, multiplies
    /// saturations, keeps own brightness and alpha.
    pub fn colorize(&self, other: &Color) -> Color {
        let own = self.hsb();
        let target = other.hsb();

        Color::from_hsb(
            Hsb {
                h: target.h,
                s: own.s * target.s,
                b: own.b,
            },
            self.alpha,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Color,
    pub position: f64,
}

/// Linear gradient along a segment in image space.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub stops: Vec<GradientStop>,
    pub line: LineSegment,
}

impl Gradient {
    pub fn new(stops: Vec<GradientStop>, line: LineSegment) -> Self {
        Gradient { stops, line }
    }

    pub fn colorize(&self, color: &Color) -> Gradient {
        Gradient {
            stops: self
                .stops
                .iter()
                .map(|stop| GradientStop {
                    color: stop.color.colorize(color),
                    position: stop.position,
                })
                .collect(),
            line: self.line,
        }
    }
}

/// A spline with its paint attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableSpline {
    pub spline: Spline,
    pub fill_color: Option<Color>,
    pub line_color: Option<Color>,
    pub line_width: f64,
    pub alpha: f64,
    pub fill_gradient: Option<Gradient>,
}

impl DrawableSpline {
    pub fn new(
        spline: Spline,
        fill_color: Option<Color>,
        line_color: Option<Color>,
        line_width: f64,
    ) -> Self {
        DrawableSpline {
            spline,
            fill_color,
            line_color,
            line_width,
            alpha: 1.0,
            fill_gradient: None,
        }
    }

    pub fn colorize(&self, color: &Color, include_strokes: bool) -> DrawableSpline {
        DrawableSpline {
            spline: self.spline.clone(),
            fill_color: self.fill_color.map(|c| c.colorize(color)),
            line_color: if include_strokes {
                self.line_color.map(|c| c.colorize(color))
            } else {
                self.line_color
            },
            line_width: self.line_width,
            alpha: self.alpha,
            fill_gradient: self.fill_gradient.as_ref().map(|g| g.colorize(color)),
        }
    }

    fn with_spline(&self, spline: Spline, line_width: f64) -> DrawableSpline {
        DrawableSpline {
            spline,
            fill_color: self.fill_color,
            line_color: self.line_color,
            line_width,
            alpha: self.alpha,
            fill_gradient: self.fill_gradient.clone(),
        }
    }
}

/// An ordered stack of drawable splines.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorImage {
    pub shapes: Vec<DrawableSpline>,
}

impl VectorImage {
    pub fn new(shapes: Vec<DrawableSpline>) -> Self {
        VectorImage { shapes }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        util::bounding_box_of(self.shapes.iter().map(|s| s.spline.bounding_box()))
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> VectorImage {
        VectorImage::new(
            self.shapes
                .iter()
                .map(|s| s.with_spline(s.spline.rotate(angle, pivot), s.line_width))
                .collect(),
        )
    }

    /// Uniform scale; stroke widths scale along with the geometry.
    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> VectorImage {
        VectorImage::new(
            self.shapes
                .iter()
                .map(|s| s.with_spline(s.spline.scale(factor, pivot), s.line_width * factor))
                .collect(),
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> VectorImage {
        VectorImage::new(
            self.shapes
                .iter()
                .map(|s| s.with_spline(s.spline.translate(dx, dy), s.line_width))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Bezier, Circle};
    use std::f64::consts::FRAC_PI_2;

    fn quarter_arc_spline() -> Spline {
        let circle = Circle::new(Point::ZERO, 10.0);
        Spline::new(vec![Bezier::from_arc(&circle, 0.0, FRAC_PI_2)], false)
    }

    #[test]
    fn rgb_hsb_round_trip() {
        for rgb in [
            Rgb { r: 1.0, g: 0.0, b: 0.0 },
            Rgb { r: 0.2, g: 0.6, b: 0.4 },
            Rgb { r: 0.5, g: 0.5, b: 0.5 },
        ] {
            let back = Hsb::from_rgb(rgb).to_rgb();
            assert!((back.r - rgb.r).abs() < 1e-9, "{rgb:?} -> {back:?}");
            assert!((back.g - rgb.g).abs() < 1e-9);
            assert!((back.b - rgb.b).abs() < 1e-9);
        }
    }

    #[test]
    fn primary_hues() {
        assert_eq!(Color::RED.hsb().h, 0.0);
        assert_eq!(Color::GREEN.hsb().h, 120.0);
        assert_eq!(Color::BLUE.hsb().h, 240.0);
    }

    #[test]
    fn colorize_takes_the_target_hue() {
        let gray_red = Color::rgb(0.8, 0.4, 0.4);
        let toward_blue = gray_red.colorize(&Color::BLUE);

        assert!((toward_blue.hsb().h - 240.0).abs() < 1e-9);
        assert_eq!(toward_blue.alpha, gray_red.alpha);
    }

    #[test]
    fn image_scale_scales_line_width() {
        let image = VectorImage::new(vec![DrawableSpline::new(
            quarter_arc_spline(),
            Some(Color::RED),
            Some(Color::BLUE),
            2.0,
        )]);

        let scaled = image.scale(3.0, None);
        assert_eq!(scaled.shapes[0].line_width, 6.0);

        let moved = image.translate(5.0, 0.0);
        assert_eq!(moved.shapes[0].line_width, 2.0);

        let b = scaled.bounding_box().unwrap();
        assert!(b.max_x() > 29.0);
    }

    #[test]
    fn colorize_image_shape_respects_stroke_flag() {
        let shape = DrawableSpline::new(
            quarter_arc_spline(),
            Some(Color::rgb(0.8, 0.4, 0.4)),
            Some(Color::rgb(0.4, 0.8, 0.4)),
            1.0,
        );

        let kept = shape.colorize(&Color::BLUE, false);
        assert_eq!(kept.line_color, shape.line_color);
        assert_ne!(kept.fill_color, shape.fill_color);

        let recolored = shape.colorize(&Color::BLUE, true);
        assert_ne!(recolored.line_color, shape.line_color);
    }
}
