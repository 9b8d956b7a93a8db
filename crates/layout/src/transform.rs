use crate::LayoutError;
use concentra_types::{Point, Rect};

/// Width of the landscape A4 page, in millimeters.
pub const DOCUMENT_WIDTH_MM: f32 = 297.0;
pub const DOCUMENT_HEIGHT_MM: f32 = 210.0;

/// Maps between document millimeters and preview pixels for one viewport measurement.
///
/// A transform is only valid for the viewport width it was measured with. Measure a
/// new one whenever the preview opens or resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    scale: f32,
}

impl CoordinateTransform {
    pub fn measure(viewport_px: f32, document_width_mm: f32) -> Result<Self, LayoutError> {
        if !viewport_px.is_finite() || viewport_px <= 0.0 {
            return Err(LayoutError::InvalidViewport(viewport_px));
        }
        let scale = viewport_px / document_width_mm;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LayoutError::InvalidViewport(viewport_px));
        }
        log::debug!("Preview scale {scale:.4} px/mm for a {viewport_px}px viewport");
        Ok(Self { scale })
    }

    pub fn for_viewport(viewport_px: f32) -> Result<Self, LayoutError> {
        Self::measure(viewport_px, DOCUMENT_WIDTH_MM)
    }

    /// Pixels per millimeter.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_pixels(&self, mm: f32) -> f32 {
        mm * self.scale
    }

    pub fn to_mm(&self, px: f32) -> f32 {
        px / self.scale
    }

    pub fn point_to_mm(&self, px: Point) -> Point {
        Point::new(self.to_mm(px.x), self.to_mm(px.y))
    }

    pub fn point_to_pixels(&self, mm: Point) -> Point {
        Point::new(self.to_pixels(mm.x), self.to_pixels(mm.y))
    }

    pub fn rect_to_mm(&self, px: Rect) -> Rect {
        Rect::new(
            self.to_mm(px.x),
            self.to_mm(px.y),
            self.to_mm(px.width),
            self.to_mm(px.height),
        )
    }

    pub fn rect_to_pixels(&self, mm: Rect) -> Rect {
        Rect::new(
            self.to_pixels(mm.x),
            self.to_pixels(mm.y),
            self.to_pixels(mm.width),
            self.to_pixels(mm.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_for_thousand_pixel_viewport() {
        let transform = CoordinateTransform::for_viewport(1000.0).unwrap();
        assert!((transform.scale() - 3.367).abs() < 1e-3);
        assert!((transform.to_mm(transform.to_pixels(50.0)) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_remeasure_changes_scale() {
        let narrow = CoordinateTransform::for_viewport(594.0).unwrap();
        let wide = CoordinateTransform::for_viewport(1188.0).unwrap();
        assert_eq!(narrow.to_pixels(10.0), 20.0);
        assert_eq!(wide.to_pixels(10.0), 40.0);
    }

    #[test]
    fn test_rect_round_trip() {
        let transform = CoordinateTransform::for_viewport(873.0).unwrap();
        let rect = Rect::new(242.0, 8.0, 45.0, 25.0);
        let back = transform.rect_to_mm(transform.rect_to_pixels(rect));
        assert!((back.x - rect.x).abs() < 1e-3);
        assert!((back.height - rect.height).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_unusable_viewports() {
        for width in [0.0, -20.0, f32::NAN, f32::INFINITY] {
            assert!(CoordinateTransform::for_viewport(width).is_err());
        }
        assert!(CoordinateTransform::measure(800.0, 0.0).is_err());
    }
}
