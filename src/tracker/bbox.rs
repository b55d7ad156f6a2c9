/// Axis-aligned bounding box in corner format.
///
/// Coordinates are top-left (`x1`, `y1`) and bottom-right (`x2`, `y2`) in
/// pixels. The tracker does not enforce `x2 >= x1` / `y2 >= y1`; degenerate
/// boxes have zero area and never win an IoU match.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BBox {
    /// Top-left x coordinate
    pub x1: f64,
    /// Top-left y coordinate
    pub y1: f64,
    /// Bottom-right x coordinate
    pub x2: f64,
    /// Bottom-right y coordinate
    pub y2: f64,
}

impl BBox {
    /// Create a new BBox from corner coordinates.
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a BBox from top-left coordinates and dimensions.
    #[inline]
    pub fn from_tlwh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Create a BBox from center coordinates and dimensions.
    #[inline]
    pub fn from_cxywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            x1: cx - width / 2.0,
            y1: cy - height / 2.0,
            x2: cx + width / 2.0,
            y2: cy + height / 2.0,
        }
    }

    /// Corner coordinates as `[x1, y1, x2, y2]`.
    #[inline]
    pub fn to_corners(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Corner coordinates rounded to integer pixels, for overlay drawing.
    #[inline]
    pub fn to_pixels(&self) -> [i32; 4] {
        [
            self.x1.round() as i32,
            self.y1.round() as i32,
            self.x2.round() as i32,
            self.y2.round() as i32,
        ]
    }

    /// Width and height, clamped to zero for malformed boxes.
    #[inline]
    pub fn size(&self) -> (f64, f64) {
        ((self.x2 - self.x1).max(0.0), (self.y2 - self.y1).max(0.0))
    }

    /// Area of the bounding box, zero when degenerate.
    #[inline]
    pub fn area(&self) -> f64 {
        let (w, h) = self.size();
        w * h
    }

    /// Intersection over Union with another box.
    ///
    /// Returns a ratio in `[0, 1]`; `0.0` when the boxes are disjoint or the
    /// union has no area.
    pub fn iou(&self, other: &BBox) -> f64 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);

        let inter_area = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_conversions() {
        let bbox = BBox::from_tlwh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bbox.to_corners(), [10.0, 20.0, 40.0, 60.0]);

        let centered = BBox::from_cxywh(25.0, 40.0, 30.0, 40.0);
        assert_eq!(centered, bbox);

        assert_eq!(bbox.size(), (30.0, 40.0));
        assert_eq!(bbox.area(), 1200.0);
    }

    #[test]
    fn test_pixel_rounding() {
        let bbox = BBox::new(10.4, 20.5, 40.9, 59.2);
        assert_eq!(bbox.to_pixels(), [10, 21, 41, 59]);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 5.0, 15.0, 15.0);

        // Intersection: 5x5 = 25, union: 100 + 100 - 25 = 175
        assert!((a.iou(&b) - 25.0 / 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_iou_symmetric() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(3.0, -2.0, 12.0, 7.0);
        assert_eq!(a.iou(&b), b.iou(&a));
    }

    #[test]
    fn test_iou_same_box() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!((a.iou(&a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_degenerate_boxes() {
        let empty = BBox::new(5.0, 5.0, 5.0, 5.0);
        let inverted = BBox::new(10.0, 10.0, 0.0, 0.0);
        let normal = BBox::new(0.0, 0.0, 10.0, 10.0);

        assert_eq!(empty.iou(&empty), 0.0);
        assert_eq!(inverted.iou(&normal), 0.0);
        assert_eq!(normal.iou(&inverted), 0.0);
    }
}
