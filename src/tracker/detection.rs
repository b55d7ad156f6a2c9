//! Detection input for the tracker.

use crate::tracker::bbox::BBox;

/// A single detector output: a bounding box with confidence and class.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    /// Bounding box in corner format (x1, y1, x2, y2)
    pub bbox: BBox,
    /// Detection confidence score
    pub score: f32,
    /// Class identifier from the detection model
    pub class_id: u32,
}

impl Detection {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, score: f32, class_id: u32) -> Self {
        Self {
            bbox: BBox::new(x1, y1, x2, y2),
            score,
            class_id,
        }
    }

    pub fn from_bbox(bbox: BBox, score: f32, class_id: u32) -> Self {
        Self {
            bbox,
            score,
            class_id,
        }
    }

    /// Whether this detection passes the confidence and class gate.
    pub fn passes(&self, score_thresh: f32, target_class: Option<u32>) -> bool {
        self.score >= score_thresh && target_class.is_none_or(|c| c == self.class_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_gate() {
        let det = Detection::new(0.0, 0.0, 10.0, 10.0, 0.4, 4);
        assert!(!det.passes(0.5, None));
        assert!(det.passes(0.3, None));
    }

    #[test]
    fn test_class_gate() {
        let det = Detection::new(0.0, 0.0, 10.0, 10.0, 0.9, 4);
        assert!(det.passes(0.5, Some(4)));
        assert!(!det.passes(0.5, Some(2)));
        assert!(det.passes(0.5, None));
    }
}
