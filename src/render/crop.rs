//! Center-square crop geometry.

/// A crop rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// The largest centered square inside a `width` x `height` image.
    ///
    /// The side is `min(width, height)`; the offset on the longer axis is
    /// `floor((longer - side) / 2)`, so odd leftovers put the extra pixel
    /// on the right or bottom.
    pub fn center_square(width: u32, height: u32) -> Self {
        let side = width.min(height);
        Self {
            x: (width - side) / 2,
            y: (height - side) / 2,
            width: side,
            height: side,
        }
    }

    /// Check if the rectangle covers the whole `width` x `height` image.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_is_untouched() {
        let rect = CropRect::center_square(100, 100);
        assert_eq!(rect, CropRect { x: 0, y: 0, width: 100, height: 100 });
        assert!(rect.is_full(100, 100));
    }

    #[test]
    fn test_landscape() {
        let rect = CropRect::center_square(300, 200);
        assert_eq!(rect, CropRect { x: 50, y: 0, width: 200, height: 200 });
        assert!(!rect.is_full(300, 200));
    }

    #[test]
    fn test_portrait() {
        let rect = CropRect::center_square(120, 200);
        assert_eq!(rect, CropRect { x: 0, y: 40, width: 120, height: 120 });
    }

    #[test]
    fn test_odd_leftover_rounds_toward_zero() {
        let rect = CropRect::center_square(101, 100);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.width, 100);

        let rect = CropRect::center_square(64, 67);
        assert_eq!(rect.y, 1);
        assert_eq!(rect.height, 64);
    }

    #[test]
    fn test_single_pixel_strip() {
        let rect = CropRect::center_square(1, 9);
        assert_eq!(rect, CropRect { x: 0, y: 4, width: 1, height: 1 });
    }
}
