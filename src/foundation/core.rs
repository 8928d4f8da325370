/// Integer pixel coordinate, origin at the top-left corner of a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Horizontal offset in pixels.
    pub x: u32,
    /// Vertical offset in pixels.
    pub y: u32,
}

impl PixelPoint {
    /// Construct a point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle, half-open on the right and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Top-left corner.
    pub origin: PixelPoint,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Construct a rectangle from its origin and size.
    pub const fn new(origin: PixelPoint, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.origin.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.origin.y + self.height
    }

    /// Whether the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.origin.x < other.right()
            && other.origin.x < self.right()
            && self.origin.y < other.bottom()
            && other.origin.y < self.bottom()
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self([255, 255, 255]);
    /// Pure black.
    pub const BLACK: Self = Self([0, 0, 0]);

    /// Convert to an `image` pixel.
    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }
}
