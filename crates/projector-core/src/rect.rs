/// A rectangle in virtual-desktop pixels.
///
/// The origin may be negative when a monitor sits left of or above the
/// primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns a rectangle of the given size whose origin is this
    /// rectangle's origin shifted by `(dx, dy)`.
    pub fn offset_child(&self, dx: i32, dy: i32, width: i32, height: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_child_is_relative_to_origin() {
        // Arrange
        let monitor = Rect::new(-1920, 0, 1920, 1080);

        // Act
        let child = monitor.offset_child(100, 50, 800, 600);

        // Assert
        assert_eq!(child, Rect::new(-1820, 50, 800, 600));
    }

    #[test]
    fn offset_child_saturates_instead_of_overflowing() {
        let rect = Rect::new(i32::MAX - 10, 0, 100, 100);

        let child = rect.offset_child(100, 0, 10, 10);

        assert_eq!(child.x, i32::MAX);
    }
}
