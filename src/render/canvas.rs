use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};
use image::{Rgb, RgbImage};
use std::convert::Infallible;

/// A draw target backed by an in-memory RGB raster
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub(crate) fn new(size: Size, background: Rgb888) -> Canvas {
        Canvas {
            image: RgbImage::from_pixel(size.width, size.height, to_rgb(background)),
        }
    }

    pub(crate) fn into_image(self) -> RgbImage {
        self.image
    }

    fn locate(&self, point: Point) -> Option<(u32, u32)> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        (x < self.image.width() && y < self.image.height()).then_some((x, y))
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<Rgb888>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = self.locate(point) {
                self.image.put_pixel(x, y, to_rgb(color));
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb888) -> Result<(), Infallible> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let rgb = to_rgb(color);
        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                if let Some((x, y)) = self.locate(Point::new(x, y)) {
                    self.image.put_pixel(x, y, rgb);
                }
            }
        }
        Ok(())
    }
}

fn to_rgb(color: Rgb888) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

/// Magnifies everything drawn into it by an integer factor.  Point (0, 0) of
/// the scaled target lands on `origin` of the wrapped target, and each scaled
/// pixel becomes a `factor`×`factor` block.
///
/// This is how the fixed-size bitmap fonts are blown up to print size.
#[derive(Debug)]
pub(crate) struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    factor: u16,
}

impl<'a, D> Scaled<'a, D> {
    pub(crate) fn new(target: &'a mut D, origin: Point, factor: u16) -> Self {
        Scaled {
            target,
            origin,
            factor: factor.max(1),
        }
    }
}

impl<D: Dimensions> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        Rectangle::new(
            (outer.top_left - self.origin) / i32::from(self.factor),
            outer.size / u32::from(self.factor),
        )
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), D::Error>
    where
        I: IntoIterator<Item = Pixel<D::Color>>,
    {
        let block = Size::new_equal(u32::from(self.factor));
        for Pixel(point, color) in pixels {
            let top_left = self.origin + point * i32::from(self.factor);
            self.target
                .fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut canvas = Canvas::new(Size::new(4, 3), Rgb888::WHITE);
        let Ok(()) = canvas.draw_iter([
            Pixel(Point::new(-1, 0), Rgb888::BLACK),
            Pixel(Point::new(4, 0), Rgb888::BLACK),
            Pixel(Point::new(3, 2), Rgb888::RED),
        ]);
        let Ok(()) = canvas.fill_solid(
            &Rectangle::new(Point::new(-5, -5), Size::new(6, 6)),
            Rgb888::BLUE,
        );
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(3, 2), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(3, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_scaled_pixels_become_blocks() {
        let mut canvas = Canvas::new(Size::new(10, 10), Rgb888::WHITE);
        let mut scaled = Scaled::new(&mut canvas, Point::new(2, 3), 3);
        let Ok(()) = scaled.draw_iter([Pixel(Point::new(1, 0), Rgb888::BLACK)]);
        let image = canvas.into_image();
        for y in 0..10 {
            for x in 0..10 {
                let expected = if (5..8).contains(&x) && (3..6).contains(&y) {
                    Rgb([0, 0, 0])
                } else {
                    Rgb([255, 255, 255])
                };
                assert_eq!(image.get_pixel(x, y), &expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_scaled_primitive() {
        let mut canvas = Canvas::new(Size::new(8, 8), Rgb888::WHITE);
        let mut scaled = Scaled::new(&mut canvas, Point::zero(), 2);
        assert_eq!(
            scaled.bounding_box(),
            Rectangle::new(Point::zero(), Size::new(4, 4))
        );
        let Ok(_) = Rectangle::new(Point::new(1, 1), Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::BLACK))
            .draw(&mut scaled);
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(1, 1), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(2, 2), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(5, 5), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(6, 6), &Rgb([255, 255, 255]));
    }
}
