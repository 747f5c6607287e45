//! `embedded-graphics` surface adapter
//!
//! [`GraphicsSurface`] implements [`DisplaySurface`] on any monochrome
//! `embedded-graphics` draw target, such as the in-memory
//! [`FrameBuffer`](crate::framebuffer::FrameBuffer) or a panel driver's own
//! buffer. Black maps to [`BinaryColor::On`].

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{Color, DisplayError, DisplaySurface};

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}

const INK: BinaryColor = BinaryColor::On;

/// Display surface backed by an `embedded-graphics` draw target
#[derive(Debug)]
pub struct GraphicsSurface<T> {
    target: T,
}

impl<T> GraphicsSurface<T>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(INK, 1)
}

fn fill() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(INK)
}

/// Rectangle with a positive size, or `None` for empty boxes
fn rectangle(x: i32, y: i32, width: i32, height: i32) -> Option<Rectangle> {
    if width <= 0 || height <= 0 {
        return None;
    }
    Some(Rectangle::new(
        Point::new(x, y),
        Size::new(width as u32, height as u32),
    ))
}

fn circle(x: i32, y: i32, radius: i32) -> Option<Circle> {
    if radius < 0 {
        return None;
    }
    Some(Circle::with_center(
        Point::new(x, y),
        radius as u32 * 2 + 1,
    ))
}

impl<T> DisplaySurface for GraphicsSurface<T>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    fn dimensions(&self) -> (i32, i32) {
        let size = self.target.size();
        (size.width as i32, size.height as i32)
    }

    fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        self.target
            .clear(color.into())
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        Pixel(Point::new(x, y), color.into())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(stroke())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError> {
        let Some(rect) = rectangle(x, y, width, height) else {
            return Ok(());
        };
        rect.into_styled(stroke())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError> {
        let Some(rect) = rectangle(x, y, width, height) else {
            return Ok(());
        };
        self.target
            .fill_solid(&rect, INK)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError> {
        let Some(circle) = circle(x, y, radius) else {
            return Ok(());
        };
        circle
            .into_styled(stroke())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError> {
        let Some(circle) = circle(x, y, radius) else {
            return Ok(());
        };
        circle
            .into_styled(fill())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u8) -> Result<(), DisplayError> {
        let origin = Point::new(x, y);
        let style = MonoTextStyle::new(&FONT_6X10, INK);
        let text = Text::with_baseline(text, origin, style, Baseline::Top);

        let result = if scale <= 1 {
            text.draw(&mut self.target).map(drop)
        } else {
            let mut magnified = Magnified {
                inner: &mut self.target,
                origin,
                scale: scale as u32,
            };
            text.draw(&mut magnified).map(drop)
        };
        result.map_err(|_| DisplayError::Communication)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Draw target that blows every pixel up into a `scale`×`scale` block
/// around a fixed origin
struct Magnified<'a, T> {
    inner: &'a mut T,
    origin: Point,
    scale: u32,
}

impl<T: OriginDimensions> OriginDimensions for Magnified<'_, T> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<T> DrawTarget for Magnified<'_, T>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    type Color = BinaryColor;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new(self.scale, self.scale);
        for Pixel(point, color) in pixels {
            let top_left = self.origin + (point - self.origin) * self.scale as i32;
            self.inner
                .fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}
