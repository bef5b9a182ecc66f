/*
 *  draw.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Drawing helpers shared by the face components
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::{
    image::{Image, ImageRaw},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
    TextBox,
};

use crate::geometry::{angle_of_offset, scanline_spans};

pub fn draw_line<D, C>(
    target: &mut D,
    start: Point,
    end: Point,
    color: C,
    width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    Line::new(start, end)
        .into_styled(PrimitiveStyleBuilder::new().stroke_width(width).stroke_color(color).build())
        .draw(target)?;
    Ok(())
}

pub fn draw_circle_from_center<D, C>(
    target: &mut D,
    center: Point,
    radius: u32,
    style: PrimitiveStyle<C>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    Circle::with_center(center, radius * 2 + 1)
        .into_styled(style)
        .draw(target)?;
    Ok(())
}

/// Fill a closed polygon (even-odd rule), one solid run per scanline
pub fn fill_polygon<D, C>(target: &mut D, points: &[Point], color: C) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    for (y, x0, x1) in scanline_spans(points) {
        let run = Rectangle::new(Point::new(x0, y), Size::new((x1 - x0 + 1) as u32, 1));
        target.fill_solid(&run, color)?;
    }
    Ok(())
}

/// Stroke the closed outline of a polygon
pub fn draw_polygon_outline<D, C>(
    target: &mut D,
    points: &[Point],
    color: C,
    width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let Some(first) = points.first() else {
        return Ok(());
    };
    let mut closed = Vec::with_capacity(points.len() + 1);
    closed.extend_from_slice(points);
    closed.push(*first);
    Polyline::new(&closed)
        .into_styled(PrimitiveStyle::with_stroke(color, width))
        .draw(target)?;
    Ok(())
}

/// Fill a ring segment inscribed in `bounds`.
///
/// The ring is `thickness` pixels deep from the largest circle that fits
/// the bounds. Angles are turns clockwise from 12 o'clock; the segment runs
/// from `start` to `end`. A span of a whole turn or more fills the ring, an
/// empty or negative span draws nothing.
pub fn fill_radial<D, C>(
    target: &mut D,
    bounds: Rectangle,
    thickness: u32,
    start: f32,
    end: f32,
    color: C,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let sweep = end - start;
    if sweep <= 0.0 || bounds.is_zero_sized() {
        return Ok(());
    }
    let full = sweep >= 1.0;
    let start = start.rem_euclid(1.0);

    let size = bounds.size;
    let cx = bounds.top_left.x as f32 + size.width as f32 / 2.0;
    let cy = bounds.top_left.y as f32 + size.height as f32 / 2.0;
    let outer = size.width.min(size.height) as f32 / 2.0;
    let inner = (outer - thickness as f32).max(0.0);

    let pixels = bounds.points().filter_map(|p| {
        let dx = p.x as f32 + 0.5 - cx;
        let dy = p.y as f32 + 0.5 - cy;
        let d = (dx * dx + dy * dy).sqrt();
        if d < inner || d > outer {
            return None;
        }
        let within = full || (angle_of_offset(dx, dy) - start).rem_euclid(1.0) < sweep;
        within.then_some(Pixel(p, color))
    });
    target.draw_iter(pixels)
}

/// Text centered in `region`, both axes
pub fn draw_text_centered<D, C>(
    target: &mut D,
    text: &str,
    region: Rectangle,
    font: &MonoFont,
    color: C,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let character_style = MonoTextStyle::new(font, color);
    let textbox_style = TextBoxStyleBuilder::new()
        .alignment(HorizontalAlignment::Center)
        .vertical_alignment(VerticalAlignment::Middle)
        .build();
    TextBox::with_textbox_style(text, region, character_style, textbox_style).draw(target)?;
    Ok(())
}

/// Forwards the set bits of a 1-bit image in a single color
struct Stencil<'a, D: DrawTarget> {
    target: &'a mut D,
    ink: D::Color,
}

impl<D: DrawTarget> Dimensions for Stencil<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D: DrawTarget> DrawTarget for Stencil<'_, D> {
    type Color = BinaryColor;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let ink = self.ink;
        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(_, c)| c.is_on())
                .map(|Pixel(p, _)| Pixel(p, ink)),
        )
    }
}

/// Draw a packed 1-bit glyph; clear bits leave the target untouched
pub fn draw_glyph<D, C>(
    target: &mut D,
    bits: &[u8],
    width: u32,
    top_left: Point,
    ink: C,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let raw = ImageRaw::<BinaryColor>::new(bits, width);
    Image::new(&raw, top_left).draw(&mut Stencil { target, ink })
}

/// Draw a glyph centered in `region`
pub fn draw_glyph_centered<D, C>(
    target: &mut D,
    bits: &[u8],
    glyph_size: Size,
    region: Rectangle,
    ink: C,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let dx = (region.size.width as i32 - glyph_size.width as i32) / 2;
    let dy = (region.size.height as i32 - glyph_size.height as i32) / 2;
    draw_glyph(target, bits, glyph_size.width, region.top_left + Point::new(dx, dy), ink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::VarFrameBuf;

    fn canvas() -> VarFrameBuf<BinaryColor> {
        VarFrameBuf::new(40, 40, BinaryColor::Off)
    }

    #[test]
    fn full_ring_is_symmetric() {
        let mut fb = canvas();
        let bounds = Rectangle::new(Point::zero(), Size::new(40, 40));
        fill_radial(&mut fb, bounds, 2, 0.0, 1.0, BinaryColor::On).unwrap();
        assert!(fb.count(BinaryColor::On) > 150);
        // hole in the middle
        assert_eq!(fb.pixel(Point::new(20, 20)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(20, 0)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(20, 39)), Some(BinaryColor::On));
    }

    #[test]
    fn quarter_ring_runs_clockwise_from_twelve() {
        let mut fb = canvas();
        let bounds = Rectangle::new(Point::zero(), Size::new(40, 40));
        fill_radial(&mut fb, bounds, 2, 0.0, 0.25, BinaryColor::On).unwrap();
        // 1:30 position is lit, 10:30 is not
        assert_eq!(fb.pixel(Point::new(33, 6)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(6, 6)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(20, 39)), Some(BinaryColor::Off));
    }

    #[test]
    fn empty_sweep_draws_nothing() {
        let mut fb = canvas();
        let bounds = Rectangle::new(Point::zero(), Size::new(40, 40));
        fill_radial(&mut fb, bounds, 2, 1.0, 1.0, BinaryColor::On).unwrap();
        assert_eq!(fb.count(BinaryColor::On), 0);
    }

    #[test]
    fn polygon_fill_and_outline() {
        let mut fb = canvas();
        let square = [
            Point::new(10, 10),
            Point::new(20, 10),
            Point::new(20, 20),
            Point::new(10, 20),
        ];
        fill_polygon(&mut fb, &square, BinaryColor::On).unwrap();
        assert_eq!(fb.count(BinaryColor::On), 100);

        draw_polygon_outline(&mut fb, &square, BinaryColor::Off, 1).unwrap();
        assert_eq!(fb.pixel(Point::new(10, 15)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(15, 15)), Some(BinaryColor::On));
    }

    #[test]
    fn glyph_only_paints_set_bits() {
        let mut fb = VarFrameBuf::new(40, 40, BinaryColor::On);
        // 8x2: one diagonal bit per row
        let bits = [0x80, 0x40];
        draw_glyph(&mut fb, &bits, 8, Point::new(3, 4), BinaryColor::Off).unwrap();
        assert_eq!(fb.count(BinaryColor::Off), 2);
        assert_eq!(fb.pixel(Point::new(3, 4)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(4, 5)), Some(BinaryColor::Off));
    }

    #[test]
    fn centered_text_stays_in_region() {
        let mut fb = canvas();
        let region = Rectangle::new(Point::new(5, 5), Size::new(30, 16));
        draw_text_centered(
            &mut fb,
            "42",
            region,
            &embedded_graphics::mono_font::ascii::FONT_6X10,
            BinaryColor::On,
        )
        .unwrap();
        let lit: Vec<_> = fb.pixels().filter(|(_, c)| c.is_on()).collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|(p, _)| region.contains(*p)));
    }
}
