/// "Cover" placement of a bitmap on the drawing surface
///
/// The image is scaled uniformly so it fills the whole surface, centered,
/// and whatever overflows is cropped. The crop happens in source pixels
/// before resizing, so the only buffer ever allocated is surface-sized.
use image::{imageops, imageops::FilterType, RgbaImage};

use crate::config::SurfaceSize;

/// Rectangle in source image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    /// Uniform scale factor applied to the source image
    pub scale: f64,
    /// Part of the source image that lands on the surface
    pub visible: Region,
}

/// Compute the cover placement. `None` if either side is empty.
pub fn cover_fit(surface: SurfaceSize, image_width: u32, image_height: u32) -> Option<CoverFit> {
    if surface.is_empty() || image_width == 0 || image_height == 0 {
        return None;
    }

    let scale = f64::max(
        surface.width as f64 / image_width as f64,
        surface.height as f64 / image_height as f64,
    );

    // One side matches the image exactly, the other is cut down and centered
    let width = ((surface.width as f64 / scale).round() as u32).clamp(1, image_width);
    let height = ((surface.height as f64 / scale).round() as u32).clamp(1, image_height);

    let visible = Region {
        x: (image_width - width) / 2,
        y: (image_height - height) / 2,
        width,
        height,
    };

    Some(CoverFit { scale, visible })
}

/// Render `image` onto a new surface-sized buffer using cover placement
pub fn composite_cover(image: &RgbaImage, surface: SurfaceSize) -> Option<(CoverFit, RgbaImage)> {
    let fit = cover_fit(surface, image.width(), image.height())?;
    let Region { x, y, width, height } = fit.visible;

    let cropped = imageops::crop_imm(image, x, y, width, height).to_image();
    let pixels = if width == surface.width && height == surface.height {
        cropped
    } else {
        imageops::resize(&cropped, surface.width, surface.height, FilterType::Triangle)
    };

    Some((fit, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_wide_image_crops_sides() {
        // 1800x600 onto 900x600: height decides, scale 1.0, 450px cut each side
        let fit = cover_fit(SurfaceSize::new(900, 600), 1800, 600).unwrap();
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.visible, Region { x: 450, y: 0, width: 900, height: 600 });
    }

    #[test]
    fn test_small_tall_image_scales_up() {
        // 300x400 onto 900x600: width decides, scale 3.0, middle 200 rows shown
        let fit = cover_fit(SurfaceSize::new(900, 600), 300, 400).unwrap();
        assert_eq!(fit.scale, 3.0);
        assert_eq!(fit.visible, Region { x: 0, y: 100, width: 300, height: 200 });
    }

    #[test]
    fn test_empty_inputs() {
        assert!(cover_fit(SurfaceSize::new(0, 600), 100, 100).is_none());
        assert!(cover_fit(SurfaceSize::new(900, 600), 0, 100).is_none());
    }

    #[test]
    fn test_composite_is_surface_sized_and_centered() {
        // Left half red, right half blue, 40x10; surface 10x10 shows the middle
        let image = RgbaImage::from_fn(40, 10, |x, _| {
            if x < 20 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });

        let (_, out) = composite_cover(&image, SurfaceSize::new(10, 10)).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
        // Crop starts at x=15, so columns 0..5 are red and 5..10 blue
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(9, 9), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_extreme_aspect_ratio_stays_surface_sized() {
        // Scaling the whole 1x10000 strip to 900 wide would need 9M rows
        let image = RgbaImage::from_pixel(1, 10_000, Rgba([7, 8, 9, 255]));
        let surface = SurfaceSize::new(900, 600);

        let fit = cover_fit(surface, 1, 10_000).unwrap();
        assert_eq!(fit.scale, 900.0);
        assert_eq!(fit.visible, Region { x: 0, y: 4999, width: 1, height: 1 });

        let (_, out) = composite_cover(&image, surface).unwrap();
        assert_eq!(out.dimensions(), (900, 600));
        assert_eq!(out.get_pixel(450, 300), &Rgba([7, 8, 9, 255]));
    }
}
