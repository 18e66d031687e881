//! Maps the on-screen crop window back onto the source bitmap and cuts the
//! circular result out of it.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::edge::CropEdges;
use crate::error::{CropError, Result};
use crate::rect::Bounds;

/// Where a `bitmap_width` x `bitmap_height` bitmap lands when shown centred in
/// a view of the given size, scaled down to fit but never scaled up.
///
/// The result is relative to the view's top-left corner.
pub fn fit_center_inside(bitmap_width: u32, bitmap_height: u32, view_width: f32, view_height: f32) -> Bounds {
    let bitmap_width = bitmap_width as f32;
    let bitmap_height = bitmap_height as f32;

    let width_ratio = if view_width < bitmap_width {
        view_width / bitmap_width
    } else {
        f32::INFINITY
    };
    let height_ratio = if view_height < bitmap_height {
        view_height / bitmap_height
    } else {
        f32::INFINITY
    };

    let (width, height) = if width_ratio.is_infinite() && height_ratio.is_infinite() {
        (bitmap_width, bitmap_height)
    } else if width_ratio <= height_ratio {
        (view_width, bitmap_height * view_width / bitmap_width)
    } else {
        (bitmap_width * view_height / bitmap_height, view_height)
    };

    let left = ((view_width - width) / 2.0).round();
    let top = ((view_height - height) / 2.0).round();
    Bounds::from_min_size(left, top, width.ceil(), height.ceil())
}

/// A pixel rectangle inside the source bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The crop window in source bitmap coordinates, clamped to the bitmap.
pub fn actual_crop_rect(
    edges: &CropEdges,
    displayed: &Bounds,
    bitmap_width: u32,
    bitmap_height: u32,
) -> Result<Bounds> {
    if displayed.is_degenerate() {
        return Err(CropError::DegenerateGeometry("displayed image has no area"));
    }
    if !edges.is_finite() {
        return Err(CropError::DegenerateGeometry("crop window is not finite"));
    }

    let scale_x = bitmap_width as f32 / displayed.width();
    let scale_y = bitmap_height as f32 / displayed.height();

    let left = (edges.left.coordinate() - displayed.left) * scale_x;
    let top = (edges.top.coordinate() - displayed.top) * scale_y;
    let right = left + edges.width() * scale_x;
    let bottom = top + edges.height() * scale_y;

    Ok(Bounds::new(
        left.max(0.0),
        top.max(0.0),
        right.min(bitmap_width as f32),
        bottom.min(bitmap_height as f32),
    ))
}

/// Whole-pixel region of the bitmap under the crop window. Fractions are
/// truncated.
pub fn source_region(
    edges: &CropEdges,
    displayed: &Bounds,
    bitmap_width: u32,
    bitmap_height: u32,
) -> Result<CropRegion> {
    let rect = actual_crop_rect(edges, displayed, bitmap_width, bitmap_height)?;
    if rect.is_degenerate() {
        return Err(CropError::DegenerateGeometry("crop window misses the image"));
    }

    let x = rect.left as u32;
    let y = rect.top as u32;
    let width = (rect.width() as u32).min(bitmap_width - x);
    let height = (rect.height() as u32).min(bitmap_height - y);
    if width == 0 || height == 0 {
        return Err(CropError::DegenerateGeometry("crop region is under one pixel"));
    }

    Ok(CropRegion {
        x,
        y,
        width,
        height,
    })
}

pub fn crop_image(image: &DynamicImage, region: CropRegion) -> DynamicImage {
    image.crop_imm(region.x, region.y, region.width, region.height)
}

/// Copies `image` into an RGBA buffer with everything outside the centred
/// circle of diameter `width` made transparent.
pub fn circle_mask(image: &DynamicImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let radius = width as f32 / 2.0;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let mut output = RgbaImage::new(width, height);
    for (x, y, pixel) in image.to_rgba8().enumerate_pixels() {
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        if dx * dx + dy * dy <= radius * radius {
            output.put_pixel(x, y, *pixel);
        } else {
            output.put_pixel(x, y, Rgba([0, 0, 0, 0]));
        }
    }
    output
}

/// Crops `image` under the crop window and masks the result to a circle.
pub fn cropped_circle(
    image: &DynamicImage,
    edges: &CropEdges,
    displayed: &Bounds,
) -> Result<RgbaImage> {
    let region = source_region(edges, displayed, image.width(), image.height())?;
    debug!(?region, "cropping circle");
    Ok(circle_mask(&crop_image(image, region)))
}

pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_bitmaps_are_centred_unscaled() {
        let rect = fit_center_inside(200, 100, 800.0, 600.0);
        assert_eq!(rect, Bounds::new(300.0, 250.0, 500.0, 350.0));
    }

    #[test]
    fn large_bitmaps_scale_down_along_the_tighter_axis() {
        let rect = fit_center_inside(2000, 1000, 800.0, 600.0);
        assert_eq!(rect, Bounds::new(0.0, 100.0, 800.0, 500.0));

        let rect = fit_center_inside(1000, 3000, 800.0, 600.0);
        assert_eq!(rect, Bounds::new(300.0, 0.0, 500.0, 600.0));
    }

    #[test]
    fn region_scales_from_displayed_to_bitmap_pixels() {
        let displayed = Bounds::new(0.0, 100.0, 800.0, 500.0);
        let edges = CropEdges::new(200.0, 150.0, 400.0, 350.0);
        let region = source_region(&edges, &displayed, 2000, 1000).expect("region");
        assert_eq!(
            region,
            CropRegion {
                x: 500,
                y: 125,
                width: 500,
                height: 500
            }
        );
    }

    #[test]
    fn region_is_clamped_to_the_bitmap() {
        let displayed = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let edges = CropEdges::new(-10.0, 50.0, 60.0, 130.0);
        let region = source_region(&edges, &displayed, 100, 100).expect("region");
        assert_eq!(
            region,
            CropRegion {
                x: 0,
                y: 50,
                width: 60,
                height: 50
            }
        );
    }

    #[test]
    fn zero_sized_display_is_rejected() {
        let edges = CropEdges::new(0.0, 0.0, 50.0, 50.0);
        let err = source_region(&edges, &Bounds::new(0.0, 0.0, 0.0, 100.0), 100, 100).unwrap_err();
        assert!(matches!(err, CropError::DegenerateGeometry(_)));

        let outside = CropEdges::new(200.0, 0.0, 250.0, 50.0);
        assert!(source_region(&outside, &Bounds::new(0.0, 0.0, 100.0, 100.0), 100, 100).is_err());
    }

    #[test]
    fn mask_clears_the_corners_only() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])));
        let masked = circle_mask(&image);
        assert_eq!(masked.dimensions(), (10, 10));
        assert_eq!(masked.get_pixel(0, 0)[3], 0);
        assert_eq!(masked.get_pixel(9, 9)[3], 0);
        assert_eq!(*masked.get_pixel(5, 5), Rgba([255, 0, 0, 255]));
        assert_eq!(masked.get_pixel(5, 0)[3], 255);
    }

    #[test]
    fn cropped_circle_saves_as_png() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([0, 128, 255, 255])));
        let displayed = Bounds::new(0.0, 0.0, 40.0, 20.0);
        let edges = CropEdges::new(10.0, 0.0, 30.0, 20.0);
        let circle = cropped_circle(&image, &edges, &displayed).expect("crop");
        assert_eq!(circle.dimensions(), (20, 20));

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("circle.png");
        save_png(&circle, &path).expect("save");
        let reloaded = image::open(&path).expect("reload").to_rgba8();
        assert_eq!(reloaded.dimensions(), (20, 20));
        assert_eq!(reloaded.get_pixel(0, 0)[3], 0);
    }
}
