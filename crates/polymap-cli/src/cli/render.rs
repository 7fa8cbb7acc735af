//! Map rendering: SVG text and PNG rasters.
//!
//! Map units become pixels by scaling with `-pixels_per_unit` (which also
//! flips the y axis into image coordinates) and moving the origin to the
//! image center. Circles are drawn under the lines. A circle with zero
//! thickness is filled, any other is an outline.

use image::RgbaImage;
use resvg::usvg;
use tiny_skia::{FillRule, IntSize, Mask, PathBuilder, Pixmap, Transform};

use polymap::{MapInfo, Point};

use super::common::CliError;

pub const DEFAULT_PIXELS_PER_UNIT: f64 = 10.0;
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (2048, 2048);

/// Raster and vector output settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub pixels_per_unit: f64,
    pub width: u32,
    pub height: u32,
    /// Gaussian blur sigma in pixels, PNG only
    pub blur: Option<f32>,
    /// Clip the PNG to the map's boundary polygon
    pub mask: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            width: DEFAULT_IMAGE_SIZE.0,
            height: DEFAULT_IMAGE_SIZE.1,
            blur: None,
            mask: false,
        }
    }
}

impl RenderOptions {
    /// The map moved into pixel space.
    pub fn to_image_space(&self, map: &MapInfo) -> MapInfo {
        let center = Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0);
        map.scale(-self.pixels_per_unit).translate(center)
    }
}

/// Render the map as a standalone SVG document in pixel space.
pub fn map_to_svg(map: &MapInfo, options: &RenderOptions) -> String {
    let ppu = options.pixels_per_unit;
    let image = options.to_image_space(map);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<g id="circles">
"#,
        w = options.width,
        h = options.height
    ));

    for circle in image.circles() {
        let c = circle.center();
        let r = circle.radius() * ppu;
        if circle.thickness() > 0.0 {
            svg.push_str(&format!(
                "  <circle class=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"black\" stroke-width=\"{:.2}\"/>\n",
                circle.role().name(),
                c.x,
                c.y,
                r,
                circle.thickness() * ppu
            ));
        } else {
            svg.push_str(&format!(
                "  <circle class=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"black\"/>\n",
                circle.role().name(),
                c.x,
                c.y,
                r
            ));
        }
    }

    svg.push_str("</g>\n<g id=\"lines\" stroke=\"black\" stroke-linecap=\"round\" fill=\"none\">\n");

    for line in image.lines() {
        let (a, b) = line.boundaries();
        svg.push_str(&format!(
            "  <line class=\"{}\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke-width=\"{:.2}\"/>\n",
            line.role().name(),
            a.x,
            a.y,
            b.x,
            b.y,
            line.thickness() * ppu
        ));
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Rasterize the map onto a transparent pixmap.
pub fn render_pixmap(map: &MapInfo, options: &RenderOptions) -> Result<Pixmap, CliError> {
    let svg = map_to_svg(map, options);

    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
        .map_err(|e| CliError::Render(format!("failed to parse generated SVG: {}", e)))?;

    let mut pixmap = Pixmap::new(options.width, options.height).ok_or_else(|| {
        CliError::Render(format!("could not create {}x{} pixmap", options.width, options.height))
    })?;

    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    if let Some(sigma) = options.blur.filter(|s| *s > 0.0) {
        pixmap = blur(pixmap, sigma)?;
    }

    if options.mask {
        let boundary = options.to_image_space(map).boundary();
        let mask = boundary_mask(&boundary, options.width, options.height)?;
        pixmap.apply_mask(&mask);
    }

    Ok(pixmap)
}

/// Render the map and save it as a PNG.
pub fn save_png(map: &MapInfo, path: &str, options: &RenderOptions) -> Result<(), CliError> {
    let pixmap = render_pixmap(map, options)?;
    pixmap
        .save_png(path)
        .map_err(|e| CliError::Render(format!("failed to save {}: {}", path, e)))?;
    eprintln!("Wrote: {} ({}x{})", path, options.width, options.height);
    Ok(())
}

fn blur(pixmap: Pixmap, sigma: f32) -> Result<Pixmap, CliError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let rgba = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| CliError::Render("pixmap size mismatch".to_string()))?;

    let blurred = image::imageops::blur(&rgba, sigma);

    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| CliError::Render(format!("invalid image size {}x{}", width, height)))?;
    Pixmap::from_vec(blurred.into_raw(), size)
        .ok_or_else(|| CliError::Render("failed to rebuild blurred pixmap".to_string()))
}

/// Coverage mask of the boundary polygon, in pixel space.
fn boundary_mask(boundary: &[Point], width: u32, height: u32) -> Result<Mask, CliError> {
    let mut mask = Mask::new(width, height)
        .ok_or_else(|| CliError::Render(format!("could not create {}x{} mask", width, height)))?;

    let mut pb = PathBuilder::new();
    for (i, p) in boundary.iter().enumerate() {
        if i == 0 {
            pb.move_to(p.x as f32, p.y as f32);
        } else {
            pb.line_to(p.x as f32, p.y as f32);
        }
    }
    pb.close();

    let path = pb
        .finish()
        .ok_or_else(|| CliError::Render("map boundary is not a drawable polygon".to_string()))?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::default());
    Ok(mask)
}
