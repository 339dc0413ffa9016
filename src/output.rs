//! Writing rendered icons to disk
//!
//! Every output size is rendered from the vector scene, never resized from a
//! larger raster, and each distinct size is rendered only once per run.

use crate::canvas::Canvas;
use crate::scene::Scene;
use crate::supersample::RenderConfig;
use anyhow::{Context, Result};
use icns::{IconFamily, IconType, OSType};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, ImageEncoder, RgbaImage,
};
use log::{debug, info};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// PNG files written when no custom list is given
pub const APP_ICON_PNGS: [(&str, u32); 6] = [
    ("32x32.png", 32),
    ("128x128.png", 128),
    ("128x128@2x.png", 256),
    ("256x256.png", 256),
    ("512x512.png", 512),
    ("icon.png", 512),
];

/// Frames packed into `icon.ico`
pub const ICO_SIZES: [u32; 6] = [16, 24, 32, 48, 64, 256];

const ICNS_TABLE: &str = r#"
{
  "16x16": { "size": 16, "ostype": "is32" },
  "16x16@2x": { "size": 32, "ostype": "ic11" },
  "32x32": { "size": 32, "ostype": "il32" },
  "32x32@2x": { "size": 64, "ostype": "ic12" },
  "128x128": { "size": 128, "ostype": "ic07" },
  "128x128@2x": { "size": 256, "ostype": "ic13" },
  "256x256": { "size": 256, "ostype": "ic08" },
  "256x256@2x": { "size": 512, "ostype": "ic14" },
  "512x512": { "size": 512, "ostype": "ic09" },
  "512x512@2x": { "size": 1024, "ostype": "ic10" }
}
"#;

#[derive(Debug, Deserialize)]
struct IcnsEntry {
    size: u32,
    ostype: String,
}

/// Where and what to write
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output: PathBuf,
    /// Custom PNG sizes; when set only these PNGs are generated
    pub png: Option<Vec<u32>>,
    pub png_only: bool,
    pub ico_only: bool,
    pub icns_only: bool,
}

impl OutputOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            png: None,
            png_only: false,
            ico_only: false,
            icns_only: false,
        }
    }
}

/// Lazily rendered, size-keyed images of one scene
struct Renders<'a> {
    scene: &'a Scene,
    config: RenderConfig,
    images: HashMap<u32, RgbaImage>,
}

impl<'a> Renders<'a> {
    fn new(scene: &'a Scene, config: RenderConfig) -> Self {
        Self {
            scene,
            config,
            images: HashMap::new(),
        }
    }

    fn get(&mut self, size: u32) -> Result<&RgbaImage> {
        if !self.images.contains_key(&size) {
            debug!("Rendering {size}x{size}");
            let canvas = self
                .scene
                .render(size, &self.config)
                .with_context(|| format!("Failed to render {size}x{size} icon"))?;
            self.images.insert(size, canvas.into_image());
        }
        Ok(&self.images[&size])
    }
}

pub fn generate_icons(scene: &Scene, config: &RenderConfig, options: &OutputOptions) -> Result<()> {
    // Ensure the output directory exists
    create_dir_all(&options.output).context("Can't create output directory")?;

    info!(
        "Rendering {} into {}",
        scene.name.as_deref().unwrap_or("scene"),
        options.output.display()
    );

    let mut renders = Renders::new(scene, *config);
    let out_dir = options.output.as_path();

    if options.ico_only {
        generate_ico(&mut renders, out_dir)?;
    } else if options.icns_only {
        generate_icns(&mut renders, out_dir)?;
    } else if let Some(sizes) = &options.png {
        generate_custom_sizes(&mut renders, sizes, out_dir)?;
    } else if options.png_only {
        generate_app_pngs(&mut renders, out_dir)?;
    } else {
        generate_app_pngs(&mut renders, out_dir)?;
        generate_ico(&mut renders, out_dir)?;
        generate_icns(&mut renders, out_dir)?;
    }

    Ok(())
}

fn generate_app_pngs(renders: &mut Renders, out_dir: &Path) -> Result<()> {
    println!("Generating app icon PNGs...");
    for (filename, size) in APP_ICON_PNGS {
        save_png(renders.get(size)?, &out_dir.join(filename))?;
        println!("  ✓ Generated {filename}");
    }
    Ok(())
}

fn generate_custom_sizes(renders: &mut Renders, sizes: &[u32], out_dir: &Path) -> Result<()> {
    println!("Generating custom PNG sizes...");
    for &size in sizes {
        let output_path = out_dir.join(format!("{}x{}.png", size, size));
        save_png(renders.get(size)?, &output_path)?;
        println!("  ✓ Generated {}x{}.png", size, size);
    }
    Ok(())
}

fn generate_ico(renders: &mut Renders, out_dir: &Path) -> Result<()> {
    println!("Generating icon.ico...");
    let mut frames = Vec::new();

    for size in ICO_SIZES {
        let rgba_image = renders.get(size)?;

        // Only the 256px layer can be compressed according to the ico specs
        if size == 256 {
            let mut buf = Vec::new();
            write_png(rgba_image.as_raw(), &mut buf, size)?;
            frames.push(IcoFrame::with_encoded(buf, size, size, ColorType::Rgba8)?);
        } else {
            frames.push(IcoFrame::as_png(
                rgba_image.as_raw(),
                size,
                size,
                ColorType::Rgba8,
            )?);
        }
    }

    let mut out_file = BufWriter::new(File::create(out_dir.join("icon.ico"))?);
    let encoder = IcoEncoder::new(&mut out_file);
    encoder.encode_images(&frames)?;
    out_file.flush()?;

    println!("✓ Generated icon.ico");
    Ok(())
}

fn generate_icns(renders: &mut Renders, out_dir: &Path) -> Result<()> {
    println!("Generating icon.icns...");
    let entries: BTreeMap<String, IcnsEntry> =
        serde_json::from_str(ICNS_TABLE).context("Invalid ICNS size table")?;
    let mut family = IconFamily::new();

    for (name, entry) in &entries {
        let mut buf = Vec::new();
        write_png(renders.get(entry.size)?.as_raw(), &mut buf, entry.size)?;
        let image = icns::Image::read_png(&buf[..])?;

        let ostype: OSType = entry
            .ostype
            .parse()
            .map_err(|err| anyhow::anyhow!("Invalid ostype {}: {:?}", entry.ostype, err))?;
        let icon_type = IconType::from_ostype(ostype)
            .with_context(|| format!("Unsupported icon type {}", entry.ostype))?;

        family
            .add_icon_with_type(&image, icon_type)
            .with_context(|| format!("Can't add {name} to Icns Family"))?;
    }

    let mut out_file = BufWriter::new(File::create(out_dir.join("icon.icns"))?);
    family.write(&mut out_file)?;
    out_file.flush()?;

    println!("✓ Generated icon.icns");
    Ok(())
}

/// Write a rendered canvas as a best-compression PNG
pub fn save_canvas(canvas: &Canvas, path: &Path) -> Result<()> {
    save_png(canvas.as_image(), path)
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_png(image.as_raw(), &mut writer, image.width()).context("Failed to write PNG")?;
    writer.flush()?;
    Ok(())
}

// Encode square image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}
