use anyhow::Result;
use clap::Parser;
use log::info;
use shape_icon_gen::{
    catalog,
    output::{self, OutputOptions},
    CompositeMode, DownsampleFilter, RenderConfig, Scene,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[clap(
    name = "shape-icon-gen",
    about = "Render anti-aliased app and tray icons from vector shapes"
)]
struct Args {
    /// Built-in icon name or path to a JSON scene file.
    #[clap(value_name = "SCENE", default_value = catalog::DEFAULT_ICON)]
    scene: String,

    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Custom PNG icon sizes to generate. When set, only these sizes are generated.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    png: Option<Vec<u32>>,

    /// Internal canvas is this many times larger than each output size
    #[clap(long, value_name = "N", default_value_t = 2)]
    scale_factor: u32,

    /// Override the scene's design space size
    #[clap(long, value_name = "SIZE")]
    reference_size: Option<f64>,

    /// Filter used to shrink the supersampled canvas
    #[clap(long, value_enum, default_value_t = DownsampleFilter::Lanczos3)]
    filter: DownsampleFilter,

    /// How each shape combines with what is already painted
    #[clap(long, value_enum, default_value_t = CompositeMode::Overwrite)]
    mode: CompositeMode,

    /// Generate only the app icon PNGs
    #[clap(long, conflicts_with_all = ["ico_only", "icns_only"])]
    png_only: bool,

    /// Generate only ICO format (Windows icons)
    #[clap(long, conflicts_with = "icns_only")]
    ico_only: bool,

    /// Generate only ICNS format (macOS icons)
    #[clap(long)]
    icns_only: bool,

    /// List the built-in icons and exit
    #[clap(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list {
        for name in catalog::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut scene = load_scene(&args.scene)?;
    if let Some(reference_size) = args.reference_size {
        scene.reference_size = reference_size;
    }

    let config = RenderConfig::default()
        .with_scale_factor(args.scale_factor)
        .with_filter(args.filter)
        .with_mode(args.mode);
    info!(
        "Scale factor {}x, {:?} filter, {:?} compositing",
        config.scale_factor, config.filter, config.mode
    );

    let options = OutputOptions {
        output: args.output,
        png: args.png,
        png_only: args.png_only,
        ico_only: args.ico_only,
        icns_only: args.icns_only,
    };
    output::generate_icons(&scene, &config, &options)
}

fn load_scene(scene: &str) -> Result<Scene> {
    let path = Path::new(scene);
    if path.extension().is_some_and(|ext| ext == "json") || path.is_file() {
        info!("Loading scene from {}", path.display());
        Scene::from_path(path)
    } else {
        catalog::lookup(scene)
    }
}
