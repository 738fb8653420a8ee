use clap::{Parser, Subcommand};
use cli::{load_mask, SceneConfig};
use color_eyre::eyre::Result;
use compositor::{HeightmapCompositor, SegmentationCompositor, SegmentationMap};
use glam::Vec3;
use meshing::{save_obj, MaskMesher};
use raster::HeightField;
use std::path::{Path, PathBuf};
use terrain_kit_common::WorldBounds;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a mask image into a ground mesh and export it as OBJ
    Mesh {
        /// Path to the mask image (any format the image crate reads)
        #[arg(short, long)]
        input: PathBuf,
        /// Path for the OBJ output
        #[arg(short, long)]
        output: PathBuf,
        /// Mask threshold separating inside from outside
        #[arg(long, default_value = "0.5")]
        threshold: f32,
        /// Contour simplification tolerance in pixels
        #[arg(long, default_value = "1.0")]
        tolerance: f32,
        /// Vertical offset of the ground plane
        #[arg(long, default_value = "0.0")]
        height_offset: f32,
        /// World-space extent of the mesh along X and Z
        #[arg(long, default_value = "100.0")]
        extent: f32,
    },
    /// Composite a scene file into heightmap and segmentation images
    Composite {
        /// Path to the JSON scene configuration
        #[arg(short, long)]
        config: PathBuf,
        /// Path for the grayscale heightmap PNG
        #[arg(long)]
        heightmap: Option<PathBuf>,
        /// Path for the RGBA segmentation PNG
        #[arg(long)]
        segmentation: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Mesh {
            input,
            output,
            threshold,
            tolerance,
            height_offset,
            extent,
        } => {
            mesh_command(input, output, *threshold, *tolerance, *height_offset, *extent)?;
        }
        Commands::Composite {
            config,
            heightmap,
            segmentation,
        } => {
            composite_command(config, heightmap.as_deref(), segmentation.as_deref())?;
        }
    }

    Ok(())
}

fn mesh_command(
    input: &Path,
    output: &Path,
    threshold: f32,
    tolerance: f32,
    height_offset: f32,
    extent: f32,
) -> Result<()> {
    info!("Loading mask from {:?}", input);
    let mask = load_mask(input)?;
    info!("Mask loaded: {}x{}", mask.width(), mask.height());

    let bounds = WorldBounds::new(Vec3::ZERO, Vec3::new(extent, 0.0, extent));
    let mesh = MaskMesher::new()
        .with_threshold(threshold)
        .with_simplify_tolerance(tolerance)
        .with_height_offset(height_offset)
        .mesh_from_mask(&mask, bounds);

    info!(
        "Mesh built: {} vertices, {} triangles",
        mesh.positions.len(),
        mesh.triangle_count()
    );
    save_obj(&mesh, output)?;
    info!("OBJ written to {:?}", output);
    Ok(())
}

fn composite_command(
    config_path: &Path,
    heightmap_path: Option<&Path>,
    segmentation_path: Option<&Path>,
) -> Result<()> {
    let scene = SceneConfig::from_file(config_path)?;
    info!(
        "Scene loaded: {}x{}, {} features",
        scene.width,
        scene.height,
        scene.features.len()
    );

    if heightmap_path.is_none() && segmentation_path.is_none() {
        info!("No outputs requested; pass --heightmap and/or --segmentation");
        return Ok(());
    }

    if let Some(path) = heightmap_path {
        let features = scene.load_features()?;
        let field = HeightmapCompositor::new(scene.width, scene.height).composite(&features);
        save_heightmap(&field, path)?;
        info!("Heightmap written to {:?}", path);
    }

    if let Some(path) = segmentation_path {
        let segments = scene.load_segments()?;
        let map = SegmentationCompositor::new(scene.width, scene.height).composite(&segments);
        save_segmentation(&map, path)?;
        info!("Segmentation written to {:?}", path);
    }

    Ok(())
}

fn save_heightmap(field: &HeightField, path: &Path) -> Result<()> {
    let mut img = image::GrayImage::new(field.width(), field.height());
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = image::Luma([(field.get(x, y) * 255.0).round() as u8]);
    }
    img.save(path)?;
    Ok(())
}

fn save_segmentation(map: &SegmentationMap, path: &Path) -> Result<()> {
    let mut img = image::RgbaImage::new(map.width(), map.height());
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let c = map.get(x, y);
        *pixel = image::Rgba([
            (c.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]);
    }
    img.save(path)?;
    Ok(())
}
