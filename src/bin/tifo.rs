use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use tifo::{
    AssetStore, CanvasOptions, ExplodedOptions, ExportRequest, FontSet, GridSpec, PostSpec,
    VarietyRng, compose_post, export_bundle_frames, layout_by_name, preset_by_name,
    split_by_layer, theme_by_name,
};

#[derive(Parser, Debug)]
#[command(name = "tifo", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a post job to PNG files (one per layer, composite, grid
    /// visualization, exploded views).
    Export(ExportArgs),
    /// List the built-in layouts, themes, and canvas presets.
    List,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for the PNG bundle.
    #[arg(long)]
    out: PathBuf,

    /// Override the job's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Overlay captions and grid labels using this font (relative to the
    /// assets root).
    #[arg(long)]
    label_font: Option<String>,
}

/// One export job: catalog names plus the post content.
#[derive(Debug, serde::Deserialize)]
struct Job {
    layout: String,
    theme: String,
    #[serde(default = "default_preset")]
    preset: String,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    fonts: FontSet,
    post: PostSpec,
}

fn default_preset() -> String {
    "instagram-post".to_string()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::List => cmd_list(),
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let job_bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read job '{}'", args.in_path.display()))?;
    let job: Job = serde_json::from_slice(&job_bytes)
        .with_context(|| format!("parse job '{}'", args.in_path.display()))?;

    let layout = layout_by_name(&job.layout)?;
    let theme = theme_by_name(&job.theme)?;
    let preset = preset_by_name(&job.preset)?;
    let canvas: CanvasOptions = preset.canvas_options();

    let assets_root = args
        .in_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));
    let mut assets = AssetStore::new(assets_root);

    let seed = args.seed.unwrap_or(job.seed);
    let mut rng = VarietyRng::new(seed);
    let (blocks, floaters) = compose_post(layout, theme, &job.fonts, &job.post, &mut rng);
    let layers = split_by_layer(&blocks, &floaters);

    let req = ExportRequest {
        template: layout.template,
        grid_spec: GridSpec::default(),
        theme,
        canvas,
    };
    let exploded = ExplodedOptions {
        label_font: args.label_font,
        ..ExplodedOptions::default()
    };

    let frames = export_bundle_frames(&layers, &req, &exploded, &mut assets)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    for (key, frame) in &frames {
        let path = args.out.join(format!("{key}.png"));
        let mut straight = frame.data.clone();
        tifo::unpremultiply_in_place(&mut straight);
        image::save_buffer_with_format(
            &path,
            &straight,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} files to {}", frames.len(), args.out.display());
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    println!("layouts:");
    for layout in tifo::LAYOUTS {
        println!("  {}", layout.name);
    }
    println!("themes:");
    for theme in tifo::THEMES {
        println!("  {}", theme.name);
    }
    println!("presets:");
    for preset in tifo::PRESETS {
        println!(
            "  {} ({}x{} @ {} dpi)",
            preset.name, preset.width, preset.height, preset.dpi
        );
    }
    Ok(())
}
