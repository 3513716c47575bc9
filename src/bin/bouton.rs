use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use bouton::{ButtonBuilder, ButtonConfig, Coord, RenderSettings, Stage, Texture, Viewport};

#[derive(Parser, Debug)]
#[command(name = "bouton", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place one button on a surface and write the rendered frame as a PNG.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Button config JSON.
    #[arg(long = "config")]
    config_path: Option<PathBuf>,

    /// Background image; overrides the config's texture path.
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Font file registered as the default label font.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Label text; overrides the config.
    #[arg(long)]
    label: Option<String>,

    /// X coordinate: a number or a percentage like "50%"; overrides the config.
    #[arg(long)]
    x: Option<Coord>,

    /// Y coordinate: a number or a percentage like "75%"; overrides the config.
    #[arg(long)]
    y: Option<Coord>,

    /// Resize the viewport to WxH after attaching, before rendering.
    #[arg(long)]
    resize: Option<String>,

    /// Dispatch a pointer tap at "X,Y" before rendering.
    #[arg(long)]
    tap: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<ButtonConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: ButtonConfig =
        serde_json::from_reader(r).with_context(|| "parse button config JSON")?;
    Ok(config)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut config = match &args.config_path {
        Some(path) => read_config_json(path)?,
        None => ButtonConfig::default(),
    };

    if let Some(label) = args.label {
        config.label = Some(label);
    }
    if let Some(x) = args.x {
        config.x = x;
    }
    if let Some(y) = args.y {
        config.y = y;
    }

    let mut stage = Stage::new(Viewport::new(args.width, args.height));

    if let Some(font) = &args.font {
        let family = stage.text_engine_mut().register_font_file(font)?;
        eprintln!("registered font family '{family}'");
    }

    // Texture path from the flag as given, or from the config resolved
    // relative to the config file's directory.
    let texture = match (&args.texture, &config.texture) {
        (Some(path), _) => Some(Texture::load(path)?),
        (None, Some(rel)) => {
            let root = args
                .config_path
                .as_deref()
                .and_then(Path::parent)
                .unwrap_or_else(|| Path::new("."));
            Some(Texture::load(&root.join(rel))?)
        }
        (None, None) => None,
    };

    let mut builder = ButtonBuilder::from_config(config).on_click(|| eprintln!("button clicked"));
    if let Some(texture) = texture {
        builder = builder.texture(texture);
    }

    stage.attach(builder.build())?;

    if let Some(resize) = &args.resize {
        let (w, h) = parse_pair(resize, 'x').with_context(|| "parse --resize (expected WxH)")?;
        stage.set_viewport(w, h)?;
    }

    if let Some(tap) = &args.tap {
        let (x, y) = parse_pair(tap, ',').with_context(|| "parse --tap (expected X,Y)")?;
        let handled = stage.pointer_tap(x, y);
        eprintln!("tap at ({x}, {y}) handled={handled}");
    }

    let settings = RenderSettings {
        clear_rgba: Some([0x1e, 0x1e, 0x1e, 0xff]),
    };
    let frame = bouton::render_stage(&mut stage, &settings)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn parse_pair(s: &str, sep: char) -> anyhow::Result<(f64, f64)> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| anyhow::anyhow!("expected two values separated by '{sep}'"))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}
