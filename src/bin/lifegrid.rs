use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lifegrid", version)]
struct Cli {
    /// Birth date, `dd/mm/yyyy` or `dd-mm-yyyy`.
    birth_date: String,

    /// Output path; an `.svg` extension is enforced.
    #[arg(short = 'f', long, default_value = "life_calendar.svg")]
    filename: PathBuf,

    /// Calendar title.
    #[arg(short = 't', long, default_value = "Your Life in Weeks")]
    title: String,

    /// Caption rotated along the right-hand edge of the grid.
    #[arg(short = 's', long)]
    sidebar_text: Option<String>,

    /// Caption under the title block.
    #[arg(short = 'b', long)]
    subtitle_text: Option<String>,

    /// Number of year rows (80-100).
    #[arg(short = 'a', long, default_value_t = 100)]
    age: u32,

    /// Darken weeks before this date (`dd/mm/yyyy`); `today` uses the
    /// current date, `none` disables darkening.
    #[arg(short = 'd', long, default_value = "today")]
    darken_until: String,

    /// Built-in style preset.
    #[arg(long, value_enum, default_value_t = StyleChoice::Poster)]
    style: StyleChoice,

    /// Style JSON file; absent fields fall back to the poster preset.
    /// Takes precedence over `--style`.
    #[arg(long)]
    style_json: Option<PathBuf>,

    /// Extra font file to register under the style's face name for text
    /// measurement. May be repeated.
    #[arg(long)]
    font: Vec<PathBuf>,

    /// Also rasterize the page to a PNG next to the SVG.
    #[arg(long)]
    png: bool,

    /// Write the composed draw ops as JSON to this path.
    #[arg(long)]
    dump_ops: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Poster,
    Plain,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing based on CLI verbosity level.
///
/// `RUST_LOG` overrides the flag if set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lifegrid={level}")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let style = load_style(&cli)?;

    let spec = lifegrid::CalendarSpec {
        birth_date: lifegrid::parse_date(&cli.birth_date)?,
        title: cli.title.clone(),
        age_rows: cli.age,
        darken_until: parse_darken_until(&cli.darken_until)?,
        sidebar_text: cli.sidebar_text.clone(),
        subtitle_text: cli.subtitle_text.clone(),
    };

    let mut ruler = lifegrid::TextRuler::new();
    for path in &cli.font {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        ruler.register_font_bytes(&style.fonts.face, &bytes)?;
    }

    let mut surface = lifegrid::SvgSurface::with_ruler(style.page, ruler);
    let ops = lifegrid::compose(&spec, &style, &mut surface)?;

    if let Some(path) = &cli.dump_ops {
        let f = std::fs::File::create(path)
            .with_context(|| format!("create ops dump '{}'", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(f), &ops)
            .with_context(|| "serialize draw ops")?;
    }

    lifegrid::replay(&ops, &mut surface)?;

    let out_path = cli.filename.with_extension("svg");
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let fontdb = surface.fontdb();
    let svg = surface.into_svg();
    std::fs::write(&out_path, &svg)
        .with_context(|| format!("write svg '{}'", out_path.display()))?;
    eprintln!("wrote {}", out_path.display());

    if cli.png {
        let png_path = out_path.with_extension("png");
        // The page opens with an opaque full-bleed background rect, so
        // every pixel has alpha 255 and the premultiplied frame data is
        // identical to the straight-alpha RGBA the encoder expects.
        let frame = lifegrid::rasterize_svg(svg.as_bytes(), fontdb, 1.0)?;
        image::save_buffer_with_format(
            &png_path,
            &frame.rgba8_premul,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", png_path.display()))?;
        eprintln!("wrote {}", png_path.display());
    }

    Ok(())
}

fn load_style(cli: &Cli) -> anyhow::Result<lifegrid::Style> {
    if let Some(path) = &cli.style_json {
        return Ok(lifegrid::Style::from_json_path(path)?);
    }

    Ok(match cli.style {
        StyleChoice::Poster => lifegrid::Style::poster(),
        StyleChoice::Plain => lifegrid::Style::plain(),
    })
}

fn parse_darken_until(raw: &str) -> anyhow::Result<Option<chrono::NaiveDate>> {
    match raw.trim() {
        "none" => Ok(None),
        "today" => Ok(Some(chrono::Local::now().date_naive())),
        other => Ok(Some(lifegrid::parse_date(other)?)),
    }
}
