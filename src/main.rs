use sketchgen::{
    canvas::outline, extension_for_mime, ImageFile, Studio, StudioConfig, Viewport,
};
use std::env;
use std::fs;

const USAGE: &str = "usage: sketchgen [--realism N] <sketch.png|-> [model-photo|-] [description...]";

#[derive(Debug, PartialEq)]
enum SketchArg {
    /// `-`: trace the built-in t-shirt outline on the canvas.
    Draw,
    Path(String),
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    sketch: SketchArg,
    model: Option<String>,
    description: String,
    realism: Option<u8>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut realism = None;
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--realism" {
            let value = args.next().ok_or("--realism needs a value")?;
            let value = value
                .parse::<u8>()
                .map_err(|_| format!("invalid realism value: {}", value))?;
            realism = Some(value.min(100));
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let sketch = match positional.next() {
        Some(arg) if arg == "-" => SketchArg::Draw,
        Some(path) => SketchArg::Path(path),
        None => return Err(USAGE.to_string()),
    };
    let model = positional.next().filter(|p| p != "-");
    let description = positional.collect::<Vec<_>>().join(" ");

    Ok(CliArgs {
        sketch,
        model,
        description,
        realism,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    sketchgen::logger::init_with_config(sketchgen::logger::LoggerConfig::development())?;
    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    sketchgen::logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let cli = match parse_args(env::args().skip(1)) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    let config = StudioConfig::from_env();
    sketchgen::logger::log_config_info(&config);

    let mut studio = Studio::from_config(config)?;
    match &cli.sketch {
        SketchArg::Path(path) => studio.upload_sketch(ImageFile::from_path(path)),
        SketchArg::Draw => {
            let viewport = Viewport::identity(studio.surface().raster());
            studio.trace(&outline::fit_to(outline::TSHIRT, &viewport));
            log::info!("✏️  Traced the t-shirt outline on the canvas");
        }
    }
    if let Some(path) = &cli.model {
        studio.upload_model(ImageFile::from_path(path));
    }
    if !cli.description.is_empty() {
        studio.set_description(cli.description.as_str());
    }
    if let Some(realism) = cli.realism {
        studio.set_realism(realism);
    }

    match studio.generate().await {
        Ok(image) => {
            let out = format!("render.{}", extension_for_mime(&image.mime_type));
            fs::write(&out, &image.bytes)?;
            log::info!("🖼️  Render saved to {}", out);
            Ok(())
        }
        Err(e) => {
            log::error!("Generation failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_dash_sketch_means_draw() {
        let cli = parse_args(args("- - red linen dress")).unwrap();
        assert_eq!(cli.sketch, SketchArg::Draw);
        assert_eq!(cli.model, None);
        assert_eq!(cli.description, "red linen dress");
        assert_eq!(cli.realism, None);
    }

    #[test]
    fn test_paths_and_realism() {
        let cli = parse_args(args("sketch.png --realism 250 me.jpg denim jacket")).unwrap();
        assert_eq!(cli.sketch, SketchArg::Path("sketch.png".into()));
        assert_eq!(cli.model.as_deref(), Some("me.jpg"));
        assert_eq!(cli.description, "denim jacket");
        assert_eq!(cli.realism, Some(100));
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(parse_args(args("")).unwrap_err(), USAGE);
        assert!(parse_args(args("- --realism")).is_err());
        assert!(parse_args(args("- --realism high")).is_err());
    }
}
