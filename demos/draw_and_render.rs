use sketchgen::{
    canvas::outline, extension_for_mime, ModelPreset, ScreenPoint, Snapshot, Studio, StudioConfig,
    Viewport,
};
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    sketchgen::logger::init()?;

    let config = StudioConfig::from_env().with_preset(ModelPreset::Male);
    let mut studio = Studio::from_config(config)?.with_view(|snapshot: &Snapshot| {
        log::debug!(
            "canvas={} upload={} busy={}",
            snapshot.affordances.canvas_enabled,
            snapshot.affordances.sketch_upload_enabled,
            snapshot.panel.spinner_visible
        );
    });

    // The 512x512 canvas is shown at half size, 20px from the page corner.
    let viewport = Viewport::new(ScreenPoint::new(20.0, 20.0), 256.0, 256.0);
    studio.set_viewport(viewport);
    studio.trace(&outline::fit_to(outline::TSHIRT, &viewport));

    studio.set_description("plain white cotton t-shirt with a navy pocket");
    studio.set_realism(85);

    let image = studio.generate().await?;
    let out = format!("tshirt.{}", extension_for_mime(&image.mime_type));
    fs::write(&out, &image.bytes)?;
    println!("saved {}", out);

    Ok(())
}
