use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::canvas::Raster;
use crate::error::{Result, StudioError};
use crate::models::{EncodedPart, FileContent, GeneratedImage, ImageFile, SketchSource, PNG_MIME};

/// Reads the whole file and pairs its base64 text with the declared mime type.
pub async fn encode_file(file: &ImageFile) -> Result<EncodedPart> {
    let data = match &file.content {
        FileContent::Bytes(bytes) => BASE64.encode(bytes),
        FileContent::Path(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|e| StudioError::ReadError {
                name: file.name.clone(),
                message: e.to_string(),
            })?;
            BASE64.encode(bytes)
        }
    };

    log::debug!(
        "Encoded {} ({}, {} base64 chars)",
        file.name,
        file.mime_type,
        data.len()
    );

    Ok(EncodedPart {
        data,
        mime_type: file.mime_type.clone(),
    })
}

/// Serialises the canvas as PNG.
pub fn encode_raster(raster: &Raster) -> Result<EncodedPart> {
    let png = raster.to_png()?;
    Ok(EncodedPart {
        data: BASE64.encode(png),
        mime_type: PNG_MIME.to_string(),
    })
}

/// An uploaded sketch file takes priority over the drawn canvas.
pub async fn encode_sketch(source: &SketchSource<'_>, raster: &Raster) -> Result<EncodedPart> {
    match source {
        SketchSource::Uploaded(file) => encode_file(file).await,
        SketchSource::Drawn => encode_raster(raster),
        SketchSource::None => Err(StudioError::MissingSketch),
    }
}

pub fn decode_image(data: &str, mime_type: &str) -> Result<GeneratedImage> {
    let bytes = BASE64
        .decode(data.trim().as_bytes())
        .map_err(|e| StudioError::ResponseError(format!("image base64 decode failed: {}", e)))?;
    Ok(GeneratedImage {
        mime_type: mime_type.to_string(),
        data: data.trim().to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasPoint;
    use std::io::Write;

    #[tokio::test]
    async fn test_encode_file_from_disk() {
        let mut tmp = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        tmp.write_all(b"hello").unwrap();
        let file = ImageFile::from_path(tmp.path());

        let part = encode_file(&file).await.unwrap();
        assert_eq!(part.data, "aGVsbG8=");
        assert_eq!(part.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_unreadable_file_is_rejected() {
        let file = ImageFile::from_path("/definitely/not/here/sketch.png");
        let err = encode_file(&file).await.unwrap_err();
        assert!(matches!(err, StudioError::ReadError { ref name, .. } if name == "sketch.png"));
    }

    #[test]
    fn test_encode_raster_png() {
        let mut raster = Raster::new(32, 32, 2.0);
        raster.stroke_segment(CanvasPoint::new(2.0, 2.0), CanvasPoint::new(30.0, 30.0));
        let part = encode_raster(&raster).unwrap();
        assert_eq!(part.mime_type, "image/png");

        let bytes = BASE64.decode(part.data).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(16, 16).0, [0, 0, 0, 255]);
    }

    #[tokio::test]
    async fn test_uploaded_sketch_wins_over_canvas() {
        let file = ImageFile::from_bytes("upload.webp", "image/webp", b"up".to_vec());
        let raster = Raster::new(8, 8, 1.0);
        let part = encode_sketch(&SketchSource::Uploaded(&file), &raster)
            .await
            .unwrap();
        assert_eq!(part.mime_type, "image/webp");
        assert_eq!(part.data, BASE64.encode(b"up"));
    }

    #[tokio::test]
    async fn test_missing_sketch() {
        let raster = Raster::new(8, 8, 1.0);
        let err = encode_sketch(&SketchSource::None, &raster).await.unwrap_err();
        assert!(matches!(err, StudioError::MissingSketch));
    }

    #[test]
    fn test_decode_image() {
        let image = decode_image("aGVsbG8=\n", "image/png").unwrap();
        assert_eq!(image.bytes, b"hello");
        assert!(decode_image("***", "image/png").is_err());
    }
}
