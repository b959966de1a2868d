//! In-memory product images with provenance.

use image::DynamicImage;

/// A decoded product photograph plus its provenance.
///
/// Holds both the decoded raster (proof the bytes really are an image) and
/// the original encoded bytes, which are what gets shipped to the model.
/// Ephemeral: owned by the acquisition output list and discarded once the
/// extraction invoker has consumed it.
#[derive(Clone)]
pub struct ProductImage {
    /// Where this image came from (URL or local path).
    pub source: String,

    /// Original encoded bytes as fetched/read.
    pub data: Vec<u8>,

    /// MIME type inferred from the encoded bytes.
    pub mime_type: String,

    /// Decoded raster.
    pub image: DynamicImage,
}

impl ProductImage {
    /// Decode encoded bytes into a `ProductImage`.
    ///
    /// Returns the decode error message on failure so the caller can log
    /// and drop without aborting the batch.
    pub fn from_bytes(source: impl Into<String>, data: Vec<u8>) -> Result<Self, String> {
        let format = image::guess_format(&data).map_err(|e| e.to_string())?;
        let decoded = image::load_from_memory_with_format(&data, format).map_err(|e| e.to_string())?;

        Ok(Self {
            source: source.into(),
            mime_type: format.to_mime_type().to_string(),
            data,
            image: decoded,
        })
    }

    /// Pixel dimensions of the decoded raster.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

impl std::fmt::Debug for ProductImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductImage")
            .field("source", &self.source)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 placeholder, re-encoded per test to avoid baking binary blobs in.
    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::new_rgb8(1, 1);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_valid_png() {
        let product = ProductImage::from_bytes("https://cdn.example.com/a.png", png_bytes()).unwrap();
        assert_eq!(product.mime_type, "image/png");
        assert_eq!(product.dimensions(), (1, 1));
        assert!(!product.data.is_empty());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = ProductImage::from_bytes("https://cdn.example.com/nope", vec![0, 1, 2, 3]);
        assert!(err.is_err());
    }

    #[test]
    fn test_debug_omits_raw_bytes() {
        let product = ProductImage::from_bytes("src", png_bytes()).unwrap();
        let debug = format!("{:?}", product);
        assert!(debug.contains("image/png"));
        assert!(!debug.contains("[137")); // no raw byte dump
    }
}
