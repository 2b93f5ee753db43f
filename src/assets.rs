use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use thiserror::Error;

use gl_wrapper::texture::{
    CubeFace, Cubemap, Texture2D, TextureError, TextureFormats, TextureParams,
};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not decode {0}: {1}")]
    Decode(PathBuf, #[source] image::ImageError),
    #[error("texture upload failed for {0}: {1}")]
    Upload(PathBuf, #[source] TextureError),
}

/// Decoded pixels ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormats,
    pub data: Vec<u8>,
}

impl Pixels {
    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();

        let (format, data) = match image.color().channel_count() {
            1 => (TextureFormats::R8, image.into_luma8().into_raw()),
            3 => (TextureFormats::Rgb8, image.into_rgb8().into_raw()),
            // two channel and wide formats are widened to rgba
            _ => (TextureFormats::Rgba8, image.into_rgba8().into_raw()),
        };

        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P, flip_vertically: bool) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| AssetError::Decode(path.to_owned(), e))?;

        let image = if flip_vertically { image.flipv() } else { image };

        Ok(Self::from_image(image))
    }

    /// Two-tone RGB checkerboard, used when an asset is missing.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        Self::checkerboard_in(size, cells, TextureFormats::Rgb8)
    }

    /// Checkerboard with the pixel layout of `format`. Alpha stays opaque.
    pub fn checkerboard_in(size: u32, cells: u32, format: TextureFormats) -> Self {
        let cell = (size / cells.max(1)).max(1);
        let channels = format.channels() as usize;
        let mut data = Vec::with_capacity(size as usize * size as usize * channels);

        for y in 0..size {
            for x in 0..size {
                let value = if (x / cell + y / cell) % 2 == 0 { 200 } else { 60 };
                match format {
                    TextureFormats::R8 => data.push(value),
                    TextureFormats::Rgb8 => data.extend_from_slice(&[value, value, value]),
                    TextureFormats::Rgba8 => data.extend_from_slice(&[value, value, value, 255]),
                }
            }
        }

        Self {
            width: size,
            height: size,
            format,
            data,
        }
    }

    pub fn upload(&self, params: &TextureParams) -> Result<Texture2D, TextureError> {
        Texture2D::from_pixels(self.width, self.height, &self.data, self.format, params)
    }
}

/// Images are flipped so that uv (0, 0) is the bottom left corner.
pub fn load_texture<P: AsRef<Path>>(
    path: P,
    params: &TextureParams,
) -> Result<Texture2D, AssetError> {
    let path = path.as_ref();
    let pixels = Pixels::open(path, true)?;

    log::debug!(
        "loaded {} ({}x{}, {:?})",
        path.display(),
        pixels.width,
        pixels.height,
        pixels.format
    );

    pixels
        .upload(params)
        .map_err(|e| AssetError::Upload(path.to_owned(), e))
}

/// Like [`load_texture`] but substitutes a checkerboard when the file is unusable.
pub fn load_texture_or_checker<P: AsRef<Path>>(
    path: P,
    params: &TextureParams,
) -> Result<Texture2D, TextureError> {
    match load_texture(path.as_ref(), params) {
        Ok(texture) => Ok(texture),
        Err(e) => {
            log::warn!("{e}; using a placeholder texture");
            Pixels::checkerboard(64, 8).upload(params)
        }
    }
}

pub const CUBEMAP_FACES: [&str; 6] = [
    "right.jpg",
    "left.jpg",
    "top.jpg",
    "bottom.jpg",
    "front.jpg",
    "back.jpg",
];

/// Decodes the six faces in [`CUBEMAP_FACES`] order. Unreadable faces become
/// checkerboards sized and formatted like the first face that did decode.
pub fn cubemap_pixels(directory: &Path) -> Vec<Pixels> {
    let decoded: Vec<Option<Pixels>> = CUBEMAP_FACES
        .iter()
        .map(|name| match Pixels::open(directory.join(name), false) {
            Ok(pixels) => Some(pixels),
            Err(e) => {
                log::warn!("{e}; using a placeholder face");
                None
            }
        })
        .collect();

    let (size, format) = decoded
        .iter()
        .flatten()
        .next()
        .map_or((64, TextureFormats::Rgb8), |p| (p.width, p.format));

    decoded
        .into_iter()
        .map(|face| face.unwrap_or_else(|| Pixels::checkerboard_in(size, 4, format)))
        .collect()
}

/// Skybox faces are not flipped, cubemap lookups expect the top row first.
pub fn load_cubemap(directory: &Path) -> Result<Cubemap, TextureError> {
    let faces = cubemap_pixels(directory);

    let face = |i: usize| CubeFace {
        width: faces[i].width,
        height: faces[i].height,
        data: &faces[i].data,
        format: faces[i].format,
    };

    Cubemap::from_faces(&[face(0), face(1), face(2), face(3), face(4), face(5)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn checkerboard_alternates_cells() {
        let board = Pixels::checkerboard(4, 2);

        assert_eq!(board.format, TextureFormats::Rgb8);
        assert_eq!(board.data.len(), 4 * 4 * 3);
        // (0,0) light, (2,0) dark, (2,2) light
        assert_eq!(board.data[0], 200);
        assert_eq!(board.data[2 * 3], 60);
        assert_eq!(board.data[(2 * 4 + 2) * 3], 200);
    }

    #[test]
    fn checkerboard_follows_the_format() {
        let gray = Pixels::checkerboard_in(2, 2, TextureFormats::R8);
        assert_eq!(gray.data, vec![200, 60, 60, 200]);

        let rgba = Pixels::checkerboard_in(2, 1, TextureFormats::Rgba8);
        assert_eq!(rgba.data.len(), 2 * 2 * 4);
        assert_eq!(&rgba.data[..4], &[200, 200, 200, 255]);
    }

    #[test]
    fn channel_count_picks_the_format() {
        let gray = Pixels::from_image(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            2,
            1,
            Luma([7]),
        )));
        assert_eq!(gray.format, TextureFormats::R8);
        assert_eq!(gray.data, vec![7, 7]);

        let rgb = Pixels::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            1,
            1,
            Rgb([1, 2, 3]),
        )));
        assert_eq!(rgb.format, TextureFormats::Rgb8);

        let luma_alpha = Pixels::from_image(DynamicImage::new_luma_a8(3, 3));
        assert_eq!(luma_alpha.format, TextureFormats::Rgba8);
        assert_eq!(luma_alpha.data.len(), 3 * 3 * 4);
    }

    #[test]
    fn open_flips_rows() {
        let dir = std::env::temp_dir().join(format!("learngl_assets_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rows.png");

        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let flipped = Pixels::open(&path, true).unwrap();
        assert_eq!(flipped.data, vec![0, 0, 255, 255, 0, 0]);

        let kept = Pixels::open(&path, false).unwrap();
        assert_eq!(kept.data, vec![255, 0, 0, 0, 0, 255]);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_cubemap_faces_match_the_loaded_ones() {
        let dir = std::env::temp_dir().join(format!("learngl_skybox_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]))
            .save(dir.join(CUBEMAP_FACES[2]))
            .unwrap();

        let faces = cubemap_pixels(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!((face.width, face.height), (8, 8));
            assert_eq!(face.format, TextureFormats::Rgb8);
            assert_eq!(face.data.len(), 8 * 8 * 3);
        }
        assert_eq!(faces[0], Pixels::checkerboard_in(8, 4, TextureFormats::Rgb8));
    }

    #[test]
    fn cubemap_without_any_faces_is_all_placeholders() {
        let faces = cubemap_pixels(Path::new("/nonexistent/learngl/skybox"));

        assert!(faces.iter().all(|f| *f == Pixels::checkerboard(64, 4)));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let res = Pixels::open("/nonexistent/learngl/texture.png", true);

        assert!(matches!(res, Err(AssetError::Decode(..))));
    }
}
