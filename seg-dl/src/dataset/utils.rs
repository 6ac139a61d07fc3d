use crate::{common::*, error::DatasetError};
use ndarray::{Array, Dimension};

/// List the file names in a directory in the order the filesystem returns them.
///
/// No filtering and no sorting take place.
pub fn list_dir(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let names: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("failed to list directory '{}'", dir.display()))?
        .map(|entry| -> Result<_> {
            let name = entry?.file_name();
            let name = name.into_string().map_err(|name| {
                DatasetError::invalid_argument(format!(
                    "non UTF-8 file name {:?} found in '{}'",
                    name,
                    dir.display()
                ))
            })?;
            Ok(name)
        })
        .try_collect()?;
    Ok(names)
}

/// Derive the annotation file name from an image file name.
pub fn label_file_name(image_file_name: &str) -> String {
    image_file_name.replace(".jpg", ".png")
}

/// Subtract one from every label value with 8-bit wraparound.
///
/// Class 0 of the raw masks is the ignored background and becomes 255.
pub fn shift_label<D>(label: Array<u8, D>) -> Array<u8, D>
where
    D: Dimension,
{
    label.mapv_into(|value| value.wrapping_sub(1))
}

/// Decode a single-channel 8-bit mask into an H×W array.
///
/// Palette PNGs yield their raw palette indices. Any other mask that is not
/// 8-bit grayscale is rejected.
pub fn load_label(path: impl AsRef<Path>) -> Result<Array2<u8>> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .with_context(|| format!("failed to open label file '{}'", path.display()))?;

    if reader.format() == Some(ImageFormat::Png) {
        return load_png_label(path)
            .with_context(|| format!("failed to decode label file '{}'", path.display()));
    }

    let gray = match reader
        .decode()
        .with_context(|| format!("failed to decode label file '{}'", path.display()))?
    {
        DynamicImage::ImageLuma8(gray) => gray,
        other => bail!(
            "label file '{}' must be single-channel 8-bit, but get {:?}",
            path.display(),
            other.color()
        ),
    };
    let (width, height) = gray.dimensions();
    let label = Array2::from_shape_vec((height as usize, width as usize), gray.into_raw())?;
    Ok(label)
}

/// Read grayscale values or palette indices without expanding the palette.
fn load_png_label(path: &Path) -> Result<Array2<u8>> {
    let mut decoder = png::Decoder::new(io::BufReader::new(File::open(path)?));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;

    ensure!(
        matches!(
            frame.color_type,
            png::ColorType::Grayscale | png::ColorType::Indexed
        ) && frame.bit_depth == png::BitDepth::Eight,
        "expect 8-bit grayscale or indexed png, but get {:?} with {:?} depth",
        frame.color_type,
        frame.bit_depth
    );

    let (width, height) = (frame.width as usize, frame.height as usize);
    buf.truncate(frame.buffer_size());
    let label = Array2::from_shape_vec((height, width), buf)?;
    Ok(label)
}

/// Decode an image as RGB into an H×W×3 array with values in `[0, 255]`.
pub fn load_image(path: impl AsRef<Path>) -> Result<Array3<f32>> {
    let path = path.as_ref();
    let rgb = image::open(path)
        .with_context(|| format!("failed to decode image file '{}'", path.display()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels: Vec<f32> = rgb.into_raw().into_iter().map(f32::from).collect();
    let image = Array3::from_shape_vec((height as usize, width as usize, 3), pixels)?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_label_wraps_zero_to_ignore_index() {
        let label = Array2::from_shape_vec((2, 3), vec![0, 1, 2, 150, 254, 255]).unwrap();
        let shifted = shift_label(label);
        assert_eq!(
            shifted.iter().cloned().collect::<Vec<_>>(),
            vec![255, 0, 1, 149, 253, 254]
        );
    }

    #[test]
    fn shift_label_covers_every_value() {
        let label = Array1::from((0..=255u8).collect::<Vec<_>>());
        let shifted = shift_label(label);
        shifted.iter().enumerate().for_each(|(raw, &value)| {
            assert_eq!(value as usize, (raw + 255) % 256);
        });
    }

    #[test]
    fn derive_label_name() {
        assert_eq!(
            label_file_name("ADE_train_00000001.jpg"),
            "ADE_train_00000001.png"
        );
        assert_eq!(label_file_name("readme.txt"), "readme.txt");
    }

    #[test]
    fn load_gray_label() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("mask.png");
        let mut mask = GrayImage::new(3, 2);
        mask.put_pixel(2, 1, image::Luma([42]));
        mask.save(&path)?;

        let label = load_label(&path)?;
        assert_eq!(label.dim(), (2, 3));
        assert_eq!(label[[1, 2]], 42);
        assert_eq!(label[[0, 0]], 0);
        Ok(())
    }

    #[test]
    fn load_indexed_label_as_palette_indices() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("indexed.png");
        {
            let mut encoder = png::Encoder::new(io::BufWriter::new(File::create(&path)?), 3, 1);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![0, 0, 0, 255, 0, 0, 0, 255, 0]);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&[0, 1, 2])?;
        }

        let label = load_label(&path)?;
        assert_eq!(label.dim(), (1, 3));
        assert_eq!(label.iter().cloned().collect::<Vec<_>>(), vec![0, 1, 2]);
        Ok(())
    }

    #[test]
    fn reject_16_bit_label() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("deep.png");
        image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_pixel(2, 2, image::Luma([513]))
            .save(&path)?;

        assert!(load_label(&path).is_err());
        Ok(())
    }

    #[test]
    fn reject_rgb_label() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rgb.png");
        image::RgbImage::new(2, 2).save(&path)?;

        assert!(load_label(&path).is_err());
        Ok(())
    }

    #[test]
    fn list_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_dir(dir.path().join("missing")).is_err());
    }
}
