use super::*;
use crate::common::*;

/// Resize the image bilinearly and the label by nearest neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resize {
    width: usize,
    height: usize,
}

impl Resize {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "resize target must be positive, but get {}x{}",
            width,
            height
        );
        Ok(Self { width, height })
    }

    pub fn forward(&self, sample: SegSample, info: &mut TransformInfo) -> Result<SegSample> {
        let Self { width, height } = *self;
        let (orig_h, orig_w) = (sample.height(), sample.width());
        info.push(InfoItem::Resize {
            height: orig_h,
            width: orig_w,
        });

        if (orig_h, orig_w) == (height, width) {
            return Ok(sample);
        }

        let SegSample { image, label } = sample;

        let image = resize_bilinear(&image, height, width);

        let label = label
            .map(|label| -> Result<_> {
                let raw = label.as_standard_layout().into_owned().into_raw_vec();
                let buffer = GrayImage::from_raw(orig_w as u32, orig_h as u32, raw)
                    .ok_or_else(|| format_err!("label buffer size mismatch"))?;
                let resized = imageops::resize(
                    &buffer,
                    width as u32,
                    height as u32,
                    FilterType::Nearest,
                );
                Ok(Array2::from_shape_vec((height, width), resized.into_raw())?)
            })
            .transpose()?;

        Ok(SegSample { image, label })
    }
}

/// Bilinear interpolation on an H×W×C array with half-pixel centers.
fn resize_bilinear(image: &Array3<f32>, height: usize, width: usize) -> Array3<f32> {
    let (in_h, in_w, channels) = image.dim();
    let sample_points = |out_len: usize, in_len: usize| -> Vec<(usize, usize, f32)> {
        let scale = in_len as f32 / out_len as f32;
        (0..out_len)
            .map(|index| {
                let pos = ((index as f32 + 0.5) * scale - 0.5).max(0.0);
                let lower = (pos.floor() as usize).min(in_len - 1);
                let upper = (lower + 1).min(in_len - 1);
                (lower, upper, pos - lower as f32)
            })
            .collect()
    };
    let ys = sample_points(height, in_h);
    let xs = sample_points(width, in_w);

    Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
        let (y0, y1, wy) = ys[y];
        let (x0, x1, wx) = xs[x];
        let top = image[[y0, x0, c]] * (1.0 - wx) + image[[y0, x1, c]] * wx;
        let bottom = image[[y1, x0, c]] * (1.0 - wx) + image[[y1, x1, c]] * wx;
        top * (1.0 - wy) + bottom * wy
    })
}
