use super::*;
use crate::common::*;

/// Pad the image and label at the bottom and right to the target size.
#[derive(Debug, Clone, PartialEq)]
pub struct Padding {
    width: usize,
    height: usize,
    im_padding_value: [f32; 3],
    label_padding_value: u8,
}

impl Padding {
    pub const DEFAULT_IM_PADDING_VALUE: [f32; 3] = [127.5, 127.5, 127.5];
    pub const DEFAULT_LABEL_PADDING_VALUE: u8 = 255;

    pub fn new(
        width: usize,
        height: usize,
        im_padding_value: Option<[f32; 3]>,
        label_padding_value: Option<u8>,
    ) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "padding target must be positive, but get {}x{}",
            width,
            height
        );
        Ok(Self {
            width,
            height,
            im_padding_value: im_padding_value.unwrap_or(Self::DEFAULT_IM_PADDING_VALUE),
            label_padding_value: label_padding_value
                .unwrap_or(Self::DEFAULT_LABEL_PADDING_VALUE),
        })
    }

    pub fn forward(&self, sample: SegSample, info: &mut TransformInfo) -> Result<SegSample> {
        let Self {
            width,
            height,
            im_padding_value,
            label_padding_value,
        } = *self;
        let (orig_h, orig_w, channels) = (sample.height(), sample.width(), sample.channels());
        ensure!(
            orig_h <= height && orig_w <= width,
            "image size {}x{} is larger than padding target {}x{}",
            orig_w,
            orig_h,
            width,
            height
        );
        ensure!(
            channels == im_padding_value.len(),
            "padding expects {} channels, but get {}",
            im_padding_value.len(),
            channels
        );
        info.push(InfoItem::Padding {
            height: orig_h,
            width: orig_w,
        });

        let SegSample { image, label } = sample;

        let image = {
            let fill = Array1::from(im_padding_value.to_vec());
            let mut padded = Array3::<f32>::zeros((height, width, channels));
            padded.assign(&fill);
            padded.slice_mut(s![..orig_h, ..orig_w, ..]).assign(&image);
            padded
        };

        let label = label.map(|label| {
            let mut padded = Array2::from_elem((height, width), label_padding_value);
            padded.slice_mut(s![..orig_h, ..orig_w]).assign(&label);
            padded
        });

        Ok(SegSample { image, label })
    }
}
