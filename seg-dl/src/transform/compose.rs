use super::*;
use crate::{common::*, dataset::{load_image, load_label}};

/// A single step of [Compose].
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    Resize(Resize),
    Padding(Padding),
    RandomHorizontalFlip(RandomHorizontalFlip),
    Normalize(Normalize),
}

impl TransformOp {
    pub fn forward(&self, sample: SegSample, info: &mut TransformInfo) -> Result<SegSample> {
        match self {
            Self::Resize(op) => op.forward(sample, info),
            Self::Padding(op) => op.forward(sample, info),
            Self::RandomHorizontalFlip(op) => Ok(op.forward(sample)),
            Self::Normalize(op) => op.forward(sample),
        }
    }
}

impl From<Resize> for TransformOp {
    fn from(op: Resize) -> Self {
        Self::Resize(op)
    }
}

impl From<Padding> for TransformOp {
    fn from(op: Padding) -> Self {
        Self::Padding(op)
    }
}

impl From<RandomHorizontalFlip> for TransformOp {
    fn from(op: RandomHorizontalFlip) -> Self {
        Self::RandomHorizontalFlip(op)
    }
}

impl From<Normalize> for TransformOp {
    fn from(op: Normalize) -> Self {
        Self::Normalize(op)
    }
}

/// Decodes an image and its label, then runs the steps in order.
///
/// The image is decoded as RGB with values in `[0, 255]` and the output is
/// transposed to C×H×W. An empty step list only decodes and transposes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compose {
    ops: Vec<TransformOp>,
}

impl Compose {
    pub fn new(ops: impl IntoIterator<Item = TransformOp>) -> Self {
        Self {
            ops: ops.into_iter().collect(),
        }
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }
}

impl Transform for Compose {
    fn transform(&self, image_path: &Path, label_path: Option<&Path>) -> Result<Transformed> {
        let image = load_image(image_path)?;
        let label = label_path.map(load_label).transpose()?;

        if let Some(label) = &label {
            let (img_h, img_w, _) = image.dim();
            ensure!(
                label.dim() == (img_h, img_w),
                "image '{}' is {}x{} but its label is {}x{}",
                image_path.display(),
                img_w,
                img_h,
                label.dim().1,
                label.dim().0
            );
        }

        let mut info = vec![];
        let SegSample { image, label } = self
            .ops
            .iter()
            .try_fold(SegSample { image, label }, |sample, op| {
                op.forward(sample, &mut info)
            })?;
        let image = image
            .permuted_axes([2, 0, 1])
            .as_standard_layout()
            .into_owned();

        Ok(Transformed { image, info, label })
    }
}
