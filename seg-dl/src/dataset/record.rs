use crate::{common::*, transform::TransformInfo};

/// The paths of an image and its annotation mask, without pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRecord {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
}

/// A loaded sample.
#[derive(Debug, Clone, PartialEq)]
pub enum DataRecord {
    /// A training sample.
    Train {
        /// The image in C×H×W layout.
        image: Array3<f32>,
        /// The shifted label in H×W layout.
        label: Array2<u8>,
    },
    /// An evaluation sample with batch axes attached.
    Val {
        /// The image in 1×C×H×W layout.
        image: Array4<f32>,
        info: TransformInfo,
        /// The shifted label in 1×1×H×W layout, at the source resolution.
        label: Array4<u8>,
    },
}

impl DataRecord {
    pub fn image_shape(&self) -> &[usize] {
        match self {
            Self::Train { image, .. } => image.shape(),
            Self::Val { image, .. } => image.shape(),
        }
    }

    pub fn label_shape(&self) -> &[usize] {
        match self {
            Self::Train { label, .. } => label.shape(),
            Self::Val { label, .. } => label.shape(),
        }
    }

    /// Iterate over all label pixels.
    pub fn label_values(&self) -> Box<dyn Iterator<Item = u8> + '_> {
        match self {
            Self::Train { label, .. } => Box::new(label.iter().cloned()),
            Self::Val { label, .. } => Box::new(label.iter().cloned()),
        }
    }

    pub fn info(&self) -> Option<&TransformInfo> {
        match self {
            Self::Train { .. } => None,
            Self::Val { info, .. } => Some(info),
        }
    }
}
