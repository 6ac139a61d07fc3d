//! Transform pipeline interface and the bundled composer.

mod compose;
mod flip;
mod normalize;
mod padding;
mod resize;

pub use compose::*;
pub use flip::*;
pub use normalize::*;
pub use padding::*;
pub use resize::*;

use crate::common::*;

/// The transform pipeline invoked for each sample.
///
/// The image and optional label paths are handed over as they are. The
/// implementation owns decoding and must return the image in C×H×W layout.
pub trait Transform
where
    Self: Debug + Send + Sync,
{
    fn transform(&self, image: &Path, label: Option<&Path>) -> Result<Transformed>;
}

/// The output of a [Transform].
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// The image in C×H×W layout.
    pub image: Array3<f32>,
    /// The size changes applied to the image, in application order.
    pub info: TransformInfo,
    /// The label in H×W layout, present if a label path was given.
    pub label: Option<Array2<u8>>,
}

/// The ordered list of size changes applied by a pipeline.
pub type TransformInfo = Vec<InfoItem>;

/// A size change. The recorded size is the one _before_ the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum InfoItem {
    Resize { height: usize, width: usize },
    Padding { height: usize, width: usize },
}

/// The working state of an image and its label inside [Compose].
#[derive(Debug, Clone, PartialEq)]
pub struct SegSample {
    /// The image in H×W×C layout.
    pub image: Array3<f32>,
    /// The label in H×W layout.
    pub label: Option<Array2<u8>>,
}

impl SegSample {
    pub fn height(&self) -> usize {
        self.image.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.image.shape()[1]
    }

    pub fn channels(&self) -> usize {
        self.image.shape()[2]
    }
}
