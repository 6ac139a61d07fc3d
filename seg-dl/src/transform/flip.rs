use super::*;
use crate::common::*;

/// Flip the image and label horizontally with a probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomHorizontalFlip {
    prob: f64,
}

impl RandomHorizontalFlip {
    pub fn new(prob: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&prob),
            "flip probability must be in [0, 1], but get {}",
            prob
        );
        Ok(Self { prob })
    }

    pub fn forward(&self, sample: SegSample) -> SegSample {
        let mut rng = StdRng::from_entropy();
        if !rng.gen_bool(self.prob) {
            return sample;
        }

        let SegSample { image, label } = sample;
        SegSample {
            image: image
                .slice(s![.., ..;-1, ..])
                .as_standard_layout()
                .into_owned(),
            label: label.map(|label| label.slice(s![.., ..;-1]).as_standard_layout().into_owned()),
        }
    }
}
