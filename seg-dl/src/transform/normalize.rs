use super::*;
use crate::common::*;

/// Scale pixels to `[0, 1]`, then subtract mean and divide by std per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalize {
    mean: Array1<f32>,
    std: Array1<f32>,
}

impl Normalize {
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Result<Self> {
        ensure!(
            std.iter().all(|&s| s != 0.0),
            "normalization std must be non-zero, but get {:?}",
            std
        );
        Ok(Self {
            mean: Array1::from(mean.to_vec()),
            std: Array1::from(std.to_vec()),
        })
    }

    pub fn forward(&self, sample: SegSample) -> Result<SegSample> {
        ensure!(
            sample.channels() == self.mean.len(),
            "normalize expects {} channels, but get {}",
            self.mean.len(),
            sample.channels()
        );
        let SegSample { image, label } = sample;
        let image = (image / 255.0 - &self.mean) / &self.std;
        Ok(SegSample { image, label })
    }
}

impl Default for Normalize {
    fn default() -> Self {
        Self {
            mean: Array1::from_elem(3, 0.5),
            std: Array1::from_elem(3, 0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_per_channel() -> Result<()> {
        let image = Array3::from_shape_fn((1, 1, 3), |(_, _, c)| [0.0, 127.5, 255.0][c]);
        let output = Normalize::default().forward(SegSample { image, label: None })?;
        let values = output.image.into_raw_vec();
        assert!((values[0] + 1.0).abs() < 1e-6);
        assert!(values[1].abs() < 1e-6);
        assert!((values[2] - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn reject_zero_std() {
        assert!(Normalize::new([0.0; 3], [1.0, 0.0, 1.0]).is_err());
    }
}
