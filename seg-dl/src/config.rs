//! Dataset configuration format.

use crate::{
    common::*,
    dataset::{build_dataset, DatasetInit, RandomAccessDataset},
    transform::{
        Compose, Normalize, Padding, RandomHorizontalFlip, Resize, Transform, TransformOp,
    },
};

/// The main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = std::fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

/// Dataset options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The registered dataset name, such as `ADE20K`.
    pub name: String,
    /// The dataset directory. The archive is fetched if it is not set.
    pub dataset_root: Option<PathBuf>,
    /// Either `train` or `val`.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Whether to download the dataset if `dataset_root` is not set.
    #[serde(default = "default_true")]
    pub download: bool,
    /// Whether to verify that every label file exists.
    #[serde(default)]
    pub check_labels: bool,
    /// The transform steps. The dataset cannot be built without them.
    pub transforms: Option<Vec<TransformConfig>>,
}

impl DatasetConfig {
    /// Build the transform pipeline, if configured.
    pub fn compose(&self) -> Result<Option<Compose>> {
        self.transforms
            .as_ref()
            .map(|transforms| -> Result<_> {
                let ops: Vec<_> = transforms.iter().map(|conf| conf.build()).try_collect()?;
                Ok(Compose::new(ops))
            })
            .transpose()
    }

    /// Build the dataset through the process-wide registry.
    pub fn build(&self) -> Result<Box<dyn RandomAccessDataset>> {
        let transforms = self
            .compose()?
            .map(|compose| Arc::new(compose) as Arc<dyn Transform>);
        let init = DatasetInit {
            transforms,
            dataset_root: self.dataset_root.clone(),
            mode: self.mode.clone(),
            download: self.download,
            check_labels: self.check_labels,
            fetcher: None,
        };
        build_dataset(&self.name, init)
    }
}

/// Transform step options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransformConfig {
    /// Resize to `[width, height]`.
    Resize { target_size: [usize; 2] },
    /// Pad at the bottom and right to `[width, height]`.
    Padding {
        target_size: [usize; 2],
        im_padding_value: Option<[R64; 3]>,
        label_padding_value: Option<u8>,
    },
    /// Flip horizontally with probability `prob`.
    RandomHorizontalFlip {
        #[serde(default = "default_flip_prob")]
        prob: R64,
    },
    /// Normalize per channel after scaling to `[0, 1]`.
    Normalize {
        #[serde(default = "default_half")]
        mean: [R64; 3],
        #[serde(default = "default_half")]
        std: [R64; 3],
    },
}

impl TransformConfig {
    pub fn build(&self) -> Result<TransformOp> {
        let op = match *self {
            Self::Resize {
                target_size: [width, height],
            } => Resize::new(width, height)?.into(),
            Self::Padding {
                target_size: [width, height],
                im_padding_value,
                label_padding_value,
            } => Padding::new(
                width,
                height,
                im_padding_value.map(to_f32_array),
                label_padding_value,
            )?
            .into(),
            Self::RandomHorizontalFlip { prob } => RandomHorizontalFlip::new(prob.raw())?.into(),
            Self::Normalize { mean, std } => {
                Normalize::new(to_f32_array(mean), to_f32_array(std))?.into()
            }
        };
        Ok(op)
    }
}

fn to_f32_array(values: [R64; 3]) -> [f32; 3] {
    values.map(|value| value.raw() as f32)
}

fn default_mode() -> String {
    "train".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_flip_prob() -> R64 {
    r64(0.5)
}

fn default_half() -> [R64; 3] {
    [r64(0.5); 3]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dataset_config() -> Result<()> {
        let text = r#"{
            dataset: {
                name: "ADE20K",
                dataset_root: "/data/ADEChallengeData2016",
                mode: "val",
                transforms: [
                    { type: "Resize", target_size: [512, 512] },
                    { type: "RandomHorizontalFlip" },
                    { type: "Normalize" },
                ],
            },
        }"#;
        let config: Config = json5::from_str(text)?;
        let dataset = &config.dataset;

        assert_eq!(dataset.name, "ADE20K");
        assert_eq!(dataset.mode, "val");
        assert!(dataset.download);
        assert!(!dataset.check_labels);
        assert_eq!(
            dataset.transforms.as_ref().unwrap()[0],
            TransformConfig::Resize {
                target_size: [512, 512]
            }
        );

        let compose = dataset.compose()?.unwrap();
        assert_eq!(compose.ops().len(), 3);
        Ok(())
    }

    #[test]
    fn defaults_without_transforms() -> Result<()> {
        let config: Config = json5::from_str(r#"{ dataset: { name: "ADE20K" } }"#)?;
        assert_eq!(config.dataset.mode, "train");
        assert!(config.dataset.dataset_root.is_none());
        assert!(config.dataset.compose()?.is_none());
        Ok(())
    }

    #[test]
    fn reject_invalid_step() {
        let conf = TransformConfig::Resize {
            target_size: [0, 10],
        };
        assert!(conf.build().is_err());
    }
}
