use super::{DataRecord, FileRecord};
use crate::{
    common::*,
    download::Fetcher,
    error::DatasetError,
    transform::Transform,
};

/// The dataset split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Train,
    Val,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DatasetError;

    /// Parse the split name case-insensitively.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_lowercase().as_str() {
            "train" => Ok(Self::Train),
            "val" => Ok(Self::Val),
            _ => Err(DatasetError::invalid_argument(format!(
                "mode should be one of ('train', 'val'), but got '{}'",
                text
            ))),
        }
    }
}

/// The construction options shared by all dataset adapters.
#[derive(Debug, Clone)]
pub struct DatasetInit {
    /// The transform pipeline. Construction fails if it is not set.
    pub transforms: Option<Arc<dyn Transform>>,
    /// The dataset directory. If not set, the archive is fetched when
    /// `download` is enabled.
    pub dataset_root: Option<PathBuf>,
    /// The split name, compared case-insensitively.
    pub mode: String,
    pub download: bool,
    /// If set, verify that every derived label file exists.
    pub check_labels: bool,
    /// The archive fetcher. It defaults to [HttpFetcher](crate::download::HttpFetcher)
    /// if not set.
    pub fetcher: Option<Arc<dyn Fetcher>>,
}

impl Default for DatasetInit {
    fn default() -> Self {
        Self {
            transforms: None,
            dataset_root: None,
            mode: Mode::Train.as_str().to_owned(),
            download: true,
            check_labels: false,
            fetcher: None,
        }
    }
}

/// The generic dataset trait.
pub trait GenericDataset
where
    Self: Debug + Send + Sync,
{
    /// The number of classes of the label space.
    fn num_classes(&self) -> usize;

    /// The label value excluded from loss and metric computation.
    fn ignore_index(&self) -> u8;

    /// The split the dataset was built for.
    fn mode(&self) -> Mode;
}

/// The dataset with a list of image and label paths.
pub trait FileDataset
where
    Self: GenericDataset,
{
    /// Get the list of records in the dataset.
    fn records(&self) -> &[FileRecord];
}

/// The dataset that can be random accessed.
pub trait RandomAccessDataset
where
    Self: GenericDataset,
{
    /// Get number of records in the dataset.
    fn num_records(&self) -> usize;

    /// Get the nth record in the dataset.
    fn nth(&self, index: usize) -> Result<DataRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode_ignoring_case() -> Result<()> {
        assert_eq!("train".parse::<Mode>()?, Mode::Train);
        assert_eq!("TRAIN".parse::<Mode>()?, Mode::Train);
        assert_eq!("Val".parse::<Mode>()?, Mode::Val);
        Ok(())
    }

    #[test]
    fn reject_unknown_mode() {
        for text in ["test", "TEST", "validation", ""] {
            let err = text.parse::<Mode>().unwrap_err();
            assert!(matches!(err, DatasetError::InvalidArgument(_)));
        }
    }
}
