use super::*;
use crate::{
    common::*,
    download::{Fetcher, HttpFetcher},
    env::data_home,
    error::DatasetError,
    transform::{Transform, Transformed},
};

/// The source archive of the ADE20K scene parsing benchmark.
pub const ADE20K_URL: &str =
    "http://data.csail.mit.edu/places/ADEchallenge/ADEChallengeData2016.zip";
/// The directory name of the extracted archive.
pub const ADE20K_DIR_NAME: &str = "ADEChallengeData2016";
pub const ADE20K_NUM_CLASSES: usize = 150;
pub const ADE20K_IGNORE_INDEX: u8 = 255;

/// The ADE20K dataset `http://sceneparsing.csail.mit.edu/`.
///
/// Images are listed from `images/{training,validation}` and each label is
/// `annotations/{training,validation}/<name>.png` for image `<name>.jpg`.
/// Records keep the order of the directory listing.
#[derive(Debug, Clone)]
pub struct Ade20k {
    dataset_root: PathBuf,
    mode: Mode,
    transforms: Arc<dyn Transform>,
    records: Vec<FileRecord>,
}

impl Ade20k {
    pub fn new(init: DatasetInit) -> Result<Self> {
        let DatasetInit {
            transforms,
            dataset_root,
            mode,
            download,
            check_labels,
            fetcher,
        } = init;

        let mode: Mode = mode.parse()?;
        let transforms = transforms.ok_or_else(|| {
            DatasetError::invalid_argument("transforms is necessary, but it is not set")
        })?;

        let dataset_root = match dataset_root {
            Some(dataset_root) => {
                if !dataset_root.exists() {
                    bail!(DatasetError::NotFound(dataset_root));
                }
                dataset_root
            }
            None => {
                if !download {
                    bail!(DatasetError::invalid_argument(
                        "dataset_root not set and auto download disabled"
                    ));
                }
                let fetcher: Arc<dyn Fetcher> =
                    fetcher.unwrap_or_else(|| Arc::new(HttpFetcher));
                let data_home = data_home()?;
                fetcher.fetch(ADE20K_URL, &data_home, &data_home, ADE20K_DIR_NAME)?
            }
        };

        let (image_dir, label_dir) = {
            let split = match mode {
                Mode::Train => "training",
                Mode::Val => "validation",
            };
            (
                dataset_root.join("images").join(split),
                dataset_root.join("annotations").join(split),
            )
        };

        let records: Vec<_> = list_dir(&image_dir)?
            .into_iter()
            .map(|image_name| {
                let label_name = label_file_name(&image_name);
                FileRecord {
                    image_path: image_dir.join(image_name),
                    label_path: label_dir.join(label_name),
                }
            })
            .collect();

        if check_labels {
            records.iter().try_for_each(|record| -> Result<_> {
                if !record.label_path.is_file() {
                    bail!(DatasetError::NotFound(record.label_path.clone()));
                }
                Ok(())
            })?;
        }

        info!(
            "loaded {} ADE20K {} records from '{}'",
            records.len(),
            mode,
            dataset_root.display()
        );

        Ok(Self {
            dataset_root,
            mode,
            transforms,
            records,
        })
    }

    pub fn dataset_root(&self) -> &Path {
        &self.dataset_root
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load the sample at `index`.
    ///
    /// In train mode the pipeline receives both paths and the returned label
    /// is shifted. In val mode only the image goes through the pipeline; the
    /// label is decoded at its source resolution, shifted, and both arrays get
    /// leading batch axes.
    pub fn get(&self, index: usize) -> Result<DataRecord> {
        let FileRecord {
            image_path,
            label_path,
        } = self
            .records
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })?;

        match self.mode {
            Mode::Val => {
                let Transformed { image, info, .. } = self.transforms.transform(image_path, None)?;
                let image = image.insert_axis(Axis(0));
                let label = shift_label(load_label(label_path)?)
                    .insert_axis(Axis(0))
                    .insert_axis(Axis(0));
                Ok(DataRecord::Val { image, info, label })
            }
            Mode::Train => {
                let Transformed { image, label, .. } = self
                    .transforms
                    .transform(image_path, Some(label_path.as_path()))?;
                let label = label.ok_or_else(|| {
                    format_err!(
                        "the transform pipeline returned no label for '{}'",
                        label_path.display()
                    )
                })?;
                Ok(DataRecord::Train {
                    image,
                    label: shift_label(label),
                })
            }
        }
    }
}

impl GenericDataset for Ade20k {
    fn num_classes(&self) -> usize {
        ADE20K_NUM_CLASSES
    }

    fn ignore_index(&self) -> u8 {
        ADE20K_IGNORE_INDEX
    }

    fn mode(&self) -> Mode {
        self.mode
    }
}

impl FileDataset for Ade20k {
    fn records(&self) -> &[FileRecord] {
        &self.records
    }
}

impl RandomAccessDataset for Ade20k {
    fn num_records(&self) -> usize {
        self.len()
    }

    fn nth(&self, index: usize) -> Result<DataRecord> {
        self.get(index)
    }
}
