use anyhow::Result;
use image::{GrayImage, Luma, RgbImage};
use seg_dl::{config::Config, error::DatasetError};
use std::{
    fs,
    path::{Path, PathBuf},
};

lazy_static::lazy_static! {
    static ref CONFIG_FILE: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cfg")
        .join("ade20k.json5");
}

#[test]
fn load_config_file() -> Result<()> {
    let config = Config::open(&*CONFIG_FILE)?;
    assert_eq!(config.dataset.name, "ADE20K");
    assert_eq!(config.dataset.mode, "val");
    assert!(!config.dataset.download);
    assert_eq!(config.dataset.compose()?.unwrap().ops().len(), 3);
    Ok(())
}

#[test]
fn build_from_config_with_missing_root() -> Result<()> {
    let config = Config::open(&*CONFIG_FILE)?;
    let err = config.dataset.build().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::NotFound(_))
    ));
    Ok(())
}

#[test]
fn build_from_config() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let image_dir = dir.path().join("images").join("validation");
    let label_dir = dir.path().join("annotations").join("validation");
    fs::create_dir_all(&image_dir)?;
    fs::create_dir_all(&label_dir)?;
    RgbImage::new(4, 3).save(image_dir.join("x.jpg"))?;
    GrayImage::from_pixel(4, 3, Luma([1])).save(label_dir.join("x.png"))?;

    let mut config = Config::open(&*CONFIG_FILE)?;
    config.dataset.dataset_root = Some(dir.path().to_owned());
    let dataset = config.dataset.build()?;

    assert_eq!(dataset.num_records(), 1);
    let record = dataset.nth(0)?;
    assert_eq!(record.image_shape(), &[1, 3, 8, 8]);
    assert_eq!(record.label_shape(), &[1, 1, 3, 4]);
    assert!(record.label_values().all(|value| value == 0));
    Ok(())
}

#[test]
fn build_without_transforms() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = Config::open(&*CONFIG_FILE)?;
    config.dataset.dataset_root = Some(dir.path().to_owned());
    config.dataset.transforms = None;

    let err = config.dataset.build().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::InvalidArgument(_))
    ));
    Ok(())
}
