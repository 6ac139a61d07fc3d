//! Dataset archive fetching.

use crate::{common::*, error::DatasetError};
use std::io::BufWriter;
use zip::ZipArchive;

/// Fetches a dataset archive and extracts it.
pub trait Fetcher
where
    Self: Debug + Send + Sync,
{
    /// Download `url` into `save_dir`, extract it into `extract_dir`, and
    /// return the path of `extract_dir/extract_name`.
    fn fetch(
        &self,
        url: &str,
        save_dir: &Path,
        extract_dir: &Path,
        extract_name: &str,
    ) -> Result<PathBuf>;
}

/// Downloads zip archives over HTTP.
///
/// Nothing is downloaded if the extracted directory exists, and the archive
/// file is reused if it was downloaded before.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(
        &self,
        url: &str,
        save_dir: &Path,
        extract_dir: &Path,
        extract_name: &str,
    ) -> Result<PathBuf> {
        let target = extract_dir.join(extract_name);
        if target.exists() {
            info!("use cached dataset at '{}'", target.display());
            return Ok(target);
        }

        let archive_name = url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                DatasetError::invalid_argument(format!("no file name in url '{}'", url))
            })?;
        let archive_path = save_dir.join(archive_name);

        if archive_path.is_file() {
            info!("use downloaded archive '{}'", archive_path.display());
        } else {
            fs::create_dir_all(save_dir)
                .with_context(|| format!("failed to create '{}'", save_dir.display()))?;
            download_file(url, &archive_path)?;
        }

        extract_archive(&archive_path, extract_dir, extract_name)
    }
}

/// Download `url` to `path` through a `.part` file renamed on completion.
pub fn download_file(url: &str, path: &Path) -> Result<()> {
    info!("downloading '{}' to '{}'", url, path.display());

    let response = ureq::get(url)
        .call()
        .with_context(|| format!("failed to download '{}'", url))?;
    ensure!(
        response.status() == 200,
        "download failed for '{}' with status {}",
        url,
        response.status()
    );

    let part_path = {
        let mut name = path.as_os_str().to_owned();
        name.push(".part");
        PathBuf::from(name)
    };
    let mut reader = response.into_reader();
    let mut writer = BufWriter::new(
        File::create(&part_path)
            .with_context(|| format!("failed to create '{}'", part_path.display()))?,
    );
    let num_bytes = io::copy(&mut reader, &mut writer)
        .with_context(|| format!("failed to write '{}'", part_path.display()))?;
    drop(writer);
    fs::rename(&part_path, path)?;

    info!("downloaded {} bytes from '{}'", num_bytes, url);
    Ok(())
}

/// Extract a zip archive into `extract_dir` and return `extract_dir/extract_name`.
///
/// If all entries share a top-level directory with a different name, that
/// directory is renamed to `extract_name`.
pub fn extract_archive(
    archive_path: &Path,
    extract_dir: &Path,
    extract_name: &str,
) -> Result<PathBuf> {
    info!(
        "extracting '{}' to '{}'",
        archive_path.display(),
        extract_dir.display()
    );

    let file = File::open(archive_path)
        .with_context(|| format!("failed to open '{}'", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("'{}' is not a zip archive", archive_path.display()))?;

    let top_dirs: Vec<PathBuf> = (0..archive.len())
        .map(|index| -> Result<_> {
            let entry = archive.by_index(index)?;
            let top = entry
                .enclosed_name()
                .and_then(|path| path.components().next())
                .map(|component| PathBuf::from(component.as_os_str()));
            Ok(top)
        })
        .filter_map(|result| result.transpose())
        .try_collect()?;

    fs::create_dir_all(extract_dir)
        .with_context(|| format!("failed to create '{}'", extract_dir.display()))?;
    archive.extract(extract_dir)?;

    let target = extract_dir.join(extract_name);
    if !target.exists() {
        if let Ok(top_dir) = top_dirs.iter().dedup().exactly_one() {
            let source = extract_dir.join(top_dir);
            if source.is_dir() {
                info!(
                    "rename '{}' to '{}'",
                    source.display(),
                    target.display()
                );
                fs::rename(&source, &target)?;
            }
        }
    }

    if !target.exists() {
        bail!(DatasetError::NotFound(target));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::{write::FileOptions, ZipWriter};

    fn write_zip(path: &Path, entries: &[&str]) -> Result<()> {
        let mut writer = ZipWriter::new(File::create(path)?);
        for name in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, FileOptions::default())?;
            } else {
                writer.start_file(*name, FileOptions::default())?;
                writer.write_all(b"content")?;
            }
        }
        writer.finish()?;
        Ok(())
    }

    #[test]
    fn extract_matching_top_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &["data/", "data/images/", "data/images/a.jpg"])?;

        let extract_dir = dir.path().join("out");
        let target = extract_archive(&archive, &extract_dir, "data")?;
        assert_eq!(target, extract_dir.join("data"));
        assert!(target.join("images").join("a.jpg").is_file());
        Ok(())
    }

    #[test]
    fn rename_differing_top_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &["release-v1/", "release-v1/a.txt"])?;

        let target = extract_archive(&archive, dir.path(), "data")?;
        assert!(target.join("a.txt").is_file());
        assert!(!dir.path().join("release-v1").exists());
        Ok(())
    }

    #[test]
    fn missing_target_after_extraction() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let archive = dir.path().join("flat.zip");
        write_zip(&archive, &["a.txt", "b.txt"])?;

        let err = extract_archive(&archive, &dir.path().join("out"), "data").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::NotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn skip_download_when_extracted() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("data"))?;

        let target = HttpFetcher.fetch(
            "http://127.0.0.1:1/data.zip",
            dir.path(),
            dir.path(),
            "data",
        )?;
        assert_eq!(target, dir.path().join("data"));
        Ok(())
    }

    #[test]
    fn reuse_downloaded_archive() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_zip(&dir.path().join("data.zip"), &["data/", "data/a.txt"])?;

        let target = HttpFetcher.fetch(
            "http://127.0.0.1:1/data.zip",
            dir.path(),
            dir.path(),
            "data",
        )?;
        assert!(target.join("a.txt").is_file());
        Ok(())
    }
}
