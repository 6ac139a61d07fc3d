//! Environment-derived locations.

use crate::common::*;

/// The environment variable that overrides the cache home.
pub const SEG_HOME_VAR: &str = "SEG_HOME";

/// The cache home, `$SEG_HOME` or `.seg-dl` under the user's home directory.
pub fn seg_home() -> Result<PathBuf> {
    match env::var(SEG_HOME_VAR) {
        Ok(dir) => Ok(PathBuf::from(dir)),
        Err(VarError::NotPresent) => {
            let home = dirs::home_dir().with_context(|| {
                format!("{} is not set and the home directory is unknown", SEG_HOME_VAR)
            })?;
            Ok(home.join(".seg-dl"))
        }
        Err(err) => Err(err).with_context(|| format!("invalid {} value", SEG_HOME_VAR)),
    }
}

/// The directory where datasets are downloaded and extracted.
pub fn data_home() -> Result<PathBuf> {
    Ok(seg_home()?.join("dataset"))
}
