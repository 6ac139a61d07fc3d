pub use anyhow::{bail, ensure, format_err, Context as _, Result};
pub use image::{
    imageops::{self, FilterType},
    DynamicImage, GrayImage, ImageFormat,
};
pub use indexmap::IndexMap;
pub use itertools::Itertools as _;
pub use log::{debug, info, warn};
pub use ndarray::{s, Array1, Array2, Array3, Array4, Axis};
pub use noisy_float::prelude::*;
pub use once_cell::sync::OnceCell;
pub use rand::prelude::*;
pub use serde::{Deserialize, Serialize};
pub use std::{
    env::{self, VarError},
    fmt,
    fmt::Debug,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, RwLock},
};
