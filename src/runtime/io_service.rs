use std::path::Path;

use ndarray::Array2;

use crate::formats::{read_volume, write_slice};
use crate::model::Volume;

use super::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct IoService;

impl IoService {
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Volume> {
        Ok(read_volume(path)?)
    }

    pub fn write_slice(&self, path: impl AsRef<Path>, slice: &Array2<f32>) -> Result<()> {
        write_slice(path, slice)?;
        Ok(())
    }
}
