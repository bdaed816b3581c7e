use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};
use thiserror::Error;
use tracing::warn;
use zip::{ZipArchive, read::ZipFile};

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Csv file {file} is missing header {column}")]
    MissingHeader { file: String, column: String },
    #[error("Csv file {file} has unknown header {column}")]
    UnknownHeader { file: String, column: String },
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Route references unknown bus: {0}")]
    UnknownBus(String),
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Streams roster tables out of CSV files.
#[derive(Default)]
pub struct Source {
    config: Config,
    storage: StorageType,
}

impl Source {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Zip(path);
        self
    }

    pub fn from_directory(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Directory(path);
        self
    }

    pub fn stream_buses<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SourceBus)),
    {
        self.stream(&self.config.buses_file_name, f)
    }

    pub fn stream_bus_routes<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SourceBusRoute)),
    {
        self.stream(&self.config.bus_routes_file_name, f)
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SourceStop)),
    {
        self.stream(&self.config.stops_file_name, f)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned + Table,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                let zip_file = File::open(path)?;
                let mut archive = ZipArchive::new(zip_file)?;
                let file = get_file(&mut archive, file_name)?;
                stream_csv(file, file_name, f)
            }
            StorageType::Directory(path) => {
                let path = path.join(file_name);
                if !path.exists() {
                    return Err(self::Error::FileNotFound(file_name.to_string()));
                }
                stream_csv(File::open(path)?, file_name, f)
            }
        }
    }
}

/// Rows that fail to parse are logged and skipped, a bad header fails the
/// whole file.
fn stream_csv<R, T, F>(reader: R, file_name: &str, f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned + Table,
    F: FnMut((usize, T)),
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    check_headers::<T>(reader.headers()?, file_name)?;
    reader
        .deserialize()
        .enumerate()
        .filter_map(|(line, row)| match row {
            Ok(row) => Some(row),
            Err(err) => {
                warn!("Skipping row {} in {file_name}: {err}", line + 1);
                None
            }
        })
        .enumerate()
        .for_each(f);
    Ok(())
}

fn check_headers<T: Table>(headers: &csv::StringRecord, file_name: &str) -> Result<(), self::Error> {
    if let Some(column) = T::REQUIRED
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(self::Error::MissingHeader {
            file: file_name.to_string(),
            column: column.to_string(),
        });
    }
    if let Some(column) = headers.iter().find(|header| !T::COLUMNS.contains(header)) {
        return Err(self::Error::UnknownHeader {
            file: file_name.to_string(),
            column: column.to_string(),
        });
    }
    Ok(())
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
