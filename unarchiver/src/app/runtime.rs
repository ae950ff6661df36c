/*!
 Contains the logic that ties the decode pass to the command line options.
*/

use std::{
    fs::File,
    io::{BufWriter, Write},
};

use keyed_archive::archive::{models::Archive, resolver::Unarchiver};

use crate::{
    app::{error::RuntimeError, options::Options},
    exporters::json::as_json,
};

/// Data that is setup from the application's runtime
pub struct Config {
    /// The options the app was launched with
    pub options: Options,
}

impl Config {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Decode the archive and emit it as indented JSON
    pub fn start(&self) -> Result<(), RuntimeError> {
        let archive =
            Archive::from_file(&self.options.archive_path).map_err(RuntimeError::ArchiveError)?;

        let mut unarchiver = Unarchiver::new(&archive);
        let parsed = unarchiver.parse().map_err(RuntimeError::ArchiveError)?;

        let text = json::stringify_pretty(as_json(parsed), 4);

        match &self.options.to_file {
            Some(path) => {
                let file =
                    File::create(path).map_err(|why| RuntimeError::DiskError(why, path.clone()))?;
                let mut writer = BufWriter::new(file);
                writer
                    .write_all(text.as_bytes())
                    .map_err(|why| RuntimeError::DiskError(why, path.clone()))?;
                writer
                    .flush()
                    .map_err(|why| RuntimeError::DiskError(why, path.clone()))?;
            }
            None => println!("{text}"),
        }

        Ok(())
    }
}
