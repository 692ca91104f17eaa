use crate::Result;
use crate::store::GroupTable;
use core::fmt::Debug;
use ohno::IntoAppError;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     store";

/// Durable storage for group tables
pub trait TablePersistence: Debug + Send + Sync {
    /// Read the stored table for a group
    ///
    /// Returns `Ok(None)` when nothing has been stored for the group yet, and an error when stored data
    /// exists but cannot be read or parsed.
    fn load_table(&self, group_id: &str) -> Result<Option<GroupTable>>;

    /// Replace the stored table for a group
    fn save_table(&self, group_id: &str, table: &GroupTable) -> Result<()>;
}

/// One pretty-printed JSON file per group in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a group's file
    #[must_use]
    pub fn table_path(&self, group_id: &str) -> PathBuf {
        self.dir.join(file_name_for_group(group_id))
    }
}

impl TablePersistence for JsonFileStore {
    fn load_table(&self, group_id: &str) -> Result<Option<GroupTable>> {
        let path = self.table_path(group_id);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(target: LOG_TARGET, "No ranking file for group {group_id} at '{}'", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("opening ranking file '{}'", path.display())),
        };

        let table = serde_json::from_reader(BufReader::new(file))
            .into_app_err_with(|| format!("parsing ranking file '{}'", path.display()))?;
        Ok(Some(table))
    }

    fn save_table(&self, group_id: &str, table: &GroupTable) -> Result<()> {
        let path = self.table_path(group_id);
        let tmp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).into_app_err_with(|| format!("creating ranking directory '{}'", self.dir.display()))?;

        let file = File::create(&tmp_path).into_app_err_with(|| format!("creating ranking file '{}'", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, table)
            .into_app_err_with(|| format!("writing ranking file '{}'", tmp_path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing ranking file '{}'", tmp_path.display()))?;
        drop(writer);

        fs::rename(&tmp_path, &path)
            .into_app_err_with(|| format!("replacing ranking file '{}' with '{}'", path.display(), tmp_path.display()))?;

        log::trace!(target: LOG_TARGET, "Wrote {} user(s) for group {group_id} to '{}'", table.len(), path.display());
        Ok(())
    }
}

/// File name for a group's table
///
/// Path separators, characters that are not portable in file names, control characters and `%` itself
/// are percent-encoded, so distinct group ids always get distinct files.
fn file_name_for_group(group_id: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut name = String::with_capacity(group_id.len() + 5);
    for c in group_id.chars() {
        if matches!(c, '%' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_ascii_control() {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                name.push('%');
                name.push(char::from(HEX[usize::from(byte >> 4)]));
                name.push(char::from(HEX[usize::from(byte & 0x0F)]));
            }
        } else {
            name.push(c);
        }
    }

    name.push_str(".json");
    name
}
