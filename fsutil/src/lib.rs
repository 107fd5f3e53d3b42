use serde::{de::DeserializeOwned, Serialize};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("{0} (from='{1}', to='{2}'): {3}")]
        FromToIO(Msg, PathBuf, PathBuf, #[source] io::Error),

        #[error("Cannot serialize to JSON (dest='{0}'): {1}")]
        SerializeToJson(PathBuf, #[source] serde_json::Error),

        #[error("Cannot deserialize from JSON (src='{0}'): {1}")]
        DeserializeFromJson(PathBuf, #[source] serde_json::Error),
    }

    impl Error {
        /// True when the underlying IO error says the file does not exist.
        pub fn is_not_found(&self) -> bool {
            match self {
                Error::SingleIO(_, _, e) | Error::FromToIO(_, _, _, e) => {
                    e.kind() == io::ErrorKind::NotFound
                }
                _ => false,
            }
        }
    }
}
pub use error::{Error, Result};

pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

/// Writes `contents` to a sibling temp file and renames it over `filepath`,
/// so readers never observe a half-written file.
pub fn write_atomic_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    let filepath = filepath.as_ref();
    let tmp = self::tmp_sibling(filepath);
    self::write_with_mkdir(&tmp, contents)?;
    fs::rename(&tmp, filepath).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::FromToIO("Cannot rename file", tmp.clone(), filepath.to_owned(), e)
    })
}

fn tmp_sibling(filepath: &Path) -> PathBuf {
    let mut name = filepath
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("unnamed"));
    name.push(".tmp");
    filepath.with_file_name(name)
}

pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

pub fn write_json_pretty_atomic<P, T>(filepath: P, data: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let s = serde_json::to_string_pretty(data)
        .map_err(|e| Error::SerializeToJson(filepath.as_ref().to_owned(), e))?;
    write_atomic_with_mkdir(filepath, s)
}

pub fn read_json_with_deserialize<P, T>(filepath: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let filepath = filepath.as_ref();
    let f = File::open(filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.to_owned(), e))?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| Error::DeserializeFromJson(filepath.to_owned(), e))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Data {
        ids: Vec<String>,
    }

    #[test]
    fn json_is_written_atomically_into_new_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/data.json");
        let data = Data {
            ids: vec!["hello".to_owned()],
        };

        write_json_pretty_atomic(&path, &data).unwrap();

        let loaded: Data = read_json_with_deserialize(&path).unwrap();
        assert_eq!(loaded, data);
        assert!(!tmp_sibling(&path).exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_to_string(tmp.path().join("nope.txt")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn broken_json_is_deserialize_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        write(&path, "{ not json").unwrap();

        let res: Result<Data> = read_json_with_deserialize(&path);
        assert!(matches!(res, Err(Error::DeserializeFromJson(..))));
    }
}
