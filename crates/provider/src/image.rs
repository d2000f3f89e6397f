//! Binary image payloads.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Binary payload stored under an image key.
///
/// Payloads are opened as byte streams when a tree is consumed. In-memory
/// bytes and files can be opened repeatedly; a stream handed over with
/// [`Image::from_reader`] can be read exactly once.
pub struct Image {
    source: ImageSource,
}

enum ImageSource {
    Bytes(Vec<u8>),
    File(PathBuf),
    Stream(Mutex<Option<Box<dyn Read + Send>>>),
}

impl Image {
    /// An image held in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: ImageSource::Bytes(bytes.into()),
        }
    }

    /// An image read from `path` each time it is opened.
    ///
    /// The file is not touched until [`open`](Self::open) is called.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ImageSource::File(path.into()),
        }
    }

    /// An image backed by a stream that can only be consumed once.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            source: ImageSource::Stream(Mutex::new(Some(Box::new(reader)))),
        }
    }

    /// The backing file, for images created with [`from_path`](Self::from_path).
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ImageSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Opens the payload as a byte stream.
    ///
    /// Fails if the backing file cannot be opened, or if a one-shot stream has
    /// already been taken.
    pub fn open(&self) -> io::Result<Box<dyn Read + Send + '_>> {
        match &self.source {
            ImageSource::Bytes(bytes) => Ok(Box::new(bytes.as_slice())),
            ImageSource::File(path) => Ok(Box::new(File::open(path)?)),
            ImageSource::Stream(stream) => match stream.lock().take() {
                Some(reader) => Ok(reader),
                None => Err(io::Error::other("image stream already consumed")),
            },
        }
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ImageSource::Bytes(bytes) => f.debug_tuple("Image::Bytes").field(&bytes.len()).finish(),
            ImageSource::File(path) => f.debug_tuple("Image::File").field(path).finish(),
            ImageSource::Stream(stream) => f
                .debug_tuple("Image::Stream")
                .field(&if stream.lock().is_some() { "pending" } else { "consumed" })
                .finish(),
        }
    }
}

impl From<Vec<u8>> for Image {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&[u8]> for Image {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}
