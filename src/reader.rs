use crate::errors::TokenizerError;
use crate::tokenizer::Tokenizer;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Specifies how an input source is fed into the [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Read the source in chunks of at most `buffer_size` bytes, writing each chunk
    /// as soon as it's read.
    #[default]
    Buffered,
    /// Read the whole source into memory, then write it at once.
    Whole,
}

/// Specifies settings for [`Tokenizer::read_from`] and [`Tokenizer::read_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadSettings {
    pub mode: ReadMode,

    /// The size of the read buffer in [`ReadMode::Buffered`] mode.
    ///
    /// ### Default
    ///
    /// `1024` bytes.
    pub buffer_size: usize,
}

impl Default for ReadSettings {
    #[inline]
    fn default() -> Self {
        ReadSettings {
            mode: ReadMode::default(),
            buffer_size: 1024,
        }
    }
}

impl Tokenizer<'_> {
    /// Tokenizes everything that can be read from `reader`, then ends the input.
    ///
    /// # Errors
    ///
    /// I/O errors are returned as [`TokenizerError::Io`]. Other errors are the same as for
    /// [`write`](Tokenizer::write).
    pub fn read_from<R: Read>(
        &mut self,
        mut reader: R,
        settings: ReadSettings,
    ) -> Result<(), TokenizerError> {
        match settings.mode {
            ReadMode::Buffered => {
                let mut buffer = vec![0; settings.buffer_size.max(1)];

                loop {
                    match reader.read(&mut buffer) {
                        Ok(0) => break,
                        Ok(read) => self.write(&buffer[..read])?,
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
            ReadMode::Whole => {
                let mut data = Vec::new();

                reader.read_to_end(&mut data)?;
                self.write(&data)?;
            }
        }

        self.end()
    }

    /// Tokenizes the file at `path`.
    ///
    /// If no file name has been configured in the [`Settings`](crate::Settings),
    /// the base name of the file is used in the error messages.
    ///
    /// # Errors
    ///
    /// The same as for [`read_from`](Tokenizer::read_from).
    pub fn read_file(
        &mut self,
        path: impl AsRef<Path>,
        settings: ReadSettings,
    ) -> Result<(), TokenizerError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        if !self.dispatcher.has_filename() {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());

            self.dispatcher.set_filename(filename);
        }

        self.read_from(file, settings)
    }
}
