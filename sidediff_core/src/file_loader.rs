use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::{Serialize, Serializer};
use sidediff_common::SideDiffError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Text encoding detected for a loaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    pub encoding: &'static Encoding,
    /// The file started with a byte order mark
    pub bom: bool,
    /// Undecodable bytes were replaced with U+FFFD
    pub lossy: bool,
}

impl TextEncoding {
    pub fn utf8() -> Self {
        Self {
            encoding: UTF_8,
            bom: false,
            lossy: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encoding name for display, e.g. `UTF-8`, `windows-1252`, `UTF-8 (lossy)`.
    pub fn label(&self) -> String {
        if self.lossy {
            format!("{} (lossy)", self.name())
        } else {
            self.name().to_string()
        }
    }
}

impl Serialize for TextEncoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// A text file decoded and ready to diff
#[derive(Debug, Clone, Serialize)]
pub struct LoadedText {
    pub path: PathBuf,
    pub content: String,
    pub encoding: TextEncoding,
}

/// Read a file and decode it to text.
///
/// With `normalize_line_endings`, `\r\n` and lone `\r` become `\n`.
pub fn load_text(path: &Path, normalize_line_endings: bool) -> Result<LoadedText, SideDiffError> {
    if path.is_dir() {
        return Err(SideDiffError::Path(format!(
            "Expected a file but found a directory: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path)?;
    let (mut content, encoding) = decode_bytes(&bytes)?;

    if encoding.lossy {
        warn!("{} could not be decoded cleanly, invalid bytes were replaced", path.display());
    }
    if normalize_line_endings {
        content = normalize_newlines(&content);
    }

    info!(
        "Loaded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        encoding.label()
    );

    Ok(LoadedText {
        path: path.to_path_buf(),
        content,
        encoding,
    })
}

/// Decode raw bytes to text.
///
/// A byte order mark wins. Otherwise valid UTF-8 is taken as is, and
/// anything else goes through statistical detection. Lossy UTF-8 is the
/// last resort when the detected encoding cannot decode the bytes either.
pub fn decode_bytes(bytes: &[u8]) -> Result<(String, TextEncoding), SideDiffError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let text = encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .ok_or_else(|| {
                SideDiffError::Decode(format!("malformed {} data after byte order mark", encoding.name()))
            })?;
        let detected = TextEncoding {
            encoding,
            bom: true,
            lossy: false,
        };
        return Ok((text.into_owned(), detected));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((text.to_owned(), TextEncoding::utf8()));
    }

    let encoding = detect_encoding(bytes);
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if !had_errors {
        let detected = TextEncoding {
            encoding,
            bom: false,
            lossy: false,
        };
        return Ok((text.into_owned(), detected));
    }

    let detected = TextEncoding {
        encoding: UTF_8,
        bom: false,
        lossy: true,
    };
    Ok((String::from_utf8_lossy(bytes).into_owned(), detected))
}

fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, false);
    debug!("Detected legacy encoding {}", encoding.name());
    encoding
}

/// Convert CRLF and lone CR line endings to LF.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
