/*!
 * Reading and formatting of file content blocks
 */

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::warn;

use crate::config::Config;
use crate::language::language_tag;
use crate::types::{ContentBlock, ReadMode, ReadOptions, RelevantPath};

/// Read a file as text, gunzipping paths that end in `.gz`
pub fn read_file_content(path: &Path, options: &ReadOptions) -> io::Result<String> {
    let file = File::open(path)?;
    let gzipped = path.to_string_lossy().to_lowercase().ends_with(".gz");
    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut reader = BufReader::new(reader);

    match options.mode {
        ReadMode::Full => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            decode(bytes, options.lossy)
        }
        ReadMode::Head(limit) => {
            let mut content = String::new();
            let mut lines = 0;
            let mut line = Vec::new();
            while lines < limit {
                line.clear();
                if reader.read_until(b'\n', &mut line)? == 0 {
                    break;
                }
                content.push_str(&decode(line.clone(), options.lossy)?);
                lines += 1;
            }

            if lines == 0 {
                content.push_str("# (File is empty or could not be read)\n");
            } else if lines < limit {
                if !content.ends_with('\n') {
                    content.push('\n');
                }
                content.push_str(&format!("# (File has only {} lines)\n", lines));
            }
            Ok(content)
        }
    }
}

fn decode(bytes: Vec<u8>, lossy: bool) -> io::Result<String> {
    if lossy {
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Turns relevant paths into content blocks
pub struct Renderer<'a> {
    config: &'a Config,
}

impl<'a> Renderer<'a> {
    /// Create a new renderer
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render `relevant`, or `None` when it is listed only
    pub fn render(&self, relevant: &RelevantPath) -> Option<ContentBlock> {
        if !relevant.has_content() {
            return None;
        }

        let (body, failed) = match read_file_content(&relevant.entry.path, &self.config.read) {
            Ok(content) => (content, false),
            Err(e) => {
                warn!("Failed to read {}: {}", relevant.relative, e);
                (format!("Error reading file: {}", e), true)
            }
        };

        Some(ContentBlock {
            relative: relevant.relative.clone(),
            language: language_tag(self.config, &relevant.entry.name),
            body,
            failed,
        })
    }
}

/// Write one self-delimited block
pub fn write_block<W: Write>(block: &ContentBlock, out: &mut W) -> io::Result<()> {
    write!(out, "// --- File: {} ---\n\n", block.relative)?;
    writeln!(out, "```{}", block.language)?;
    out.write_all(block.body.as_bytes())?;
    if !block.body.is_empty() && !block.body.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    write!(out, "```\n\n")?;
    write!(out, "// --- End File: {} ---\n\n", block.relative)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lossy_decode() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("weights.pt");
        fs::write(&path, [b'o', b'k', 0xff, 0xfe, b'\n'])?;

        let content = read_file_content(&path, &ReadOptions::default())?;
        assert_eq!(content, "ok\u{fffd}\u{fffd}\n");

        let strict = ReadOptions {
            lossy: false,
            ..ReadOptions::default()
        };
        let err = read_file_content(&path, &strict).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        Ok(())
    }

    #[test]
    fn test_gzip_is_transparent() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("job.py.gz");
        let mut encoder = GzEncoder::new(File::create(&path)?, Compression::default());
        encoder.write_all(b"print('hi')\n")?;
        encoder.finish()?;

        let content = read_file_content(&path, &ReadOptions::default())?;
        assert_eq!(content, "print('hi')\n");
        Ok(())
    }

    #[test]
    fn test_head_mode() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("a.py");
        fs::write(&path, "1\n2\n3\n4\n")?;

        let two = ReadOptions {
            mode: ReadMode::Head(2),
            ..ReadOptions::default()
        };
        assert_eq!(read_file_content(&path, &two)?, "1\n2\n");

        let ten = ReadOptions {
            mode: ReadMode::Head(10),
            ..ReadOptions::default()
        };
        assert_eq!(
            read_file_content(&path, &ten)?,
            "1\n2\n3\n4\n# (File has only 4 lines)\n"
        );

        let empty = dir.path().join("empty.py");
        fs::write(&empty, "")?;
        assert_eq!(
            read_file_content(&empty, &ten)?,
            "# (File is empty or could not be read)\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_block_terminates_content() -> io::Result<()> {
        let block = ContentBlock {
            relative: "src/a.py".to_string(),
            language: "python".to_string(),
            body: "x = 1".to_string(),
            failed: false,
        };
        let mut out = Vec::new();
        write_block(&block, &mut out)?;

        assert_eq!(
            String::from_utf8_lossy(&out),
            "// --- File: src/a.py ---\n\n```python\nx = 1\n```\n\n// --- End File: src/a.py ---\n\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_block_empty_body() -> io::Result<()> {
        let block = ContentBlock {
            relative: "empty.json".to_string(),
            language: "json".to_string(),
            body: String::new(),
            failed: false,
        };
        let mut out = Vec::new();
        write_block(&block, &mut out)?;

        assert_eq!(
            String::from_utf8_lossy(&out),
            "// --- File: empty.json ---\n\n```json\n```\n\n// --- End File: empty.json ---\n\n"
        );
        Ok(())
    }
}
