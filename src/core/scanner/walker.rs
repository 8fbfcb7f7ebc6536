//! Directory walking implementation using walkdir.

use super::{filter::FrameFilter, FrameFile};
use crate::error::ScanError;
use crate::events::{EventSender, ScanEvent};
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files
    pub include_hidden: bool,
    /// Whether to descend into subdirectories (frame dumps are normally flat)
    pub recursive: bool,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: false,
            recursive: false,
            extensions: None,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct DirectoryScanner {
    config: ScanConfig,
    filter: FrameFilter,
}

impl DirectoryScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = FrameFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    /// Scan the source directory and return frames in directory-listing order.
    ///
    /// Unlike a lenient media scanner, a failure to read the directory is
    /// fatal: a partially discovered frame sequence would silently change
    /// which duplicates are detected downstream.
    pub fn scan(&self, root: &Path) -> Result<Vec<FrameFile>, ScanError> {
        self.scan_with_events(root, &crate::events::null_sender())
    }

    /// Scan with progress reporting via events
    pub fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<Vec<FrameFile>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        events.scan(ScanEvent::Started {
            path: root.to_path_buf(),
        });

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        // Pruning hidden entries here stops walkdir from descending into
        // hidden directories, not just from yielding them
        let include_hidden = self.config.include_hidden;
        let entries = walker.into_iter().filter_entry(move |entry| {
            entry.depth() == 0
                || include_hidden
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with('.'))
        });

        let mut frames = Vec::new();

        for entry_result in entries {
            let entry = entry_result.map_err(|e| Self::walk_error(root, e))?;
            let path = entry.path();

            if entry.file_type().is_dir() || !self.filter.should_include(path) {
                continue;
            }

            let frame = FrameFile {
                path: path.to_path_buf(),
                format: self.filter.get_format(path),
            };

            events.scan(ScanEvent::FrameFound {
                path: frame.path.clone(),
            });

            frames.push(frame);
        }

        events.scan(ScanEvent::Completed {
            total_frames: frames.len(),
        });

        Ok(frames)
    }

    fn walk_error(root: &Path, e: walkdir::Error) -> ScanError {
        let path = e
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.to_path_buf());

        if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
            ScanError::PermissionDenied { path }
        } else {
            ScanError::ReadDirectory {
                path: path.clone(),
                source: e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ImageFormat;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_frame(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        // Write minimal PNG magic
        file.write_all(&[0x89, 0x50, 0x4E, 0x47]).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = DirectoryScanner::new(ScanConfig::default());

        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert!(frames.is_empty());
    }

    #[test]
    fn scan_finds_single_frame() {
        let temp_dir = TempDir::new().unwrap();
        create_test_frame(temp_dir.path(), "frame.png");

        let scanner = DirectoryScanner::new(ScanConfig::default());
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].path.ends_with("frame.png"));
        assert_eq!(frames[0].format, ImageFormat::Png);
    }

    #[test]
    fn scan_excludes_non_image_files() {
        let temp_dir = TempDir::new().unwrap();
        create_test_frame(temp_dir.path(), "frame.png");
        File::create(temp_dir.path().join("notes.txt")).unwrap();

        let scanner = DirectoryScanner::new(ScanConfig::default());
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn scan_is_flat_by_default() {
        let temp_dir = TempDir::new().unwrap();
        create_test_frame(temp_dir.path(), "root.png");

        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        create_test_frame(&subdir, "nested.png");

        let scanner = DirectoryScanner::new(ScanConfig::default());
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].path.ends_with("root.png"));
    }

    #[test]
    fn scan_can_recurse() {
        let temp_dir = TempDir::new().unwrap();
        create_test_frame(temp_dir.path(), "root.png");

        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        create_test_frame(&subdir, "nested.png");

        let config = ScanConfig {
            recursive: true,
            ..Default::default()
        };
        let scanner = DirectoryScanner::new(config);
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn recursive_scan_does_not_descend_into_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        create_test_frame(temp_dir.path(), "root.png");

        let hidden = temp_dir.path().join(".hidden");
        fs::create_dir(&hidden).unwrap();
        create_test_frame(&hidden, "buried.png");

        let config = ScanConfig {
            recursive: true,
            ..Default::default()
        };
        let scanner = DirectoryScanner::new(config);
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].path.ends_with("root.png"));

        // With hidden files included the same tree yields both frames
        let config = ScanConfig {
            recursive: true,
            include_hidden: true,
            ..Default::default()
        };
        let scanner = DirectoryScanner::new(config);
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn scan_excludes_hidden_files_by_default() {
        let temp_dir = TempDir::new().unwrap();
        create_test_frame(temp_dir.path(), "visible.png");
        create_test_frame(temp_dir.path(), ".hidden.png");

        let scanner = DirectoryScanner::new(ScanConfig::default());
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].path.ends_with("visible.png"));
    }

    #[test]
    fn scan_can_restrict_to_one_extension() {
        let temp_dir = TempDir::new().unwrap();
        create_test_frame(temp_dir.path(), "a.png");
        create_test_frame(temp_dir.path(), "b.jpg");

        let config = ScanConfig {
            extensions: Some(vec!["png".to_string()]),
            ..Default::default()
        };
        let scanner = DirectoryScanner::new(config);
        let frames = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].path.ends_with("a.png"));
    }

    #[test]
    fn scan_nonexistent_directory_is_an_error() {
        let scanner = DirectoryScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"));

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }
}
