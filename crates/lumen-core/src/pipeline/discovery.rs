//! File discovery and task planning for an input tree.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;
use crate::types::ImageTask;

/// Discovers image files and maps them onto a mirrored output tree.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Discover all supported image files at a path.
    ///
    /// If path is a file, returns it if supported.
    /// If path is a directory, recursively finds all supported files.
    pub fn discover(&self, path: &Path) -> Vec<PathBuf> {
        if path.is_file() {
            if self.is_supported(path) {
                return vec![path.to_path_buf()];
            }
            return vec![];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && self.is_supported(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        // Sort by path for deterministic ordering
        files.sort();
        files
    }

    /// Discover images under `input_root` and pair each with its output path
    /// under `output_root`.
    pub fn plan_tasks(&self, input_root: &Path, output_root: &Path) -> Vec<ImageTask> {
        self.discover(input_root)
            .into_iter()
            .filter_map(|input| {
                if input == input_root {
                    // A single file: mirror it by name.
                    let name = input.file_name()?;
                    return Some(ImageTask::new(input.clone(), output_root.join(name)));
                }
                let task = ImageTask::remap(&input, input_root, output_root);
                if task.is_none() {
                    tracing::warn!("Skipping {:?}: not under {:?}", input, input_root);
                }
                task
            })
            .collect()
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.PnG")));
        assert!(!discovery.is_supported(Path::new("test.webp")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("jpg")));
    }

    #[test]
    fn test_discover_recurses_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b/2.png"));
        touch(&root.join("a/1.JPG"));
        touch(&root.join("a/deeper/3.jpeg"));
        touch(&root.join("notes.txt"));

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let files = discovery.discover(root);
        assert_eq!(
            files,
            vec![
                root.join("a/1.JPG"),
                root.join("a/deeper/3.jpeg"),
                root.join("b/2.png"),
            ]
        );
    }

    #[test]
    fn test_plan_tasks_mirrors_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        touch(&input.join("apple_pie/101.jpg"));
        touch(&input.join("top.png"));

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let tasks = discovery.plan_tasks(&input, &output);
        assert_eq!(
            tasks,
            vec![
                ImageTask::new(input.join("apple_pie/101.jpg"), output.join("apple_pie/101.jpg")),
                ImageTask::new(input.join("top.png"), output.join("top.png")),
            ]
        );
    }

    #[test]
    fn test_plan_tasks_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.png");
        touch(&file);

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let tasks = discovery.plan_tasks(&file, Path::new("out"));
        assert_eq!(tasks, vec![ImageTask::new(file, "out/one.png")]);
    }

    #[test]
    fn test_empty_tree_yields_no_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = FileDiscovery::new(ProcessingConfig::default());
        assert!(discovery.plan_tasks(dir.path(), Path::new("out")).is_empty());
    }
}
