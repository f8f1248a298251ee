//! Directory layout and source selection rules.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Default data directory name, relative to the root.
pub const DATA_DIR: &str = "data";
/// Default models directory name, relative to the root.
pub const MODELS_DIR: &str = "fine_tuned_models";
/// Default output directory name, relative to the root.
pub const OUTPUT_DIR: &str = "notebooks";

/// Extensions linked from the data directory, compared case-insensitively.
pub const DATA_EXTENSIONS: &[&str] = &["csv", "json", "parquet", "tsv"];
/// Extensions linked from the models directory, compared exactly.
pub const MODEL_EXTENSIONS: &[&str] = &["pt"];

/// The directories a provisioning pass works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Root every relative directory is resolved against.
    pub root: PathBuf,
    /// Data files to link.
    pub data_dir: PathBuf,
    /// Model files to link.
    pub models_dir: PathBuf,
    /// Directory receiving one entry per eligible source file.
    pub output_dir: PathBuf,
}

impl Layout {
    /// Conventional layout under `root`.
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join(DATA_DIR),
            models_dir: root.join(MODELS_DIR),
            output_dir: root.join(OUTPUT_DIR),
            root,
        }
    }

    /// Override the data directory. Relative paths resolve against the root.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = self.root.join(dir);
        self
    }

    /// Override the models directory. Relative paths resolve against the root.
    #[must_use]
    pub fn with_models_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.models_dir = self.root.join(dir);
        self
    }

    /// Override the output directory. Relative paths resolve against the root.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = self.root.join(dir);
        self
    }

    /// The two source directories with the rule selecting their children.
    #[must_use]
    pub fn sources(&self) -> [SourceSet<'_>; 2] {
        [
            SourceSet { dir: &self.data_dir, rule: ExtensionRule::DATA },
            SourceSet { dir: &self.models_dir, rule: ExtensionRule::MODELS },
        ]
    }
}

/// A source directory and the rule that picks its eligible children.
#[derive(Debug, Clone, Copy)]
pub struct SourceSet<'a> {
    /// Directory whose direct children are considered.
    pub dir: &'a Path,
    /// Which children qualify.
    pub rule: ExtensionRule,
}

/// Allow-list of file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRule {
    extensions: &'static [&'static str],
    case_insensitive: bool,
}

impl ExtensionRule {
    /// Data files: csv, json, parquet, tsv in any case.
    pub const DATA: Self = Self { extensions: DATA_EXTENSIONS, case_insensitive: true };
    /// Model files: `.pt` only.
    pub const MODELS: Self = Self { extensions: MODEL_EXTENSIONS, case_insensitive: false };

    /// Whether `name` carries an allowed extension. Dotfiles such as
    /// `.csv` have no extension and never match.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|allowed| {
            if self.case_insensitive {
                allowed.eq_ignore_ascii_case(ext)
            } else {
                *allowed == ext
            }
        })
    }
}
