#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use plugin_modelgen::{ArtifactKind, GeneratorConfig, ParameterModel};
use tempfile::{TempDir, tempdir};

const FIXTURE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/plugin");

/// A throwaway copy of the fixture plugin project.
pub struct TestWorkspace {
    _tempdir: TempDir,
    root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let tempdir = tempdir().expect("tempdir");
        let root = tempdir.path().to_path_buf();
        copy_tree(Path::new(FIXTURE_ROOT), &root);
        Self {
            _tempdir: tempdir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            root: self.root.clone(),
            ..GeneratorConfig::default()
        }
    }

    pub fn read(&self, kind: ArtifactKind) -> String {
        fs::read_to_string(self.config().artifact_path(kind)).expect("read artifact")
    }

    pub fn write(&self, kind: ArtifactKind, content: &str) {
        fs::write(self.config().artifact_path(kind), content).expect("write artifact");
    }

    pub fn snapshot(&self) -> Vec<String> {
        all_kinds().into_iter().map(|kind| self.read(kind)).collect()
    }
}

pub fn all_kinds() -> Vec<ArtifactKind> {
    vec![
        ArtifactKind::ParamIds,
        ArtifactKind::Header,
        ArtifactKind::Processor,
        ArtifactKind::Controller,
        ArtifactKind::UiDescriptor,
    ]
}

/// Interior lines of the first `start ... end` region, markers excluded.
pub fn region_body<'a>(content: &'a str, start: &str, end: &str) -> &'a str {
    let from = content.find(start).expect("start marker") + start.len();
    let to = from + content[from..].find(end).expect("end marker");
    &content[from..to]
}

/// Everything outside the first `start ... end` region.
pub fn outside_region(content: &str, start: &str, end: &str) -> (String, String) {
    let from = content.find(start).expect("start marker");
    let to = from + content[from..].find(end).expect("end marker") + end.len();
    (content[..from].to_string(), content[to..].to_string())
}

pub fn toml_model(source: &str) -> ParameterModel {
    ParameterModel::from_toml_str(source).expect("model toml")
}

fn copy_tree(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("create dir");
    for entry in fs::read_dir(from).expect("read fixture dir") {
        let entry = entry.expect("dir entry");
        let target = to.join(entry.file_name());
        if entry.file_type().expect("file type").is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("copy fixture");
        }
    }
}
