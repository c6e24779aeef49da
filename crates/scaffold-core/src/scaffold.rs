//! Project materialization from a completed selection

use crate::error::{Result, ScaffoldError};
use crate::flow::Selection;
use crate::product::{ProductConfig, RenameRule};
use crate::runtime::package_manager::{PackageManager, DEFAULT_PACKAGE_MANAGER};
use crate::templates::copier::{copy_entry, empty_dir};
use crate::templates::manifest::rename_manifest;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Prefix of every template directory under the templates root
pub const TEMPLATE_DIR_PREFIX: &str = "template-";

/// What was written by [`ScaffoldEngine::scaffold`]
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub template_dir: PathBuf,
    /// Top-level entries written, after renaming, manifest last
    pub entries: Vec<String>,
}

pub struct ScaffoldEngine {
    templates_root: PathBuf,
    cwd: PathBuf,
    manifest_file: &'static str,
    rename_rules: &'static [RenameRule],
}

impl ScaffoldEngine {
    pub fn from_config<C: ProductConfig>(config: &C, templates_root: PathBuf, cwd: PathBuf) -> Self {
        Self {
            templates_root,
            cwd,
            manifest_file: config.manifest_file(),
            rename_rules: config.rename_rules(),
        }
    }

    /// Destination directory for `selection`
    pub fn project_root(&self, selection: &Selection) -> PathBuf {
        normalize(&self.cwd.join(&selection.target_dir))
    }

    /// Directory holding the template named `id`
    pub fn template_dir(&self, id: &str) -> Result<PathBuf> {
        let path = self
            .templates_root
            .join(format!("{}{}", TEMPLATE_DIR_PREFIX, id));
        if path.is_dir() {
            Ok(path)
        } else {
            Err(ScaffoldError::TemplateNotFound {
                id: id.to_string(),
                path,
            })
        }
    }

    fn destination_name<'n>(&self, name: &'n OsStr) -> &'n OsStr {
        self.rename_rules
            .iter()
            .find(|(from, _)| OsStr::new(from) == name)
            .map(|(_, to)| OsStr::new(*to))
            .unwrap_or(name)
    }

    /// Write the project described by `selection`.
    ///
    /// Nothing is rolled back if a filesystem operation fails midway.
    pub fn scaffold(&self, selection: &Selection) -> Result<ScaffoldReport> {
        let root = self.project_root(selection);
        let template_dir = self.template_dir(&selection.template)?;
        debug!(root = %root.display(), template_dir = %template_dir.display(), "scaffolding");

        if selection.overwrite {
            empty_dir(&root)?;
        } else if !root.exists() {
            fs::create_dir_all(&root).map_err(ScaffoldError::io(format!(
                "Failed to create directory: {}",
                root.display()
            )))?;
        }

        let mut names: Vec<OsString> = Vec::new();
        for entry in fs::read_dir(&template_dir).map_err(ScaffoldError::io(format!(
            "Failed to read directory: {}",
            template_dir.display()
        )))? {
            let entry = entry.map_err(ScaffoldError::io(format!(
                "Failed to read directory: {}",
                template_dir.display()
            )))?;
            names.push(entry.file_name());
        }
        names.sort();

        let mut entries = Vec::new();
        let manifest_name = OsStr::new(self.manifest_file);
        for name in names.iter().filter(|name| name.as_os_str() != manifest_name) {
            let dest_name = self.destination_name(name);
            debug!(?name, dest = ?dest_name, "copying template entry");
            copy_entry(&template_dir.join(name), &root.join(dest_name))?;
            entries.push(dest_name.to_string_lossy().into_owned());
        }

        // Manifest goes last so an interrupted copy never leaves only a manifest
        let manifest_path = template_dir.join(self.manifest_file);
        let manifest = rename_manifest(&manifest_path, selection.manifest_name())?;
        let dest = root.join(self.manifest_file);
        fs::write(&dest, manifest)
            .map_err(ScaffoldError::io(format!("Failed to write file: {}", dest.display())))?;
        entries.push(self.manifest_file.to_string());

        Ok(ScaffoldReport {
            root,
            template_dir,
            entries,
        })
    }
}

/// Follow-up commands shown after scaffolding
pub fn next_steps(cwd: &Path, root: &Path, manager: Option<&PackageManager>) -> Vec<String> {
    let mut steps = Vec::new();

    let relative = relative_path(cwd, root);
    if !relative.as_os_str().is_empty() {
        steps.push(format!("cd {}", relative.display()));
    }

    let name = manager.map_or(DEFAULT_PACKAGE_MANAGER, |pm| pm.name.as_str());
    steps.extend(PackageManager::run_commands(name));
    steps
}

/// Path that leads from `from` to `to`, e.g. `../sibling`
///
/// Both paths are resolved lexically first. An empty path means they are the
/// same directory.
fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);
    let mut from_rest = from.components().peekable();
    let mut to_rest = to.components().peekable();

    loop {
        match (from_rest.peek(), to_rest.peek()) {
            (Some(a), Some(b)) if a == b => {}
            _ => break,
        }
        from_rest.next();
        to_rest.next();
    }

    from_rest
        .map(|_| Component::ParentDir)
        .chain(to_rest)
        .collect()
}

/// Lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::catalog::TemplateCatalog;
    use tempfile::TempDir;

    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test"
        }

        fn display_name(&self) -> &'static str {
            "Test"
        }

        fn default_project_name(&self) -> &'static str {
            "vite-project"
        }

        fn templates_dir_env(&self) -> &'static str {
            "SCAFFOLD_CORE_TEST_TEMPLATES_UNSET"
        }

        fn default_templates_dir(&self) -> PathBuf {
            PathBuf::from("templates")
        }

        fn catalog(&self) -> TemplateCatalog {
            TemplateCatalog::new(Vec::new())
        }
    }

    fn selection(target_dir: &str, overwrite: bool, package_name: Option<&str>) -> Selection {
        Selection {
            target_dir: target_dir.to_string(),
            overwrite,
            package_name: package_name.map(str::to_string),
            project_name: target_dir.to_string(),
            template: "demo".to_string(),
        }
    }

    fn write_template(templates: &Path) {
        let dir = templates.join("template-demo");
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("index.html"), "<div id=\"app\"></div>").unwrap();
        fs::write(dir.join("_gitignore"), "node_modules\n").unwrap();
        fs::write(dir.join("src/main.js"), "import './style.css'").unwrap();
        fs::write(dir.join("src/_gitignore"), "nested").unwrap();
        fs::write(
            dir.join("package.json"),
            "{\"name\":\"vite-demo\",\"private\":true,\"version\":\"0.0.0\"}",
        )
        .unwrap();
    }

    fn engine(templates: &Path, cwd: &Path) -> ScaffoldEngine {
        ScaffoldEngine::from_config(&TestConfig, templates.to_path_buf(), cwd.to_path_buf())
    }

    #[test]
    fn test_scaffold_copies_renames_and_rewrites_manifest() {
        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        write_template(templates.path());

        let report = engine(templates.path(), cwd.path())
            .scaffold(&selection("my-app", false, None))
            .unwrap();

        let root = cwd.path().join("my-app");
        assert_eq!(report.root, root);
        assert_eq!(
            report.entries,
            vec![".gitignore", "index.html", "src", "package.json"]
        );
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            "node_modules\n"
        );
        assert!(!root.join("_gitignore").exists());
        // Only top-level entries are renamed
        assert!(root.join("src/_gitignore").exists());
        assert_eq!(
            fs::read_to_string(root.join("package.json")).unwrap(),
            "{\n  \"name\": \"my-app\",\n  \"private\": true,\n  \"version\": \"0.0.0\"\n}"
        );
    }

    #[test]
    fn test_scaffold_prefers_package_name() {
        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        write_template(templates.path());

        engine(templates.path(), cwd.path())
            .scaffold(&selection("My App", false, Some("my-app")))
            .unwrap();

        let manifest = fs::read_to_string(cwd.path().join("My App/package.json")).unwrap();
        assert!(manifest.contains("\"name\": \"my-app\""));
    }

    #[test]
    fn test_scaffold_overwrite_empties_destination() {
        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        write_template(templates.path());
        fs::create_dir_all(cwd.path().join("my-app/old")).unwrap();
        fs::write(cwd.path().join("my-app/stale.txt"), "stale").unwrap();

        engine(templates.path(), cwd.path())
            .scaffold(&selection("my-app", true, None))
            .unwrap();

        assert!(!cwd.path().join("my-app/stale.txt").exists());
        assert!(!cwd.path().join("my-app/old").exists());
        assert!(cwd.path().join("my-app/index.html").exists());
    }

    #[test]
    fn test_scaffold_keeps_unrelated_files_without_overwrite() {
        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        write_template(templates.path());
        fs::create_dir_all(cwd.path().join("my-app/.git")).unwrap();

        engine(templates.path(), cwd.path())
            .scaffold(&selection("my-app", false, None))
            .unwrap();

        assert!(cwd.path().join("my-app/.git").is_dir());
    }

    #[test]
    fn test_missing_template_is_configuration_error() {
        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        let mut sel = selection("my-app", false, None);
        sel.template = "nope".to_string();
        let err = engine(templates.path(), cwd.path())
            .scaffold(&sel)
            .unwrap_err();

        match err {
            ScaffoldError::TemplateNotFound { id, .. } => assert_eq!(id, "nope"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!cwd.path().join("my-app").exists());
    }

    #[test]
    fn test_current_dir_target_resolves_to_cwd() {
        let cwd = TempDir::new().unwrap();
        let engine = engine(Path::new("templates"), cwd.path());
        assert_eq!(
            engine.project_root(&selection(".", false, None)),
            cwd.path().to_path_buf()
        );
    }

    #[test]
    fn test_next_steps_default_manager() {
        let steps = next_steps(Path::new("/work"), Path::new("/work/my-app"), None);
        assert_eq!(steps, vec!["cd my-app", "npm install", "npm run dev"]);
    }

    #[test]
    fn test_next_steps_yarn_in_place() {
        let yarn = PackageManager {
            name: "yarn".into(),
            version: Some("1.22.19".into()),
        };
        let steps = next_steps(Path::new("/work"), Path::new("/work/."), Some(&yarn));
        assert_eq!(steps, vec!["yarn", "yarn dev"]);
    }

    #[test]
    fn test_next_steps_sibling_directory_is_relative() {
        let steps = next_steps(
            Path::new("/work/current"),
            Path::new("/work/current/../sibling"),
            None,
        );
        assert_eq!(steps[0], "cd ../sibling");
    }

    #[test]
    fn test_next_steps_parent_and_unrelated_directories() {
        let parent = next_steps(Path::new("/work/a/b"), Path::new("/work"), None);
        assert_eq!(parent[0], "cd ../..");

        let elsewhere = next_steps(Path::new("/work/a"), Path::new("/srv/app"), None);
        assert_eq!(elsewhere[0], "cd ../../srv/app");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scaffold_keeps_non_utf8_entry_names() {
        use std::os::unix::ffi::OsStrExt;

        let templates = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        write_template(templates.path());
        let odd_name = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(templates.path().join("template-demo").join(odd_name), "bytes").unwrap();

        engine(templates.path(), cwd.path())
            .scaffold(&selection("my-app", false, None))
            .unwrap();

        assert_eq!(
            fs::read_to_string(cwd.path().join("my-app").join(odd_name)).unwrap(),
            "bytes"
        );
    }

    #[test]
    fn test_next_steps_pnpm() {
        let pnpm = PackageManager {
            name: "pnpm".into(),
            version: None,
        };
        let steps = next_steps(Path::new("/work"), Path::new("/work/a/b"), Some(&pnpm));
        assert_eq!(steps, vec!["cd a/b", "pnpm install", "pnpm run dev"]);
    }
}
