//! Filesystem-backed persistence.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use eyre::{Result, WrapErr};
use vellum_core::{
    Artifact, AsIs, Context, NamingParams, NamingStrategy, TextArtifact, TextArtifactOptions,
    TextBuffer, TextValue,
};

use crate::error::PersistenceError;
use crate::handler::{
    PersistOptions, PersistenceErrorCallback, PersistenceEvent, PersistenceHandler,
    PersistenceReporter,
};
use crate::result::{PersistenceResult, ResultLog};

/// Configuration for [`FileSystemPersistence`].
#[derive(Default)]
pub struct FileSystemOptions {
    /// Root that relative result paths are reported against.
    pub project_path: PathBuf,
    /// Directory artifacts are written into.
    pub dest_path: PathBuf,
    pub logical_naming: Option<Rc<dyn NamingStrategy>>,
    pub physical_naming: Option<Rc<dyn NamingStrategy>>,
    /// Create missing destination directories instead of failing.
    pub create_dest_paths: bool,
    /// Simulate writes: full decision logic and result records, no I/O.
    pub dry_run: bool,
    pub report: Option<PersistenceReporter>,
    pub on_error: Option<PersistenceErrorCallback>,
}

impl FileSystemOptions {
    pub fn new(project_path: impl Into<PathBuf>, dest_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            dest_path: dest_path.into(),
            ..Self::default()
        }
    }

    pub fn create_dest_paths(mut self) -> Self {
        self.create_dest_paths = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn with_logical_naming(mut self, strategy: Rc<dyn NamingStrategy>) -> Self {
        self.logical_naming = Some(strategy);
        self
    }

    pub fn with_physical_naming(mut self, strategy: Rc<dyn NamingStrategy>) -> Self {
        self.physical_naming = Some(strategy);
        self
    }

    pub fn with_report(mut self, report: PersistenceReporter) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_on_error(mut self, on_error: PersistenceErrorCallback) -> Self {
        self.on_error = Some(on_error);
        self
    }
}

/// Persistence handler writing artifacts beneath a destination directory.
pub struct FileSystemPersistence {
    options: FileSystemOptions,
    logical_naming: Rc<dyn NamingStrategy>,
    physical_naming: Rc<dyn NamingStrategy>,
    log: ResultLog,
}

impl FileSystemPersistence {
    /// Eagerly creates the destination root when configured to and not in
    /// dry-run.
    pub fn new(options: FileSystemOptions) -> Result<Self> {
        if options.create_dest_paths && !options.dry_run {
            std::fs::create_dir_all(&options.dest_path)
                .wrap_err_with(|| format!("unable to create {}", options.dest_path.display()))?;
        }
        // either strategy stands in for a missing one; as-is otherwise
        let logical_naming = options
            .logical_naming
            .clone()
            .or_else(|| options.physical_naming.clone())
            .unwrap_or_else(|| Rc::new(AsIs));
        let physical_naming = options
            .physical_naming
            .clone()
            .or_else(|| options.logical_naming.clone())
            .unwrap_or_else(|| Rc::new(AsIs));
        Ok(Self {
            options,
            logical_naming,
            physical_naming,
            log: ResultLog::new(),
        })
    }

    fn report(&self, ctx: &Context, event: PersistenceEvent<'_>) {
        if let Some(report) = &self.options.report {
            report(ctx, event);
        }
    }

    fn apply_mode(
        &self,
        ctx: &Context,
        path: &Path,
        name: &TextValue,
        artifact: &dyn TextArtifact,
        options: Option<&PersistOptions>,
    ) {
        let Some(mode) = options.and_then(|options| options.mode) else {
            return;
        };
        if let Err(source) = set_permissions(path, mode) {
            let error = PersistenceError::SetPermissions {
                path: path.to_path_buf(),
                mode,
                source,
            };
            self.handle_error(ctx, name, artifact, &error);
        }
    }
}

impl PersistenceHandler for FileSystemPersistence {
    fn results(&self) -> &[PersistenceResult] {
        self.log.results()
    }

    fn result(&self, logical_name: &str) -> Option<&PersistenceResult> {
        self.log.current(logical_name)
    }

    fn create_mutable_text_artifact(
        &self,
        _ctx: &Context,
        options: TextArtifactOptions,
    ) -> TextBuffer {
        TextBuffer::new(options)
    }

    fn persist_text_artifact(
        &mut self,
        ctx: &Context,
        name: &TextValue,
        artifact: Rc<dyn TextArtifact>,
        options: Option<&PersistOptions>,
    ) -> Result<Option<PersistenceResult>> {
        let as_artifact: &dyn Artifact = &*artifact;
        let file_index = self.log.file_index();
        let logical_naming = options
            .and_then(|options| options.logical_naming.clone())
            .unwrap_or_else(|| self.logical_naming.clone());
        let physical_naming = options
            .and_then(|options| options.physical_naming.clone())
            .unwrap_or_else(|| self.physical_naming.clone());

        let logical_name = logical_naming.name(
            ctx,
            &NamingParams {
                artifact: as_artifact,
                suggested_name: name,
                file_index,
            },
        );
        // the physical strategy refines the logical result
        let logical_as_suggestion = TextValue::from(logical_name.clone());
        let physical_name = physical_naming.name(
            ctx,
            &NamingParams {
                artifact: as_artifact,
                suggested_name: &logical_as_suggestion,
                file_index,
            },
        );

        let physical_joined = self.options.dest_path.join(&physical_name);
        let physical_abs = if self.options.dest_path.as_os_str().is_empty() {
            PathBuf::from(&physical_name)
        } else {
            std::path::absolute(&physical_joined)
                .wrap_err_with(|| format!("unable to resolve {}", physical_joined.display()))?
        };
        let physical_rel = relative_to(&self.options.project_path, &physical_joined);

        if let Some(dest_dir) = physical_abs.parent()
            && !dest_dir.as_os_str().is_empty()
            && !dest_dir.exists()
        {
            if self.options.create_dest_paths {
                if self.options.dry_run {
                    self.report(
                        ctx,
                        PersistenceEvent::Notice(&format!(
                            "need to create path {} for storing {}",
                            dest_dir.display(),
                            physical_rel.display()
                        )),
                    );
                } else {
                    std::fs::create_dir_all(dest_dir)
                        .wrap_err_with(|| format!("unable to create {}", dest_dir.display()))?;
                }
            } else {
                let error = PersistenceError::DestinationPathNotFound {
                    path: dest_dir.to_path_buf(),
                    artifact: physical_rel.display().to_string(),
                };
                self.handle_error(ctx, name, &*artifact, &error);
                return Ok(None);
            }
        }

        let append_requested = options.is_some_and(|options| options.append_if_exists);
        let existing_target = if append_requested {
            self.log
                .current(&logical_name)
                .map(|existing| PathBuf::from(&existing.physical_abs))
        } else {
            None
        };

        let result = match existing_target {
            Some(target) => {
                let fragment = artifact.text_fragment(ctx);
                let delim = options.and_then(|options| options.append_delim.as_deref());
                if !self.options.dry_run {
                    let mut on_disk = read_text_file(&target)?;
                    if let Some(delim) = delim {
                        on_disk.push_str(delim);
                    }
                    on_disk.push_str(&fragment);
                    write_text_file(&target, &on_disk)?;
                    self.apply_mode(ctx, &target, name, &*artifact, options);
                }
                self.log
                    .append(&logical_name, &fragment, delim, artifact.clone())
                    .cloned()
            }
            None => {
                let text = artifact.text(ctx);
                if !self.options.dry_run {
                    write_text_file(&physical_abs, &text)?;
                    self.apply_mode(ctx, &physical_abs, name, &*artifact, options);
                }
                let record = PersistenceResult {
                    original_name: name.clone(),
                    logical_name,
                    physical_name,
                    physical_abs: physical_abs.display().to_string(),
                    physical_rel: physical_rel.display().to_string(),
                    text,
                    artifacts: vec![artifact],
                    overwrote: Vec::new(),
                };
                Some(self.log.record(record).clone())
            }
        };

        let Some(result) = result else {
            return Ok(None);
        };
        self.report(ctx, PersistenceEvent::Persisted(&result));
        Ok(Some(result))
    }

    fn handle_error(
        &self,
        ctx: &Context,
        name: &TextValue,
        artifact: &dyn TextArtifact,
        error: &PersistenceError,
    ) {
        match &self.options.on_error {
            Some(on_error) => on_error(ctx, name, artifact, error),
            None => eprintln!("[{}] {}", error.code(), error),
        }
    }
}

fn write_text_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).wrap_err_with(|| format!("unable to write {}", path.display()))
}

fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("unable to read {}", path.display()))
}

// best-effort: paths outside the project root are reported as-is
fn relative_to(base: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
