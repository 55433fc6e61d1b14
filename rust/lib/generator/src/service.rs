use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use stagehand_codegen::naming::normalize_path_segment;
use stagehand_codegen::{GeneratedFile, OutputDir, PageSource, Template, base_templates, route_templates};
use stagehand_fsgate::{FsGateway, FsResult, PagePaths};
use stagehand_schema::PageGenerationConfig;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::GenerateError;
use crate::step::{GenerationStep, Progress};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Instance-level progress listener.
pub type ProgressFn = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Call-scoped progress listener passed to [`PageGenerator::initialize_structure`].
pub type ScopedProgress<'a> = &'a (dyn Fn(&Progress) + Send + Sync);

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub paths: PagePaths,
    /// Written files, in write order.
    pub files: Vec<String>,
    pub events: Vec<Progress>,
}

/// Normalize a path input for the filesystem: diacritics stripped,
/// whitespace runs replaced by `-`. Applied to both the base path and the
/// table name.
pub fn normalize(input: &str) -> String {
    normalize_path_segment(input)
}

/// Runs one page generation against a [`FsGateway`].
///
/// `initialize_structure` takes `&mut self`, so one generator runs at most
/// one generation at a time. Every gateway call is bounded by the call
/// timeout and raced against the cancellation token.
pub struct PageGenerator {
    gateway: Arc<dyn FsGateway>,
    config: PageGenerationConfig,
    on_progress: Option<ProgressFn>,
    call_timeout: Duration,
    cancel: CancellationToken,
    paths: Option<PagePaths>,
}

impl PageGenerator {
    pub fn new(gateway: Arc<dyn FsGateway>, config: PageGenerationConfig) -> Self {
        Self {
            gateway,
            config,
            on_progress: None,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            cancel: CancellationToken::new(),
            paths: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn set_on_progress(&mut self, listener: ProgressFn) {
        self.on_progress = Some(listener);
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &PageGenerationConfig {
        &self.config
    }

    /// Directory layout of the last run, once step 1 has completed.
    pub fn paths(&self) -> Option<&PagePaths> {
        self.paths.as_ref()
    }

    /// Run every step in order.
    ///
    /// Each event goes to the instance listener and to `scoped`. The scoped
    /// listener only lives for this call. Directories and files created
    /// before a failure are left in place.
    pub async fn initialize_structure(
        &mut self,
        scoped: Option<ScopedProgress<'_>>,
    ) -> Result<GenerationReport, GenerateError> {
        let mut run = Run {
            on_progress: self.on_progress.clone(),
            scoped,
            events: Vec::new(),
        };

        match self.execute(&mut run).await {
            Ok((paths, files)) => {
                run.emit(Progress::started(GenerationStep::Done));
                info!("page generated under {}", paths.page_dir);
                Ok(GenerationReport {
                    paths,
                    files,
                    events: run.events,
                })
            }
            Err((step, e)) => {
                warn!("generation stopped at step {}: {}", step.number(), e);
                run.emit(Progress::failed(step, e.to_string()));
                Err(e)
            }
        }
    }

    async fn execute(
        &mut self,
        run: &mut Run<'_>,
    ) -> Result<(PagePaths, Vec<String>), (GenerationStep, GenerateError)> {
        // 0: validation, before any filesystem call.
        self.enter(run, GenerationStep::Validating)?;
        if let Some(message) = validate(&self.config) {
            return Err((GenerationStep::Validating, GenerateError::Validation(message)));
        }

        // 1: derive the layout.
        self.enter(run, GenerationStep::ResolvingPaths)?;
        let paths = PagePaths::derive(
            &normalize(&self.config.base_path),
            &normalize(&self.config.table_name),
        );
        self.paths = Some(paths.clone());

        // 2..4: directories.
        let dir_steps = [
            (GenerationStep::CreatingPageDir, &paths.page_dir),
            (GenerationStep::CreatingComponentsDir, &paths.components_dir),
            (GenerationStep::CreatingApiDir, &paths.api_dir),
        ];
        for (step, dir) in dir_steps {
            self.enter(run, step)?;
            self.create_dir(step, dir).await.map_err(|e| (step, e))?;
        }

        // 5..6: files.
        let page = PageSource::from_config(&self.config);
        let mut files = Vec::new();

        self.enter(run, GenerationStep::GeneratingBaseFiles)?;
        for template in base_templates() {
            let path = self
                .write(GenerationStep::GeneratingBaseFiles, &paths, template, &page)
                .await
                .map_err(|e| (GenerationStep::GeneratingBaseFiles, e))?;
            files.push(path);
        }

        self.enter(run, GenerationStep::ConfiguringRoutes)?;
        for template in route_templates() {
            let path = self
                .write(GenerationStep::ConfiguringRoutes, &paths, template, &page)
                .await
                .map_err(|e| (GenerationStep::ConfiguringRoutes, e))?;
            files.push(path);
        }

        Ok((paths, files))
    }

    /// Report `step` as started, unless the run was cancelled.
    fn enter(&self, run: &mut Run<'_>, step: GenerationStep) -> Result<(), (GenerationStep, GenerateError)> {
        if self.cancel.is_cancelled() {
            return Err((step, GenerateError::Cancelled { step: step.number() }));
        }
        info!("step {}: {}", step.number(), step.message());
        run.emit(Progress::started(step));
        Ok(())
    }

    async fn create_dir(&self, step: GenerationStep, dir: &str) -> Result<(), GenerateError> {
        let created = self
            .guarded(step, "ensureDir", self.gateway.ensure_directory_exists(dir))
            .await?;
        check(step, created, || format!("Falha ao criar o diretório {}", dir))?;

        let writable = self
            .guarded(step, "checkWritePermission", self.gateway.check_write_permission(dir))
            .await?;
        check(step, writable, || format!("Sem permissão de escrita em {}", dir))
    }

    async fn write(
        &self,
        step: GenerationStep,
        paths: &PagePaths,
        template: &dyn Template,
        page: &PageSource<'_>,
    ) -> Result<String, GenerateError> {
        let file = template.render(page);
        let path = file_path(paths, &file);

        if !self.config.overwrite {
            let exists = self
                .guarded(step, "fileExists", self.gateway.file_exists(&path))
                .await?;
            if exists {
                return Err(GenerateError::Filesystem {
                    step: step.number(),
                    message: format!("O arquivo {} já existe", path),
                });
            }
        }

        let written = self
            .guarded(step, "createFile", self.gateway.create_file(&path, &file.content))
            .await?;
        check(step, written, || format!("Falha ao criar o arquivo {}", path))?;
        tracing::debug!("wrote {} ({})", path, template.name());
        Ok(path)
    }

    /// Bound `call` by the call timeout and the cancellation token.
    async fn guarded<T>(
        &self,
        step: GenerationStep,
        operation: &str,
        call: impl Future<Output = T>,
    ) -> Result<T, GenerateError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(GenerateError::Cancelled { step: step.number() }),
            outcome = tokio::time::timeout(self.call_timeout, call) => {
                outcome.map_err(|_| GenerateError::Timeout {
                    step: step.number(),
                    operation: operation.to_string(),
                })
            }
        }
    }
}

/// Event sink for one run.
struct Run<'a> {
    on_progress: Option<ProgressFn>,
    scoped: Option<ScopedProgress<'a>>,
    events: Vec<Progress>,
}

impl Run<'_> {
    fn emit(&mut self, event: Progress) {
        if let Some(listener) = &self.on_progress {
            listener(&event);
        }
        if let Some(listener) = self.scoped {
            listener(&event);
        }
        self.events.push(event);
    }
}

/// First validation failure, checked in a fixed order.
fn validate(config: &PageGenerationConfig) -> Option<String> {
    if config.page_title.trim().is_empty() {
        return Some("O título da página é obrigatório".to_string());
    }
    if config.table_name.trim().is_empty() {
        return Some("O nome da tabela é obrigatório".to_string());
    }
    if config.base_path.trim().is_empty() {
        return Some("O caminho base é obrigatório".to_string());
    }
    if config.fields.is_empty() {
        return Some("Pelo menos um campo deve ser definido".to_string());
    }
    None
}

fn check(
    step: GenerationStep,
    result: FsResult,
    context: impl FnOnce() -> String,
) -> Result<(), GenerateError> {
    if result.success {
        return Ok(());
    }
    let message = match result.error {
        Some(detail) if !detail.is_empty() => format!("{}: {}", context(), detail),
        _ => context(),
    };
    Err(GenerateError::Filesystem {
        step: step.number(),
        message,
    })
}

fn file_path(paths: &PagePaths, file: &GeneratedFile) -> String {
    let dir = match file.dir {
        OutputDir::Page => &paths.page_dir,
        OutputDir::Components => &paths.components_dir,
        OutputDir::Api => &paths.api_dir,
    };
    format!("{}/{}", dir, file.file_name)
}
