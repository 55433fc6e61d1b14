//! `stagehand generate`: scaffold a page from a schema file.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use stagehand_core::ServiceConfig;
use stagehand_fsgate::{FILESYSTEM_PATH, FsGateway, HttpGateway, LocalGateway};
use stagehand_generator::{GenerationReport, GenerationStep, PageGenerator, Progress};
use stagehand_schema::PageGenerationConfig;
use tracing::debug;

/// Where generated files go.
pub enum Target<'a> {
    /// A stagehandd instance, by base URL.
    Server(&'a str),
    /// A local directory, used as the sandbox root.
    Local,
}

pub struct GenerateArgs<'a> {
    pub file: &'a Path,
    pub base_path: &'a str,
    pub overwrite: bool,
    pub target: Target<'a>,
}

pub fn progress_line(progress: &Progress) -> String {
    match &progress.error {
        Some(error) => format!("[{}/{}] erro: {}", progress.step, GenerationStep::LAST, error),
        None => format!("[{}/{}] {}", progress.step, GenerationStep::LAST, progress.message),
    }
}

fn gateway(target: &Target<'_>, service: &ServiceConfig) -> Result<Arc<dyn FsGateway>> {
    match target {
        Target::Server(server) => {
            let endpoint = format!("{}{}", server.trim_end_matches('/'), FILESYSTEM_PATH);
            debug!("remote gateway at {}", endpoint);
            Ok(Arc::new(HttpGateway::with_timeout(endpoint, service.timeout())))
        }
        Target::Local => {
            let root = service.resolve_root_dir();
            let gateway = LocalGateway::open(&root)
                .map_err(|e| anyhow::anyhow!("failed to open {}: {}", root.display(), e))?;
            Ok(Arc::new(gateway))
        }
    }
}

pub async fn run(args: GenerateArgs<'_>, service: &ServiceConfig) -> Result<GenerationReport> {
    let schema = super::read_schema(args.file)?;
    let mut config = PageGenerationConfig::from_schema(&schema, args.base_path);
    config.overwrite = args.overwrite;

    let mut generator = PageGenerator::new(gateway(&args.target, service)?, config)
        .with_timeout(service.timeout());
    let print = |progress: &Progress| println!("{}", progress_line(progress));

    let report = generator
        .initialize_structure(Some(&print))
        .await
        .map_err(|e| anyhow::anyhow!("Generation failed at step {}: {}", e.step(), e))?;

    for file in &report.files {
        println!("  {}", file);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_schema(dir: &Path) -> PathBuf {
        let path = dir.join("clientes.json");
        std::fs::write(
            &path,
            r#"{
                "pageTitle": "Clientes",
                "tableName": "clientes",
                "fields": [
                    {"name": "id", "type": "uuid", "required": true, "isPrimaryKey": true},
                    {"name": "nome", "type": "varchar(255)", "required": true}
                ]
            }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn progress_lines() {
        let ok = Progress::started(GenerationStep::CreatingApiDir);
        assert_eq!(progress_line(&ok), "[4/7] Criando diretório da API");
        let failed = Progress::failed(GenerationStep::GeneratingBaseFiles, "O arquivo x já existe");
        assert_eq!(progress_line(&failed), "[5/7] erro: O arquivo x já existe");
    }

    #[tokio::test]
    async fn local_generation() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_schema(dir.path());
        let site = dir.path().join("site");
        let service = ServiceConfig {
            root_dir: Some(site.clone()),
            ..Default::default()
        };

        let args = GenerateArgs {
            file: &file,
            base_path: "src/app",
            overwrite: false,
            target: Target::Local,
        };
        let report = run(args, &service).await.unwrap();
        assert_eq!(report.files.len(), 4);
        assert!(site.join("src/app/clientes/api/route.ts").is_file());

        let again = GenerateArgs {
            file: &file,
            base_path: "src/app",
            overwrite: true,
            target: Target::Local,
        };
        assert!(run(again, &service).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_server_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_schema(dir.path());
        let service = ServiceConfig {
            timeout_secs: 2,
            ..Default::default()
        };
        let args = GenerateArgs {
            file: &file,
            base_path: "src/app",
            overwrite: false,
            target: Target::Server("http://127.0.0.1:9"),
        };
        let err = run(args, &service).await.unwrap_err();
        assert!(err.to_string().contains("step 2"));
    }
}
