/// Page scaffolding templates
///
/// Renders the four source files of a CRUD page (page, list component, form
/// component, API route) from a table's field list. Rendering is pure string
/// building; writing the files is the generator's job.

pub mod api_route;
pub mod naming;
pub mod page;
pub mod react_form;
pub mod react_list;

use stagehand_schema::{Field, PageGenerationConfig, Relationship};

pub use api_route::ApiRouteTemplate;
pub use page::PageTemplate;
pub use react_form::{FormTemplate, render_validation_schema};
pub use react_list::{LIST_COLUMN_LIMIT, ListTemplate};

/// Everything a template may read.
#[derive(Debug, Clone, Copy)]
pub struct PageSource<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub table_name: &'a str,
    pub fields: &'a [Field],
    pub relationships: &'a [Relationship],
}

impl<'a> PageSource<'a> {
    pub fn from_config(config: &'a PageGenerationConfig) -> Self {
        Self {
            title: &config.page_title,
            subtitle: &config.page_subtitle,
            table_name: &config.table_name,
            fields: &config.fields,
            relationships: &config.relationships,
        }
    }

    /// Prefix of the generated component names: `produtos` → `Produtos`.
    pub fn component_base(&self) -> String {
        naming::pascal_case(self.table_name)
    }
}

/// Which of the generated directories a file belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDir {
    Page,
    Components,
    Api,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub dir: OutputDir,
    pub file_name: String,
    pub content: String,
}

/// One generated source file.
pub trait Template: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, page: &PageSource<'_>) -> GeneratedFile;
}

/// Page, list and form. Written together as the page's base files.
pub fn base_templates() -> [&'static dyn Template; 3] {
    [&PageTemplate, &ListTemplate, &FormTemplate]
}

/// The REST route handlers.
pub fn route_templates() -> [&'static dyn Template; 1] {
    [&ApiRouteTemplate]
}

/// Banner placed at the top of every generated file.
pub(crate) const BANNER: &str = "// Gerado pelo stagehand. Ajuste livremente.\n";
