/// List component generator (`<Table>List.tsx`)

use stagehand_schema::Field;

use crate::naming::{humanize, js_string};
use crate::{BANNER, GeneratedFile, OutputDir, PageSource, Template};

/// Columns shown in the list; the remaining fields are only visible in the form.
pub const LIST_COLUMN_LIMIT: usize = 4;

pub struct ListTemplate;

impl Template for ListTemplate {
    fn name(&self) -> &str {
        "list"
    }

    fn render(&self, page: &PageSource<'_>) -> GeneratedFile {
        GeneratedFile {
            dir: OutputDir::Components,
            file_name: format!("{}List.tsx", page.component_base()),
            content: generate_list(page),
        }
    }
}

/// Column header: the field description, or the humanized name.
fn column_label(field: &Field) -> String {
    if field.description.trim().is_empty() {
        humanize(&field.name)
    } else {
        field.description.trim().to_string()
    }
}

fn generate_list(page: &PageSource<'_>) -> String {
    let base = page.component_base();
    let component = format!("{}List", base);
    let columns: Vec<&Field> = page.fields.iter().take(LIST_COLUMN_LIMIT).collect();
    let mut output = String::new();

    output.push_str(BANNER);
    output.push_str("\"use client\";\n\n");

    output.push_str("type Row = Record<string, unknown> & { id?: string | number };\n\n");

    output.push_str("const COLUMNS = [\n");
    for field in &columns {
        output.push_str(&format!(
            "  {{ key: {}, label: {}, kind: {} }},\n",
            js_string(&field.name),
            js_string(&column_label(field)),
            js_string(field.kind().as_str())
        ));
    }
    output.push_str("] as const;\n\n");

    output.push_str("function formatCell(value: unknown, kind: string): string {\n");
    output.push_str("  if (value === null || value === undefined) return \"-\";\n");
    output.push_str("  if (kind === \"boolean\") return value ? \"Sim\" : \"Não\";\n");
    output.push_str("  if (kind === \"date\" || kind === \"timestamp\") {\n");
    output.push_str("    const date = new Date(String(value));\n");
    output.push_str("    if (!Number.isNaN(date.getTime())) {\n");
    output.push_str("      return kind === \"date\" ? date.toLocaleDateString(\"pt-BR\") : date.toLocaleString(\"pt-BR\");\n");
    output.push_str("    }\n");
    output.push_str("  }\n");
    output.push_str("  if (Array.isArray(value)) return value.join(\", \");\n");
    output.push_str("  if (typeof value === \"object\") return JSON.stringify(value);\n");
    output.push_str("  return String(value);\n");
    output.push_str("}\n\n");

    output.push_str(&format!("export interface {}Props<T extends Row = Row> {{\n", component));
    output.push_str("  items: T[];\n");
    output.push_str("  loading: boolean;\n");
    output.push_str("  page: number;\n");
    output.push_str("  pageSize: number;\n");
    output.push_str("  count: number;\n");
    output.push_str("  onPageChange: (page: number) => void;\n");
    output.push_str("  onEdit: (item: T) => void;\n");
    output.push_str("  onDelete: (item: T) => void;\n");
    output.push_str("}\n\n");

    output.push_str(&format!("export function {}<T extends Row>({{\n", component));
    output.push_str("  items,\n");
    output.push_str("  loading,\n");
    output.push_str("  page,\n");
    output.push_str("  pageSize,\n");
    output.push_str("  count,\n");
    output.push_str("  onPageChange,\n");
    output.push_str("  onEdit,\n");
    output.push_str("  onDelete,\n");
    output.push_str(&format!("}}: {}Props<T>) {{\n", component));
    output.push_str("  const totalPages = Math.max(1, Math.ceil(count / pageSize));\n\n");

    output.push_str("  if (loading) {\n");
    output.push_str("    return <p className=\"py-6 text-center\">Carregando...</p>;\n");
    output.push_str("  }\n\n");

    output.push_str("  return (\n");
    output.push_str("    <div className=\"space-y-4\">\n");
    output.push_str("      <table className=\"w-full border-collapse text-left\">\n");
    output.push_str("        <thead>\n");
    output.push_str("          <tr>\n");
    output.push_str("            {COLUMNS.map((column) => (\n");
    output.push_str("              <th key={column.key} className=\"border-b p-2\">\n");
    output.push_str("                {column.label}\n");
    output.push_str("              </th>\n");
    output.push_str("            ))}\n");
    output.push_str("            <th className=\"border-b p-2\">Ações</th>\n");
    output.push_str("          </tr>\n");
    output.push_str("        </thead>\n");
    output.push_str("        <tbody>\n");
    output.push_str("          {items.length === 0 ? (\n");
    output.push_str("            <tr>\n");
    output.push_str("              <td colSpan={COLUMNS.length + 1} className=\"p-4 text-center\">\n");
    output.push_str("                Nenhum registro encontrado.\n");
    output.push_str("              </td>\n");
    output.push_str("            </tr>\n");
    output.push_str("          ) : (\n");
    output.push_str("            items.map((item, index) => (\n");
    output.push_str("              <tr key={String(item.id ?? index)}>\n");
    output.push_str("                {COLUMNS.map((column) => (\n");
    output.push_str("                  <td key={column.key} className=\"border-b p-2\">\n");
    output.push_str("                    {formatCell(item[column.key], column.kind)}\n");
    output.push_str("                  </td>\n");
    output.push_str("                ))}\n");
    output.push_str("                <td className=\"space-x-2 border-b p-2\">\n");
    output.push_str("                  <button type=\"button\" onClick={() => onEdit(item)}>\n");
    output.push_str("                    Editar\n");
    output.push_str("                  </button>\n");
    output.push_str("                  <button type=\"button\" onClick={() => onDelete(item)}>\n");
    output.push_str("                    Excluir\n");
    output.push_str("                  </button>\n");
    output.push_str("                </td>\n");
    output.push_str("              </tr>\n");
    output.push_str("            ))\n");
    output.push_str("          )}\n");
    output.push_str("        </tbody>\n");
    output.push_str("      </table>\n\n");

    output.push_str("      <nav className=\"flex items-center justify-between\">\n");
    output.push_str("        <button type=\"button\" disabled={page <= 1} onClick={() => onPageChange(page - 1)}>\n");
    output.push_str("          Anterior\n");
    output.push_str("        </button>\n");
    output.push_str("        <span>\n");
    output.push_str("          Página {page} de {totalPages} ({count} registros)\n");
    output.push_str("        </span>\n");
    output.push_str("        <button\n");
    output.push_str("          type=\"button\"\n");
    output.push_str("          disabled={page >= totalPages}\n");
    output.push_str("          onClick={() => onPageChange(page + 1)}\n");
    output.push_str("        >\n");
    output.push_str("          Próxima\n");
    output.push_str("        </button>\n");
    output.push_str("      </nav>\n");
    output.push_str("    </div>\n");
    output.push_str("  );\n");
    output.push_str("}\n");

    output
}
