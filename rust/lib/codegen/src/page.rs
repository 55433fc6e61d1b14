/// Page component generator (`page.tsx`)

use crate::naming::{camel_case, js_string};
use crate::{BANNER, GeneratedFile, OutputDir, PageSource, Template};

pub struct PageTemplate;

impl Template for PageTemplate {
    fn name(&self) -> &str {
        "page"
    }

    fn render(&self, page: &PageSource<'_>) -> GeneratedFile {
        GeneratedFile {
            dir: OutputDir::Page,
            file_name: "page.tsx".to_string(),
            content: generate_page(page),
        }
    }
}

fn generate_page(page: &PageSource<'_>) -> String {
    let base = page.component_base();
    let list = format!("{}List", base);
    let form = format!("{}Form", base);
    let values = format!("{}FormValues", base);
    let api_url = js_string(&format!("/api/{}", page.table_name));
    let mut output = String::new();

    output.push_str(BANNER);
    output.push_str("\"use client\";\n\n");
    output.push_str("import { useCallback, useEffect, useState } from \"react\";\n");
    output.push_str(&format!("import {{ {} }} from \"./components/{}\";\n", list, list));
    output.push_str(&format!(
        "import {{ {}, type {} }} from \"./components/{}\";\n\n",
        form, values, form
    ));

    output.push_str(&format!("type Row = {} & {{ id?: string | number }};\n\n", values));
    output.push_str(&format!("const API_URL = {};\n", api_url));
    output.push_str("const PAGE_SIZE = 20;\n\n");

    output.push_str("async function readError(res: Response): Promise<string> {\n");
    output.push_str("  const body = await res.json().catch(() => ({}));\n");
    output.push_str("  return typeof body.error === \"string\" ? body.error : res.statusText;\n");
    output.push_str("}\n\n");

    output.push_str(&format!("export default function {}Page() {{\n", base));
    output.push_str("  const [items, setItems] = useState<Row[]>([]);\n");
    output.push_str("  const [count, setCount] = useState(0);\n");
    output.push_str("  const [page, setPage] = useState(1);\n");
    output.push_str("  const [loading, setLoading] = useState(true);\n");
    output.push_str("  const [error, setError] = useState<string | null>(null);\n");
    output.push_str("  const [editing, setEditing] = useState<Row | null>(null);\n");
    output.push_str("  const [formOpen, setFormOpen] = useState(false);\n\n");

    output.push_str("  const loadData = useCallback(async () => {\n");
    output.push_str("    setLoading(true);\n");
    output.push_str("    setError(null);\n");
    output.push_str("    try {\n");
    output.push_str("      const res = await fetch(`${API_URL}?page=${page}&pageSize=${PAGE_SIZE}`);\n");
    output.push_str("      if (!res.ok) throw new Error(await readError(res));\n");
    output.push_str("      const body = await res.json();\n");
    output.push_str("      setItems(body.data ?? []);\n");
    output.push_str("      setCount(body.count ?? 0);\n");
    output.push_str("    } catch (err) {\n");
    output.push_str("      setError(err instanceof Error ? err.message : String(err));\n");
    output.push_str("    } finally {\n");
    output.push_str("      setLoading(false);\n");
    output.push_str("    }\n");
    output.push_str("  }, [page]);\n\n");

    output.push_str("  useEffect(() => {\n");
    output.push_str("    loadData();\n");
    output.push_str("  }, [loadData]);\n\n");

    output.push_str(&format!("  const handleSubmit = async (values: {}) => {{\n", values));
    output.push_str("    const isEdit = editing?.id !== undefined;\n");
    output.push_str("    const res = await fetch(isEdit ? `${API_URL}/${editing?.id}` : API_URL, {\n");
    output.push_str("      method: isEdit ? \"PUT\" : \"POST\",\n");
    output.push_str("      headers: { \"Content-Type\": \"application/json\" },\n");
    output.push_str("      body: JSON.stringify(values),\n");
    output.push_str("    });\n");
    output.push_str("    if (!res.ok) throw new Error(await readError(res));\n");
    output.push_str("    setFormOpen(false);\n");
    output.push_str("    setEditing(null);\n");
    output.push_str("    await loadData();\n");
    output.push_str("  };\n\n");

    output.push_str("  const handleDelete = async (item: Row) => {\n");
    output.push_str("    if (!window.confirm(\"Deseja realmente excluir este registro?\")) return;\n");
    output.push_str("    const res = await fetch(`${API_URL}/${item.id}`, { method: \"DELETE\" });\n");
    output.push_str("    if (!res.ok) {\n");
    output.push_str("      setError(await readError(res));\n");
    output.push_str("      return;\n");
    output.push_str("    }\n");
    output.push_str("    await loadData();\n");
    output.push_str("  };\n\n");

    output.push_str("  return (\n");
    output.push_str(&format!(
        "    <div className=\"{}-page container mx-auto space-y-6 py-8\">\n",
        camel_case(page.table_name)
    ));
    output.push_str("      <header className=\"flex items-center justify-between\">\n");
    output.push_str("        <div>\n");
    output.push_str(&format!(
        "          <h1 className=\"text-2xl font-bold\">{{{}}}</h1>\n",
        js_string(page.title)
    ));
    if !page.subtitle.is_empty() {
        output.push_str(&format!(
            "          <p className=\"text-muted-foreground\">{{{}}}</p>\n",
            js_string(page.subtitle)
        ));
    }
    output.push_str("        </div>\n");
    output.push_str("        <button\n");
    output.push_str("          type=\"button\"\n");
    output.push_str("          onClick={() => {\n");
    output.push_str("            setEditing(null);\n");
    output.push_str("            setFormOpen(true);\n");
    output.push_str("          }}\n");
    output.push_str("        >\n");
    output.push_str("          Novo\n");
    output.push_str("        </button>\n");
    output.push_str("      </header>\n\n");

    output.push_str("      {error && (\n");
    output.push_str("        <div role=\"alert\" className=\"rounded border border-red-300 p-3 text-red-700\">\n");
    output.push_str("          {error}\n");
    output.push_str("        </div>\n");
    output.push_str("      )}\n\n");

    output.push_str("      {formOpen && (\n");
    output.push_str(&format!("        <{}\n", form));
    output.push_str("          initialValues={editing ?? undefined}\n");
    output.push_str("          onSubmit={handleSubmit}\n");
    output.push_str("          onCancel={() => {\n");
    output.push_str("            setFormOpen(false);\n");
    output.push_str("            setEditing(null);\n");
    output.push_str("          }}\n");
    output.push_str("        />\n");
    output.push_str("      )}\n\n");

    output.push_str(&format!("      <{}\n", list));
    output.push_str("        items={items}\n");
    output.push_str("        loading={loading}\n");
    output.push_str("        page={page}\n");
    output.push_str("        pageSize={PAGE_SIZE}\n");
    output.push_str("        count={count}\n");
    output.push_str("        onPageChange={setPage}\n");
    output.push_str("        onEdit={(item) => {\n");
    output.push_str("          setEditing(item);\n");
    output.push_str("          setFormOpen(true);\n");
    output.push_str("        }}\n");
    output.push_str("        onDelete={handleDelete}\n");
    output.push_str("      />\n");
    output.push_str("    </div>\n");
    output.push_str("  );\n");
    output.push_str("}\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_schema::Field;

    fn source<'a>(fields: &'a [Field], subtitle: &'a str) -> PageSource<'a> {
        PageSource {
            title: "Repertório",
            subtitle,
            table_name: "musicas",
            fields,
            relationships: &[],
        }
    }

    #[test]
    fn wires_components_and_api() {
        let fields = vec![Field::new("titulo", "text")];
        let file = PageTemplate.render(&source(&fields, "Músicas da banda"));
        assert_eq!(file.dir, OutputDir::Page);
        assert_eq!(file.file_name, "page.tsx");
        assert!(file.content.contains("export default function MusicasPage()"));
        assert!(file.content.contains("import { MusicasList } from \"./components/MusicasList\";"));
        assert!(file.content.contains("type MusicasFormValues"));
        assert!(file.content.contains("const API_URL = \"/api/musicas\";"));
        assert!(file.content.contains("{\"Repertório\"}"));
        assert!(file.content.contains("{\"Músicas da banda\"}"));
    }

    #[test]
    fn subtitle_omitted_when_empty() {
        let fields = vec![Field::new("titulo", "text")];
        let file = PageTemplate.render(&source(&fields, ""));
        assert!(!file.content.contains("text-muted-foreground"));
    }

    #[test]
    fn title_is_a_string_literal() {
        let fields = vec![Field::new("titulo", "text")];
        let page = PageSource {
            title: "Shows {2024} <ao vivo>",
            ..source(&fields, "")
        };
        let file = PageTemplate.render(&page);
        assert!(file.content.contains(r#"{"Shows {2024} <ao vivo>"}"#));
    }
}
