/// Form component generator (`<Table>Form.tsx`)
///
/// Every field of the table gets exactly one input, registered with
/// react-hook-form and validated by a zod schema derived from the field
/// kinds.

use stagehand_schema::{Field, FieldKind};

use crate::naming::{camel_case, humanize, js_key, js_string};
use crate::{BANNER, GeneratedFile, OutputDir, PageSource, Template};

pub struct FormTemplate;

impl Template for FormTemplate {
    fn name(&self) -> &str {
        "form"
    }

    fn render(&self, page: &PageSource<'_>) -> GeneratedFile {
        GeneratedFile {
            dir: OutputDir::Components,
            file_name: format!("{}Form.tsx", page.component_base()),
            content: generate_form(page),
        }
    }
}

/// zod validator expression for one field.
fn validator(field: &Field) -> String {
    let base = match field.kind() {
        FieldKind::Text => {
            if field.required {
                format!("z.string().min(1, {})", js_string(&required_message(field)))
            } else {
                "z.string()".to_string()
            }
        }
        FieldKind::Integer => "z.number().int()".to_string(),
        FieldKind::Decimal => "z.number()".to_string(),
        FieldKind::Boolean => "z.boolean()".to_string(),
        FieldKind::Date => "z.string().date()".to_string(),
        FieldKind::Timestamp => "z.string().datetime({ local: true })".to_string(),
        FieldKind::Uuid => "z.string().uuid()".to_string(),
        FieldKind::Json => "z.string().refine(isJsonText, \"JSON inválido\")".to_string(),
        FieldKind::Array => "z.string()".to_string(),
    };

    if field.required {
        base
    } else {
        format!("{}.optional()", base)
    }
}

fn required_message(field: &Field) -> String {
    format!("{} é obrigatório", label(field))
}

fn label(field: &Field) -> String {
    if field.description.trim().is_empty() {
        humanize(&field.name)
    } else {
        field.description.trim().to_string()
    }
}

/// The `z.object({...})` body shared by the form and its tests.
pub fn render_validation_schema(fields: &[Field]) -> String {
    let mut output = String::from("z.object({\n");
    for field in fields {
        output.push_str(&format!("  {}: {},\n", js_key(&field.name), validator(field)));
    }
    output.push_str("})");
    output
}

/// `<input>` type attribute.
fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer | FieldKind::Decimal => "number",
        FieldKind::Date => "date",
        FieldKind::Timestamp => "datetime-local",
        FieldKind::Boolean => "checkbox",
        _ => "text",
    }
}

fn render_input(output: &mut String, field: &Field) {
    let kind = field.kind();
    let name = js_string(&field.name);
    let id = js_string(&format!("field-{}", field.name));
    let field_label = label(field);

    if kind == FieldKind::Boolean {
        output.push_str("      <div className=\"flex items-center gap-2\">\n");
        output.push_str(&format!(
            "        <input id={} type=\"checkbox\" {{...register({})}} />\n",
            id, name
        ));
        output.push_str(&format!("        <label htmlFor={}>{{{}}}</label>\n", id, js_string(&field_label)));
    } else {
        output.push_str("      <div className=\"flex flex-col gap-1\">\n");
        output.push_str(&format!(
            "        <label htmlFor={}>{{{}}}{}</label>\n",
            id,
            js_string(&field_label),
            if field.required { " *" } else { "" }
        ));

        let register = if kind.is_numeric() {
            format!("{{...register({}, {{ valueAsNumber: true }})}}", name)
        } else {
            format!("{{...register({})}}", name)
        };

        if matches!(kind, FieldKind::Json) {
            output.push_str(&format!("        <textarea id={} rows={{4}} {} />\n", id, register));
        } else {
            let step = match kind {
                FieldKind::Integer => " step=\"1\"",
                FieldKind::Decimal => " step=\"any\"",
                _ => "",
            };
            let placeholder = if kind == FieldKind::Array {
                " placeholder=\"valor1, valor2\""
            } else {
                ""
            };
            output.push_str(&format!(
                "        <input id={} type=\"{}\"{}{} {} />\n",
                id,
                input_type(kind),
                step,
                placeholder,
                register
            ));
        }
    }

    output.push_str(&format!(
        "        {{errors[{}] && <span className=\"text-sm text-red-600\">{{String(errors[{}]?.message ?? \"\")}}</span>}}\n",
        name, name
    ));
    output.push_str("      </div>\n");
}

fn generate_form(page: &PageSource<'_>) -> String {
    let base = page.component_base();
    let component = format!("{}Form", base);
    let schema_name = format!("{}Schema", camel_case(page.table_name));
    let values = format!("{}FormValues", base);
    let mut output = String::new();

    output.push_str(BANNER);
    output.push_str("\"use client\";\n\n");
    output.push_str("import { useState } from \"react\";\n");
    output.push_str("import { useForm } from \"react-hook-form\";\n");
    output.push_str("import { zodResolver } from \"@hookform/resolvers/zod\";\n");
    output.push_str("import { z } from \"zod\";\n\n");

    if page.fields.iter().any(|f| f.kind() == FieldKind::Json) {
        output.push_str("function isJsonText(value: string): boolean {\n");
        output.push_str("  if (value.trim() === \"\") return true;\n");
        output.push_str("  try {\n");
        output.push_str("    JSON.parse(value);\n");
        output.push_str("    return true;\n");
        output.push_str("  } catch {\n");
        output.push_str("    return false;\n");
        output.push_str("  }\n");
        output.push_str("}\n\n");
    }

    output.push_str(&format!(
        "export const {} = {};\n\n",
        schema_name,
        render_validation_schema(page.fields)
    ));
    output.push_str(&format!("export type {} = z.infer<typeof {}>;\n\n", values, schema_name));

    output.push_str(&format!("export interface {}Props {{\n", component));
    output.push_str(&format!("  initialValues?: Partial<{}>;\n", values));
    output.push_str(&format!("  onSubmit: (values: {}) => Promise<void>;\n", values));
    output.push_str("  onCancel: () => void;\n");
    output.push_str("}\n\n");

    output.push_str(&format!(
        "export function {}({{ initialValues, onSubmit, onCancel }}: {}Props) {{\n",
        component, component
    ));
    output.push_str("  const [submitError, setSubmitError] = useState<string | null>(null);\n");
    output.push_str("  const {\n");
    output.push_str("    register,\n");
    output.push_str("    handleSubmit,\n");
    output.push_str("    formState: { errors, isSubmitting },\n");
    output.push_str(&format!("  }} = useForm<{}>({{\n", values));
    output.push_str(&format!("    resolver: zodResolver({}),\n", schema_name));
    output.push_str("    defaultValues: initialValues,\n");
    output.push_str("  });\n\n");

    output.push_str(&format!("  const submit = async (values: {}) => {{\n", values));
    output.push_str("    setSubmitError(null);\n");
    output.push_str("    try {\n");
    output.push_str("      await onSubmit(values);\n");
    output.push_str("    } catch (err) {\n");
    output.push_str("      setSubmitError(err instanceof Error ? err.message : String(err));\n");
    output.push_str("    }\n");
    output.push_str("  };\n\n");

    output.push_str("  return (\n");
    output.push_str("    <form onSubmit={handleSubmit(submit)} className=\"space-y-4 rounded border p-4\">\n");
    for field in page.fields {
        render_input(&mut output, field);
    }
    output.push_str("      {submitError && (\n");
    output.push_str("        <p role=\"alert\" className=\"text-red-600\">\n");
    output.push_str("          {submitError}\n");
    output.push_str("        </p>\n");
    output.push_str("      )}\n");
    output.push_str("      <div className=\"flex gap-2\">\n");
    output.push_str("        <button type=\"submit\" disabled={isSubmitting}>\n");
    output.push_str("          {isSubmitting ? \"Salvando...\" : \"Salvar\"}\n");
    output.push_str("        </button>\n");
    output.push_str("        <button type=\"button\" onClick={onCancel}>\n");
    output.push_str("          Cancelar\n");
    output.push_str("        </button>\n");
    output.push_str("      </div>\n");
    output.push_str("    </form>\n");
    output.push_str("  );\n");
    output.push_str("}\n");

    output
}
