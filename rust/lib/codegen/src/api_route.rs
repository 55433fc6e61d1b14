/// REST route generator (`route.ts`)
///
/// GET lists a page of rows with the total count, POST inserts, PUT and
/// DELETE address a row by the trailing path segment. Failures always
/// answer `{ error }` with a non-2xx status.

use stagehand_schema::{Field, FieldKind};

use crate::naming::js_string;
use crate::{BANNER, GeneratedFile, OutputDir, PageSource, Template};

pub struct ApiRouteTemplate;

impl Template for ApiRouteTemplate {
    fn name(&self) -> &str {
        "api-route"
    }

    fn render(&self, page: &PageSource<'_>) -> GeneratedFile {
        GeneratedFile {
            dir: OutputDir::Api,
            file_name: "route.ts".to_string(),
            content: generate_route(page),
        }
    }
}

fn string_array<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<String> = names.map(js_string).collect();
    format!("[{}]", items.join(", "))
}

fn columns_of_kind(fields: &[Field], kind: FieldKind) -> String {
    string_array(fields.iter().filter(|f| f.kind() == kind).map(|f| f.name.as_str()))
}

/// Primary key used for PUT/DELETE: the first flagged field, or `id`.
fn primary_key(fields: &[Field]) -> &str {
    fields
        .iter()
        .find(|f| f.is_primary_key)
        .map(|f| f.name.as_str())
        .unwrap_or("id")
}

/// Select clause with one embedded resource per relationship.
fn select_clause(page: &PageSource<'_>) -> String {
    let mut select = String::from("*");
    for relationship in page.relationships {
        select.push_str(&format!(", {}(*)", relationship.table));
    }
    select
}

fn generate_route(page: &PageSource<'_>) -> String {
    let mut output = String::new();

    output.push_str(BANNER);
    output.push_str("import { NextRequest, NextResponse } from \"next/server\";\n");
    output.push_str("import { createClient } from \"@/lib/supabase/server\";\n\n");

    output.push_str(&format!("const TABLE = {};\n", js_string(page.table_name)));
    output.push_str(&format!(
        "const SELECT = {};\n",
        js_string(&select_clause(page))
    ));
    output.push_str(&format!(
        "const COLUMNS = {} as const;\n",
        string_array(page.fields.iter().map(|f| f.name.as_str()))
    ));
    output.push_str(&format!(
        "const JSON_COLUMNS: readonly string[] = {};\n",
        columns_of_kind(page.fields, FieldKind::Json)
    ));
    output.push_str(&format!(
        "const ARRAY_COLUMNS: readonly string[] = {};\n",
        columns_of_kind(page.fields, FieldKind::Array)
    ));
    output.push_str(&format!(
        "const PRIMARY_KEY = {};\n",
        js_string(primary_key(page.fields))
    ));
    output.push_str("const DEFAULT_PAGE_SIZE = 20;\n");
    output.push_str("const MAX_PAGE_SIZE = 100;\n\n");

    output.push_str("function fail(message: string, status = 500) {\n");
    output.push_str("  return NextResponse.json({ error: message }, { status });\n");
    output.push_str("}\n\n");

    output.push_str("function positiveInt(value: string | null, fallback: number): number {\n");
    output.push_str("  const parsed = Number.parseInt(value ?? \"\", 10);\n");
    output.push_str("  return Number.isFinite(parsed) && parsed > 0 ? parsed : fallback;\n");
    output.push_str("}\n\n");

    output.push_str("function trailingId(request: NextRequest): string | null {\n");
    output.push_str("  const segments = request.nextUrl.pathname.split(\"/\").filter(Boolean);\n");
    output.push_str("  const last = segments[segments.length - 1];\n");
    output.push_str("  if (last && last !== \"api\" && last !== TABLE) {\n");
    output.push_str("    try {\n");
    output.push_str("      return decodeURIComponent(last);\n");
    output.push_str("    } catch {\n");
    output.push_str("      return null;\n");
    output.push_str("    }\n");
    output.push_str("  }\n");
    output.push_str("  return request.nextUrl.searchParams.get(\"id\");\n");
    output.push_str("}\n\n");

    output.push_str("/** Keep known columns only, converting form text into JSON and arrays. */\n");
    output.push_str("function pickRow(body: Record<string, unknown>): Record<string, unknown> {\n");
    output.push_str("  const row: Record<string, unknown> = {};\n");
    output.push_str("  for (const column of COLUMNS) {\n");
    output.push_str("    if (!(column in body)) continue;\n");
    output.push_str("    let value = body[column];\n");
    output.push_str("    if (JSON_COLUMNS.includes(column) && typeof value === \"string\") {\n");
    output.push_str("      value = value.trim() === \"\" ? null : JSON.parse(value);\n");
    output.push_str("    } else if (ARRAY_COLUMNS.includes(column) && typeof value === \"string\") {\n");
    output.push_str("      value = value\n");
    output.push_str("        .split(\",\")\n");
    output.push_str("        .map((item) => item.trim())\n");
    output.push_str("        .filter((item) => item !== \"\");\n");
    output.push_str("    }\n");
    output.push_str("    row[column] = value;\n");
    output.push_str("  }\n");
    output.push_str("  return row;\n");
    output.push_str("}\n\n");

    output.push_str("async function readBody(request: NextRequest): Promise<Record<string, unknown>> {\n");
    output.push_str("  const body = await request.json();\n");
    output.push_str("  if (body === null || typeof body !== \"object\" || Array.isArray(body)) {\n");
    output.push_str("    throw new Error(\"Corpo da requisição inválido\");\n");
    output.push_str("  }\n");
    output.push_str("  return body as Record<string, unknown>;\n");
    output.push_str("}\n\n");

    output.push_str("function message(err: unknown): string {\n");
    output.push_str("  return err instanceof Error ? err.message : String(err);\n");
    output.push_str("}\n\n");

    // GET
    output.push_str("export async function GET(request: NextRequest) {\n");
    output.push_str("  try {\n");
    output.push_str("    const params = request.nextUrl.searchParams;\n");
    output.push_str("    const page = positiveInt(params.get(\"page\"), 1);\n");
    output.push_str("    const pageSize = Math.min(positiveInt(params.get(\"pageSize\"), DEFAULT_PAGE_SIZE), MAX_PAGE_SIZE);\n");
    output.push_str("    const from = (page - 1) * pageSize;\n\n");
    output.push_str("    const supabase = await createClient();\n");
    output.push_str("    const { data, error, count } = await supabase\n");
    output.push_str("      .from(TABLE)\n");
    output.push_str("      .select(SELECT, { count: \"exact\" })\n");
    output.push_str("      .range(from, from + pageSize - 1);\n");
    output.push_str("    if (error) return fail(error.message);\n\n");
    output.push_str("    return NextResponse.json({ data: data ?? [], count: count ?? 0 });\n");
    output.push_str("  } catch (err) {\n");
    output.push_str("    return fail(message(err));\n");
    output.push_str("  }\n");
    output.push_str("}\n\n");

    // POST
    output.push_str("export async function POST(request: NextRequest) {\n");
    output.push_str("  let row: Record<string, unknown>;\n");
    output.push_str("  try {\n");
    output.push_str("    row = pickRow(await readBody(request));\n");
    output.push_str("  } catch (err) {\n");
    output.push_str("    return fail(message(err), 400);\n");
    output.push_str("  }\n\n");
    output.push_str("  try {\n");
    output.push_str("    const supabase = await createClient();\n");
    output.push_str("    const { data, error } = await supabase.from(TABLE).insert(row).select().single();\n");
    output.push_str("    if (error) return fail(error.message);\n");
    output.push_str("    return NextResponse.json(data, { status: 201 });\n");
    output.push_str("  } catch (err) {\n");
    output.push_str("    return fail(message(err));\n");
    output.push_str("  }\n");
    output.push_str("}\n\n");

    // PUT
    output.push_str("export async function PUT(request: NextRequest) {\n");
    output.push_str("  const id = trailingId(request);\n");
    output.push_str("  if (!id) return fail(\"Identificador ausente\", 400);\n\n");
    output.push_str("  let row: Record<string, unknown>;\n");
    output.push_str("  try {\n");
    output.push_str("    row = pickRow(await readBody(request));\n");
    output.push_str("  } catch (err) {\n");
    output.push_str("    return fail(message(err), 400);\n");
    output.push_str("  }\n");
    output.push_str("  delete row[PRIMARY_KEY];\n\n");
    output.push_str("  try {\n");
    output.push_str("    const supabase = await createClient();\n");
    output.push_str("    const { data, error } = await supabase\n");
    output.push_str("      .from(TABLE)\n");
    output.push_str("      .update(row)\n");
    output.push_str("      .eq(PRIMARY_KEY, id)\n");
    output.push_str("      .select()\n");
    output.push_str("      .single();\n");
    output.push_str("    if (error) return fail(error.message);\n");
    output.push_str("    return NextResponse.json(data);\n");
    output.push_str("  } catch (err) {\n");
    output.push_str("    return fail(message(err));\n");
    output.push_str("  }\n");
    output.push_str("}\n\n");

    // DELETE
    output.push_str("export async function DELETE(request: NextRequest) {\n");
    output.push_str("  const id = trailingId(request);\n");
    output.push_str("  if (!id) return fail(\"Identificador ausente\", 400);\n\n");
    output.push_str("  try {\n");
    output.push_str("    const supabase = await createClient();\n");
    output.push_str("    const { error } = await supabase.from(TABLE).delete().eq(PRIMARY_KEY, id);\n");
    output.push_str("    if (error) return fail(error.message);\n");
    output.push_str("    return NextResponse.json({ success: true });\n");
    output.push_str("  } catch (err) {\n");
    output.push_str("    return fail(message(err));\n");
    output.push_str("  }\n");
    output.push_str("}\n");

    output
}
