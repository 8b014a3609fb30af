//! Template rendering with `tera`.
//!
//! Variables come from an explicit JSON object, or from the process
//! environment with `"true"`/`"false"` strings turned into booleans.

use crate::error::RenderError;
use regex::Regex;
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tera::{Context, Tera};
use tracing::debug;

/// Parse the variables argument; it must be a JSON object.
pub fn parse_variables(raw: &str) -> Result<Map<String, Json>, RenderError> {
    match serde_json::from_str::<Json>(raw) {
        Ok(Json::Object(map)) => Ok(map),
        Ok(_) => Err(RenderError::VariablesNotObject),
        Err(e) => Err(RenderError::Variables(e)),
    }
}

/// Variables from `(name, value)` pairs, with boolean-looking values coerced.
pub fn env_variables<I>(vars: I) -> Map<String, Json>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .map(|(k, v)| {
            let value = if v.eq_ignore_ascii_case("true") {
                Json::Bool(true)
            } else if v.eq_ignore_ascii_case("false") {
                Json::Bool(false)
            } else {
                Json::String(v)
            };
            (k, value)
        })
        .collect()
}

/// Render `template_text` with `variables`. Autoescaping is off.
pub fn render_str(name: &str, template_text: &str, variables: &Map<String, Json>) -> Result<String, RenderError> {
    render_set(&[(name.to_string(), template_text.to_string())], name, variables)
}

/// Render `entry` out of a set of named templates.
///
/// Names the templates use but `variables` lacks are bound to an empty
/// string (an empty list when iterated), so unset variables render as
/// nothing instead of failing.
fn render_set(
    templates: &[(String, String)],
    entry: &str,
    variables: &Map<String, Json>,
) -> Result<String, RenderError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(templates.iter().map(|(n, t)| (n.as_str(), t.as_str())))?;
    let mut ctx = Context::from_serialize(variables)?;
    for (name, value) in undefined_defaults(templates.iter().map(|(_, t)| t.as_str()), variables) {
        ctx.insert(name, &value);
    }
    Ok(tera.render(entry, &ctx)?)
}

const RESERVED: &[&str] = &[
    "and", "as", "block", "break", "continue", "elif", "else", "endblock", "endfilter",
    "endfor", "endif", "endmacro", "endraw", "extends", "false", "False", "filter", "for",
    "if", "ignore", "import", "in", "include", "is", "loop", "macro", "missing", "none",
    "None", "not", "or", "raw", "self", "set", "set_global", "super", "true", "True",
];

struct TemplateRegexes {
    tag: Regex,
    literal: Regex,
    filter_or_test: Regex,
    guarded: Regex,
    iterated: Regex,
    ident: Regex,
    reference: Regex,
}

fn regexes() -> &'static TemplateRegexes {
    static RE: OnceLock<TemplateRegexes> = OnceLock::new();
    RE.get_or_init(|| TemplateRegexes {
        tag: Regex::new(r"(?s)\{\{(.*?)\}\}|\{%(.*?)%\}").expect("static regex"),
        literal: Regex::new(r#""[^"]*"|'[^']*'|`[^`]*`"#).expect("static regex"),
        filter_or_test: Regex::new(r"\|\s*[A-Za-z_]\w*|\bis\s+(?:not\s+)?[A-Za-z_]\w*")
            .expect("static regex"),
        guarded: Regex::new(r"([A-Za-z_]\w*)\s*(?:\|\s*default\b|is\s+(?:not\s+)?defined\b)")
            .expect("static regex"),
        iterated: Regex::new(r"\bfor\s+\w+(?:\s*,\s*\w+)?\s+in\s+([A-Za-z_]\w*)")
            .expect("static regex"),
        ident: Regex::new(r"(^|[^.\w:])([A-Za-z_]\w*)").expect("static regex"),
        reference: Regex::new(r#"\{%-?\s*(?:include|extends|import)\s+["']([^"']+)["']"#)
            .expect("static regex"),
    })
}

/// Top-level names referenced in tags of `texts` that `variables` lacks.
///
/// Names guarded by `| default` or `is defined` are left unbound so those
/// checks keep working.
fn undefined_defaults<'t>(
    texts: impl Iterator<Item = &'t str>,
    variables: &Map<String, Json>,
) -> Vec<(String, Json)> {
    let re = regexes();
    let mut out: Vec<(String, Json)> = Vec::new();
    for text in texts {
        for tag in re.tag.captures_iter(text) {
            let body = tag.get(1).or_else(|| tag.get(2)).map(|m| m.as_str()).unwrap_or("");
            let body = re.literal.replace_all(body, " ");
            let guarded: Vec<&str> = re
                .guarded
                .captures_iter(&body)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
            let iterated: Vec<&str> = re
                .iterated
                .captures_iter(&body)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
            let stripped = re.filter_or_test.replace_all(&body, " ");
            for cap in re.ident.captures_iter(&stripped) {
                let name = &cap[2];
                if RESERVED.contains(&name)
                    || guarded.contains(&name)
                    || variables.contains_key(name)
                    || out.iter().any(|(n, _)| n == name)
                {
                    continue;
                }
                let value = if iterated.contains(&name) {
                    Json::Array(Vec::new())
                } else {
                    Json::String(String::new())
                };
                out.push((name.to_string(), value));
            }
        }
    }
    out
}

/// Load `entry` plus every template it reaches through include, extends or
/// import, resolved relative to `dir`. Missing references are left for tera
/// to report.
fn load_template_set(dir: &Path, entry: &str, entry_text: String) -> Vec<(String, String)> {
    let mut set: Vec<(String, String)> = vec![(entry.to_string(), entry_text)];
    let mut next = 0;
    while next < set.len() {
        let refs: Vec<String> = regexes()
            .reference
            .captures_iter(&set[next].1)
            .map(|c| c[1].to_string())
            .collect();
        for name in refs {
            if set.iter().any(|(n, _)| *n == name) {
                continue;
            }
            match fs::read_to_string(dir.join(&name)) {
                Ok(text) => set.push((name, text)),
                Err(e) => debug!(template = %name, "referenced template not loaded: {}", e),
            }
        }
        next += 1;
    }
    set
}

/// Render the template at `template_path` into `output_path`.
///
/// With `variables = None`, the process environment is used. Templates
/// named in include/extends/import tags load from the template's directory.
pub fn render_template(
    template_path: &Path,
    output_path: &Path,
    variables: Option<Map<String, Json>>,
) -> Result<(), RenderError> {
    let text = fs::read_to_string(template_path).map_err(|source| RenderError::Io {
        path: template_path.to_string_lossy().to_string(),
        source,
    })?;
    let vars = variables.unwrap_or_else(|| {
        // Non-UTF-8 entries cannot be template values
        env_variables(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    });
    debug!(count = vars.len(), template = %template_path.display(), "rendering");
    let name = template_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "template".to_string());
    let dir = template_path.parent().unwrap_or_else(|| Path::new("."));
    let templates = load_template_set(dir, &name, text);
    let rendered = render_set(&templates, &name, &vars)?;
    fs::write(output_path, rendered).map_err(|source| RenderError::Io {
        path: output_path.to_string_lossy().to_string(),
        source,
    })
}
