use crate::merge::GeneratedRegion;
use cck_types::ProjectContext;
use std::fmt::Write;

/// Render project facts as the machine-owned markdown region.
///
/// Sections with nothing to say are left out. No timestamps are embedded, so
/// an unchanged project always renders to the same bytes.
pub fn render(context: &ProjectContext) -> GeneratedRegion {
    GeneratedRegion::new(&render_body(context))
}

fn render_body(context: &ProjectContext) -> String {
    let mut sections: Vec<String> = Vec::new();

    let title = if context.project_name.is_empty() {
        "Project Context"
    } else {
        context.project_name.as_str()
    };
    sections.push(format!("# {}", title));

    let mut overview = String::from("## Overview\n\n");
    let _ = write!(overview, "- **Type**: {}", context.project_type);
    if !context.languages.is_empty() {
        let _ = write!(
            overview,
            "\n- **Languages**: {}",
            context.languages.join(", ")
        );
    }
    sections.push(overview);

    if let Some(s) = code_list("Entry Points", &context.entry_points) {
        sections.push(s);
    }

    if !context.build_commands.is_empty() {
        sections.push(format!(
            "## Commands\n\n```bash\n{}\n```",
            context.build_commands.join("\n")
        ));
    }

    if let Some(s) = code_list("Tests", &context.test_patterns) {
        sections.push(s);
    }

    if !context.structure.is_empty() {
        sections.push(format!(
            "## Structure\n\n```\n{}\n```",
            context.structure.join("\n")
        ));
    }

    if !context.key_files.is_empty() {
        let lines: Vec<String> = context
            .key_files
            .iter()
            .map(|kf| format!("- `{}`: {}", kf.path, kf.purpose))
            .collect();
        sections.push(format!("## Key Files\n\n{}", lines.join("\n")));
    }

    if !context.conventions.is_empty() {
        let lines: Vec<String> = context
            .conventions
            .iter()
            .map(|c| format!("- {}", c))
            .collect();
        sections.push(format!("## Conventions\n\n{}", lines.join("\n")));
    }

    sections.join("\n\n")
}

fn code_list(heading: &str, items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let lines: Vec<String> = items.iter().map(|i| format!("- `{}`", i)).collect();
    Some(format!("## {}\n\n{}", heading, lines.join("\n")))
}
