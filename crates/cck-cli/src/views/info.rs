use super::Palette;
use cck_types::ProjectContext;
use std::fmt;

pub struct ProjectInfoView<'a> {
    context: &'a ProjectContext,
    palette: Palette,
}

impl<'a> ProjectInfoView<'a> {
    pub fn new(context: &'a ProjectContext, palette: Palette) -> Self {
        Self { context, palette }
    }

    fn row(&self, f: &mut fmt::Formatter<'_>, label: &str, values: &[String]) -> fmt::Result {
        writeln!(f, "{} {}", self.palette.label(label), values.join(", "))
    }
}

impl fmt::Display for ProjectInfoView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.context;
        writeln!(f, "{} {}", self.palette.label("Project:"), ctx.project_name)?;
        writeln!(
            f,
            "{} {}",
            self.palette.label("Project Type:"),
            ctx.project_type
        )?;
        self.row(f, "Languages:", &ctx.languages)?;
        self.row(f, "Entry Points:", &ctx.entry_points)?;
        self.row(f, "Test Patterns:", &ctx.test_patterns)?;
        self.row(f, "Build Commands:", &ctx.build_commands)?;

        let key_files: Vec<String> = ctx.key_files.iter().map(|kf| kf.path.clone()).collect();
        self.row(f, "Key Files:", &key_files)?;
        self.row(f, "Conventions:", &ctx.conventions)
    }
}
