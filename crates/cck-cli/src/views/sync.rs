use super::Palette;
use std::path::Path;

pub fn print_scanning(palette: &Palette, root: &Path) {
    println!("{} {}", palette.label("Scanning:"), root.display());
}

pub fn print_result(palette: &Palette, output: &Path, written: bool) {
    if written {
        println!("{} {}", palette.success("Written:"), output.display());
    } else {
        println!("{} {}", palette.dim("Up to date:"), output.display());
    }
}

pub fn print_preview(palette: &Palette, document: &str) {
    println!();
    println!("{}", palette.notice("--- Preview (dry-run) ---"));
    println!();
    println!("{}", document);
    println!();
    println!("{}", palette.notice("--- End Preview ---"));
}

pub fn print_created_config(palette: &Palette, path: &Path) {
    println!("{} {}", palette.success("Created:"), path.display());
}
