use std::path::Path;

use console::Style;
use relief_core::pipeline::HeightConfig;
use relief_core::tiling::TileMode;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_convert_summary(
    input: &Path,
    output: &Path,
    config: &HeightConfig,
    width: usize,
    height: usize,
) {
    let s = Styles::new();

    let tiling = match config.tile_mode {
        TileMode::Seamless => "seamless",
        TileMode::NonSeamless => "non-seamless",
    };

    println!();
    println!("  {}", s.title.apply_to("Relief"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{width}x{height}"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tiling"),
        s.method.apply_to(tiling)
    );
    println!();
}
