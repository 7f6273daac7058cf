use std::io::Write;

use provmap::{CoverageReport, ProvinceMap};

/// Generate a human-readable coverage report
pub fn print_report(
    map: &ProvinceMap,
    report: &CoverageReport,
    writer: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(writer, "\n=== Coverage Report ===")?;
    writeln!(writer)?;

    writeln!(
        writer,
        "Surface: {}x{} ({} pixels)",
        map.width(),
        map.height(),
        report.total_pixels
    )?;
    writeln!(
        writer,
        "Definitions: {} rows | Mapped colors seen: {}",
        map.province_count(),
        report.mapped_colors
    )?;
    writeln!(
        writer,
        "Mapped: {} | Unmapped: {} | Coverage: {:.2}%",
        report.mapped_pixels,
        report.unmapped_pixels,
        report.coverage() * 100.0
    )?;

    // Show unmapped colors first (most important)
    if !report.unmapped_colors.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "--- UNMAPPED COLORS ---")?;
        for color in &report.unmapped_colors {
            let (r, g, b) = color.rgb();
            writeln!(writer, "[MISS] {} (r={}, g={}, b={})", color, r, g, b)?;
        }
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "Result: {}",
        if report.is_valid() { "VALID" } else { "INVALID" }
    )?;

    Ok(())
}

/// Generate a JSON report
pub fn json_report(report: &CoverageReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
