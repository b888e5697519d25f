use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::engine::{Channel, ChannelLayout};
use crate::error::Result;

/// Formats one console input: `  ✓ 03 drum-1: Kick In → Dee`
pub fn format_channel_line(input_number: usize, channel: &Channel) -> String {
    let applicable = if channel.applicable { '✓' } else { '○' };
    let status = match &channel.assigned_to {
        Some(name) => format!("→ {}", name),
        None => "(unassigned)".to_string(),
    };
    format!(
        "  {} {:02} {}: {} {}",
        applicable, input_number, channel.id, channel.label, status
    )
}

/// Renders the channel sheet as text. Inputs are numbered across sections in console order.
pub fn render_channel_sheet(title: &str, layout: &ChannelLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "** {} **", title);
    let _ = writeln!(out, "Generated {}", Local::now().format("%Y-%m-%d %H:%M"));

    let mut input_number = 0;
    for (section, channels) in layout.sections() {
        let _ = writeln!(out, "\n{} SECTION:", section.as_str().to_uppercase());
        for channel in channels {
            input_number += 1;
            let _ = writeln!(out, "{}", format_channel_line(input_number, channel));
        }
    }

    let open = layout.unassigned_applicable();
    if open > 0 {
        let _ = writeln!(out, "\n{} applicable channels unassigned", open);
    }
    out
}

/// Writes the channel sheet to a file
pub fn write_channel_sheet_to_file<P: AsRef<Path>>(
    title: &str,
    layout: &ChannelLayout,
    path: P,
) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render_channel_sheet(title, layout).as_bytes())?;
    Ok(())
}

/// Prints the channel sheet
pub fn print_channel_sheet(title: &str, layout: &ChannelLayout) {
    println!("\n{}", render_channel_sheet(title, layout));
}
