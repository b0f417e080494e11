//! Frame snapshot formatters for `frames`.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

use crate::error::EngineError;
use crate::navigation::FrameDetails;
use crate::types::ContainerId;

pub fn format_frames_json(container: ContainerId, frames: &[FrameDetails]) -> Result<String, EngineError> {
    let out = json!({
        "container": container,
        "frames": frames,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn format_frames_text(container: ContainerId, frames: &[FrameDetails]) -> String {
    if frames.is_empty() {
        return format!("Container {} has no trackable frames.", container);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Frame", "Parent", "Process", "Error", "URL"]);
    for frame in frames {
        let parent = frame
            .parent_frame
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            frame.frame.to_string(),
            parent,
            frame.process_id.to_string(),
            if frame.error_occurred { "yes" } else { "no" }.to_string(),
            frame.url.to_string(),
        ]);
    }
    format!("Container {}\n{}", container, table)
}
