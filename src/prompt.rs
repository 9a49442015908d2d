//! Prompt construction for room redesign requests.

/// Style labels that mean "leave the visual style alone", compared after
/// trimming and lowercasing.
const KEEP_STYLE_ALIASES: &[&str] = &[
    "",
    "keep current style (no style change)",
    "keep current style",
    "no style change",
    "original",
    "as is",
];

/// What the user asked to happen to the room's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleIntent<'a> {
    /// Preserve the current style and apply only the listed changes.
    Keep,
    /// Restyle the room into the named style.
    Restyle(&'a str),
}

impl<'a> StyleIntent<'a> {
    /// Classify a submitted style label.
    #[must_use]
    pub fn from_style(style: &'a str) -> Self {
        let normalized = style.trim().to_lowercase();
        if KEEP_STYLE_ALIASES.contains(&normalized.as_str()) {
            Self::Keep
        } else {
            Self::Restyle(style)
        }
    }
}

/// Build the instruction sent to the image model.
///
/// An empty `specific_changes` is treated the same as `None`.
#[must_use]
pub fn build_prompt(style: &str, specific_changes: Option<&str>) -> String {
    let changes = specific_changes.filter(|c| !c.is_empty());

    match StyleIntent::from_style(style) {
        StyleIntent::Keep => {
            let mut prompt = String::from(
                "You are an expert interior designer. Keep the existing style, theme, and \
                 overall aesthetic of the provided room. Do not restyle or re-theme the space. \
                 Preserve the layout, geometry, and lighting approach. Apply ONLY the specific \
                 changes requested below, leaving everything else as-is. Avoid altering walls, \
                 floors, ceiling, windows, major furniture, or materials unless explicitly \
                 requested.\n",
            );
            let changes = changes.unwrap_or("(user did not specify)");
            prompt.push_str(&format!("- Specific changes to apply: {changes}\n"));
            prompt.push_str(
                "- Also provide 3–5 concise, practical design suggestions as text, \
                 consistent with the current style.",
            );
            prompt
        }
        StyleIntent::Restyle(style) => {
            let mut prompt = format!(
                "You are an expert interior designer. Restyle the provided room photo into a \
                 '{style}' style while preserving the core layout and geometry. Adjust furniture, \
                 materials, colors, lighting, and décor to match the style. The output must be a \
                 photorealistic image with no overlaid text.\n"
            );
            if let Some(changes) = changes {
                prompt.push_str(&format!("- Specific changes requested by user: {changes}\n"));
            }
            prompt.push_str("- Also provide 4–6 concise, practical design suggestions as text.");
            prompt
        }
    }
}
