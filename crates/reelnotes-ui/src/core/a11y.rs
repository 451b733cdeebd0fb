//! Accessibility panel content, announcements and read-aloud text.

/// Elements whose text is read aloud, in document order.
pub const READABLE_SELECTOR: &str =
    "h1, h2, h3, h4, h5, h6, p, a, li, td, th, caption, figcaption, label";

/// Ancestors that mark content as not meant to be read.
pub const HIDDEN_SELECTOR: &str = r#"[aria-hidden="true"], .sr-only, [hidden]"#;

/// Class of the skip-to-content link.
pub const SKIP_LINK_CLASS: &str = "skip-link";
/// Anchor the skip link jumps to.
pub const SKIP_LINK_TARGET: &str = "#main-content";
/// Text of the skip link.
pub const SKIP_LINK_TEXT: &str = "Skip to main content";

/// Speech rate for read-aloud.
pub const SPEECH_RATE: f32 = 0.8;

/// One element matched by [`READABLE_SELECTOR`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadableNode {
    /// Lower-case tag name.
    pub tag: String,
    /// Text content.
    pub text: String,
    /// Whether the element sits inside a [`HIDDEN_SELECTOR`] ancestor.
    pub hidden: bool,
}

impl ReadableNode {
    /// Convenience constructor for visible nodes.
    #[must_use]
    pub fn visible(tag: &str, text: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            text: text.to_string(),
            hidden: false,
        }
    }
}

fn prefix_for(tag: &str) -> String {
    match tag.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => format!("Heading level {}: ", char::from(*level)),
        b"a" => "Link: ".to_string(),
        b"li" => "• ".to_string(),
        _ => String::new(),
    }
}

/// Build the text spoken by "Read Page".
#[must_use]
pub fn readable_text(nodes: &[ReadableNode]) -> String {
    nodes
        .iter()
        .filter(|node| !node.hidden)
        .filter_map(|node| {
            let content = node.text.trim();
            (!content.is_empty()).then(|| format!("{}{content}. ", prefix_for(&node.tag)))
        })
        .collect()
}

/// Keyboard shortcut help.
#[must_use]
pub const fn shortcut_help_text() -> &'static str {
    "Keyboard Shortcuts:\n\
     • Alt + H: Go to Home\n\
     • Alt + S: Go to Search\n\
     • Alt + R: Go to Recommendations\n\
     • Alt + P: Go to Profile\n\
     • Alt + L: Switch Language\n\
     • Alt + A: Open Accessibility Menu\n\
     • Escape: Close menus\n\
     • Tab: Navigate through elements\n\
     • Enter/Space: Activate buttons and links"
}

/// Live-region text after toggling high contrast.
#[must_use]
pub const fn high_contrast_announcement(enabled: bool) -> &'static str {
    if enabled {
        "High contrast mode enabled"
    } else {
        "High contrast mode disabled"
    }
}

/// Live-region text after toggling screen-reader mode.
#[must_use]
pub const fn screen_reader_announcement(enabled: bool) -> &'static str {
    if enabled {
        "Screen reader friendly mode enabled"
    } else {
        "Screen reader friendly mode disabled"
    }
}

/// Live-region text after a font change.
#[must_use]
pub fn font_announcement(percent: u32) -> String {
    format!("Font size adjusted to {percent}%")
}

/// Label of the high contrast button for the current state.
#[must_use]
pub const fn high_contrast_label(enabled: bool) -> &'static str {
    if enabled {
        "Normal Contrast"
    } else {
        "High Contrast"
    }
}

/// Label of the screen-reader button for the current state.
#[must_use]
pub const fn screen_reader_label(enabled: bool) -> &'static str {
    if enabled {
        "Normal Mode"
    } else {
        "Screen Reader Mode"
    }
}

/// Markup of the floating accessibility panel. Buttons are wired through
/// `data-action`, so the delegated click listener handles them.
#[must_use]
pub fn accessibility_panel_html() -> String {
    let buttons = [
        ("speak-page", "fa-volume-up", "Read page aloud", "Read Page"),
        (
            "high-contrast",
            "fa-adjust",
            "Toggle high contrast mode",
            "High Contrast",
        ),
        ("increase-font", "fa-plus", "Increase font size", "Larger Text"),
        ("decrease-font", "fa-minus", "Decrease font size", "Smaller Text"),
        (
            "screen-reader-mode",
            "fa-eye",
            "Toggle screen reader friendly mode",
            "Screen Reader Mode",
        ),
        (
            "keyboard-help",
            "fa-keyboard",
            "Show keyboard shortcuts",
            "Keyboard Shortcuts",
        ),
    ];
    let options: String = buttons
        .iter()
        .map(|(action, icon, aria, label)| {
            format!(
                r#"<button type="button" id="{action}" class="accessibility-btn" data-action="{action}" aria-label="{aria}"><i class="fas {icon}"></i> <span class="accessibility-label">{label}</span></button>"#
            )
        })
        .collect();
    format!(
        r#"<button type="button" class="accessibility-toggle" data-action="toggle-accessibility" aria-label="Accessibility options" title="Accessibility options" aria-expanded="false"><i class="fas fa-universal-access"></i></button><div class="accessibility-menu" role="dialog" aria-modal="false" aria-labelledby="accessibility-title"><div class="accessibility-header"><div id="accessibility-title" role="heading" aria-level="2">Accessibility Options</div><button type="button" class="close-accessibility" data-action="close-accessibility" aria-label="Close accessibility menu">&times;</button></div><div class="accessibility-options">{options}</div></div>"#
    )
}
