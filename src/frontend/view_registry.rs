//! View registry: per-view labels, anchors and cursor usage
//!
//! The registry is the single source of truth for per-view display
//! names, anchor ids and cursor usage. The tab strip and the dispatcher
//! are driven from this data.

use crate::frontend::tabs::ViewId;

/// Metadata for a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewKindInfo {
    pub view: ViewId,
    pub display_name: &'static str,
    /// Container id the rendered view is mounted under
    pub anchor: &'static str,
    /// Renders a marker aligned to the playback cursor
    pub reads_cursor: bool,
    /// Can scrub or hover the playback cursor
    pub writes_cursor: bool,
}

const REGISTRY: [ViewKindInfo; 6] = [
    ViewKindInfo {
        view: ViewId::Console,
        display_name: "Console",
        anchor: "console",
        reads_cursor: false,
        writes_cursor: false,
    },
    ViewKindInfo {
        view: ViewId::Performance,
        display_name: "Performance",
        anchor: "performance",
        reads_cursor: false,
        writes_cursor: false,
    },
    ViewKindInfo {
        view: ViewId::Trace,
        display_name: "Trace",
        anchor: "trace",
        reads_cursor: false,
        writes_cursor: false,
    },
    ViewKindInfo {
        view: ViewId::Issues,
        display_name: "Issues",
        anchor: "issues",
        reads_cursor: false,
        writes_cursor: false,
    },
    ViewKindInfo {
        view: ViewId::Tags,
        display_name: "Tags",
        anchor: "tags",
        reads_cursor: false,
        writes_cursor: false,
    },
    ViewKindInfo {
        view: ViewId::Memory,
        display_name: "Memory",
        anchor: "memory",
        reads_cursor: true,
        writes_cursor: true,
    },
];

/// All registered views, in tab order
pub fn build_registry() -> &'static [ViewKindInfo] {
    &REGISTRY
}

/// Look up the metadata of a view
pub fn info(view: ViewId) -> &'static ViewKindInfo {
    // REGISTRY is laid out in `ViewId::all()` order
    &REGISTRY[view as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_view() {
        let views: Vec<ViewId> = build_registry().iter().map(|i| i.view).collect();
        assert_eq!(views, ViewId::all());
    }

    #[test]
    fn test_info_lookup() {
        for view in ViewId::all() {
            let info = info(*view);
            assert_eq!(info.view, *view);
            assert_eq!(info.anchor, view.as_str());
        }
        assert!(info(ViewId::Memory).writes_cursor);
        assert!(!info(ViewId::Console).reads_cursor);
    }
}
